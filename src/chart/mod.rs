//! Chart rendering: axis scaling, bar colors and the SVG writer

mod axis;
mod color;
mod svg;

pub(crate) use svg::render;
