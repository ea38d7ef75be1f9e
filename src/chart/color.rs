//! Bar colors interpolated in hue/lightness/saturation space

use std::fmt;

/// Color of a full-scale bar: rgb(0.9, 0.0, 0.0)
const HIGH: (f64, f64, f64) = (0.9, 0.0, 0.0);
/// Color of an empty bar: rgb(0.2, 0.9, 0.0)
const LOW: (f64, f64, f64) = (0.2, 0.9, 0.0);

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    /// Channels in [0, 1] truncated to 8 bits
    fn from_unit((r, g, b): (f64, f64, f64)) -> Self {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color for a bar filled to `ratio` of the axis ceiling.
///
/// 1.0 maps to the high endpoint, 0.0 to the low one.
pub(crate) fn color_for(ratio: f64) -> Rgb {
    let p = ratio.clamp(0.0, 1.0);
    let q = 1.0 - p;
    let high = rgb_to_hls(HIGH);
    let low = rgb_to_hls(LOW);
    let mixed = (
        high.0 * p + low.0 * q,
        high.1 * p + low.1 * q,
        high.2 * p + low.2 * q,
    );
    Rgb::from_unit(hls_to_rgb(mixed))
}

fn rgb_to_hls((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let l = sum / 2.0;
    if range == 0.0 {
        return (0.0, l, 0.0);
    }
    let s = if l <= 0.5 {
        range / sum
    } else {
        range / (2.0 - sum)
    };
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb((h, l, s): (f64, f64, f64)) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + ONE_THIRD),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - ONE_THIRD),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}
