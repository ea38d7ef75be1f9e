mod json;

pub(crate) use json::output_daily_json;
