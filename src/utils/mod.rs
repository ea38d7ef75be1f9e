pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::{parse_date, parse_timestamp, seconds_since_midnight, seconds_until_midnight};
pub(crate) use timezone::Timezone;
