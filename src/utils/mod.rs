pub mod constants;
pub mod latlon;
pub mod time;
pub mod units;
