pub mod time;

pub use time::{add_time, now, now_unix};
