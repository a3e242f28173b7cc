pub mod booking;
pub mod daily;
pub mod display;
pub mod local_time;
pub mod resolver;
pub mod schedule;
pub mod time_of_day;
