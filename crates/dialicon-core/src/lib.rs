pub mod clock_icon;
pub mod config;
pub mod services;

mod test_utils;
