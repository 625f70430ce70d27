pub mod badging;
pub mod compositor;
pub mod profile;
pub mod time;
