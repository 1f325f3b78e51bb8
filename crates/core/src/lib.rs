#![forbid(unsafe_code)]

pub mod model;
pub mod quiz;
pub mod scorer;
pub mod sentence;
pub mod time;

pub use time::Clock;
