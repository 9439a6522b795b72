pub mod config;
pub mod logging;
pub mod os;
pub mod series;
