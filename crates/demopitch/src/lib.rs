pub mod config;
pub mod logging;
pub mod pitch;
pub mod providers;
pub mod resolution;
