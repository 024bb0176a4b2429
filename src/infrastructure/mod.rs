pub mod config;
pub mod logging;
pub mod serial;
pub mod sim;
