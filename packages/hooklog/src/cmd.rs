pub mod read_monitor;
pub mod session;
pub mod setup;
