pub mod cors;
pub mod frame;
pub mod server;
