pub mod connection;
pub mod kv;
pub mod migrations;
pub mod records;

pub use connection::*;
pub use kv::*;
