pub mod client;
pub mod sink;
pub mod transport;
