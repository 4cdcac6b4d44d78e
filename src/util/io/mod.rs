pub mod bus;
pub mod discovery;
pub mod publisher;
pub mod transport;
