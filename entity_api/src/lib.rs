pub use entity::{connections, ConnectionId};

pub mod connection;
pub mod error;
