pub mod prelude;

pub mod connections;

/// Identifier assigned to a live connection by the transport gateway.
/// Opaque to this system; compared only for equality.
pub type ConnectionId = String;
