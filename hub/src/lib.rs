//! In-process WebSocket hub for the built-in gateway.
//!
//! When the broadcaster runs without an external transport gateway, the `web`
//! crate terminates WebSocket connections itself. Each socket gets an
//! outbound channel registered here under a server-generated connection id,
//! and the push channel delivers to sockets by looking that id up.
//!
//! # Message Flow
//!
//! 1. Client opens `/ws`; the handler registers an outbound channel and gets a
//!    [`ConnectionId`] back
//! 2. The handler reports CONNECT for that id to the event router
//! 3. A broadcast targets the id; [`ConnectionHub::send`] forwards the frame
//!    into the socket's channel and the socket task writes it out
//! 4. When the socket closes the handler unregisters the id and reports
//!    DISCONNECT
//!
//! The hub holds no durable state. Which connections receive a broadcast is
//! decided by the registry store, not by the hub.
//!
//! # Modules
//!
//! - `connection`: ConnectionHub and the type-safe ConnectionId

pub mod connection;

pub use connection::{ConnectionHub, ConnectionId, HubError};
