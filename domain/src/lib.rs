//! Connection registry and broadcast fan-out.
//!
//! The `web` layer decodes inbound gateway events and hands them to an
//! [`EventRouter`], which mutates the [`Registry`] and asks the [`Dispatcher`]
//! to fan a message out over a [`PushChannel`]. Both the registry store and the
//! push channel are injected as trait objects, so neither the router nor the
//! dispatcher knows which backend or transport is behind them.

pub use entity_api::{connections, ConnectionId};
pub use events::{EventHandler, GatewayEvent};

pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod event_router;
pub mod gateway;
pub mod message;
pub mod push;

#[cfg(test)]
mod test_support;

pub use connection::{ConnectionStore, DatabaseConnectionStore, Registry};
pub use dispatcher::{BroadcastReport, Dispatcher};
pub use event_router::EventRouter;
pub use message::Message;
pub use push::PushChannel;
