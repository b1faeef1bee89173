//! Clients for talking back to the transport gateway.

pub mod management_api;
