pub(crate) mod connection_controller;
pub(crate) mod event_controller;
pub(crate) mod health_check_controller;
