pub use super::connections::Entity as Connections;
