//! shop-hex: hexagonal online-ordering API library (services + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use shop_types::{domain, ports, validator};

pub mod inbound; // HTTP adapter (routers, sessions, guard)
