//! shop-types: domain records, input validation and repository ports.

pub mod domain;
pub mod ports;
pub mod validator;
