mod auth;
mod items;
mod orders;
mod server;
pub mod session;
mod users;

pub use server::{AppState, HttpServer, HttpServerConfig};
pub use session::{AdminPrincipal, SessionStore};
