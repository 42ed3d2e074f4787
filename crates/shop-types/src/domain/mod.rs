pub mod item;
pub mod order;
pub mod principal;
pub mod record;
pub mod role;
pub mod user;
