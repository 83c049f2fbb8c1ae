pub mod config;
pub mod dispatch;
pub mod fleet;
pub mod location;
pub mod matrix;
pub mod orders;
pub mod problem;
pub mod route;

mod newtype_index;
