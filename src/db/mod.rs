pub mod query;
pub mod service;
pub mod session;

pub use service::DbService;
