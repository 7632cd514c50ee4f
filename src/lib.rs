pub mod config;
pub mod db;
pub mod router;
pub mod routes;
pub mod templates;
pub mod types;
pub mod utils;
