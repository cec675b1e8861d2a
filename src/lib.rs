pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;
pub mod routes;
pub mod stats;
pub mod views;

pub use config::Config;
pub use db::Dataset;
pub use routes::build_router;
