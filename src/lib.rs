pub mod config;
pub mod error;
pub mod export;
pub mod gmsfeed;
pub mod model;
