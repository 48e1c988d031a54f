mod client;
mod config;
mod repository;

pub use client::MongoStore;
pub use config::MongoConfig;
pub use repository::MongoReadingStore;
