pub mod config;
pub mod error;
pub mod extractor;
pub mod server;
pub mod shutdown;
pub mod startup;
