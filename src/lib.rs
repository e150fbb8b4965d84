pub mod config;
pub mod credentials;
pub mod fetch;
pub mod output;
pub mod scoring;
pub mod sheets;
pub mod store;
