pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod faceit_api;
pub mod features;
pub mod fetch;
pub mod http_client;
pub mod pipeline;
