pub mod analyzers;
pub mod config;
pub mod filter;
pub mod loader;
pub mod output;
