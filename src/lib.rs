pub mod cache;
pub mod cli;
pub mod config;
pub mod imagegen;
pub mod llm;
pub mod pipeline;
pub mod search;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::workflow::launch;
