pub mod cli;
pub mod error;
pub mod github;
pub mod render;
pub mod server;
pub mod types;
