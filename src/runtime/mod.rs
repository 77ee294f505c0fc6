//! Server runtime: configuration and the hyper accept loop.

mod config;
mod server;

pub use config::ParrotConfig;
pub use server::ParrotServer;
