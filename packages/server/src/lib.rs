// Artisan Market - API Core
//
// Backend for commission requests between buyers and artisans. Domains live
// under domains/*, each with its models, store, actions and HTTP edges.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
