//! Configuration system for seropool.
//! TOML-based: env > file > compiled defaults.

pub mod selection_config;
pub mod sero_config;

pub use selection_config::SelectionConfig;
pub use sero_config::SeroConfig;
