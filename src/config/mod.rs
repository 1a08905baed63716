// Configuration module for blockswap
// Target directory, extension and user-defined patches

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{BlockswapConfig, PatchSpec, LOCAL_CONFIG_FILE};
