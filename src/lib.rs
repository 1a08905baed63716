// blockswap - exact-match block replacement across a source tree

pub mod config;
pub mod error;
pub mod logging;
pub mod patch;
pub mod runner;
pub mod utils;

pub use error::{BlockswapError, BlockswapResult};
pub use logging::init_logging;
pub use patch::{Patch, PatchOutcome};
pub use runner::{run_chain, run_patch, FileReport, FileStatus, RunOptions, RunReport};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
