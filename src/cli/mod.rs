//! Command line interface for CDRKIT.
//!
//! Defines argument parsing (`args`), CLI error types (`errors`), and the
//! orchestration logic (`runner`) that wires user options to the library API
//! in `cdrkit::api`. Embedders should call the library API directly instead
//! of going through this module.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
