//! Tree VM CLI Library
//!
//! Provides the Runtime struct and supporting modules for the `treevm` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runtime::{encode_program, load_program, parse_program, PrintSink, Runtime};
