//! Process-execution boundary.
//!
//! Every OS query and activation primitive outside the optional in-process
//! window capability is reached by running an external program and reading
//! its stdout. All of that goes through [`CommandRunner`].

pub mod errors;
pub mod escape;
pub mod runner;
pub mod scratch;
pub mod types;

pub use errors::ExecError;
pub use runner::{CommandRunner, SystemRunner};
pub use scratch::{ScratchScript, ScriptEncoding};
pub use types::{CommandOutput, CommandSpec};
