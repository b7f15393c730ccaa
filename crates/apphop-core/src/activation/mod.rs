//! Window activation: bring an already-running application forward.
//!
//! [`Activator`] owns the strategy chain and the caches it needs.
//! Strategies run one at a time in priority order; the first success wins.

pub mod activator;
pub mod automation;
pub mod errors;
pub mod helper;
pub mod launch;
pub mod strategies;
pub mod traits;
pub mod types;

pub use activator::{Activator, ActivatorBuilder, OpenOutcome};
pub use errors::LaunchError;
pub use helper::{HELPER_BINARY, HELPER_DONE, HelperClient};
pub use traits::ActivationStrategy;
pub use types::{ActivationOutcome, ActivationRequest, ActivationState, TargetApp};
