//! Activation strategy trait definition.

use async_trait::async_trait;

use crate::activation::types::{ActivationOutcome, ActivationRequest};

/// One independent mechanism for bringing the target's window forward.
///
/// Implementations convert every internal error into an
/// [`ActivationOutcome`]; nothing propagates to the chain.
#[async_trait]
pub trait ActivationStrategy: Send + Sync {
    /// Canonical name (e.g. "helper", "wscript"), as used in `[strategies]`.
    fn name(&self) -> &'static str;

    /// Attempt activation.
    ///
    /// # Returns
    /// * `Succeeded` - The target window was foregrounded and the mechanism confirmed it
    /// * `Declined` - The mechanism had nothing to act on
    /// * `Failed` - A candidate was found but activation was not confirmed
    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::types::TargetApp;
    use crate::process::ProcessIdSet;

    struct AlwaysDecline;

    #[async_trait]
    impl ActivationStrategy for AlwaysDecline {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn try_activate(&self, _request: &ActivationRequest<'_>) -> ActivationOutcome {
            ActivationOutcome::declined("mock")
        }
    }

    #[tokio::test]
    async fn test_strategy_is_object_safe() {
        let strategy: Box<dyn ActivationStrategy> = Box::new(AlwaysDecline);
        let app = TargetApp::new("Foo", r"C:\Foo\foo.exe");
        let pids = ProcessIdSet::new();
        let tokens = app.match_tokens();
        let request = ActivationRequest {
            app: &app,
            pids: &pids,
            tokens: &tokens,
        };

        assert_eq!(strategy.name(), "mock");
        assert_eq!(
            strategy.try_activate(&request).await,
            ActivationOutcome::declined("mock")
        );
    }
}
