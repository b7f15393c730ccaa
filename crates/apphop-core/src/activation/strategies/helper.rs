use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::activation::helper::HelperClient;
use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest};
use crate::matching::Scorer;

/// Enumerate windows through the helper, pick the best match, and have the
/// helper foreground it by handle.
pub struct HelperStrategy {
    helper: Arc<HelperClient>,
    scorer: Scorer,
}

impl HelperStrategy {
    pub fn new(helper: Arc<HelperClient>, scorer: Scorer) -> Self {
        Self { helper, scorer }
    }
}

#[async_trait]
impl ActivationStrategy for HelperStrategy {
    fn name(&self) -> &'static str {
        "helper"
    }

    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome {
        let Some(helper) = self.helper.locate().await else {
            return ActivationOutcome::declined("helper executable not found");
        };

        let windows = match self.helper.list_windows(&helper).await {
            Ok(windows) => windows,
            Err(e) => return ActivationOutcome::declined(format!("helper list failed: {e}")),
        };

        let Some(best) = self
            .scorer
            .best_window(&windows, request.pids, request.tokens)
        else {
            return ActivationOutcome::declined(format!(
                "no window scored {} or more among {}",
                self.scorer.weights().window_threshold,
                windows.len()
            ));
        };

        debug!(
            event = "core.activation.helper_candidate",
            hwnd = %best.item.handle,
            pid = %best.item.pid,
            score = best.score,
            title = %best.item.title
        );

        match self.helper.activate(&helper, best.item.handle).await {
            Ok(true) => ActivationOutcome::Succeeded,
            Ok(false) => ActivationOutcome::failed("helper did not confirm activation"),
            Err(e) => ActivationOutcome::failed(format!("helper activate failed: {e}")),
        }
    }
}
