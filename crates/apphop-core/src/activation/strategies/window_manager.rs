use async_trait::async_trait;
use tracing::debug;

use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest};
use crate::matching::Scorer;
use crate::native::WindowCapability;
use crate::window::WindowDescriptor;

/// In-process enumeration and foregrounding, when the capability exists.
pub struct WindowManagerStrategy {
    capability: WindowCapability,
    scorer: Scorer,
}

impl WindowManagerStrategy {
    pub fn new(capability: WindowCapability, scorer: Scorer) -> Self {
        Self { capability, scorer }
    }
}

#[async_trait]
impl ActivationStrategy for WindowManagerStrategy {
    fn name(&self) -> &'static str {
        "window-manager"
    }

    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome {
        let manager = match &self.capability {
            WindowCapability::Available(manager) => manager.clone(),
            WindowCapability::Unavailable { reason } => {
                return ActivationOutcome::declined(format!("window manager unavailable: {reason}"));
            }
        };

        let lister = manager.clone();
        let windows: Vec<WindowDescriptor> =
            match tokio::task::spawn_blocking(move || lister.list_windows()).await {
                Ok(windows) => windows
                    .into_iter()
                    .filter(|w| !w.title.trim().is_empty())
                    .collect(),
                Err(e) => return ActivationOutcome::declined(format!("window listing panicked: {e}")),
            };

        if windows.is_empty() {
            return ActivationOutcome::declined("window manager returned no windows");
        }

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

        let handle = best.item.handle;
        debug!(
            event = "core.activation.window_manager_candidate",
            hwnd = %handle,
            score = best.score,
            title = %best.item.title
        );

        match tokio::task::spawn_blocking(move || manager.activate(handle)).await {
            Ok(true) => ActivationOutcome::Succeeded,
            Ok(false) => ActivationOutcome::failed(format!("window {handle} could not be foregrounded")),
            Err(e) => ActivationOutcome::failed(format!("activation panicked: {e}")),
        }
    }
}
