//! The activation orchestrator.
//!
//! `activate` runs one pipeline per call:
//! query processes, then (if any) try each strategy in order until one
//! succeeds. Nothing is shared between calls except the helper path and
//! automation tool caches held by the [`Activator`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::activation::automation::AutomationLocator;
use crate::activation::errors::LaunchError;
use crate::activation::helper::HelperClient;
use crate::activation::launch::launch;
use crate::activation::strategies::{
    AutoHotkeyStrategy, HelperStrategy, TitleStrategy, WindowManagerStrategy, WscriptStrategy,
};
use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest, ActivationState, TargetApp};
use crate::config::AppHopConfig;
use crate::exec::{CommandRunner, SystemRunner};
use crate::matching::Scorer;
use crate::native::WindowCapability;
use crate::process::find_process_ids;
use crate::window::{WindowDescriptor, WindowHandle};

/// Result of `open`: an existing window came forward, or a new process started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Activated { strategy: &'static str },
    Launched { previous: ActivationState },
}

pub struct Activator {
    runner: Arc<dyn CommandRunner>,
    config: AppHopConfig,
    helper: Arc<HelperClient>,
    capability: WindowCapability,
    strategies: Vec<Box<dyn ActivationStrategy>>,
}

pub struct ActivatorBuilder {
    config: AppHopConfig,
    runner: Option<Arc<dyn CommandRunner>>,
    capability: Option<WindowCapability>,
    strategies: Option<Vec<Box<dyn ActivationStrategy>>>,
}

impl ActivatorBuilder {
    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn capability(mut self, capability: WindowCapability) -> Self {
        self.capability = Some(capability);
        self
    }

    /// Replace the standard strategy chain.
    pub fn strategies(mut self, strategies: Vec<Box<dyn ActivationStrategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    pub fn build(self) -> Activator {
        let config = self.config;
        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(SystemRunner) as Arc<dyn CommandRunner>);
        let capability = self.capability.unwrap_or_else(WindowCapability::detect);
        let helper = Arc::new(HelperClient::new(runner.clone(), &config));

        let strategies = self.strategies.unwrap_or_else(|| {
            standard_chain(&config, &runner, &helper, &capability)
        });

        debug!(
            event = "core.activation.chain_built",
            strategies = %strategies.iter().map(|s| s.name()).collect::<Vec<_>>().join(","),
            native_available = capability.is_available()
        );

        Activator {
            runner,
            config,
            helper,
            capability,
            strategies,
        }
    }
}

/// The fixed-priority chain, minus strategies disabled in config.
fn standard_chain(
    config: &AppHopConfig,
    runner: &Arc<dyn CommandRunner>,
    helper: &Arc<HelperClient>,
    capability: &WindowCapability,
) -> Vec<Box<dyn ActivationStrategy>> {
    let scorer = Scorer::new(config.scoring.weights());
    let activation_timeout = config.timeouts.activation();
    let locator = Arc::new(AutomationLocator::new(runner.clone(), config));

    let chain: Vec<Box<dyn ActivationStrategy>> = vec![
        Box::new(HelperStrategy::new(helper.clone(), scorer.clone())),
        Box::new(WscriptStrategy::new(runner.clone(), activation_timeout)),
        Box::new(AutoHotkeyStrategy::new(
            runner.clone(),
            locator,
            activation_timeout,
        )),
        Box::new(TitleStrategy::new(
            runner.clone(),
            scorer.clone(),
            config.timeouts.listing(),
            activation_timeout,
        )),
        Box::new(WindowManagerStrategy::new(capability.clone(), scorer)),
    ];

    chain
        .into_iter()
        .filter(|strategy| {
            let enabled = config.strategies.is_enabled(strategy.name());
            if !enabled {
                debug!(event = "core.activation.strategy_disabled", strategy = strategy.name());
            }
            enabled
        })
        .collect()
}

impl Activator {
    pub fn new(config: AppHopConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: AppHopConfig) -> ActivatorBuilder {
        ActivatorBuilder {
            config,
            runner: None,
            capability: None,
            strategies: None,
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Bring an already-running instance of `app` to the foreground.
    ///
    /// # Returns
    /// * `NotRunning` - no process runs the executable; no strategy was tried
    /// * `Activated` - the named strategy succeeded
    /// * `NotActivated` - every strategy declined or failed
    pub async fn activate(&self, app: &TargetApp) -> ActivationState {
        let path = app.path_str();
        info!(
            event = "core.activation.started",
            app = %app.display_name,
            path = %path
        );

        let pids = find_process_ids(self.runner.as_ref(), &self.config, &path).await;
        if pids.is_empty() {
            info!(
                event = "core.activation.completed",
                app = %app.display_name,
                state = "not_running"
            );
            return ActivationState::NotRunning;
        }

        let tokens = app.match_tokens();
        let request = ActivationRequest {
            app,
            pids: &pids,
            tokens: &tokens,
        };

        for strategy in &self.strategies {
            let outcome = strategy.try_activate(&request).await;
            log_outcome(strategy.name(), &outcome);

            if outcome.is_success() {
                info!(
                    event = "core.activation.completed",
                    app = %app.display_name,
                    state = "activated",
                    strategy = strategy.name()
                );
                return ActivationState::Activated {
                    strategy: strategy.name(),
                };
            }
        }

        info!(
            event = "core.activation.completed",
            app = %app.display_name,
            state = "not_activated",
            pids = %pids
        );
        ActivationState::NotActivated
    }

    /// Start a new instance of `app`.
    pub fn launch(&self, app: &TargetApp, args: &[String]) -> Result<(), LaunchError> {
        launch(
            self.runner.as_ref(),
            app,
            args,
            self.config.timeouts.activation(),
        )
    }

    /// Activate a running instance, otherwise launch a new one.
    ///
    /// A launch after `NotActivated` may duplicate a running instance the
    /// heuristics missed.
    pub async fn open(&self, app: &TargetApp, args: &[String]) -> Result<OpenOutcome, LaunchError> {
        if !app.path().is_file() {
            return Err(LaunchError::ExecutableNotFound {
                path: app.path_str(),
            });
        }

        match self.activate(app).await {
            ActivationState::Activated { strategy } => Ok(OpenOutcome::Activated { strategy }),
            previous => {
                self.launch(app, args)?;
                Ok(OpenOutcome::Launched { previous })
            }
        }
    }

    /// Currently open top-level windows, via the helper or else natively.
    pub async fn list_windows(&self) -> Vec<WindowDescriptor> {
        if let Some(helper) = self.helper.locate().await {
            match self.helper.list_windows(&helper).await {
                Ok(windows) => return windows,
                Err(e) => warn!(event = "core.windows.helper_list_failed", error = %e),
            }
        }

        let Some(manager) = self.capability.manager() else {
            debug!(event = "core.windows.no_source");
            return Vec::new();
        };
        match tokio::task::spawn_blocking(move || manager.list_windows()).await {
            Ok(windows) => windows,
            Err(e) => {
                warn!(event = "core.windows.native_list_failed", error = %e);
                Vec::new()
            }
        }
    }

    /// Foreground a listed window. A stale handle yields `false`.
    pub async fn switch_to(&self, handle: WindowHandle) -> bool {
        if let Some(helper) = self.helper.locate().await {
            match self.helper.activate(&helper, handle).await {
                Ok(true) => {
                    info!(event = "core.windows.switch_completed", hwnd = %handle, via = "helper");
                    return true;
                }
                Ok(false) => debug!(event = "core.windows.helper_switch_unconfirmed", hwnd = %handle),
                Err(e) => warn!(event = "core.windows.helper_switch_failed", hwnd = %handle, error = %e),
            }
        }

        let Some(manager) = self.capability.manager() else {
            return false;
        };
        let switched = tokio::task::spawn_blocking(move || manager.activate(handle))
            .await
            .unwrap_or(false);
        info!(
            event = "core.windows.switch_completed",
            hwnd = %handle,
            via = "native",
            switched = switched
        );
        switched
    }
}

fn log_outcome(strategy: &'static str, outcome: &ActivationOutcome) {
    match outcome {
        ActivationOutcome::Succeeded => {
            info!(event = "core.activation.strategy_succeeded", strategy = strategy);
        }
        ActivationOutcome::Declined { reason } => {
            info!(
                event = "core.activation.strategy_declined",
                strategy = strategy,
                reason = %reason
            );
        }
        ActivationOutcome::Failed { reason } => {
            warn!(
                event = "core.activation.strategy_failed",
                strategy = strategy,
                reason = %reason
            );
        }
    }
}
