//! PanelState — everything the panel shows. Owned by the event loop; flow
//! outcomes and operator actions are the only writers.

use shark_proto::protocol::{DaemonConfig, StreamLinks};
use tracing::debug;

use crate::flows::FlowOutcome;
use crate::form::FormState;
use crate::notifier::Notifier;

#[derive(Debug, Default)]
pub struct PanelState {
    pub daemon_url: String,
    pub form: FormState,
    /// Stream link container; each successful status poll appends one entry.
    pub links: Vec<StreamLinks>,
    pub notifier: Notifier,
    /// Last configuration the daemon reported.
    pub loaded: Option<DaemonConfig>,
    /// Requests issued and not yet resolved.
    pub in_flight: usize,
}

impl PanelState {
    pub fn new(daemon_url: impl Into<String>) -> Self {
        Self {
            daemon_url: daemon_url.into(),
            ..Self::default()
        }
    }

    pub fn request_started(&mut self) {
        self.in_flight += 1;
    }

    /// Apply one flow's result. Every outcome except a stream link
    /// overwrites the status line.
    pub fn complete(&mut self, outcome: FlowOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            FlowOutcome::ConfigLoaded(cfg) => {
                self.form.apply_config(&cfg);
                self.loaded = Some(cfg);
                self.notifier.success("OK");
            }
            FlowOutcome::StreamFound(links) => {
                self.links.push(links);
            }
            FlowOutcome::Applied => self.notifier.success("OK"),
            FlowOutcome::Validated => self.notifier.success("Valid"),
            FlowOutcome::Failed { flow, message } => {
                debug!("[panel] {} -> error status {:?}", flow.label(), message);
                self.notifier.error(message);
            }
        }
    }

    /// Body for `PUT /config/validate`: the last loaded configuration (or
    /// the daemon's own defaults) with the form's edits on top.
    pub fn validation_request(&self) -> DaemonConfig {
        let base = self.loaded.clone().unwrap_or_default();
        base.with_edits(self.form.checked(), self.form.frequency())
    }

    pub fn latest_listen_url(&self) -> Option<&str> {
        self.links.last().map(|l| l.listen.as_str())
    }
}
