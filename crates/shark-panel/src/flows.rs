//! Request flows. Each one issues a single request, runs the response through
//! the shared completion rule and resolves to a [`FlowOutcome`] that the
//! event loop applies to the panel.

use tracing::{debug, info, warn};

use shark_proto::client::Transport;
use shark_proto::endpoints::Endpoints;
use shark_proto::protocol::{ApplyForm, DaemonConfig, StatusSnapshot, StreamLinks};
use shark_proto::response::ApiResponse;
use shark_proto::ProtoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    LoadConfig,
    PollStatus,
    Apply,
    Validate,
}

impl FlowKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadConfig => "load config",
            Self::PollStatus => "stream status",
            Self::Apply => "apply",
            Self::Validate => "validate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    ConfigLoaded(DaemonConfig),
    StreamFound(StreamLinks),
    Applied,
    Validated,
    Failed { flow: FlowKind, message: String },
}

/// Non-200 goes to the error message; 200 goes to `on_ok`. A 200 body that
/// `on_ok` cannot decode is reported like any other failure.
fn settle<F>(flow: FlowKind, resp: ApiResponse, on_ok: F) -> FlowOutcome
where
    F: FnOnce(String) -> Result<FlowOutcome, ProtoError>,
{
    let status = resp.status;
    match resp.into_result() {
        Ok(body) => match on_ok(body) {
            Ok(outcome) => {
                debug!("[flow] {} ok", flow.label());
                outcome
            }
            Err(e) => {
                warn!("[flow] {}: {}", flow.label(), e);
                FlowOutcome::Failed {
                    flow,
                    message: e.to_string(),
                }
            }
        },
        Err(message) => {
            warn!(
                "[flow] {} failed (status {:?}): {}",
                flow.label(),
                status,
                message
            );
            FlowOutcome::Failed { flow, message }
        }
    }
}

pub async fn load_config<T: Transport>(transport: &T, endpoints: &Endpoints) -> FlowOutcome {
    info!("[flow] GET {}", endpoints.config_get);
    let resp = transport.get(&endpoints.config_get).await;
    settle(FlowKind::LoadConfig, resp, |body| {
        DaemonConfig::from_json(&body).map(FlowOutcome::ConfigLoaded)
    })
}

pub async fn poll_status<T: Transport>(transport: &T, endpoints: &Endpoints) -> FlowOutcome {
    info!("[flow] GET {}", endpoints.stream_status);
    let resp = transport.get(&endpoints.stream_status).await;
    settle(FlowKind::PollStatus, resp, |body| {
        StatusSnapshot::from_json(&body).map(|snap| FlowOutcome::StreamFound(snap.links()))
    })
}

pub async fn apply<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    form: &ApplyForm,
) -> FlowOutcome {
    info!(
        "[flow] POST {} modulation={:?} frequency={:?}",
        endpoints.config_apply, form.modulation, form.frequency
    );
    let resp = transport.post_form(&endpoints.config_apply, form).await;
    settle(FlowKind::Apply, resp, |_| Ok(FlowOutcome::Applied))
}

pub async fn validate<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    config: &DaemonConfig,
) -> FlowOutcome {
    info!("[flow] PUT {}", endpoints.config_validate);
    let resp = transport.put_json(&endpoints.config_validate, config).await;
    settle(FlowKind::Validate, resp, |_| Ok(FlowOutcome::Validated))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shark_proto::protocol::Modulation;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned responses keyed by URL; records what was sent.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub responses: HashMap<String, ApiResponse>,
        pub forms: Mutex<Vec<ApplyForm>>,
        pub puts: Mutex<Vec<DaemonConfig>>,
    }

    impl FakeTransport {
        pub fn with(mut self, url: &str, resp: ApiResponse) -> Self {
            self.responses.insert(url.to_string(), resp);
            self
        }

        fn lookup(&self, url: &str) -> ApiResponse {
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(ApiResponse::transport_failure)
        }
    }

    impl Transport for FakeTransport {
        async fn get(&self, url: &str) -> ApiResponse {
            self.lookup(url)
        }

        async fn post_form(&self, url: &str, form: &ApplyForm) -> ApiResponse {
            self.forms.lock().unwrap().push(form.clone());
            self.lookup(url)
        }

        async fn put_json(&self, url: &str, config: &DaemonConfig) -> ApiResponse {
            self.puts.lock().unwrap().push(config.clone());
            self.lookup(url)
        }
    }

    pub(crate) fn endpoints() -> Endpoints {
        Endpoints::from_daemon_url("http://shark:8080").unwrap()
    }

    #[tokio::test]
    async fn test_load_config_decodes() {
        let ep = endpoints();
        let fake = FakeTransport::default().with(
            &ep.config_get,
            ApiResponse::new(200, r#"{"modulation":"fm","frequency":88.5}"#),
        );
        match load_config(&fake, &ep).await {
            FlowOutcome::ConfigLoaded(cfg) => {
                assert_eq!(cfg.modulation(), Some(Modulation::Fm));
                assert_eq!(cfg.frequency, "88.5");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_server_error() {
        let ep = endpoints();
        let fake = FakeTransport::default().with(
            &ep.config_get,
            ApiResponse::new(400, r#"{"error":"bad frequency"}"#),
        );
        assert_eq!(
            load_config(&fake, &ep).await,
            FlowOutcome::Failed {
                flow: FlowKind::LoadConfig,
                message: "bad frequency".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_load_config_malformed_body_fails_without_panicking() {
        let ep = endpoints();
        let fake =
            FakeTransport::default().with(&ep.config_get, ApiResponse::new(200, "not json"));
        match load_config(&fake, &ep).await {
            FlowOutcome::Failed { flow, message } => {
                assert_eq!(flow, FlowKind::LoadConfig);
                assert!(message.starts_with("malformed config"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poll_status_builds_links() {
        let ep = endpoints();
        let fake = FakeTransport::default().with(
            &ep.stream_status,
            ApiResponse::new(
                200,
                r#"{"icestats":{"source":{"listenurl":"http://host/stream"}}}"#,
            ),
        );
        assert_eq!(
            poll_status(&fake, &ep).await,
            FlowOutcome::StreamFound(StreamLinks {
                listen: "http://host/stream".to_string(),
                m3u: "http://host/stream.m3u".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_poll_status_missing_listenurl_fails() {
        let ep = endpoints();
        let fake = FakeTransport::default().with(
            &ep.stream_status,
            ApiResponse::new(200, r#"{"icestats":{"source":{}}}"#),
        );
        assert!(matches!(
            poll_status(&fake, &ep).await,
            FlowOutcome::Failed {
                flow: FlowKind::PollStatus,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_has_empty_message() {
        let ep = endpoints();
        let fake = FakeTransport::default();
        assert_eq!(
            poll_status(&fake, &ep).await,
            FlowOutcome::Failed {
                flow: FlowKind::PollStatus,
                message: String::new()
            }
        );
    }

    #[tokio::test]
    async fn test_apply_ignores_success_body() {
        let ep = endpoints();
        let fake = FakeTransport::default()
            .with(&ep.config_apply, ApiResponse::new(200, "<<whatever>>"));
        let form = ApplyForm {
            modulation: None,
            frequency: "100".to_string(),
        };
        assert_eq!(apply(&fake, &ep, &form).await, FlowOutcome::Applied);
        assert_eq!(fake.forms.lock().unwrap()[0], form);
    }

    #[tokio::test]
    async fn test_apply_opaque_error() {
        let ep = endpoints();
        let fake = FakeTransport::default()
            .with(&ep.config_apply, ApiResponse::new(500, "internal failure"));
        let form = ApplyForm {
            modulation: Some(Modulation::Am),
            frequency: "600".to_string(),
        };
        assert_eq!(
            apply(&fake, &ep, &form).await,
            FlowOutcome::Failed {
                flow: FlowKind::Apply,
                message: "internal failure".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_validate_sends_config() {
        let ep = endpoints();
        let fake =
            FakeTransport::default().with(&ep.config_validate, ApiResponse::new(200, ""));
        let cfg = DaemonConfig::default().with_edits(Some(Modulation::Am), "700");
        assert_eq!(validate(&fake, &ep, &cfg).await, FlowOutcome::Validated);
        assert_eq!(fake.puts.lock().unwrap()[0].frequency, "700");
    }
}
