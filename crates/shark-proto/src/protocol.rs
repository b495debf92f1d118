use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProtoError;

/// Transmission mode of the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modulation {
    Am,
    Fm,
}

impl Modulation {
    /// Case-insensitive parse. Unknown strings yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("am") {
            Some(Self::Am)
        } else if raw.eq_ignore_ascii_case("fm") {
            Some(Self::Fm)
        } else {
            None
        }
    }

    /// Canonical wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Fm => "FM",
        }
    }
}

impl std::fmt::Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration as reported by `GET /config/get`.
///
/// `modulation` stays as the raw string the daemon sent so that an
/// unrecognized value can be told apart from a missing one. `frequency` is
/// kept as text whether the daemon encoded it as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    pub modulation: String,
    #[serde(deserialize_with = "number_or_string")]
    pub frequency: String,
    #[serde(
        rename = "blue-led-intensity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blue_led_intensity: Option<u8>,
    #[serde(
        rename = "blue-led-pulse-rate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub blue_led_pulse_rate: Option<u8>,
    #[serde(rename = "red-led", default, skip_serializing_if = "Option::is_none")]
    pub red_led: Option<bool>,
}

impl DaemonConfig {
    pub fn from_json(body: &str) -> Result<Self, ProtoError> {
        serde_json::from_str(body).map_err(|e| ProtoError::decode("config", e))
    }

    pub fn modulation(&self) -> Option<Modulation> {
        Modulation::parse(&self.modulation)
    }

    /// Overlay operator edits on top of this configuration. A `None`
    /// modulation keeps whatever the daemon last reported.
    pub fn with_edits(&self, modulation: Option<Modulation>, frequency: &str) -> Self {
        let mut edited = self.clone();
        if let Some(m) = modulation {
            edited.modulation = m.as_str().to_string();
        }
        edited.frequency = frequency.to_string();
        edited
    }
}

impl Default for DaemonConfig {
    /// What rsharkd falls back to when it has no config file.
    fn default() -> Self {
        Self {
            modulation: Modulation::Fm.as_str().to_string(),
            frequency: "88.0".to_string(),
            blue_led_intensity: Some(127),
            blue_led_pulse_rate: Some(0),
            red_led: Some(false),
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected frequency as number or string, got {}",
            other
        ))),
    }
}

// ── Icecast status ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IceStatsEnvelope {
    icestats: IceStats,
}

#[derive(Debug, Deserialize)]
struct IceStats {
    source: Mounts,
}

/// Icecast reports a single mount as an object and several as an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Mounts {
    One(Mount),
    Many(Vec<Mount>),
}

#[derive(Debug, Deserialize)]
struct Mount {
    listenurl: String,
}

/// The part of Icecast's `status-json.xsl` the panel cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub listen_url: String,
}

impl StatusSnapshot {
    pub fn from_json(body: &str) -> Result<Self, ProtoError> {
        let envelope: IceStatsEnvelope =
            serde_json::from_str(body).map_err(|e| ProtoError::decode("stream status", e))?;
        let mount = match envelope.icestats.source {
            Mounts::One(m) => m,
            Mounts::Many(mounts) => mounts.into_iter().next().ok_or_else(|| {
                ProtoError::decode("stream status", serde_json::Error::custom("no live mounts"))
            })?,
        };
        Ok(Self {
            listen_url: mount.listenurl,
        })
    }

    pub fn links(&self) -> StreamLinks {
        StreamLinks {
            listen: self.listen_url.clone(),
            m3u: format!("{}.m3u", self.listen_url),
        }
    }
}

/// Direct stream link plus its playlist variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLinks {
    pub listen: String,
    pub m3u: String,
}

// ── Apply form ────────────────────────────────────────────────────────────────

/// Multipart body for `POST /config/apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyForm {
    pub modulation: Option<Modulation>,
    pub frequency: String,
}

impl ApplyForm {
    /// Field list in submission order. `modulation` is left out entirely
    /// when no radio is checked.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(2);
        if let Some(m) = self.modulation {
            fields.push(("modulation", m.as_str().to_string()));
        }
        fields.push(("frequency", self.frequency.clone()));
        fields
    }
}

/// Body the daemon sends with a non-200 reply. `error` is usually a
/// string, but any JSON value is accepted.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: serde_json::Value,
}

impl ErrorBody {
    /// Operator-facing text: strings unquoted, anything else as JSON.
    pub fn message(&self) -> String {
        match &self.error {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
