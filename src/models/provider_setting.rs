//! ProviderSetting entity model
//!
//! Per-provider credential state. The server only ever reports whether a key
//! is configured and a redacted hint; plaintext secrets travel client to
//! server once, on entry, and never round-trip back.

use serde::{Deserialize, Serialize};

/// Provider credential state as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSetting {
    /// Provider name (e.g., `openai`)
    pub provider: String,

    /// Whether a usable API key is configured
    pub has_api_key: bool,

    /// Redacted hint of the stored key, if any
    #[serde(default)]
    pub key_hint: Option<String>,

    /// Where the credential came from
    #[serde(default)]
    pub configured_via: Option<ConfiguredVia>,

    /// Last-update timestamp as reported by the server
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Source of a configured credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfiguredVia {
    Workspace,
    Environment,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ConfiguredVia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConfiguredVia::Workspace => "workspace",
            ConfiguredVia::Environment => "environment",
            ConfiguredVia::Unknown => "unknown",
        })
    }
}

/// Body for `PUT /v1/provider-settings/text/{provider}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderKeyUpdate {
    pub api_key: String,
}
