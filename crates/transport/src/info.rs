//! Static client identity the envelope is stamped from.

use crate::envelope::Source;
use serde::Deserialize;
use std::path::Path;

/// Build, device, and locale identity of this client installation.
///
/// Resolved once at startup — from code or from a TOML file — and shared by
/// every envelope the client stamps. Per-request fields (`requestId`) are
/// not part of this type.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    /// Origin channel reported to the server.
    #[serde(default)]
    pub source: Source,

    /// Numeric build identifier, as a string on the wire.
    pub version_code: String,

    /// Human-readable build identifier.
    pub version_name: String,

    /// Best-effort connectivity descriptor.
    #[serde(default = "default_network_type")]
    pub network_type: String,

    /// Stable device/browser identifier.
    pub device_id: String,

    /// Numeric platform code.
    #[serde(default)]
    pub device_os_code: u32,

    /// Platform name.
    #[serde(default = "default_os_name")]
    pub device_os_name: String,

    /// Human-readable device label.
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Client locale.
    #[serde(default = "default_language")]
    pub language: String,

    /// Best-effort geolocation.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_network_type() -> String {
    "unknown".to_string()
}

fn default_os_name() -> String {
    std::env::consts::OS.to_string()
}

fn default_device_name() -> String {
    "unknown".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl ClientInfo {
    /// Create a client identity with the required fields; everything else
    /// takes its default.
    pub fn new(
        version_code: impl Into<String>,
        version_name: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            source: Source::default(),
            version_code: version_code.into(),
            version_name: version_name.into(),
            network_type: default_network_type(),
            device_id: device_id.into(),
            device_os_code: 0,
            device_os_name: default_os_name(),
            device_name: default_device_name(),
            language: default_language(),
            latitude: None,
            longitude: None,
        }
    }

    /// Load client identity from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InfoError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse client identity from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, InfoError> {
        toml::from_str(toml).map_err(|e| InfoError::Parse(e.to_string()))
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_network_type(mut self, network_type: impl Into<String>) -> Self {
        self.network_type = network_type.into();
        self
    }

    pub fn with_device_os(mut self, code: u32, name: impl Into<String>) -> Self {
        self.device_os_code = code;
        self.device_os_name = name.into();
        self
    }

    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InfoError {
    #[error("failed to read client info: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse client info: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toml() {
        let toml = r#"
source = "Android"
version_code = "412"
version_name = "3.9.1"
device_id = "b2fe6a1c"
device_os_code = 33
device_os_name = "android"
device_name = "Pixel 8"
language = "nl"
"#;
        let info = ClientInfo::parse(toml).unwrap();
        assert_eq!(info.source, Source::Android);
        assert_eq!(info.device_os_code, 33);
        assert_eq!(info.network_type, "unknown");
        assert!(info.latitude.is_none());
    }

    #[test]
    fn parse_rejects_missing_device_id() {
        let toml = r#"
version_code = "412"
version_name = "3.9.1"
"#;
        assert!(ClientInfo::parse(toml).is_err());
    }

    #[test]
    fn builder_setters() {
        let info = ClientInfo::new("1", "0.1.0", "dev")
            .with_source(Source::Desktop)
            .with_language("de")
            .with_location(48.13, 11.57);
        assert_eq!(info.source, Source::Desktop);
        assert_eq!(info.language, "de");
        assert_eq!(info.longitude, Some(11.57));
    }
}
