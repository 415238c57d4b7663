//! The request provenance envelope.

use crate::info::ClientInfo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved body key the envelope is nested under. Nesting, rather than
/// flattening, guarantees envelope fields can never collide with payload
/// fields.
pub const META_KEY: &str = "metaInfo";

/// Origin channel of an outbound request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[default]
    Website,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Desktop,
}

/// Provenance metadata attached to every mutating request.
///
/// Generated fresh per request and discarded after transmission; only
/// `requestId` varies between envelopes stamped from the same
/// [`ClientInfo`]. Field names below are the wire names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfo {
    pub request_id: String,
    pub source: Source,
    pub version_code: String,
    pub version_name: String,
    pub network_type: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "deviceOSCode")]
    pub device_os_code: u32,
    #[serde(rename = "deviceOSName")]
    pub device_os_name: String,
    pub device_name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl MetaInfo {
    /// Stamp a fresh envelope for one outbound request.
    ///
    /// `requestId` is a v4 UUID drawn from a thread-safe random source, so
    /// concurrent callers need no coordination to stay unique.
    pub fn generate(info: &ClientInfo) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            source: info.source,
            version_code: info.version_code.clone(),
            version_name: info.version_name.clone(),
            network_type: info.network_type.clone(),
            device_id: info.device_id.clone(),
            device_os_code: info.device_os_code,
            device_os_name: info.device_os_name.clone(),
            device_name: info.device_name.clone(),
            language: info.language.clone(),
            latitude: info.latitude,
            longitude: info.longitude,
        }
    }
}
