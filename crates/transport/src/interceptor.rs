//! Request interception pipeline.

use crate::envelope::{META_KEY, MetaInfo};
use crate::info::ClientInfo;
use crate::request::OutgoingRequest;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// A transform applied to an outbound request before it reaches the wire.
///
/// Stages run in registration order, each receiving the previous stage's
/// output. A stage either returns the request (possibly modified) or
/// rejects it; a rejected request never leaves the process. One request
/// in, one request out — stages must not retry, batch, or reorder.
pub trait Interceptor: Send + Sync {
    /// Stable stage name used in logs.
    fn name(&self) -> &'static str;

    fn intercept(&self, request: OutgoingRequest) -> Result<OutgoingRequest>;
}

/// Attaches a fresh [`MetaInfo`] envelope to every mutating request.
///
/// Read-only requests pass through untouched. Callers never supply the
/// envelope themselves; the `metaInfo` body key belongs to this stage, and
/// a payload that already carries one is rejected rather than overwritten.
pub struct MetadataInterceptor {
    info: ClientInfo,
}

impl MetadataInterceptor {
    pub fn new(info: ClientInfo) -> Self {
        Self { info }
    }
}

impl Interceptor for MetadataInterceptor {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn intercept(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest> {
        if !request.method.is_mutating() {
            return Ok(request);
        }

        let envelope = serde_json::to_value(MetaInfo::generate(&self.info))
            .map_err(|e| Error::Envelope(e.to_string()))?;

        let mut fields = match request.body.take() {
            None => Map::new(),
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                return Err(Error::Envelope(format!(
                    "mutating request body must be a JSON object, got {}",
                    json_type(&other)
                )));
            }
        };

        if fields.contains_key(META_KEY) {
            return Err(Error::Envelope(format!(
                "request body already carries a {META_KEY} field"
            )));
        }

        fields.insert(META_KEY.to_string(), envelope);
        request.body = Some(Value::Object(fields));
        Ok(request)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use serde_json::json;

    fn interceptor() -> MetadataInterceptor {
        MetadataInterceptor::new(ClientInfo::new("412", "3.9.1", "b2fe6a1c"))
    }

    #[test]
    fn mutating_request_gains_exactly_one_meta_key() {
        let request = OutgoingRequest::new(Method::Post, "/categories")
            .with_body(json!({ "name": "Shoes", "parent": null }));

        let request = interceptor().intercept(request).unwrap();
        let body = request.body.unwrap();
        let obj = body.as_object().unwrap();

        assert_eq!(obj.len(), 3);
        assert_eq!(obj["name"], "Shoes");
        assert_eq!(obj["parent"], Value::Null);
        assert_eq!(obj[META_KEY]["versionName"], "3.9.1");
        assert!(obj[META_KEY]["requestId"].is_string());
    }

    #[test]
    fn absent_payload_becomes_envelope_alone() {
        let request = OutgoingRequest::new(Method::Delete, "/roles/7");

        let request = interceptor().intercept(request).unwrap();
        let body = request.body.unwrap();
        let obj = body.as_object().unwrap();

        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key(META_KEY));
    }

    #[test]
    fn read_only_request_passes_through_untouched() {
        let request = OutgoingRequest::new(Method::Get, "/categories");

        let request = interceptor().intercept(request).unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn envelopes_are_unique_per_request() {
        let interceptor = interceptor();
        let id = |request: OutgoingRequest| {
            let request = interceptor.intercept(request).unwrap();
            request.body.unwrap()[META_KEY]["requestId"]
                .as_str()
                .unwrap()
                .to_string()
        };

        let a = id(OutgoingRequest::new(Method::Post, "/roles").with_body(json!({ "name": "a" })));
        let b = id(OutgoingRequest::new(Method::Post, "/roles").with_body(json!({ "name": "b" })));
        assert_ne!(a, b);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let request =
            OutgoingRequest::new(Method::Post, "/bulk").with_body(json!([{ "name": "x" }]));

        let err = interceptor().intercept(request).unwrap_err();
        assert!(matches!(err, Error::Envelope(_)));
    }

    #[test]
    fn caller_supplied_meta_is_rejected() {
        let request = OutgoingRequest::new(Method::Put, "/roles/7")
            .with_body(json!({ "name": "x", "metaInfo": { "requestId": "stale" } }));

        let err = interceptor().intercept(request).unwrap_err();
        assert!(matches!(err, Error::Envelope(_)));
    }
}
