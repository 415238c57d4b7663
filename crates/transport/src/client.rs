//! HTTP client fronted by the interceptor pipeline.

use crate::info::ClientInfo;
use crate::interceptor::{Interceptor, MetadataInterceptor};
use crate::request::{Method, OutgoingRequest};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Builder for creating an API client.
///
/// Interceptors are registered once here, at construction time, and run in
/// registration order on every request the built client sends.
pub struct ApiClientBuilder {
    base_url: String,
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            interceptors: Vec::new(),
        }
    }

    /// Register an interception stage.
    pub fn interceptor(mut self, stage: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Box::new(stage));
        self
    }

    /// Register the standard metadata stage for the given client identity.
    pub fn metadata(self, info: ClientInfo) -> Self {
        self.interceptor(MetadataInterceptor::new(info))
    }

    pub fn build(self) -> ApiClient {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: self.base_url,
            interceptors: self.interceptors,
        }
    }
}

/// JSON API client.
///
/// Callers build plain requests; the registered pipeline enriches them
/// before dispatch. A stage rejection fails that single request through
/// the ordinary error path and nothing is sent.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(OutgoingRequest::new(Method::Get, path)).await
    }

    pub async fn post(&self, path: &str, payload: &impl Serialize) -> Result<Value> {
        self.send_payload(Method::Post, path, payload).await
    }

    pub async fn put(&self, path: &str, payload: &impl Serialize) -> Result<Value> {
        self.send_payload(Method::Put, path, payload).await
    }

    pub async fn patch(&self, path: &str, payload: &impl Serialize) -> Result<Value> {
        self.send_payload(Method::Patch, path, payload).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(OutgoingRequest::new(Method::Delete, path)).await
    }

    async fn send_payload(
        &self,
        method: Method,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<Value> {
        let body = serde_json::to_value(payload).map_err(|e| Error::Body(e.to_string()))?;
        self.send(OutgoingRequest::new(method, path).with_body(body))
            .await
    }

    /// Run the pipeline over a request, then dispatch it.
    pub async fn send(&self, request: OutgoingRequest) -> Result<Value> {
        let request = self.apply_interceptors(request)?;
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self
            .http
            .request(request.method.into(), &url)
            .header("accept", "application/json");
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    fn apply_interceptors(&self, request: OutgoingRequest) -> Result<OutgoingRequest> {
        self.interceptors.iter().try_fold(request, |request, stage| {
            stage.intercept(request).inspect_err(|e| {
                warn!(stage = stage.name(), error = %e, "interceptor rejected request");
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pipeline_enriches_mutating_requests() {
        let client = ApiClient::builder("https://api.example.com")
            .metadata(ClientInfo::new("412", "3.9.1", "b2fe6a1c"))
            .build();

        let request = OutgoingRequest::new(Method::Post, "/categories")
            .with_body(json!({ "name": "Shoes" }));
        let request = client.apply_interceptors(request).unwrap();

        let body = request.body.unwrap();
        assert_eq!(body["name"], "Shoes");
        assert!(body["metaInfo"]["requestId"].is_string());
    }

    #[test]
    fn pipeline_leaves_reads_alone() {
        let client = ApiClient::builder("https://api.example.com")
            .metadata(ClientInfo::new("412", "3.9.1", "b2fe6a1c"))
            .build();

        let request = client
            .apply_interceptors(OutgoingRequest::new(Method::Get, "/categories"))
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn stages_run_in_registration_order() {
        struct Tag(&'static str);

        impl Interceptor for Tag {
            fn name(&self) -> &'static str {
                self.0
            }

            fn intercept(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest> {
                request.path.push_str(self.0);
                Ok(request)
            }
        }

        let client = ApiClient::builder("https://api.example.com")
            .interceptor(Tag("-a"))
            .interceptor(Tag("-b"))
            .build();

        let request = client
            .apply_interceptors(OutgoingRequest::new(Method::Get, "/x"))
            .unwrap();
        assert_eq!(request.path, "/x-a-b");
    }

    #[test]
    fn stage_rejection_aborts_the_request() {
        struct Veto;

        impl Interceptor for Veto {
            fn name(&self) -> &'static str {
                "veto"
            }

            fn intercept(&self, _request: OutgoingRequest) -> Result<OutgoingRequest> {
                Err(Error::Envelope("no".into()))
            }
        }

        let client = ApiClient::builder("https://api.example.com")
            .interceptor(Veto)
            .build();

        let result = client.apply_interceptors(OutgoingRequest::new(Method::Post, "/x"));
        assert!(result.is_err());
    }
}
