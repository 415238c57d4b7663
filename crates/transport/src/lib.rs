//! Outbound API transport with transparent request metadata.
//!
//! Every mutating request leaving the process is enriched with a `metaInfo`
//! provenance envelope (request id, client build, device identity) by an
//! interceptor pipeline registered at client construction time. Callers
//! never pass metadata explicitly — it is invisible plumbing.
//!
//! # Example
//!
//! ```ignore
//! use transport::{ApiClient, ClientInfo};
//!
//! # async fn example() -> transport::Result<()> {
//! let info = ClientInfo::new("412", "3.9.1", "b2fe6a1c-4f0e-4f3a");
//! let client = ApiClient::builder("https://api.example.com")
//!     .metadata(info)
//!     .build();
//!
//! // Body on the wire: { "metaInfo": { "requestId": ..., ... }, "name": "Shoes" }
//! let created = client.post("/categories", &serde_json::json!({ "name": "Shoes" })).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod envelope;
mod error;
mod info;
mod interceptor;
mod request;

pub use client::{ApiClient, ApiClientBuilder};
pub use envelope::{META_KEY, MetaInfo, Source};
pub use error::{Error, Result};
pub use info::{ClientInfo, InfoError};
pub use interceptor::{Interceptor, MetadataInterceptor};
pub use request::{Method, OutgoingRequest};
