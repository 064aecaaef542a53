//! Async HTTP client for the campus school-administration REST API.
//!
//! The server speaks plain JSON REST: `GET /api/<resource>` returns a
//! collection, `POST /api/<resource>` creates one record, `PUT
//! /api/<resource>/<id>` applies a partial update, `DELETE
//! /api/<resource>/<id>` removes one record. Dates travel as ISO-8601
//! strings and identifiers are server-assigned integers.
//!
//! Two surfaces are exposed:
//!
//! - **[`ApiClient::request`]** -- the generic executor: one network call per
//!   invocation, JSON body encoding, and an [`Error::Api`] carrying the HTTP
//!   status and response text for anything outside the 2xx range. The raw
//!   response is handed back for the caller to parse.
//! - **Typed endpoint wrappers** ([`endpoints`]) -- `list_students()`,
//!   `create_fee(..)`, and friends, which parse responses into the wire
//!   records in [`types`].
//!
//! Known limitations, preserved from the server's advertised interface: no
//! authentication headers, no pagination parameters, and no rate-limit
//! handling. `campus-core` layers caching and domain conversion on top.

mod client;
mod endpoints;
mod error;
mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
