//! Blocking client for the UNU task-management API.
//!
//! # Overview
//! The service exposes every operation through one endpoint: a form-encoded
//! POST carrying `api_key`, `action` and the action's fields, answered with a
//! JSON object. `UnuClient::send` is that raw round-trip; the typed methods in
//! [`actions`] build the fields for each action and decode the answer into a
//! [`Response`].
//!
//! # Design
//! - `UnuClient` holds only an immutable `ClientConfig` and a `Transport`.
//!   Calls share nothing, so a client can be used from many threads at once.
//! - Request building and response parsing are pure; the `Transport` trait
//!   is the only place I/O happens (`UreqTransport` in production).
//! - Failures are returned, never fatal: transport, decoding, and
//!   `success: false` each map to their own `ApiError` variant.
//!
//! ```no_run
//! use unu_core::UnuClient;
//!
//! let client = UnuClient::new("https://unu.im/api", "my-api-key");
//! let balance = client.get_balance()?;
//! println!("balance: {:?}", balance.balance);
//! # Ok::<(), unu_core::ApiError>(())
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lenient;
pub mod params;
pub mod response;

pub use actions::{RejectType, TaskSpec};
pub use client::{decode_response, UnuClient, ACTION_FIELD, TOKEN_FIELD};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use params::{IdList, ParamValue, Params};
pub use response::{Country, DayExpense, Folder, Report, ReportMessage, Response, Tariff, Task};
