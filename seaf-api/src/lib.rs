//! Async request layer for the Seafile file-browser API.
//!
//! [`SeafileClient`] exposes one method per operation. Each call builds a
//! fresh [`RequestSpec`] (see [`ops`]), hands it to a [`Transport`], and runs
//! the reply through its [`ResponseRule`]. The outcome is either the
//! typed value or a single [`ApiError`].

mod account;
mod client;
mod completion;
mod dirent;
mod error;
mod interpret;
pub mod ops;
mod request;
mod transport;
mod types;

pub use account::Account;
pub use client::SeafileClient;
pub use completion::Completion;
pub use dirent::{Dirent, DirentType, InvalidObjectId, ObjectId, decode_dirents};
pub use error::{ApiError, ApiErrorClass, ApiErrorKind, TransportError};
pub use interpret::{Payload, RawReply, ResponseRule, interpret};
pub use request::{Endpoint, HttpMethod, RequestSpec};
pub use transport::{ReqwestTransport, Transport};
pub use types::{DownloadLink, FileCommit, FileDetail, StarredFile};
