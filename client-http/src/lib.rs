pub mod api;
pub mod client;
pub mod error;
pub mod transport;

pub use api::user::UserApi;
pub use client::{BUSY_LABEL, DEFAULT_TIMEOUT_MS, RequestClient};
pub use error::RequestError;
pub use transport::{ReqwestTransport, Transport, TransportFailure, TransportRequest, TransportResponse};
