pub mod api;
pub mod messages;

pub use api::{ApiResponse, Method, RequestDescriptor, RequestOptions};
