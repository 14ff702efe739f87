mod api;
mod error;
mod payload;

pub use api::JobApi;
pub use error::ApiError;
pub use payload::ImagePayload;
