pub mod logging;
pub mod request_id;

pub use logging::RequestLogLayer;
pub use request_id::{RequestId, RequestIdLayer};
