mod request_context;
mod request_id;

pub use request_context::RequestContext;
pub use request_id::RequestId;
