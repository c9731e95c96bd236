pub mod request_context;

pub use request_context::{
    make_span_with_request_id, request_id_middleware, RequestId, SessionId, REQUEST_ID_HEADER,
    SESSION_ID_HEADER,
};
