// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation and CORS configuration

/// CORS configuration
pub mod cors;
/// Request ID and span helpers
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{
    make_request_span, request_id_from_headers, MakeRequestIdPrefixed, REQUEST_ID_HEADER,
};
