//! Request IDs echoed back to the menu and admin clients.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's id when it is safe to log and echo; otherwise mint a `UUIDv7`.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    match header_value.map(|value| value.trim().to_owned()) {
        Some(value) if is_acceptable(&value) => value,
        Some(rejected) if !rejected.is_empty() => {
            debug!(
                len = rejected.len(),
                "ignoring malformed inbound request id"
            );

            Uuid::now_v7().to_string()
        }
        _ => Uuid::now_v7().to_string(),
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.'))
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(request_id, "could not encode request id header: {source}");
        }
    }
}

/// Handlers that never set a status answered 200.
pub(super) fn status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}
