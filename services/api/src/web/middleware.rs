//! services/api/src/web/middleware.rs
//!
//! Device identification middleware.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};
use uuid::Uuid;

pub const DEVICE_COOKIE: &str = "device";

/// One browser. Each device has its own local storage and view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId(pub Uuid);

/// Reads the device id from its cookie and puts it into the request extensions
/// for handlers to use.
///
/// A request without a valid cookie is treated as a new device: it gets a fresh
/// id, and the response sets the cookie.
pub async fn identify_device(mut req: Request, next: Next) -> Response {
    // 1. Extract and parse the device cookie, if any
    let existing = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(device_from_cookie_header);

    // 2. Fall back to a new device
    let (device, is_new) = match existing {
        Some(device) => (device, false),
        None => (Uuid::new_v4(), true),
    };

    // 3. Insert the device into request extensions
    req.extensions_mut().insert(DeviceId(device));

    // 4. Continue to the handler
    let mut response = next.run(req).await;

    // 5. Hand the new id back to the browser
    if is_new {
        debug!("Issuing device id {}", device);
        let cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            DEVICE_COOKIE,
            device,
            chrono::Duration::days(365).num_seconds()
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => error!("Failed to build device cookie: {:?}", e),
        }
    }
    response
}

fn device_from_cookie_header(cookie_header: &str) -> Option<Uuid> {
    cookie_header
        .split(';')
        .find_map(|c| c.trim().strip_prefix(DEVICE_COOKIE)?.strip_prefix('='))
        .and_then(|id| Uuid::parse_str(id).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_device_among_other_cookies() {
        let id = Uuid::new_v4();
        let header = format!("theme=dark; device={}; other=1", id);
        assert_eq!(device_from_cookie_header(&header), Some(id));
    }

    #[test]
    fn rejects_missing_or_malformed_ids() {
        assert_eq!(device_from_cookie_header("theme=dark"), None);
        assert_eq!(device_from_cookie_header("device=not-a-uuid"), None);
    }
}
