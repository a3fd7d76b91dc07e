//! Request correlation ids
//!
//! Every request gets an id, taken from the browser's `X-Request-ID` header
//! when present, otherwise a fresh UUID v4. The id is stored in the request
//! extensions and echoed on the response so a failed submission can be
//! traced through the logs.

use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use std::future::{ready, Ready};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id of the current request, readable from handlers as an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdValue(pub String);

impl FromRequest for RequestIdValue {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Outside the middleware (unit tests) there is no id; make one up
        let id = req
            .extensions()
            .get::<RequestIdValue>()
            .cloned()
            .unwrap_or_else(|| RequestIdValue(Uuid::new_v4().to_string()));

        ready(Ok(id))
    }
}

/// Middleware function; mount with `actix_web::middleware::from_fn(request_id)`
pub async fn request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestIdValue(id.clone()));
    tracing::debug!(request_id = %id, method = %req.method(), path = %req.path(), "Request received");

    let mut res = next.call(req).await?;

    tracing::debug!(request_id = %id, status = res.status().as_u16(), "Request finished");
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(res)
}
