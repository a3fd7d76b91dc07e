use actix_web::{dev::Payload, http::header::HeaderMap, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::core::{AppError, SessionContext};

pub const COMPANY_ID_HEADER: &str = "X-Company-Id";
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Builds the caller's [`SessionContext`] from request headers.
///
/// The browser's session cookie is exchanged upstream; by the time a request
/// reaches this service it carries the company and user ids as headers and
/// the backend token as a bearer `Authorization` header.
impl FromRequest for SessionContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_from_headers(req.headers()))
    }
}

pub fn session_from_headers(headers: &HeaderMap) -> Result<SessionContext, AppError> {
    let company_id = positive_id(headers, COMPANY_ID_HEADER)?;
    let user_id = positive_id(headers, USER_ID_HEADER)?;

    let mut session = SessionContext::new(company_id, user_id);

    if let Some(token) = headers
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        session = session.with_access_token(token);
    }

    Ok(session)
}

fn positive_id(headers: &HeaderMap, name: &str) -> Result<i64, AppError> {
    let raw = headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(format!("Missing {} header", name)))?;

    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::unauthorized(format!("Invalid {} header", name))),
    }
}
