use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use crate::errors::{AppError, ErrorCode};

/// Header the gateway sets after authenticating the caller.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Opaque identity of the authenticated caller, as placed in request
/// extensions by an upstream layer.
///
/// Extracting `CallerId` rejects with `401` when no identity is present.
/// Use `Option<CallerId>` for routes that allow anonymous access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CallerId>().cloned().ok_or_else(|| {
            AppError::Unauthorized(ErrorCode::Unauthorized.default_message().to_string())
                .into_response()
        })
    }
}

impl<S> OptionalFromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CallerId>().cloned())
    }
}

/// Copy the gateway-provided [`USER_ID_HEADER`] into request extensions.
///
/// Only mount this behind a gateway that strips the header from client
/// traffic. Requests without the header pass through unauthenticated; an
/// empty or non-UTF-8 value counts as absent.
pub async fn trusted_identity_header(mut request: Request, next: Next) -> Response {
    let caller = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(CallerId::new);

    if let Some(caller) = caller {
        tracing::trace!(caller = %caller.0, "Caller identity attached");
        request.extensions_mut().insert(caller);
    }

    next.run(request).await
}
