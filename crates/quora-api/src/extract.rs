//! Request extractors

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use quora_shared::utils::strip_bearer;

/// Access token from the `authorization` header, raw or `Bearer <token>`.
/// A missing or non-UTF-8 header yields an empty token, which no session
/// matches.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(strip_bearer)
            .unwrap_or_default();
        Ok(Self(token.to_string()))
    }
}
