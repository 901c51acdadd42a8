// shopfront_app/src/web/auth.rs

//! Identity is established by the fronting auth layer; these extractors only read it.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use shopfront::{Actor, AdminGrant, Capability};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// The requesting user, read from `X-User-ID` and `X-User-Role`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub actor: Actor,
}

impl AuthenticatedUser {
  fn from_headers(req: &HttpRequest) -> Result<Self, AppError> {
    let user_id = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value.trim()).ok())
      .ok_or_else(|| {
        warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
        AppError::Auth("User authentication required.".to_string())
      })?;

    let capability = match req.headers().get(USER_ROLE_HEADER).and_then(|v| v.to_str().ok()) {
      Some(role) if role.trim().eq_ignore_ascii_case("admin") => Capability::Admin,
      _ => Capability::Customer,
    };

    Ok(Self {
      actor: Actor { user_id, capability },
    })
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Self::from_headers(req))
  }
}

/// An authenticated user that passed the admin check.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
  pub grant: AdminGrant,
}

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let result = AuthenticatedUser::from_headers(req).and_then(|user| {
      user
        .actor
        .authorize_admin()
        .map(|grant| AdminUser { grant })
        .map_err(AppError::from)
    });
    ready(result)
  }
}
