// shopfront/src/auth.rs

//! The requesting identity, passed explicitly into every operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
  Customer,
  Admin,
}

/// Who is making the request, as established by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
  pub user_id: Uuid,
  pub capability: Capability,
}

impl Actor {
  pub fn customer(user_id: Uuid) -> Self {
    Self {
      user_id,
      capability: Capability::Customer,
    }
  }

  pub fn admin(user_id: Uuid) -> Self {
    Self {
      user_id,
      capability: Capability::Admin,
    }
  }

  /// The one admin check. Back-office operations take the returned grant
  /// instead of re-checking the actor.
  pub fn authorize_admin(&self) -> ShopResult<AdminGrant> {
    match self.capability {
      Capability::Admin => Ok(AdminGrant { user_id: self.user_id }),
      Capability::Customer => {
        tracing::warn!(user_id = %self.user_id, "Admin operation refused for customer.");
        Err(ShopError::Forbidden)
      }
    }
  }

  /// Fails with `Forbidden` unless `owner` is this actor.
  pub(crate) fn ensure_owns(&self, owner: Uuid) -> ShopResult<()> {
    if owner == self.user_id {
      Ok(())
    } else {
      tracing::warn!(user_id = %self.user_id, %owner, "Ownership check failed.");
      Err(ShopError::Forbidden)
    }
  }
}

/// Proof that the admin capability was checked for this request.
/// Only `Actor::authorize_admin` can build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGrant {
  user_id: Uuid,
}

impl AdminGrant {
  pub fn user_id(&self) -> Uuid {
    self.user_id
  }
}
