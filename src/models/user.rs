//! Requesting-user identity, as handed over by the host's auth layer.

use crate::models::tournament::Tournament;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user account.
pub type UserId = Uuid;

/// Account role as assigned by the surrounding application.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Banned,
}

/// The authenticated identity behind a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Requester {
    pub id: UserId,
    pub role: UserRole,
}

impl Requester {
    /// Whether this user may run management actions (launch, score, delete)
    /// on the tournament: admins always, the creator for their own, banned
    /// accounts never.
    pub fn may_manage(&self, tournament: &Tournament) -> bool {
        match self.role {
            UserRole::Banned => false,
            UserRole::Admin => true,
            UserRole::User => tournament.creator_id == self.id,
        }
    }
}
