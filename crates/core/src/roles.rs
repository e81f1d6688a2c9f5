//! Caller roles and the authenticated caller identity.
//!
//! Role names must match the `role` claim issued by the auth provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

pub const ROLE_SELLER: &str = "seller";
pub const ROLE_BUYER: &str = "buyer";
pub const ROLE_ADMIN: &str = "admin";

/// The closed set of roles a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Property developer submitting listings.
    Seller,
    /// Housing-association buyer browsing published listings.
    Buyer,
    /// Reviewer with unrestricted access.
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Seller => ROLE_SELLER,
            Role::Buyer => ROLE_BUYER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_SELLER => Ok(Role::Seller),
            ROLE_BUYER => Ok(Role::Buyer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_SELLER}, {ROLE_BUYER}, {ROLE_ADMIN}"
            ))),
        }
    }
}

/// The authenticated identity a request is made on behalf of.
///
/// Passed explicitly into every query that depends on who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Whether this caller may modify a record owned by `owner_id`.
    ///
    /// Admins may modify anything; everyone else only their own records.
    pub fn may_modify(&self, owner_id: &str) -> bool {
        self.role.is_admin() || self.user_id == owner_id
    }
}
