use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::common::entity_ids::UserId;

/// Marketplace role carried in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Buyer,
    Artisan,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Buyer => write!(f, "buyer"),
            Role::Artisan => write!(f, "artisan"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "artisan" => Ok(Role::Artisan),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated caller of a single API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Buyer, Role::Artisan, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "seller".parse::<Role>().unwrap_err();
        assert!(matches!(err, AuthError::UnknownRole(r) if r == "seller"));
    }

    #[test]
    fn test_only_admin_role_is_admin() {
        let id = UserId::new();
        assert!(Actor::new(id, Role::Admin).is_admin());
        assert!(!Actor::new(id, Role::Artisan).is_admin());
        assert!(!Actor::new(id, Role::Buyer).is_admin());
    }
}
