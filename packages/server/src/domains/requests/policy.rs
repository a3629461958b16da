//! Who may see and change a request.
//!
//! Read access belongs to the two participants and to admins. Deletion
//! belongs to the buyer and to admins. Status and quotation changes are
//! additionally checked against the configured [`TransitionPolicy`].

use super::error::{RequestError, Result};
use super::models::{Request, RequestStatus};
use super::store::ParticipantScope;
use crate::common::{Actor, Role};

/// The caller's relationship to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Buyer,
    Artisan,
    Admin,
}

impl Party {
    /// Resolves the caller's side of `request`, or `None` for outsiders.
    ///
    /// A participant is matched by identity before role, so an admin who is
    /// also the buyer acts as the buyer.
    pub fn of(actor: &Actor, request: &Request) -> Option<Party> {
        if request.buyer == actor.user_id {
            Some(Party::Buyer)
        } else if request.artisan == actor.user_id {
            Some(Party::Artisan)
        } else if actor.is_admin() {
            Some(Party::Admin)
        } else {
            None
        }
    }
}

/// How strictly status changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Only defined lifecycle edges, each triggered by its owning side.
    #[default]
    Strict,
    /// Any party with access may set any status or quotation.
    Permissive,
}

impl std::str::FromStr for TransitionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "permissive" => Ok(TransitionPolicy::Permissive),
            other => Err(anyhow::anyhow!("Invalid transition policy: {}", other)),
        }
    }
}

impl TransitionPolicy {
    /// Checks that `party` may move a request from `from` to `to`.
    pub fn check_status(self, party: Party, from: RequestStatus, to: RequestStatus) -> Result<()> {
        if self == TransitionPolicy::Permissive || from == to {
            return Ok(());
        }
        if !from.can_transition_to(to) {
            return Err(RequestError::InvalidTransition { from, to });
        }
        match (party, to.triggered_by()) {
            (Party::Admin, _) => Ok(()),
            (party, Some(owner)) if party == owner => Ok(()),
            _ => Err(RequestError::Forbidden),
        }
    }

    /// Checks that `party` may attach a quotation to a request in `status`.
    pub fn check_quotation(self, party: Party, status: RequestStatus) -> Result<()> {
        if self == TransitionPolicy::Permissive {
            return Ok(());
        }
        if party == Party::Buyer {
            return Err(RequestError::Forbidden);
        }
        if status.is_terminal() {
            return Err(RequestError::validation(format!(
                "cannot quote on a {} request",
                status
            )));
        }
        Ok(())
    }
}

/// Which requests a list call returns for `actor`.
pub fn list_scope(actor: &Actor) -> ParticipantScope {
    match actor.role {
        Role::Buyer => ParticipantScope::Buyer(actor.user_id),
        Role::Artisan => ParticipantScope::Artisan(actor.user_id),
        Role::Admin => ParticipantScope::Everyone,
    }
}

/// Buyer, artisan or admin; anyone else is forbidden.
pub fn authorize_access(actor: &Actor, request: &Request) -> Result<Party> {
    Party::of(actor, request).ok_or(RequestError::Forbidden)
}

/// Only the buyer or an admin may delete.
pub fn authorize_delete(actor: &Actor, request: &Request) -> Result<()> {
    if request.buyer == actor.user_id || actor.is_admin() {
        Ok(())
    } else {
        Err(RequestError::Forbidden)
    }
}
