//! Request lifecycle states and the transition table.
//!
//! ```text
//! pending ──┬──> reviewing ──┬──> accepted ──> completed
//!           │                ├──> rejected
//!           │                └──> cancelled
//!           ├──> accepted
//!           ├──> rejected
//!           └──> cancelled
//! ```
//!
//! `completed`, `rejected` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};

use crate::domains::requests::policy::Party;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::Reviewing,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }

    /// Returns true if `self → next` is a defined edge of the lifecycle.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Reviewing)
                | (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Reviewing, Accepted)
                | (Reviewing, Rejected)
                | (Reviewing, Cancelled)
                | (Accepted, Completed)
        )
    }

    /// Which side of the request may move it into `self`.
    ///
    /// Admins may trigger any defined edge and are not listed here.
    pub fn triggered_by(self) -> Option<Party> {
        match self {
            RequestStatus::Reviewing
            | RequestStatus::Accepted
            | RequestStatus::Rejected
            | RequestStatus::Completed => Some(Party::Artisan),
            RequestStatus::Cancelled => Some(Party::Buyer),
            RequestStatus::Pending => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Reviewing => write!(f, "reviewing"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Rejected => write!(f, "rejected"),
            RequestStatus::Completed => write!(f, "completed"),
            RequestStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "reviewing" => Ok(RequestStatus::Reviewing),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid request status: {}", s)),
        }
    }
}
