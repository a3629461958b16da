//! Caller identity for the request workflow.
//!
//! Every handler receives an explicit [`Actor`] (resolved from the bearer
//! session by the JWT middleware) and passes it down into the domain actions:
//!
//! ```rust
//! use artisan_core::common::{Actor, Role, UserId};
//!
//! let actor = Actor::new(UserId::new(), Role::Buyer);
//! assert!(!actor.is_admin());
//! ```

mod actor;
mod errors;

pub use actor::{Actor, Role};
pub use errors::AuthError;
