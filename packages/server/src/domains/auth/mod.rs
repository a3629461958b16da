//! Auth domain - session tokens and their revocation
//!
//! Users and their credentials live with the external auth collaborator; this
//! domain only issues, verifies and revokes the bearer sessions it hands out.

pub mod jwt;
pub mod sessions;

pub use jwt::{Claims, JwtService};
pub use sessions::{MemorySessionRegistry, PostgresSessionRegistry, SessionRegistry};
