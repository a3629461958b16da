//! Typed ID definitions for the marketplace entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for users (buyers, artisans, admins).
pub struct User;

/// Marker type for catalogue products.
pub struct Product;

/// Marker type for commission / inquiry / quote requests.
pub struct CommissionRequest;

/// Marker type for issued sessions (the JWT `jti`).
pub struct Session;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type ProductId = Id<Product>;

pub type RequestId = Id<CommissionRequest>;

pub type SessionId = Id<Session>;
