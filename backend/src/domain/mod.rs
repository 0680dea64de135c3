//! Domain primitives and ports.
//!
//! Purpose: define the strongly typed user entity, its validation contract,
//! and the transport-agnostic error payload shared by every adapter.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User, UserId, UserProfile, UserProfileDraft, UserField — the user entity
//!   and the five-field contract enforced on create and update.
//! - TraceId — request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    User, UserField, UserId, UserIdParseError, UserProfile, UserProfileDraft, UserValidationError,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
