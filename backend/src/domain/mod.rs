//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed user values and the lifecycle service that
//! both HTTP handlers and persistence adapters agree on. Keep types immutable
//! and document invariants and serialisation contracts in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier.
//! - User, NewUser, UserChanges and their field newtypes.
//! - UserService: implements the `UsersCommand` and `UsersQuery` ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, NewUser, Password, User, UserChanges, UserId, UserValidationError, Username,
};
pub use self::user_service::UserService;
