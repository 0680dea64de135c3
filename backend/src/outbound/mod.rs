//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user repository using Diesel ORM.
//! - **memory**: process-local user repository used when no database is
//!   configured and by the HTTP test suites.
//!
//! Adapters are thin translators between domain types and store
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
