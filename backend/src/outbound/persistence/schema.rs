//! Diesel table definition for the users table.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User records. `id` is assigned by the store on insert.
    users (id) {
        id -> Int8,
        firstname -> Varchar,
        lastname -> Varchar,
        email -> Varchar,
        city -> Varchar,
        language -> Varchar,
    }
}
