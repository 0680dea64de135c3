//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence module; repositories convert them
//! to and from domain types.

use diesel::prelude::*;

use crate::domain::{User, UserId, UserProfile};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub city: String,
    pub language: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let UserRow {
            id,
            firstname,
            lastname,
            email,
            city,
            language,
        } = row;
        User::new(
            UserId::new(id),
            UserProfile::from_stored(firstname, lastname, email, city, language),
        )
    }
}

/// Column values written by both inserts and full updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChanges<'a> {
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub city: &'a str,
    pub language: &'a str,
}

impl<'a> From<&'a UserProfile> for UserChanges<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            firstname: profile.firstname(),
            lastname: profile.lastname(),
            email: profile.email(),
            city: profile.city(),
            language: profile.language(),
        }
    }
}
