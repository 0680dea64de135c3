//! User data model and the five-field validation contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Required user fields, in the order they are validated and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    /// Given name.
    Firstname,
    /// Family name.
    Lastname,
    /// Contact address; not checked for format.
    Email,
    /// City of residence.
    City,
    /// Preferred language, free text.
    Language,
}

impl UserField {
    /// Every required field.
    pub const ALL: [UserField; 5] = [
        UserField::Firstname,
        UserField::Lastname,
        UserField::Email,
        UserField::City,
        UserField::Language,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            UserField::Firstname => "firstname",
            UserField::Lastname => "lastname",
            UserField::Email => "email",
            UserField::City => "city",
            UserField::Language => "language",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned when building a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// One or more required fields were absent or empty.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<UserField>),
}

fn join_fields(fields: &[UserField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Store-assigned user identifier.
///
/// Serialised as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Returned when a path segment is not an integer identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be an integer, got {raw:?}")]
pub struct UserIdParseError {
    raw: String,
}

impl UserId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| UserIdParseError {
            raw: s.to_owned(),
        })
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated user fields as submitted by a client.
///
/// Every field is optional so that absence is reported by
/// [`UserProfile::try_from`] rather than by the deserialiser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileDraft {
    /// Submitted `firstname`, if any.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Submitted `lastname`, if any.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Submitted `email`, if any.
    #[serde(default)]
    pub email: Option<String>,
    /// Submitted `city`, if any.
    #[serde(default)]
    pub city: Option<String>,
    /// Submitted `language`, if any.
    #[serde(default)]
    pub language: Option<String>,
}

impl UserProfileDraft {
    fn value(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Firstname => self.firstname.as_deref(),
            UserField::Lastname => self.lastname.as_deref(),
            UserField::Email => self.email.as_deref(),
            UserField::City => self.city.as_deref(),
            UserField::Language => self.language.as_deref(),
        }
    }

    /// Fields that are absent or empty, in [`UserField::ALL`] order.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{UserField, UserProfileDraft};
    ///
    /// let draft = UserProfileDraft {
    ///     firstname: Some("Emily".into()),
    ///     ..UserProfileDraft::default()
    /// };
    /// assert_eq!(draft.missing_fields().first(), Some(&UserField::Lastname));
    /// ```
    pub fn missing_fields(&self) -> Vec<UserField> {
        UserField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_none_or(str::is_empty))
            .collect()
    }
}

/// The five user attributes, each guaranteed non-empty.
///
/// Values are kept exactly as submitted; no trimming or case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserProfileDraft")]
pub struct UserProfile {
    firstname: String,
    lastname: String,
    email: String,
    city: String,
    language: String,
}

impl UserProfile {
    /// Build a profile from values already held by the store.
    ///
    /// Presence is enforced when users are written, so rows are mapped as-is.
    pub(crate) fn from_stored(
        firstname: String,
        lastname: String,
        email: String,
        city: String,
        language: String,
    ) -> Self {
        Self {
            firstname,
            lastname,
            email,
            city,
            language,
        }
    }

    /// The user's firstname.
    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    /// The user's lastname.
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// The user's email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The user's city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The user's language.
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl TryFrom<UserProfileDraft> for UserProfile {
    type Error = UserValidationError;

    fn try_from(draft: UserProfileDraft) -> Result<Self, Self::Error> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(UserValidationError::MissingFields(missing));
        }
        let UserProfileDraft {
            firstname,
            lastname,
            email,
            city,
            language,
        } = draft;
        Ok(Self {
            firstname: firstname.unwrap_or_default(),
            lastname: lastname.unwrap_or_default(),
            email: email.unwrap_or_default(),
            city: city.unwrap_or_default(),
            language: language.unwrap_or_default(),
        })
    }
}

impl From<UserProfile> for UserProfileDraft {
    fn from(value: UserProfile) -> Self {
        let UserProfile {
            firstname,
            lastname,
            email,
            city,
            language,
        } = value;
        Self {
            firstname: Some(firstname),
            lastname: Some(lastname),
            email: Some(email),
            city: Some(city),
            language: Some(language),
        }
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` was assigned by the store and never changes.
/// - every profile field is non-empty when written through the API.
///
/// Serialises as a flat object:
/// `{"id":1,"firstname":"Marie","lastname":"Martin","email":"x@wild.co","city":"Paris","language":"French"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    profile: UserProfile,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// The five user attributes.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: i64,
    firstname: String,
    lastname: String,
    email: String,
    city: String,
    language: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, profile } = value;
        let UserProfile {
            firstname,
            lastname,
            email,
            city,
            language,
        } = profile;
        Self {
            id: id.get(),
            firstname,
            lastname,
            email,
            city,
            language,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            firstname,
            lastname,
            email,
            city,
            language,
        } = value;
        let profile = UserProfile::try_from(UserProfileDraft {
            firstname: Some(firstname),
            lastname: Some(lastname),
            email: Some(email),
            city: Some(city),
            language: Some(language),
        })?;
        Ok(Self::new(UserId::new(id), profile))
    }
}
