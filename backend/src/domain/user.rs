//! User data model and field validation.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// A required field was absent from the payload.
    MissingField { field: &'static str },
    /// Identifier was not a positive integer.
    InvalidId,
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Username exceeded the column width.
    UsernameTooLong { max: usize },
    /// Email failed the address syntax check.
    InvalidEmail,
    /// Password was empty.
    EmptyPassword,
}

impl UserValidationError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::InvalidId => "id",
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable snake_case code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier assigned by the repository when a user is first stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(value: i32) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i32>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(value)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum username length, matching the `users.username` column.
pub const USERNAME_MAX: usize = 64;

/// Login name shown for the user. Not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = username.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum total address length.
pub const EMAIL_MAX: usize = 254;
/// Maximum length of the part before `@`.
pub const EMAIL_LOCAL_MAX: usize = 64;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Lengths are enforced separately; this constrains atoms and labels.
        // The top-level domain is alphabetic.
        let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
        let label = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
        let tld = r"[A-Za-z]{2,63}";
        let pattern = format!(r"^{atom}(?:\.{atom})*@(?:{label}\.)+{tld}$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address that passed the syntax check.
///
/// # Examples
/// ```
/// use users_service::domain::Email;
///
/// assert!(Email::new("aks@g.com").is_ok());
/// assert!(Email::new("aks@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate an email address. Input is not trimmed.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, _domain)) = email.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.chars().count() > EMAIL_LOCAL_MAX || !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account password, kept verbatim and wiped from memory on drop.
///
/// `Debug` never prints the secret; serialisation does.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a password. Whitespace is preserved.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Plain-text password.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.expose().to_owned()
    }
}

impl TryFrom<String> for Password {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn require(
    value: Option<String>,
    field: &'static str,
) -> Result<String, UserValidationError> {
    value.ok_or(UserValidationError::MissingField { field })
}

/// Candidate user awaiting an identifier from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    email: Email,
    password: Password,
}

impl NewUser {
    /// Build a candidate from validated components.
    pub fn new(username: Username, email: Email, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }

    /// Build a candidate from optional raw fields, as decoded from a payload.
    ///
    /// Fields are checked in order `username`, `email`, `password`; the first
    /// failure is returned.
    pub fn try_from_fields(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let username = Username::new(require(username, "username")?)?;
        let email = Email::new(require(email, "email")?)?;
        let password = Password::new(require(password, "password")?)?;
        Ok(Self::new(username, email, password))
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Requested password.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Attach the identifier assigned by the repository.
    pub fn with_id(self, id: UserId) -> User {
        let Self {
            username,
            email,
            password,
        } = self;
        User {
            id,
            username,
            email,
            password,
        }
    }
}

/// Partial replacement of a stored user's mutable fields.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    username: Option<Username>,
    email: Option<Email>,
    password: Option<Password>,
}

impl UserChanges {
    /// Validate whichever raw fields are present.
    pub fn try_from_fields(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: username.map(Username::new).transpose()?,
            email: email.map(Email::new).transpose()?,
            password: password.map(Password::new).transpose()?,
        })
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }

    /// Apply the changes to `user`, preserving its identifier.
    pub fn apply(self, user: User) -> User {
        let User {
            id,
            username,
            email,
            password,
        } = user;
        User {
            id,
            username: self.username.unwrap_or(username),
            email: self.email.unwrap_or(email),
            password: self.password.unwrap_or(password),
        }
    }
}

/// Stored application user.
///
/// ## Invariants
/// - `id` is positive and never changes once assigned.
/// - `username` is trimmed and non-empty; `email` passed the syntax check;
///   `password` is non-empty.
///
/// Serialises as `{"id":1,"username":"..","email":"..","password":".."}`.
/// `user_id` is accepted as an alias for `id` on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password: Password,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, email: Email, password: Password) -> Self {
        Self {
            id,
            username,
            email,
            password,
        }
    }

    /// Fallible constructor from raw values.
    pub fn try_from_parts(
        id: i32,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Username::new(username)?,
            Email::new(email)?,
            Password::new(password)?,
        ))
    }

    /// Repository-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDto {
    #[serde(alias = "user_id")]
    id: i32,
    username: String,
    email: String,
    password: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            username,
            email,
            password,
        } = value;
        Self {
            id: id.get(),
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.username, value.email, value.password)
    }
}
