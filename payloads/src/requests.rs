use crate::{MAX_PAGE_SIZE, PAGE_SIZE, TimelineScope, UserId};
use serde::{Deserialize, Serialize};

pub const EMAIL_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const USERNAME_MAX_LEN: usize = 20;
pub const GOBI_MAX_LEN: usize = 10;
pub const POST_CONTENT_MAX_LEN: usize = 200;

/// Validation result for post content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContentValidation {
    Valid,
    Empty,
    TooLong,
    /// The post does not contain the author's gobi.
    MissingGobi { gobi: String },
}

impl PostContentValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Empty => Some("Please enter some content".to_string()),
            Self::TooLong => Some(format!(
                "Posts must be at most {POST_CONTENT_MAX_LEN} characters"
            )),
            Self::MissingGobi { gobi } => {
                Some(format!("Your post must include your gobi \"{gobi}\""))
            }
        }
    }
}

/// Validate a post against the author's current gobi.
///
/// Rules:
/// - not blank
/// - at most 200 characters
/// - contains the gobi literally, anywhere in the text
pub fn validate_post_content(
    content: &str,
    gobi: &str,
) -> PostContentValidation {
    if content.trim().is_empty() {
        return PostContentValidation::Empty;
    }
    if content.chars().count() > POST_CONTENT_MAX_LEN {
        return PostContentValidation::TooLong;
    }
    if !content.contains(gobi) {
        return PostContentValidation::MissingGobi {
            gobi: gobi.to_string(),
        };
    }
    PostContentValidation::Valid
}

/// Validation result for a single required, length-limited profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidation {
    Valid,
    Empty,
    TooLong,
}

impl FieldValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    fn check(value: &str, max_len: usize) -> Self {
        if value.trim().is_empty() {
            Self::Empty
        } else if value.chars().count() > max_len {
            Self::TooLong
        } else {
            Self::Valid
        }
    }
}

pub fn validate_username(username: &str) -> FieldValidation {
    FieldValidation::check(username, USERNAME_MAX_LEN)
}

pub fn validate_gobi(gobi: &str) -> FieldValidation {
    FieldValidation::check(gobi, GOBI_MAX_LEN)
}

pub fn username_error_message(validation: FieldValidation) -> Option<String> {
    match validation {
        FieldValidation::Valid => None,
        FieldValidation::Empty => Some("Username is required".to_string()),
        FieldValidation::TooLong => Some(format!(
            "Username must be at most {USERNAME_MAX_LEN} characters"
        )),
    }
}

pub fn gobi_error_message(validation: FieldValidation) -> Option<String> {
    match validation {
        FieldValidation::Valid => None,
        FieldValidation::Empty => Some("Gobi is required".to_string()),
        FieldValidation::TooLong => Some(format!(
            "Gobi must be at most {GOBI_MAX_LEN} characters"
        )),
    }
}

/// Validation result for the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupValidation {
    Valid,
    EmailRequired,
    InvalidEmail,
    EmailTooLong,
    PasswordTooShort,
    PasswordMismatch,
}

impl SignupValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::EmailRequired => {
                Some("Please enter your email address".to_string())
            }
            Self::InvalidEmail => {
                Some("Please enter a valid email address".to_string())
            }
            Self::EmailTooLong => Some(format!(
                "Email must be at most {EMAIL_MAX_LEN} characters"
            )),
            Self::PasswordTooShort => Some(format!(
                "Password must be at least {PASSWORD_MIN_LEN} characters"
            )),
            Self::PasswordMismatch => {
                Some("Passwords do not match".to_string())
            }
        }
    }
}

/// Loose structural check: one `@` with something on both sides and a dot
/// somewhere in the domain. Deliverability is not our concern.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub fn validate_signup(details: &CreateAccount) -> SignupValidation {
    if details.email.is_empty() {
        return SignupValidation::EmailRequired;
    }
    if details.email.chars().count() > EMAIL_MAX_LEN {
        return SignupValidation::EmailTooLong;
    }
    if !is_plausible_email(&details.email) {
        return SignupValidation::InvalidEmail;
    }
    if details.password.chars().count() < PASSWORD_MIN_LEN {
        return SignupValidation::PasswordTooShort;
    }
    if details.password != details.password_confirm {
        return SignupValidation::PasswordMismatch;
    }
    SignupValidation::Valid
}

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Serialize, Deserialize)]
pub struct DeleteAccount {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub username: String,
    pub gobi: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadAvatar {
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    pub content: String,
}

/// A zero-indexed, fixed-size slice of an ordered feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// The first page at the standard page size, used to seed feeds.
    pub fn first() -> Self {
        Self::new(0, PAGE_SIZE)
    }

    pub fn is_valid(&self) -> bool {
        self.page_size > 0 && self.page_size <= MAX_PAGE_SIZE
    }

    /// Row offset of the first item in this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub scope: TimelineScope,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPosts {
    pub user_id: UserId,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedPosts {
    pub user_id: UserId,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPosts {
    pub query: String,
    pub page: PageRequest,
}
