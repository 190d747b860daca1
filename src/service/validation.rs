//! Request validation for account data.

use crate::entity::NewUser;
use crate::error::AppError;
use regex::Regex;

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.\-]{1,64}$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct RequestValidator;

impl RequestValidator {
    /// Username and password are required; email is optional but must look like one.
    pub fn validate_new_user(user: &NewUser) -> Result<(), AppError> {
        if user.username.is_empty() {
            return Err(AppError::InvalidParameter("Username not set".into()));
        }
        if user.password.is_empty() {
            return Err(AppError::InvalidParameter("Password not set".into()));
        }
        Self::validate_username(&user.username)?;
        if !user.email.is_empty() {
            Self::validate_email(&user.email)?;
        }
        Ok(())
    }

    pub fn validate_username(username: &str) -> Result<(), AppError> {
        validate_pattern("username", username, USERNAME_PATTERN)
    }

    pub fn validate_email(email: &str) -> Result<(), AppError> {
        validate_pattern("email", email, EMAIL_PATTERN)
    }
}

fn validate_pattern(field: &str, value: &str, pattern: &str) -> Result<(), AppError> {
    let re = Regex::new(pattern)
        .map_err(|_| AppError::InvalidParameter(format!("invalid pattern for {}", field)))?;
    if !re.is_match(value) {
        return Err(AppError::InvalidParameter(format!(
            "{} does not match required pattern",
            field
        )));
    }
    Ok(())
}
