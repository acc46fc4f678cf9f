//! Login and registration forms.
//!
//! There is no identity provider behind these yet: a valid submission only
//! yields the route to navigate to.

use crate::error::ValidationError;

pub const HOME_ROUTE: &str = "/home";
pub const LOGIN_ROUTE: &str = "/";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Route to open after a successful login.
    pub fn submit(&self) -> Result<&'static str, ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        Ok(HOME_ROUTE)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Route to open after a successful registration (the login screen).
    pub fn submit(&self) -> Result<&'static str, ValidationError> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(LOGIN_ROUTE)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
