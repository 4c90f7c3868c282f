//! Client-side checks run on every keystroke of the signup form.

use std::fmt;

use crate::models::SignupForm;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Signup form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::Email => "email",
        })
    }
}

/// `None` when the password is acceptable or not typed yet.
pub fn validate_password(secret: &str) -> Option<String> {
    let len = secret.chars().count();
    if len == 0 {
        return None;
    }
    if len < MIN_PASSWORD_LEN || !secret.chars().any(|c| c.is_ascii_digit()) {
        return Some(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long and include at least one numerical value"
        ));
    }
    None
}

/// `None` when `email` ends with `suffix`. An empty email is an error.
pub fn validate_email(email: &str, suffix: &str) -> Option<String> {
    if email.ends_with(suffix) {
        None
    } else {
        Some(format!("Email must be from a {suffix} domain"))
    }
}

/// Per-field errors of the signup form. Any present error blocks submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupErrors {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl SignupErrors {
    /// Recompute the password and email errors for `form`.
    pub fn check(form: &SignupForm, email_suffix: &str) -> Self {
        Self {
            username: None,
            password: validate_password(&form.secret),
            email: validate_email(&form.email, email_suffix),
        }
    }

    /// Set the server-reported username error.
    pub fn set_username(&mut self, message: impl Into<String>) {
        self.username = Some(message.into());
    }

    /// Editing the username clears whatever the server said about it.
    pub fn username_changed(&mut self) {
        self.username = None;
    }

    pub fn is_blocking(&self) -> bool {
        self.first().is_some()
    }

    /// First field with an error, in form order.
    pub fn first(&self) -> Option<Field> {
        if self.username.is_some() {
            Some(Field::Username)
        } else if self.password.is_some() {
            Some(Field::Password)
        } else if self.email.is_some() {
            Some(Field::Email)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), None);
        assert!(validate_password("a").is_some());
        assert!(validate_password("abc1234").is_some());
        assert!(validate_password("abcdefgh").is_some());
        assert_eq!(validate_password("abcdefg1"), None);
        assert_eq!(validate_password("12345678"), None);
        assert_eq!(validate_password("secret123"), None);
    }

    #[test]
    fn test_password_property() {
        let samples = [
            "", "1", "1234567", "abcdefg", "abcdefgh", "abcdefg1", "passw0rdlong",
            "ééééééé1", "no digits here at all",
        ];
        for p in samples {
            let len = p.chars().count();
            let expected = (1..=7).contains(&len)
                || (len >= 8 && !p.chars().any(|c| c.is_ascii_digit()));
            assert_eq!(validate_password(p).is_some(), expected, "password {p:?}");
        }
    }

    #[test]
    fn test_password_counts_characters_not_bytes() {
        // 7 characters, 14 bytes.
        assert!(validate_password("ééééé1é").is_some());
        assert_eq!(validate_password("éééééé1é"), None);
    }

    #[test]
    fn test_email_suffix() {
        let suffix = "greenriver.edu";
        assert!(validate_email("", suffix).is_some());
        assert!(validate_email("alice@gmail.com", suffix).is_some());
        assert!(validate_email("alice@greenriver.edu.com", suffix).is_some());
        assert_eq!(validate_email("alice@greenriver.edu", suffix), None);
        assert_eq!(validate_email("bob@mail.greenriver.edu", suffix), None);
        assert_eq!(
            validate_email("x@y.z", suffix).unwrap(),
            "Email must be from a greenriver.edu domain"
        );
    }

    #[test]
    fn test_signup_errors_block_submission() {
        let mut form = SignupForm {
            username: "alice".to_string(),
            secret: "short".to_string(),
            email: "alice@greenriver.edu".to_string(),
            ..Default::default()
        };
        let errors = SignupErrors::check(&form, "greenriver.edu");
        assert!(errors.is_blocking());
        assert_eq!(errors.first(), Some(Field::Password));

        form.secret = "longenough1".to_string();
        let mut errors = SignupErrors::check(&form, "greenriver.edu");
        assert!(!errors.is_blocking());

        errors.set_username("Username already exists");
        assert_eq!(errors.first(), Some(Field::Username));
        errors.username_changed();
        assert!(!errors.is_blocking());
    }
}
