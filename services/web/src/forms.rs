//! Decoded HTML forms and their validation rules
//!
//! Every form carries its own [`Validator`]. Missing fields decode to their
//! default values so that validation, not decoding, reports them.

use serde::Deserialize;

use crate::validator::{
    Validator, email_rx, equal, matches, max_chars, min_chars, not_blank, permitted_value,
};

pub const BLANK: &str = "This field cannot be blank";
pub const INVALID_EMAIL: &str = "This field must be a valid email address";
pub const TOO_SHORT: &str = "This field must be at least 8 characters long";

/// Expiry windows, in days, a snippet may be created with
pub const PERMITTED_EXPIRES: [i32; 3] = [1, 7, 365];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(skip)]
    pub validation: Validator,
}

impl SnippetCreateForm {
    /// Blank form as first shown, with one year preselected
    pub fn new() -> Self {
        Self {
            expires: 365,
            ..Default::default()
        }
    }

    pub fn validate(&mut self) -> bool {
        let v = &mut self.validation;
        v.check_field(not_blank(&self.title), "title", BLANK);
        v.check_field(
            max_chars(&self.title, 100),
            "title",
            "This field cannot be more than 100 characters long",
        );
        v.check_field(not_blank(&self.content), "content", BLANK);
        v.check_field(
            permitted_value(self.expires, &PERMITTED_EXPIRES),
            "expires",
            "This field must equal 1, 7 or 365",
        );
        v.valid()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validation: Validator,
}

impl UserSignupForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validation;
        v.check_field(not_blank(&self.name), "name", BLANK);
        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(matches(&self.email, email_rx()), "email", INVALID_EMAIL);
        v.check_field(not_blank(&self.password), "password", BLANK);
        v.check_field(min_chars(&self.password, 8), "password", TOO_SHORT);
        v.valid()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserLoginForm {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validation: Validator,
}

impl UserLoginForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validation;
        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(matches(&self.email, email_rx()), "email", INVALID_EMAIL);
        v.check_field(not_blank(&self.password), "password", BLANK);
        v.valid()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordUpdateForm {
    pub current_password: String,
    pub new_password: String,
    #[serde(rename = "newPasswordConfirmation")]
    pub confirm_password: String,
    #[serde(skip)]
    pub validation: Validator,
}

impl PasswordUpdateForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validation;
        v.check_field(not_blank(&self.current_password), "currentPassword", BLANK);
        v.check_field(not_blank(&self.new_password), "newPassword", BLANK);
        v.check_field(
            not_blank(&self.confirm_password),
            "newPasswordConfirmation",
            BLANK,
        );
        v.check_field(min_chars(&self.new_password, 8), "newPassword", TOO_SHORT);
        v.check_field(
            equal(&self.new_password, &self.confirm_password),
            "newPasswordConfirmation",
            "Passwords do not match",
        );
        v.valid()
    }
}
