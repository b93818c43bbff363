//! Form validation utilities

use regex::Regex;
use std::{collections::HashMap, sync::OnceLock};

/// Accumulated validation failures for one submitted form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    pub field_errors: HashMap<String, String>,
    pub non_field_errors: Vec<String>,
}

impl Validator {
    /// True when no check has failed
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` against `field`, keeping the first message per field
    pub fn add_field_error(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn add_non_field_error(&mut self, message: &str) {
        self.non_field_errors.push(message.to_string());
    }

    /// Record `message` against `field` if `ok` is false
    pub fn check_field(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_field_error(field, message);
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }
}

/// Email pattern recommended by the WHATWG for `<input type="email">`
pub fn email_rx() -> &'static Regex {
    static EMAIL_RX: OnceLock<Regex> = OnceLock::new();
    EMAIL_RX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("Failed to compile email regex")
    })
}

/// True if the value contains anything other than whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True if the value has at most `n` characters
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True if the value has at least `n` characters
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn permitted_value<T: PartialEq>(value: T, permitted: &[T]) -> bool {
    permitted.contains(&value)
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

pub fn equal(a: &str, b: &str) -> bool {
    a == b
}
