//! Field validation with aggregated, human-readable messages

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Brazilian phone numbers: `+55` followed by 10 or 11 ASCII digits
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+55[0-9]{10,11}$").expect("phone pattern is a valid regex")
});

/// A validation rule applied to a single named field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The value must not be empty
    Required,
    /// The value must be a `+55` phone number
    PhoneFormat,
}

impl Rule {
    /// Tag reported in generic failure messages
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::PhoneFormat => "phone_format",
        }
    }

    fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::PhoneFormat => PHONE_PATTERN.is_match(value),
        }
    }
}

/// The rules that apply to one field of an input, with the field's value
#[derive(Debug, Clone)]
pub struct FieldRules<'a> {
    pub field: &'static str,
    pub value: &'a str,
    pub rules: &'static [Rule],
}

impl<'a> FieldRules<'a> {
    pub fn new(field: &'static str, value: &'a str, rules: &'static [Rule]) -> Self {
        Self { field, value, rules }
    }
}

/// Inputs that declare their validation rules
pub trait Validate {
    /// Field checks, in reporting order
    fn field_rules(&self) -> Vec<FieldRules<'_>>;
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: Rule,
    pub value: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rule {
            Rule::PhoneFormat => write!(
                f,
                "Invalid phone number '{}'. Expected format: '+55XXXXXXXXXX' or '+55XXXXXXXXXXX'.",
                self.value
            ),
            _ => write!(
                f,
                "Field validation for '{}' failed on the '{}' tag.",
                self.field,
                self.rule.tag()
            ),
        }
    }
}

/// Every violation found in one input; displays as the concatenated messages
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .violations.iter().map(ToString::to_string).collect::<String>())]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

/// Evaluates [`Validate`] inputs
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Checks every field; each field reports at most its first failed rule
    pub fn validate(&self, input: &impl Validate) -> Result<(), ValidationErrors> {
        let violations: Vec<FieldViolation> = input
            .field_rules()
            .into_iter()
            .filter_map(|field| {
                field
                    .rules
                    .iter()
                    .find(|rule| !rule.check(field.value))
                    .map(|rule| FieldViolation {
                        field: field.field,
                        rule: *rule,
                        value: field.value.to_string(),
                    })
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { violations })
        }
    }
}
