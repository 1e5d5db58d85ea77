use thiserror::Error;

use crate::category::CookieCategory;
use crate::cookie::codec::CategoryChoices;

/// Hidden field whose presence marks the consent form as submitted.
pub const SUBMIT_FIELD: &str = "cookie_consent";

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum FormError {
    #[error("unknown form field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` is not a boolean: `{value}`")]
    InvalidValue { field: String, value: String },
}

/// Outcome of matching a request's form data against the consent schema.
#[derive(Debug, PartialEq)]
pub enum Submission {
    /// The request does not carry the consent form at all.
    NotSubmitted,

    /// The form was submitted but fails validation.
    Invalid(Vec<FormError>),

    /// A valid submission, with every category resolved to a boolean.
    Valid(CategoryChoices),
}

/// Validate raw urlencoded pairs against the consent form schema.
///
/// Every field must be a known category with a boolean value; categories
/// left out of the submission read as declined, the way an unchecked
/// checkbox never reaches the server.
pub fn parse_submission(pairs: &[(String, String)]) -> Submission {
    if !pairs.iter().any(|(field, _)| field == SUBMIT_FIELD) {
        return Submission::NotSubmitted;
    }

    let mut errors = Vec::new();
    let mut choices: CategoryChoices = CookieCategory::ALL.iter().map(|c| (*c, false)).collect();

    for (field, value) in pairs {
        if field == SUBMIT_FIELD {
            continue;
        }
        let Ok(category) = field.parse::<CookieCategory>() else {
            errors.push(FormError::UnknownField(field.clone()));
            continue;
        };
        match parse_bool(value) {
            Some(accepted) => {
                choices.insert(category, accepted);
            }
            None => errors.push(FormError::InvalidValue {
                field: field.clone(),
                value: value.clone(),
            }),
        }
    }

    if errors.is_empty() {
        Submission::Valid(choices)
    } else {
        Submission::Invalid(errors)
    }
}

// Browsers submit "on" for a bare checkbox; the rendered form sets
// value="true" explicitly.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "on" => Some(true),
        "false" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_marker_means_not_submitted() {
        assert_eq!(parse_submission(&[]), Submission::NotSubmitted);
        assert_eq!(
            parse_submission(&pairs(&[("analytics", "true")])),
            Submission::NotSubmitted,
        );
    }

    #[test]
    fn missing_categories_read_as_declined() {
        let Submission::Valid(choices) =
            parse_submission(&pairs(&[("cookie_consent", "1"), ("analytics", "true")]))
        else {
            panic!("expected a valid submission");
        };

        assert!(choices[&CookieCategory::Analytics]);
        assert!(!choices[&CookieCategory::Marketing]);
        assert!(!choices[&CookieCategory::Tracking]);
        assert!(!choices[&CookieCategory::Social]);
    }

    #[test]
    fn every_category_is_always_resolved() {
        let Submission::Valid(choices) = parse_submission(&pairs(&[("cookie_consent", "1")]))
        else {
            panic!("expected a valid submission");
        };
        assert_eq!(choices.len(), CookieCategory::ALL.len());
    }

    #[test]
    fn unknown_fields_invalidate() {
        let submission = parse_submission(&pairs(&[("cookie_consent", "1"), ("candy", "true")]));
        assert_eq!(
            submission,
            Submission::Invalid(vec![FormError::UnknownField("candy".to_owned())]),
        );
    }

    #[test]
    fn non_boolean_values_invalidate() {
        let submission =
            parse_submission(&pairs(&[("cookie_consent", "1"), ("analytics", "yes please")]));
        assert_eq!(
            submission,
            Submission::Invalid(vec![FormError::InvalidValue {
                field: "analytics".to_owned(),
                value: "yes please".to_owned(),
            }]),
        );
    }

    #[test]
    fn checkbox_style_values_parse() {
        let Submission::Valid(choices) = parse_submission(&pairs(&[
            ("cookie_consent", "1"),
            ("analytics", "on"),
            ("marketing", "false"),
        ])) else {
            panic!("expected a valid submission");
        };
        assert!(choices[&CookieCategory::Analytics]);
        assert!(!choices[&CookieCategory::Marketing]);
    }
}
