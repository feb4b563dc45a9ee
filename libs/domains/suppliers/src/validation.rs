//! Declarative validation rules.
//!
//! Each type lists its rules in a static table: per field, an ordered list
//! of `(code, message, predicate)`. [`validate`] walks the table and
//! collects every failing rule, so the whole body is reported at once.
//! Errors are `validator::ValidationErrors` and render like any other
//! validation failure in the API.

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::models::SupplierPayload;

/// A single check on `T`. `check` returns `true` when the value is acceptable.
pub struct Rule<T: 'static> {
    pub code: &'static str,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

/// Ordered rules for one field.
pub struct FieldRules<T: 'static> {
    pub field: &'static str,
    pub rules: &'static [Rule<T>],
}

/// Types that carry a rule table.
pub trait Validated: Sized + 'static {
    const RULES: &'static [FieldRules<Self>];
}

/// Run every rule of `T` against `value`.
pub fn validate<T: Validated>(value: &T) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in T::RULES {
        for rule in field.rules {
            if !(rule.check)(value) {
                let mut error = ValidationError::new(rule.code);
                error.message = Some(Cow::Borrowed(rule.message));
                errors.add(field.field, error);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// `not_empty` passes on a missing value so absent fields only report `required`.
fn present(value: &Option<String>) -> bool {
    value.is_some()
}

fn not_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| !v.trim().is_empty())
}

impl Validated for SupplierPayload {
    const RULES: &'static [FieldRules<Self>] = &[
        FieldRules {
            field: "name",
            rules: &[
                Rule {
                    code: "required",
                    message: "Name is required",
                    check: |s| present(&s.name),
                },
                Rule {
                    code: "not_empty",
                    message: "Name must not be empty",
                    check: |s| not_blank(&s.name),
                },
            ],
        },
        FieldRules {
            field: "document",
            rules: &[
                Rule {
                    code: "required",
                    message: "Document is required",
                    check: |s| present(&s.document),
                },
                Rule {
                    code: "not_empty",
                    message: "Document must not be empty",
                    check: |s| not_blank(&s.document),
                },
            ],
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate(&SupplierPayload::new("Acme", "123")).is_ok());
    }

    #[test]
    fn test_missing_fields_report_required_only() {
        let errors = validate(&SupplierPayload::default()).unwrap_err();

        assert_eq!(codes(&errors, "name"), vec!["required"]);
        assert_eq!(codes(&errors, "document"), vec!["required"]);
    }

    #[test]
    fn test_blank_fields_report_not_empty() {
        let errors = validate(&SupplierPayload::new("   ", "")).unwrap_err();

        assert_eq!(codes(&errors, "name"), vec!["not_empty"]);
        assert_eq!(codes(&errors, "document"), vec!["not_empty"]);
    }

    #[test]
    fn test_only_failing_field_is_reported() {
        let payload = SupplierPayload {
            document: None,
            ..SupplierPayload::new("Acme", "ignored")
        };
        let errors = validate(&payload).unwrap_err();

        assert!(codes(&errors, "name").is_empty());
        assert_eq!(codes(&errors, "document"), vec!["required"]);
    }

    #[test]
    fn test_error_messages_come_from_table() {
        let errors = validate(&SupplierPayload::default()).unwrap_err();
        let name_errors = errors.field_errors();
        let message = name_errors["name"][0].message.as_deref();

        assert_eq!(message, Some("Name is required"));
    }

    #[test]
    fn test_is_active_is_not_validated() {
        let payload = SupplierPayload::new("Acme", "123").active();
        assert!(validate(&payload).is_ok());
    }
}
