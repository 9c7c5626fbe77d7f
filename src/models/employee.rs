//! Employee model and related types.
//!
//! This module defines the Employee representation returned by the API and
//! the payload accepted when creating or updating one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shift::Shift;
use super::validation::{FieldErrors, NOT_BLANK, Nullable, UpdateMode, as_text, nullable, take};

/// Maximum number of characters in an employee name.
pub const MAX_NAME_LENGTH: usize = 100;

/// An employee together with the shifts that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-generated identifier.
    pub id: i32,
    /// The employee's name.
    pub name: String,
    /// Every shift assigned to this employee. Read-only.
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

/// Request body for creating or updating an employee.
///
/// `id`, `shifts` and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePayload {
    /// The employee's name, kept raw until checked.
    #[serde(default, deserialize_with = "nullable")]
    pub name: Nullable<Value>,
}

/// Validated field values taken from an [`EmployeePayload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    /// New name, trimmed.
    pub name: Option<String>,
}

impl EmployeeChanges {
    /// Returns true if the payload changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl EmployeePayload {
    /// Checks the payload's fields, recording every problem in `errors`.
    pub fn check(self, mode: UpdateMode, errors: &mut FieldErrors) -> EmployeeChanges {
        let name = take("name", self.name, mode, errors).and_then(|value| {
            as_text(value)
                .and_then(|name| validate_name(&name))
                .map_err(|message| errors.add("name", message))
                .ok()
        });

        EmployeeChanges { name }
    }
}

/// Trims a name and checks it is neither blank nor too long.
///
/// # Examples
///
/// ```
/// use shift_roster::models::validate_name;
///
/// assert_eq!(validate_name("  Alice "), Ok("Alice".to_string()));
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {MAX_NAME_LENGTH} characters."
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftWindow;
    use crate::models::validation::{NOT_A_STRING, NOT_NULL, REQUIRED};
    use proptest::prelude::*;

    fn payload(json: &str) -> EmployeePayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_serialize_employee_with_nested_shifts() {
        let employee = Employee {
            id: 1,
            name: "Alice".to_string(),
            shifts: vec![Shift {
                id: 1,
                employee: 1,
                start_time: ShiftWindow::Day,
            }],
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Alice",
                "shifts": [{"id": 1, "employee": 1, "start_time": 8}]
            })
        );
    }

    #[test]
    fn test_check_trims_name() {
        let mut errors = FieldErrors::default();
        let changes = payload(r#"{"name": "  Bob  "}"#).check(UpdateMode::Full, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(changes.name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_check_ignores_read_only_fields() {
        let mut errors = FieldErrors::default();
        let changes = payload(r#"{"id": 5, "name": "Carol", "shifts": [{"id": 1}]}"#)
            .check(UpdateMode::Full, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(changes.name.as_deref(), Some("Carol"));
    }

    #[test]
    fn test_check_requires_name_when_full() {
        let mut errors = FieldErrors::default();
        let changes = payload("{}").check(UpdateMode::Full, &mut errors);

        assert!(changes.is_empty());
        assert_eq!(errors.get("name"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_partial_check_accepts_empty_body() {
        let mut errors = FieldErrors::default();
        let changes = payload("{}").check(UpdateMode::Partial, &mut errors);

        assert!(changes.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_rejects_null_and_blank_names() {
        let mut errors = FieldErrors::default();
        payload(r#"{"name": null}"#).check(UpdateMode::Partial, &mut errors);
        assert_eq!(errors.get("name"), Some(&[NOT_NULL.to_string()][..]));

        let mut errors = FieldErrors::default();
        payload(r#"{"name": "   "}"#).check(UpdateMode::Full, &mut errors);
        assert_eq!(errors.get("name"), Some(&[NOT_BLANK.to_string()][..]));
    }

    #[test]
    fn test_check_converts_numeric_name_and_rejects_other_types() {
        let mut errors = FieldErrors::default();
        let changes = payload(r#"{"name": 5}"#).check(UpdateMode::Full, &mut errors);
        assert!(errors.is_empty());
        assert_eq!(changes.name.as_deref(), Some("5"));

        let mut errors = FieldErrors::default();
        let changes = payload(r#"{"name": ["Alice"]}"#).check(UpdateMode::Full, &mut errors);
        assert!(changes.is_empty());
        assert_eq!(errors.get("name"), Some(&[NOT_A_STRING.to_string()][..]));
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert_eq!(validate_name(&name), Ok(name.clone()));

        let too_long = "é".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_name(&too_long),
            Err("Ensure this field has no more than 100 characters.".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_names_up_to_limit_are_kept(name in "[A-Za-z][A-Za-z ]{0,98}[A-Za-z]") {
            prop_assert_eq!(validate_name(&name), Ok(name.clone()));
        }

        #[test]
        fn prop_names_over_limit_are_rejected(name in "[A-Za-z]{101,160}") {
            prop_assert!(validate_name(&name).is_err());
        }
    }
}
