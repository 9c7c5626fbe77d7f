//! Field-level validation shared by the resource payloads.
//!
//! Request bodies are deserialized into payload structs whose fields are
//! all optional raw JSON values, then checked and converted field by field
//! so that every problem in a body is reported at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{RosterError, RosterResult};

/// Message for a required field that is absent from a full body.
pub const REQUIRED: &str = "This field is required.";
/// Message for a field explicitly set to `null`.
pub const NOT_NULL: &str = "This field may not be null.";
/// Message for a text field that is empty after trimming.
pub const NOT_BLANK: &str = "This field may not be blank.";
/// Message for a text field given a value that is not text.
pub const NOT_A_STRING: &str = "Not a valid string.";

/// Whether a body must carry every writable field or only the ones it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Create and full update: every required field must be present.
    Full,
    /// Partial update: absent fields keep their stored value.
    Partial,
}

/// Validation messages keyed by field name.
///
/// Serializes as a plain JSON object, e.g. `{"name": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true if no field has a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Turns the collected messages into a validation error, if there are any.
    pub fn into_result(self) -> RosterResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RosterError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A payload field that distinguishes "absent" from "explicitly null".
///
/// `None` means the key was absent, `Some(None)` means it was `null`.
pub type Nullable<T> = Option<Option<T>>;

/// Deserializes a present key into `Some`, keeping `null` as `Some(None)`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Extracts a field value, recording "required" or "null" problems.
///
/// Returns `None` whenever the field carries no usable value.
pub fn take<T>(
    field: &str,
    value: Nullable<T>,
    mode: UpdateMode,
    errors: &mut FieldErrors,
) -> Option<T> {
    match value {
        None => {
            if mode == UpdateMode::Full {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(None) => {
            errors.add(field, NOT_NULL);
            None
        }
        Some(Some(value)) => Some(value),
    }
}

/// Message for a reference to a record that does not exist.
pub fn does_not_exist(pk: impl fmt::Display) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Reads a text field. Numbers are accepted in their JSON form.
pub fn as_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(NOT_A_STRING.to_string()),
    }
}

/// Reads a record reference given as an integer or a string of digits.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shift_roster::models::validation::as_pk;
///
/// assert_eq!(as_pk(&json!("7")), Ok(7));
/// assert!(as_pk(&json!(true)).is_err());
/// ```
pub fn as_pk(value: &Value) -> Result<i32, String> {
    let pk = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    match pk {
        // too large to be any stored id
        Some(pk) => i32::try_from(pk).map_err(|_| does_not_exist(pk)),
        None => Err(format!(
            "Incorrect type. Expected pk value, received {}.",
            type_name(value)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "nullable")]
        value: Nullable<i32>,
    }

    #[test]
    fn test_nullable_distinguishes_absent_null_and_present() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        let null: Probe = serde_json::from_str(r#"{"value": null}"#).unwrap();
        let present: Probe = serde_json::from_str(r#"{"value": 8}"#).unwrap();

        assert_eq!(absent.value, None);
        assert_eq!(null.value, Some(None));
        assert_eq!(present.value, Some(Some(8)));
    }

    #[test]
    fn test_take_requires_field_in_full_mode() {
        let mut errors = FieldErrors::default();
        let value: Option<i32> = take("employee", None, UpdateMode::Full, &mut errors);

        assert!(value.is_none());
        assert_eq!(errors.get("employee"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_take_allows_absent_field_in_partial_mode() {
        let mut errors = FieldErrors::default();
        let value: Option<i32> = take("employee", None, UpdateMode::Partial, &mut errors);

        assert!(value.is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_take_rejects_null_in_either_mode() {
        for mode in [UpdateMode::Full, UpdateMode::Partial] {
            let mut errors = FieldErrors::default();
            let value: Option<i32> = take("name", Some(None), mode, &mut errors);

            assert!(value.is_none());
            assert_eq!(errors.get("name"), Some(&[NOT_NULL.to_string()][..]));
        }
    }

    #[test]
    fn test_field_errors_serialize_as_object() {
        let mut errors = FieldErrors::default();
        errors.add("name", NOT_BLANK);
        errors.add("name", "second");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": ["This field may not be blank.", "second"]})
        );
    }

    #[test]
    fn test_into_result_only_fails_with_messages() {
        assert!(FieldErrors::default().into_result().is_ok());

        let mut errors = FieldErrors::default();
        errors.add("start_time", REQUIRED);
        assert!(matches!(
            errors.into_result(),
            Err(RosterError::Validation(_))
        ));
    }

    #[test]
    fn test_nullable_keeps_raw_values() {
        #[derive(Debug, Deserialize)]
        struct Raw {
            #[serde(default, deserialize_with = "nullable")]
            value: Nullable<Value>,
        }

        let text: Raw = serde_json::from_str(r#"{"value": "morning"}"#).unwrap();
        let null: Raw = serde_json::from_str(r#"{"value": null}"#).unwrap();

        assert_eq!(text.value, Some(Some(json!("morning"))));
        assert_eq!(null.value, Some(None));
    }

    #[test]
    fn test_as_pk_accepts_integers_and_digit_strings() {
        assert_eq!(as_pk(&json!(3)), Ok(3));
        assert_eq!(as_pk(&json!("12")), Ok(12));
    }

    #[test]
    fn test_as_pk_reports_received_type() {
        assert_eq!(
            as_pk(&json!("abc")),
            Err("Incorrect type. Expected pk value, received str.".to_string())
        );
        assert_eq!(
            as_pk(&json!(true)),
            Err("Incorrect type. Expected pk value, received bool.".to_string())
        );
        assert_eq!(
            as_pk(&json!([1])),
            Err("Incorrect type. Expected pk value, received list.".to_string())
        );
        assert_eq!(
            as_pk(&json!(1.5)),
            Err("Incorrect type. Expected pk value, received float.".to_string())
        );
    }

    #[test]
    fn test_as_pk_out_of_range_does_not_exist() {
        assert_eq!(
            as_pk(&json!(5_000_000_000_i64)),
            Err(does_not_exist(5_000_000_000_i64))
        );
    }

    #[test]
    fn test_as_text_accepts_strings_and_numbers_only() {
        assert_eq!(as_text(json!("Alice")), Ok("Alice".to_string()));
        assert_eq!(as_text(json!(5)), Ok("5".to_string()));
        assert_eq!(as_text(json!(false)), Err(NOT_A_STRING.to_string()));
        assert_eq!(as_text(json!({"first": "A"})), Err(NOT_A_STRING.to_string()));
    }
}
