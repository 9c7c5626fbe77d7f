//! Shift model and related types.
//!
//! A shift assigns an employee to one of three fixed 8-hour windows of the
//! day. Shifts carry no date.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{FieldErrors, Nullable, UpdateMode, as_pk, nullable, take};

/// One of the three 8-hour windows a shift can cover.
///
/// Serialized as the window's start hour (`0`, `8` or `16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ShiftWindow {
    /// 00:00 to 08:00.
    Overnight,
    /// 08:00 to 16:00.
    Day,
    /// 16:00 to 24:00.
    Evening,
}

impl ShiftWindow {
    /// Every window, in order of start hour.
    pub const ALL: [ShiftWindow; 3] = [
        ShiftWindow::Overnight,
        ShiftWindow::Day,
        ShiftWindow::Evening,
    ];

    /// Length of every window in hours.
    pub const HOURS: i32 = 8;

    /// Returns the hour the window starts at.
    pub const fn start_hour(self) -> i32 {
        match self {
            ShiftWindow::Overnight => 0,
            ShiftWindow::Day => 8,
            ShiftWindow::Evening => 16,
        }
    }

    /// Returns the hour the window ends at (exclusive).
    pub const fn end_hour(self) -> i32 {
        self.start_hour() + Self::HOURS
    }

    /// Returns the human-readable label, e.g. `"8-16"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_roster::models::ShiftWindow;
    ///
    /// assert_eq!(ShiftWindow::Evening.label(), "16-24");
    /// ```
    pub fn label(self) -> String {
        format!("{}-{}", self.start_hour(), self.end_hour())
    }

    /// Matches a submitted value against the window start hours.
    ///
    /// Strings are compared as given and other values by their JSON text,
    /// so `8` and `"8"` both select [`ShiftWindow::Day`] while `8.0` does not.
    pub fn from_choice(value: &Value) -> Result<Self, InvalidWindow> {
        let choice = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        ShiftWindow::ALL
            .into_iter()
            .find(|window| window.start_hour().to_string() == choice)
            .ok_or(InvalidWindow(choice))
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<ShiftWindow> for i32 {
    fn from(window: ShiftWindow) -> Self {
        window.start_hour()
    }
}

/// Error returned when a value is not the start of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWindow(pub String);

impl fmt::Display for InvalidWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a valid choice.", self.0)
    }
}

impl std::error::Error for InvalidWindow {}

impl TryFrom<i32> for ShiftWindow {
    type Error = InvalidWindow;

    fn try_from(hour: i32) -> Result<Self, Self::Error> {
        ShiftWindow::ALL
            .into_iter()
            .find(|window| window.start_hour() == hour)
            .ok_or_else(|| InvalidWindow(hour.to_string()))
    }
}

/// A stored shift as it appears in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Store-generated identifier.
    pub id: i32,
    /// Identifier of the employee working the shift.
    pub employee: i32,
    /// The window the shift covers.
    pub start_time: ShiftWindow,
}

/// Request body for creating or updating a shift.
///
/// Fields are kept as raw JSON so a value of the wrong type becomes a field
/// error instead of rejecting the whole body. `id` and unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftPayload {
    /// Identifier of the employee, as an integer or a string of digits.
    #[serde(default, deserialize_with = "nullable")]
    pub employee: Nullable<Value>,
    /// Start hour of the window; checked against [`ShiftWindow`].
    #[serde(default, deserialize_with = "nullable")]
    pub start_time: Nullable<Value>,
}

/// Validated field values taken from a [`ShiftPayload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftChanges {
    /// New employee reference, if given. Its existence is checked by the store.
    pub employee: Option<i32>,
    /// New window, if given.
    pub start_time: Option<ShiftWindow>,
}

impl ShiftChanges {
    /// Returns true if the payload changes nothing.
    pub fn is_empty(&self) -> bool {
        self.employee.is_none() && self.start_time.is_none()
    }
}

impl ShiftPayload {
    /// Checks the payload's fields, recording every problem in `errors`.
    pub fn check(self, mode: UpdateMode, errors: &mut FieldErrors) -> ShiftChanges {
        let employee = take("employee", self.employee, mode, errors).and_then(|value| {
            as_pk(&value)
                .map_err(|message| errors.add("employee", message))
                .ok()
        });
        let start_time = take("start_time", self.start_time, mode, errors).and_then(|value| {
            ShiftWindow::from_choice(&value)
                .map_err(|err| errors.add("start_time", err.to_string()))
                .ok()
        });

        ShiftChanges {
            employee,
            start_time,
        }
    }
}
