//! Core data models for the shift roster service.
//!
//! This module contains the API representations of employees and shifts,
//! the request payloads for both, and the field validation they share.

mod employee;
mod shift;
pub mod validation;

pub use employee::{Employee, EmployeeChanges, EmployeePayload, MAX_NAME_LENGTH, validate_name};
pub use shift::{InvalidWindow, Shift, ShiftChanges, ShiftPayload, ShiftWindow};
pub use validation::{FieldErrors, UpdateMode};
