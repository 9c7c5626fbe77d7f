//! Shift roster service
//!
//! This crate stores employees and the 8-hour shift windows assigned to
//! them, and exposes both as REST resources. Each employee's shifts are
//! embedded in its representation; deleting an employee deletes its shifts.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod db;
#[allow(missing_docs)]
pub mod entities;
pub mod error;
pub mod models;
pub mod resource;
