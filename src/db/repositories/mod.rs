//! One repository per resource, each implementing the capability traits
//! from [`crate::resource`].

mod employee;
mod shift;

pub use employee::EmployeeRepository;
pub use shift::ShiftRepository;
