//! Database entities for the two stored record types.

pub mod employee;
pub mod shift;

pub mod prelude {
    //! Entity aliases for queries.

    pub use super::employee::Entity as Employees;
    pub use super::shift::Entity as Shifts;
}
