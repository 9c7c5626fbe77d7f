use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::db::Store;
use crate::entities::{employee, prelude::*, shift};
use crate::error::{RosterError, RosterResult};
use crate::models::{Employee, EmployeeChanges, EmployeePayload, FieldErrors, Shift, UpdateMode};
use crate::resource::{Creatable, Deletable, Listable, Resource, Retrievable, Updatable};

use super::shift::to_shift;

/// Reads and writes employees, embedding their shifts on read.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    conn: DatabaseConnection,
}

impl EmployeeRepository {
    /// Wraps a connection from the [`Store`] pool.
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_model(&self, id: i32) -> RosterResult<employee::Model> {
        Employees::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| RosterError::not_found(Self::NAME, id))
    }

    async fn with_shifts(&self, model: employee::Model) -> RosterResult<Employee> {
        let shifts = model
            .find_related(Shifts)
            .order_by_asc(shift::Column::Id)
            .all(&self.conn)
            .await?;
        to_employee(model, shifts)
    }

    fn validate(payload: EmployeePayload, mode: UpdateMode) -> RosterResult<EmployeeChanges> {
        let mut errors = FieldErrors::default();
        let changes = payload.check(mode, &mut errors);
        errors.into_result()?;
        Ok(changes)
    }
}

fn apply(changes: EmployeeChanges, active: &mut employee::ActiveModel) {
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
}

fn to_employee(model: employee::Model, mut shifts: Vec<shift::Model>) -> RosterResult<Employee> {
    shifts.sort_by_key(|s| s.id);
    let shifts = shifts
        .into_iter()
        .map(to_shift)
        .collect::<RosterResult<Vec<Shift>>>()?;

    Ok(Employee {
        id: model.id,
        name: model.name,
        shifts,
    })
}

impl Resource for EmployeeRepository {
    const NAME: &'static str = "employee";
    const PATH: &'static str = "employees";

    type Record = Employee;
    type Payload = EmployeePayload;

    fn from_store(store: &Store) -> Self {
        store.employees()
    }
}

#[async_trait]
impl Listable for EmployeeRepository {
    async fn list(&self) -> RosterResult<Vec<Employee>> {
        let employees = Employees::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.conn)
            .await?;
        let shifts = employees.load_many(Shifts, &self.conn).await?;

        employees
            .into_iter()
            .zip(shifts)
            .map(|(model, shifts)| to_employee(model, shifts))
            .collect()
    }
}

#[async_trait]
impl Retrievable for EmployeeRepository {
    async fn retrieve(&self, id: i32) -> RosterResult<Employee> {
        let model = self.find_model(id).await?;
        self.with_shifts(model).await
    }
}

#[async_trait]
impl Creatable for EmployeeRepository {
    async fn create(&self, payload: EmployeePayload) -> RosterResult<Employee> {
        let changes = Self::validate(payload, UpdateMode::Full)?;

        let mut active = employee::ActiveModel {
            ..Default::default()
        };
        apply(changes, &mut active);
        let model = active.insert(&self.conn).await?;

        to_employee(model, Vec::new())
    }
}

#[async_trait]
impl Updatable for EmployeeRepository {
    async fn update(
        &self,
        id: i32,
        payload: EmployeePayload,
        mode: UpdateMode,
    ) -> RosterResult<Employee> {
        let model = self.find_model(id).await?;
        let changes = Self::validate(payload, mode)?;
        if changes.is_empty() {
            return self.with_shifts(model).await;
        }

        let mut active: employee::ActiveModel = model.into();
        apply(changes, &mut active);
        let model = active.update(&self.conn).await?;

        self.with_shifts(model).await
    }
}

#[async_trait]
impl Deletable for EmployeeRepository {
    async fn delete(&self, id: i32) -> RosterResult<()> {
        let txn = self.conn.begin().await?;
        // SQLite only honours ON DELETE CASCADE with foreign_keys enabled
        let removed = Shifts::delete_many()
            .filter(shift::Column::EmployeeId.eq(id))
            .exec(&txn)
            .await?;
        let deleted = Employees::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RosterError::not_found(Self::NAME, id));
        }

        txn.commit().await?;
        debug!(
            employee_id = id,
            shifts_removed = removed.rows_affected,
            "Employee deleted with its shifts"
        );
        Ok(())
    }
}
