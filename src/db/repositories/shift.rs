use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, SqlErr};

use crate::db::Store;
use crate::entities::{prelude::*, shift};
use crate::error::{RosterError, RosterResult};
use crate::models::validation::does_not_exist;
use crate::models::{FieldErrors, Shift, ShiftChanges, ShiftPayload, ShiftWindow, UpdateMode};
use crate::resource::{Creatable, Deletable, Listable, Resource, Retrievable, Updatable};

/// Reads and writes shifts, checking employee references on write.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    conn: DatabaseConnection,
}

impl ShiftRepository {
    /// Wraps a connection from the [`Store`] pool.
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_model(&self, id: i32) -> RosterResult<shift::Model> {
        Shifts::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| RosterError::not_found(Self::NAME, id))
    }

    /// Checks the payload's fields and that the referenced employee exists.
    async fn validate(&self, payload: ShiftPayload, mode: UpdateMode) -> RosterResult<ShiftChanges> {
        let mut errors = FieldErrors::default();
        let changes = payload.check(mode, &mut errors);

        if let Some(employee_id) = changes.employee {
            if Employees::find_by_id(employee_id).one(&self.conn).await?.is_none() {
                errors.add("employee", does_not_exist(employee_id));
            }
        }

        errors.into_result()?;
        Ok(changes)
    }
}

fn apply(changes: ShiftChanges, active: &mut shift::ActiveModel) {
    if let Some(employee_id) = changes.employee {
        active.employee_id = Set(employee_id);
    }
    if let Some(window) = changes.start_time {
        active.start_time = Set(window.start_hour());
    }
}

/// Maps a foreign key failure on write to the same field error as a failed
/// employee check. The employee can be deleted between check and write.
fn reference_error(err: DbErr, changes: ShiftChanges) -> RosterError {
    match (err.sql_err(), changes.employee) {
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(employee_id)) => {
            let mut errors = FieldErrors::default();
            errors.add("employee", does_not_exist(employee_id));
            RosterError::Validation(errors)
        }
        _ => err.into(),
    }
}

/// Converts a stored row into its API representation.
pub(super) fn to_shift(model: shift::Model) -> RosterResult<Shift> {
    let start_time =
        ShiftWindow::try_from(model.start_time).map_err(|_| RosterError::InvalidStoredValue {
            resource: ShiftRepository::NAME,
            id: model.id,
            message: format!("start_time {} is not a window start", model.start_time),
        })?;

    Ok(Shift {
        id: model.id,
        employee: model.employee_id,
        start_time,
    })
}

impl Resource for ShiftRepository {
    const NAME: &'static str = "shift";
    const PATH: &'static str = "shifts";

    type Record = Shift;
    type Payload = ShiftPayload;

    fn from_store(store: &Store) -> Self {
        store.shifts()
    }
}

#[async_trait]
impl Listable for ShiftRepository {
    async fn list(&self) -> RosterResult<Vec<Shift>> {
        Shifts::find()
            .order_by_asc(shift::Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(to_shift)
            .collect()
    }
}

#[async_trait]
impl Retrievable for ShiftRepository {
    async fn retrieve(&self, id: i32) -> RosterResult<Shift> {
        to_shift(self.find_model(id).await?)
    }
}

#[async_trait]
impl Creatable for ShiftRepository {
    async fn create(&self, payload: ShiftPayload) -> RosterResult<Shift> {
        let changes = self.validate(payload, UpdateMode::Full).await?;

        let mut active = shift::ActiveModel {
            ..Default::default()
        };
        apply(changes, &mut active);
        let model = active
            .insert(&self.conn)
            .await
            .map_err(|err| reference_error(err, changes))?;

        to_shift(model)
    }
}

#[async_trait]
impl Updatable for ShiftRepository {
    async fn update(&self, id: i32, payload: ShiftPayload, mode: UpdateMode) -> RosterResult<Shift> {
        let model = self.find_model(id).await?;
        let changes = self.validate(payload, mode).await?;
        if changes.is_empty() {
            return to_shift(model);
        }

        let mut active: shift::ActiveModel = model.into();
        apply(changes, &mut active);
        let model = active
            .update(&self.conn)
            .await
            .map_err(|err| reference_error(err, changes))?;

        to_shift(model)
    }
}

#[async_trait]
impl Deletable for ShiftRepository {
    async fn delete(&self, id: i32) -> RosterResult<()> {
        let result = Shifts::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(RosterError::not_found(Self::NAME, id));
        }
        Ok(())
    }
}
