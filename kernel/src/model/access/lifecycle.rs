//! Entry and exit registration.
//!
//! Both operations run against an [`AccessLedger`] that wraps one store
//! transaction. Checks are applied in a fixed order and the first failure
//! aborts the operation before anything is written.

use crate::{
    model::{
        access::{
            append_notes,
            event::{CompleteAccess, NewAccessRecord, RegisterEntry, RegisterExit},
            AccessRecord,
        },
        id::AccessRecordId,
        occupancy,
    },
    repository::access::AccessLedger,
};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

pub async fn register_entry<L>(
    ledger: &mut L,
    event: RegisterEntry,
    now: DateTime<Utc>,
) -> AppResult<AccessRecord>
where
    L: AccessLedger + ?Sized,
{
    let RegisterEntry {
        student_id,
        space_id,
        notes,
    } = event;

    let student = ledger.lock_student(student_id).await?.ok_or_else(|| {
        AppError::EntityNotFound(format!("Student not found with id: {student_id}"))
    })?;
    if !student.is_active() {
        return Err(AppError::BusinessRuleViolation(format!(
            "Student {} is not active",
            student.registration_number
        )));
    }

    let space = ledger
        .lock_space(space_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("Space not found with id: {space_id}")))?;
    occupancy::ensure_accepts_entries(&space)?;

    if ledger.has_active_access(student_id).await? {
        return Err(AppError::BusinessRuleViolation(
            "Student already has an active access in a space".into(),
        ));
    }

    let current_occupancy = ledger.count_active_in_space(space_id).await?;
    occupancy::validate_entry_capacity(&space, current_occupancy)?;

    let access_record_id = AccessRecordId::new();
    ledger
        .insert_access(NewAccessRecord {
            access_record_id,
            student_id,
            space_id,
            entry_time: now,
            notes,
        })
        .await?;

    let occupancy_after_insert = ledger.count_active_in_space(space_id).await?;
    let status = occupancy::derive_status_after_entry(&space, occupancy_after_insert);
    if status != space.status {
        ledger.update_space_status(space_id, status).await?;
    }

    tracing::info!(
        %access_record_id,
        %student_id,
        %space_id,
        occupancy = occupancy_after_insert,
        "entry registered"
    );

    fetch_written(ledger, access_record_id).await
}

pub async fn register_exit<L>(
    ledger: &mut L,
    event: RegisterExit,
    now: DateTime<Utc>,
) -> AppResult<AccessRecord>
where
    L: AccessLedger + ?Sized,
{
    let RegisterExit {
        access_record_id,
        notes,
    } = event;

    let record = ledger
        .lock_access_record(access_record_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "Access record not found with id: {access_record_id}"
            ))
        })?;
    if !record.is_active() {
        return Err(AppError::BusinessRuleViolation(
            "Access record is not active".into(),
        ));
    }

    ledger
        .complete_access(CompleteAccess {
            access_record_id,
            exit_time: now,
            notes: append_notes(record.notes, notes),
        })
        .await?;

    let space_id = record.space.space_id;
    let space = ledger
        .lock_space(space_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("Space not found with id: {space_id}")))?;
    let occupancy_after_removal = ledger.count_active_in_space(space_id).await?;
    let status = occupancy::derive_status_after_exit(&space, occupancy_after_removal);
    if status != space.status {
        ledger.update_space_status(space_id, status).await?;
    }

    tracing::info!(
        %access_record_id,
        %space_id,
        occupancy = occupancy_after_removal,
        "exit registered"
    );

    fetch_written(ledger, access_record_id).await
}

async fn fetch_written<L>(ledger: &mut L, access_record_id: AccessRecordId) -> AppResult<AccessRecord>
where
    L: AccessLedger + ?Sized,
{
    ledger
        .find_access_record(access_record_id)
        .await?
        .ok_or_else(|| {
            AppError::NoRowsAffectedError(format!(
                "access record {access_record_id} was not written"
            ))
        })
}
