use crate::database::{
    model::{
        access::{AccessRecordRow, ACCESS_RECORD_COLUMNS, ACCESS_RECORD_JOINS},
        space::SpaceRow,
        student::StudentRow,
    },
    unique_violation_as, ConnectionPool,
};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::{
    model::{
        access::{
            event::{CompleteAccess, NewAccessRecord, RegisterEntry, RegisterExit},
            lifecycle, AccessRecord, AccessStatus,
        },
        id::{AccessRecordId, SpaceId, StudentId},
        space::{Space, SpaceStatus},
        student::Student,
    },
    repository::access::{AccessLedger, AccessRecordRepository},
};
use shared::{
    error::{AppError, AppResult},
    observability,
};
use sqlx::{Postgres, Transaction};
use std::time::Instant;

#[derive(new)]
pub struct AccessRecordRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AccessRecordRepository for AccessRecordRepositoryImpl {
    async fn register_entry(&self, event: RegisterEntry) -> AppResult<AccessRecord> {
        let started = Instant::now();
        let result = async {
            let mut ledger = PgAccessLedger::new(self.db.begin().await?);
            let record = lifecycle::register_entry(&mut ledger, event, Utc::now()).await?;
            ledger.commit().await?;
            Ok::<_, AppError>(record)
        }
        .await;

        metrics::histogram!(observability::SPACE_ENTRY_REGISTRATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        if result.is_ok() {
            metrics::counter!(observability::SPACE_ENTRIES_TOTAL).increment(1);
        }
        result
    }

    async fn register_exit(&self, event: RegisterExit) -> AppResult<AccessRecord> {
        let started = Instant::now();
        let result = async {
            let mut ledger = PgAccessLedger::new(self.db.begin().await?);
            let record = lifecycle::register_exit(&mut ledger, event, Utc::now()).await?;
            ledger.commit().await?;
            Ok::<_, AppError>(record)
        }
        .await;

        metrics::histogram!(observability::SPACE_EXIT_REGISTRATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        if result.is_ok() {
            metrics::counter!(observability::SPACE_EXITS_TOTAL).increment(1);
        }
        result
    }

    async fn find_all(&self) -> AppResult<Vec<AccessRecord>> {
        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS} ORDER BY a.entry_time DESC"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(AccessRecord::try_from)
            .collect()
    }

    async fn find_by_student_id(&self, student_id: StudentId) -> AppResult<Vec<AccessRecord>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE student_id = $1)")
                .bind(student_id)
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        if !exists {
            return Err(AppError::EntityNotFound(format!(
                "Student not found with id: {student_id}"
            )));
        }

        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS}
             WHERE a.student_id = $1
             ORDER BY a.entry_time DESC"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .bind(student_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(AccessRecord::try_from)
            .collect()
    }

    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<AccessRecord>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM spaces WHERE space_id = $1)")
                .bind(space_id)
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        if !exists {
            return Err(AppError::EntityNotFound(format!(
                "Space not found with id: {space_id}"
            )));
        }

        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS}
             WHERE a.space_id = $1
             ORDER BY a.entry_time DESC"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .bind(space_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(AccessRecord::try_from)
            .collect()
    }

    async fn find_active(&self) -> AppResult<Vec<AccessRecord>> {
        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS}
             WHERE a.status = $1
             ORDER BY a.entry_time ASC"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .bind(AccessStatus::Active.to_string())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(AccessRecord::try_from)
            .collect()
    }
}

/// `AccessLedger` over one PostgreSQL transaction.
///
/// Row locks come from `SELECT ... FOR UPDATE`. Entry locks the student row
/// and then the space row; exit locks the access record and then the space
/// row. The space row is always the last lock taken, so two operations on
/// the same space queue behind each other and occupancy counts read after
/// the lock stay valid until commit.
pub struct PgAccessLedger<'a> {
    tx: Transaction<'a, Postgres>,
}

impl<'a> PgAccessLedger<'a> {
    pub fn new(tx: Transaction<'a, Postgres>) -> Self {
        Self { tx }
    }

    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await.map_err(AppError::TransactionError)
    }
}

#[async_trait]
impl<'a> AccessLedger for PgAccessLedger<'a> {
    async fn lock_student(&mut self, student_id: StudentId) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, StudentRow>(
            r#"
                SELECT student_id, registration_number, name, email,
                       phone_number, status, created_at, updated_at
                FROM students
                WHERE student_id = $1
                FOR UPDATE
            "#,
        )
        .bind(student_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Student::try_from)
        .transpose()
    }

    async fn lock_space(&mut self, space_id: SpaceId) -> AppResult<Option<Space>> {
        sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, code, name, space_type, capacity, building,
                       floor, description, status, created_at, updated_at
                FROM spaces
                WHERE space_id = $1
                FOR UPDATE
            "#,
        )
        .bind(space_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Space::try_from)
        .transpose()
    }

    async fn lock_access_record(
        &mut self,
        access_record_id: AccessRecordId,
    ) -> AppResult<Option<AccessRecord>> {
        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS}
             WHERE a.access_record_id = $1
             FOR UPDATE OF a"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .bind(access_record_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(AccessRecord::try_from)
            .transpose()
    }

    async fn has_active_access(&mut self, student_id: StudentId) -> AppResult<bool> {
        sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM access_records
                    WHERE student_id = $1 AND status = $2
                )
            "#,
        )
        .bind(student_id)
        .bind(AccessStatus::Active.to_string())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn count_active_in_space(&mut self, space_id: SpaceId) -> AppResult<i64> {
        sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM access_records
                WHERE space_id = $1 AND status = $2
            "#,
        )
        .bind(space_id)
        .bind(AccessStatus::Active.to_string())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn insert_access(&mut self, record: NewAccessRecord) -> AppResult<()> {
        let NewAccessRecord {
            access_record_id,
            student_id,
            space_id,
            entry_time,
            notes,
        } = record;
        let res = sqlx::query(
            r#"
                INSERT INTO access_records
                (access_record_id, student_id, space_id, entry_time, status, notes, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $4)
            "#,
        )
        .bind(access_record_id)
        .bind(student_id)
        .bind(space_id)
        .bind(entry_time)
        .bind(AccessStatus::Active.to_string())
        .bind(notes)
        .execute(&mut *self.tx)
        .await
        .map_err(unique_violation_as(
            "Student already has an active access in a space",
        ))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No access record has been created".into(),
            ));
        }
        Ok(())
    }

    async fn complete_access(&mut self, event: CompleteAccess) -> AppResult<()> {
        let CompleteAccess {
            access_record_id,
            exit_time,
            notes,
        } = event;
        let res = sqlx::query(
            r#"
                UPDATE access_records
                SET exit_time = $2, status = $3, notes = $4
                WHERE access_record_id = $1 AND status = $5
            "#,
        )
        .bind(access_record_id)
        .bind(exit_time)
        .bind(AccessStatus::Completed.to_string())
        .bind(notes)
        .bind(AccessStatus::Active.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No active access record has been completed".into(),
            ));
        }
        Ok(())
    }

    async fn update_space_status(
        &mut self,
        space_id: SpaceId,
        status: SpaceStatus,
    ) -> AppResult<()> {
        let res = sqlx::query("UPDATE spaces SET status = $2 WHERE space_id = $1")
            .bind(space_id)
            .bind(status.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No space status has been updated".into(),
            ));
        }
        Ok(())
    }

    async fn find_access_record(
        &mut self,
        access_record_id: AccessRecordId,
    ) -> AppResult<Option<AccessRecord>> {
        let sql = format!(
            "SELECT {ACCESS_RECORD_COLUMNS} {ACCESS_RECORD_JOINS}
             WHERE a.access_record_id = $1"
        );
        sqlx::query_as::<_, AccessRecordRow>(&sql)
            .bind(access_record_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(AccessRecord::try_from)
            .transpose()
    }
}
