use crate::model::{
    access::{
        event::{CompleteAccess, NewAccessRecord, RegisterEntry, RegisterExit},
        AccessRecord,
    },
    id::{AccessRecordId, SpaceId, StudentId},
    space::{Space, SpaceStatus},
    student::Student,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AccessRecordRepository: Send + Sync {
    // Admits a student into a space; the whole check-then-insert runs in one transaction.
    async fn register_entry(&self, event: RegisterEntry) -> AppResult<AccessRecord>;
    // Closes an active access record.
    async fn register_exit(&self, event: RegisterExit) -> AppResult<AccessRecord>;
    async fn find_all(&self) -> AppResult<Vec<AccessRecord>>;
    // Fails with EntityNotFound when the student does not exist.
    async fn find_by_student_id(&self, student_id: StudentId) -> AppResult<Vec<AccessRecord>>;
    // Fails with EntityNotFound when the space does not exist.
    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<AccessRecord>>;
    async fn find_active(&self) -> AppResult<Vec<AccessRecord>>;
}

/// Store operations available inside a single entry/exit transaction.
///
/// The `lock_*` methods must hold a row lock on what they return until the
/// ledger is committed or dropped, so that occupancy counts taken afterwards
/// stay valid until the writes land.
#[async_trait]
pub trait AccessLedger: Send {
    async fn lock_student(&mut self, student_id: StudentId) -> AppResult<Option<Student>>;
    async fn lock_space(&mut self, space_id: SpaceId) -> AppResult<Option<Space>>;
    async fn lock_access_record(
        &mut self,
        access_record_id: AccessRecordId,
    ) -> AppResult<Option<AccessRecord>>;
    async fn has_active_access(&mut self, student_id: StudentId) -> AppResult<bool>;
    async fn count_active_in_space(&mut self, space_id: SpaceId) -> AppResult<i64>;
    async fn insert_access(&mut self, record: NewAccessRecord) -> AppResult<()>;
    async fn complete_access(&mut self, event: CompleteAccess) -> AppResult<()>;
    async fn update_space_status(&mut self, space_id: SpaceId, status: SpaceStatus)
        -> AppResult<()>;
    async fn find_access_record(
        &mut self,
        access_record_id: AccessRecordId,
    ) -> AppResult<Option<AccessRecord>>;
}
