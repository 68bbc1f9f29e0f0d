use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::AccessStatus, space::SpaceStatus, student::StudentStatus, usage::UsageSnapshot,
};
use kernel::repository::usage::UsageRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UsageRepositoryImpl {
    db: ConnectionPool,
}

#[derive(sqlx::FromRow)]
struct UsageRow {
    active_students: i64,
    total_spaces: i64,
    available_spaces: i64,
    occupied_spaces: i64,
    active_accesses: i64,
    completed_accesses: i64,
}

#[async_trait]
impl UsageRepository for UsageRepositoryImpl {
    async fn snapshot(&self) -> AppResult<UsageSnapshot> {
        let row = sqlx::query_as::<_, UsageRow>(
            r#"
                SELECT
                    (SELECT COUNT(*) FROM students WHERE status = $1) AS active_students,
                    (SELECT COUNT(*) FROM spaces) AS total_spaces,
                    (SELECT COUNT(*) FROM spaces WHERE status = $2) AS available_spaces,
                    (SELECT COUNT(*) FROM spaces WHERE status = $3) AS occupied_spaces,
                    (SELECT COUNT(*) FROM access_records WHERE status = $4) AS active_accesses,
                    (SELECT COUNT(*) FROM access_records WHERE status = $5) AS completed_accesses
            "#,
        )
        .bind(StudentStatus::Active.to_string())
        .bind(SpaceStatus::Available.to_string())
        .bind(SpaceStatus::Occupied.to_string())
        .bind(AccessStatus::Active.to_string())
        .bind(AccessStatus::Completed.to_string())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(UsageSnapshot {
            active_students: row.active_students,
            total_spaces: row.total_spaces,
            available_spaces: row.available_spaces,
            occupied_spaces: row.occupied_spaces,
            active_accesses: row.active_accesses,
            completed_accesses: row.completed_accesses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        access::AccessRecordRepositoryImpl, space::SpaceRepositoryImpl,
        student::StudentRepositoryImpl,
    };
    use kernel::{
        model::{
            access::event::RegisterEntry,
            space::{event::CreateSpace, SpaceType},
            student::event::CreateStudent,
        },
        repository::{
            access::AccessRecordRepository, space::SpaceRepository, student::StudentRepository,
        },
    };

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn snapshot_reflects_open_access(pool: sqlx::PgPool) -> AppResult<()> {
        let db = ConnectionPool::new(pool);
        let repo = UsageRepositoryImpl::new(db.clone());
        assert_eq!(repo.snapshot().await?, UsageSnapshot::default());

        let spaces = SpaceRepositoryImpl::new(db.clone());
        let mut space_ids = Vec::new();
        for code in ["MR-1", "MR-2"] {
            let space = spaces
                .create(CreateSpace {
                    code: code.into(),
                    name: format!("Meeting Room {code}"),
                    space_type: SpaceType::MeetingRoom,
                    capacity: 6,
                    building: None,
                    floor: None,
                    description: None,
                })
                .await?;
            space_ids.push(space.space.space_id);
        }
        let student = StudentRepositoryImpl::new(db.clone())
            .create(CreateStudent {
                registration_number: "2024020".into(),
                name: "Gabi Rocha".into(),
                email: "gabi@example.edu".into(),
                password: "secret1".into(),
                phone_number: None,
            })
            .await?;
        AccessRecordRepositoryImpl::new(db)
            .register_entry(RegisterEntry::new(student.student_id, space_ids[0], None))
            .await?;

        assert_eq!(
            repo.snapshot().await?,
            UsageSnapshot {
                active_students: 1,
                total_spaces: 2,
                available_spaces: 1,
                occupied_spaces: 1,
                active_accesses: 1,
                completed_accesses: 0,
            }
        );
        Ok(())
    }
}
