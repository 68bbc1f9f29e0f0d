use crate::database::{
    model::space::{SpaceOccupancyRow, SpaceRow, SPACE_OCCUPANCY_SELECT},
    unique_violation_as, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    access::AccessStatus,
    id::SpaceId,
    occupancy,
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        Space, SpaceStatus, SpaceWithOccupancy,
    },
};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

const DUPLICATE_CODE: &str = "Space code already exists";

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn create(&self, event: CreateSpace) -> AppResult<SpaceWithOccupancy> {
        if self.code_exists(&event.code).await? {
            return Err(AppError::BusinessRuleViolation(DUPLICATE_CODE.into()));
        }

        let row = sqlx::query_as::<_, SpaceRow>(
            r#"
                INSERT INTO spaces
                (code, name, space_type, capacity, building, floor, description, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING space_id, code, name, space_type, capacity, building,
                          floor, description, status, created_at, updated_at
            "#,
        )
        .bind(event.code)
        .bind(event.name)
        .bind(event.space_type.to_string())
        .bind(event.capacity)
        .bind(event.building)
        .bind(event.floor)
        .bind(event.description)
        .bind(SpaceStatus::Available.to_string())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(unique_violation_as(DUPLICATE_CODE))?;

        tracing::info!(space_id = %row.space_id, code = %row.code, "space created");

        Ok(SpaceWithOccupancy {
            space: Space::try_from(row)?,
            current_occupancy: 0,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<SpaceWithOccupancy>> {
        let sql = format!("{SPACE_OCCUPANCY_SELECT} ORDER BY s.code ASC");
        sqlx::query_as::<_, SpaceOccupancyRow>(&sql)
            .bind(AccessStatus::Active.to_string())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(SpaceWithOccupancy::try_from)
            .collect()
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<SpaceWithOccupancy>> {
        let sql = format!("{SPACE_OCCUPANCY_SELECT} WHERE s.space_id = $2");
        sqlx::query_as::<_, SpaceOccupancyRow>(&sql)
            .bind(AccessStatus::Active.to_string())
            .bind(space_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(SpaceWithOccupancy::try_from)
            .transpose()
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<SpaceWithOccupancy> {
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, SpaceRow>(
            r#"
                SELECT space_id, code, name, space_type, capacity, building,
                       floor, description, status, created_at, updated_at
                FROM spaces
                WHERE space_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.space_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Space::try_from)
        .transpose()?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("Space not found with id: {}", event.space_id))
        })?;

        if current.code != event.code {
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM spaces WHERE code = $1)")
                    .bind(&event.code)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
            if taken {
                return Err(AppError::BusinessRuleViolation(DUPLICATE_CODE.into()));
            }
        }

        let current_occupancy: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM access_records WHERE space_id = $1 AND status = $2",
        )
        .bind(event.space_id)
        .bind(AccessStatus::Active.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let status =
            occupancy::resolve_admin_status(current.status, event.status, current_occupancy);

        let row = sqlx::query_as::<_, SpaceRow>(
            r#"
                UPDATE spaces
                SET code = $2, name = $3, space_type = $4, capacity = $5,
                    building = $6, floor = $7, description = $8, status = $9
                WHERE space_id = $1
                RETURNING space_id, code, name, space_type, capacity, building,
                          floor, description, status, created_at, updated_at
            "#,
        )
        .bind(event.space_id)
        .bind(event.code)
        .bind(event.name)
        .bind(event.space_type.to_string())
        .bind(event.capacity)
        .bind(event.building)
        .bind(event.floor)
        .bind(event.description)
        .bind(status.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(unique_violation_as(DUPLICATE_CODE))?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(SpaceWithOccupancy {
            space: Space::try_from(row)?,
            current_occupancy,
        })
    }

    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let found: Option<SpaceId> =
            sqlx::query_scalar("SELECT space_id FROM spaces WHERE space_id = $1 FOR UPDATE")
                .bind(event.space_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if found.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Space not found with id: {}",
                event.space_id
            )));
        }

        let has_history: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM access_records WHERE space_id = $1)")
                .bind(event.space_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        // Spaces with access history are retired, never removed.
        let res = if has_history {
            sqlx::query("UPDATE spaces SET status = $2 WHERE space_id = $1")
                .bind(event.space_id)
                .bind(SpaceStatus::Unavailable.to_string())
                .execute(&mut *tx)
                .await
        } else {
            sqlx::query("DELETE FROM spaces WHERE space_id = $1")
                .bind(event.space_id)
                .execute(&mut *tx)
                .await
        }
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No space record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(space_id = %event.space_id, retired = has_history, "space deleted");
        Ok(())
    }
}

impl SpaceRepositoryImpl {
    async fn code_exists(&self, code: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM spaces WHERE code = $1)")
            .bind(code)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{access::AccessRecordRepositoryImpl, student::StudentRepositoryImpl};
    use kernel::{
        model::{access::event::RegisterEntry, space::SpaceType, student::event::CreateStudent},
        repository::{access::AccessRecordRepository, student::StudentRepository},
    };

    fn create_event(code: &str) -> CreateSpace {
        CreateSpace {
            code: code.into(),
            name: "Study Room A".into(),
            space_type: SpaceType::StudyRoom,
            capacity: 8,
            building: Some("Library".into()),
            floor: Some("2".into()),
            description: None,
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_register_space(pool: sqlx::PgPool) -> AppResult<()> {
        let repo = SpaceRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(create_event("SR-A")).await?;
        assert_eq!(created.space.status, SpaceStatus::Available);

        let res = repo.find_all().await?;
        assert_eq!(res.len(), 1);

        let found = repo.find_by_id(created.space.space_id).await?.unwrap();
        assert_eq!(found.space.code, "SR-A");
        assert_eq!(found.space.capacity, 8);
        assert_eq!(found.current_occupancy, 0);

        let err = repo.create(create_event("SR-A")).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRuleViolation(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn delete_without_history_removes_space(pool: sqlx::PgPool) -> AppResult<()> {
        let repo = SpaceRepositoryImpl::new(ConnectionPool::new(pool));
        let created = repo.create(create_event("SR-B")).await?;

        repo.delete(DeleteSpace {
            space_id: created.space.space_id,
        })
        .await?;
        assert!(repo.find_by_id(created.space.space_id).await?.is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn delete_with_history_retires_space(pool: sqlx::PgPool) -> AppResult<()> {
        let db = ConnectionPool::new(pool);
        let repo = SpaceRepositoryImpl::new(db.clone());
        let created = repo.create(create_event("SR-C")).await?;
        let student = StudentRepositoryImpl::new(db.clone())
            .create(CreateStudent {
                registration_number: "2024010".into(),
                name: "Eva Lima".into(),
                email: "eva@example.edu".into(),
                password: "secret1".into(),
                phone_number: None,
            })
            .await?;
        let access = AccessRecordRepositoryImpl::new(db);
        access
            .register_entry(RegisterEntry::new(
                student.student_id,
                created.space.space_id,
                None,
            ))
            .await?;

        repo.delete(DeleteSpace {
            space_id: created.space.space_id,
        })
        .await?;

        let kept = repo.find_by_id(created.space.space_id).await?.unwrap();
        assert_eq!(kept.space.status, SpaceStatus::Unavailable);
        assert_eq!(kept.current_occupancy, 1);
        assert_eq!(
            access.find_by_space_id(created.space.space_id).await?.len(),
            1
        );
        Ok(())
    }
}
