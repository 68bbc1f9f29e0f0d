use crate::database::{
    model::{
        access::AccessSpanRow,
        space::{SpaceOccupancyRow, SPACE_OCCUPANCY_SELECT},
    },
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::Local;
use derive_new::new;
use kernel::model::{
    access::AccessStatus,
    id::SpaceId,
    report::{AccessSpan, OccupancyReport, ReportWindows},
    space::SpaceWithOccupancy,
};
use kernel::repository::report::ReportRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReportRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn occupancy_report_all(&self) -> AppResult<Vec<OccupancyReport>> {
        let windows = ReportWindows::anchored_at(Local::now());
        let sql = format!("{SPACE_OCCUPANCY_SELECT} ORDER BY s.code ASC");
        let spaces: Vec<SpaceWithOccupancy> = sqlx::query_as::<_, SpaceOccupancyRow>(&sql)
            .bind(AccessStatus::Active.to_string())
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(SpaceWithOccupancy::try_from)
            .collect::<AppResult<_>>()?;

        let mut reports = Vec::with_capacity(spaces.len());
        for space in spaces {
            reports.push(self.build_report(space, &windows).await?);
        }
        Ok(reports)
    }

    async fn occupancy_report(&self, space_id: SpaceId) -> AppResult<OccupancyReport> {
        let windows = ReportWindows::anchored_at(Local::now());
        let sql = format!("{SPACE_OCCUPANCY_SELECT} WHERE s.space_id = $2");
        let space = sqlx::query_as::<_, SpaceOccupancyRow>(&sql)
            .bind(AccessStatus::Active.to_string())
            .bind(space_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(SpaceWithOccupancy::try_from)
            .transpose()?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Space not found with id: {space_id}"))
            })?;

        self.build_report(space, &windows).await
    }
}

impl ReportRepositoryImpl {
    async fn build_report(
        &self,
        space: SpaceWithOccupancy,
        windows: &ReportWindows,
    ) -> AppResult<OccupancyReport> {
        let spans: Vec<AccessSpan> = sqlx::query_as::<_, AccessSpanRow>(
            r#"
                SELECT entry_time, exit_time
                FROM access_records
                WHERE space_id = $1 AND entry_time BETWEEN $2 AND $3
            "#,
        )
        .bind(space.space.space_id)
        .bind(windows.lower_bound())
        .bind(windows.upper_bound())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(AccessSpan::from)
        .collect();

        Ok(OccupancyReport::compute(
            &space.space,
            space.current_occupancy,
            &spans,
            windows,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        access::AccessRecordRepositoryImpl, space::SpaceRepositoryImpl,
        student::StudentRepositoryImpl,
    };
    use chrono::{Duration, SubsecRound, Utc};
    use kernel::{
        model::{
            access::event::RegisterEntry,
            id::{AccessRecordId, StudentId},
            space::{event::CreateSpace, SpaceType},
            student::event::CreateStudent,
        },
        repository::{
            access::AccessRecordRepository, space::SpaceRepository, student::StudentRepository,
        },
    };

    async fn create_student(db: &ConnectionPool, n: u32) -> AppResult<StudentId> {
        let student = StudentRepositoryImpl::new(db.clone())
            .create(CreateStudent {
                registration_number: format!("2024{n:03}"),
                name: format!("Student {n}"),
                email: format!("student{n}@example.edu"),
                password: "secret1".into(),
                phone_number: None,
            })
            .await?;
        Ok(student.student_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn report_counts_live_and_completed_visits(pool: sqlx::PgPool) -> AppResult<()> {
        let db = ConnectionPool::new(pool.clone());
        let space = SpaceRepositoryImpl::new(db.clone())
            .create(CreateSpace {
                code: "LIB-1".into(),
                name: "Main Library".into(),
                space_type: SpaceType::Library,
                capacity: 30,
                building: None,
                floor: None,
                description: None,
            })
            .await?;
        let space_id = space.space.space_id;
        let visitor = create_student(&db, 1).await?;
        let finished = create_student(&db, 2).await?;

        AccessRecordRepositoryImpl::new(db.clone())
            .register_entry(RegisterEntry::new(visitor, space_id, None))
            .await?;

        let entry_time = (Utc::now() - Duration::days(2)).trunc_subsecs(0);
        sqlx::query(
            r#"
                INSERT INTO access_records
                (access_record_id, student_id, space_id, entry_time, exit_time, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $4)
            "#,
        )
        .bind(AccessRecordId::new())
        .bind(finished)
        .bind(space_id)
        .bind(entry_time)
        .bind(entry_time + Duration::minutes(60))
        .bind(AccessStatus::Completed.to_string())
        .execute(&pool)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let report = ReportRepositoryImpl::new(db).occupancy_report(space_id).await?;
        assert_eq!(report.space_code, "LIB-1");
        assert_eq!(report.current_occupancy, 1);
        assert_eq!(report.occupancy_rate, 3.33);
        assert_eq!(report.total_accesses_today, 1);
        assert_eq!(report.total_accesses_this_week, 2);
        assert_eq!(report.total_accesses_this_month, 2);
        assert_eq!(report.average_duration_in_minutes, 60.0);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn report_for_unknown_space_is_not_found(pool: sqlx::PgPool) -> AppResult<()> {
        let repo = ReportRepositoryImpl::new(ConnectionPool::new(pool));

        let err = repo.occupancy_report(SpaceId::new()).await.unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        assert!(repo.occupancy_report_all().await?.is_empty());
        Ok(())
    }
}
