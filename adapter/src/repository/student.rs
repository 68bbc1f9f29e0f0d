use crate::database::{model::student::StudentRow, unique_violation_as, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::StudentId,
    role::Role,
    student::{
        event::{CreateStudent, DeleteStudent, UpdateStudent},
        Student, StudentStatus,
    },
};
use kernel::repository::student::StudentRepository;
use shared::error::{AppError, AppResult};

const DUPLICATE_REGISTRATION: &str = "Registration number already exists";
const DUPLICATE_EMAIL: &str = "Email already exists";

const STUDENT_COLUMNS: &str = r#"
    student_id, registration_number, name, email, phone_number,
    status, created_at, updated_at
"#;

#[derive(new)]
pub struct StudentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl StudentRepository for StudentRepositoryImpl {
    async fn create(&self, event: CreateStudent) -> AppResult<Student> {
        let CreateStudent {
            registration_number,
            name,
            email,
            password,
            phone_number,
        } = event;
        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;

        let mut tx = self.db.begin().await?;

        let (registration_taken, email_taken): (bool, bool) = sqlx::query_as(
            r#"
                SELECT
                    EXISTS (SELECT 1 FROM students WHERE registration_number = $1)
                        OR EXISTS (SELECT 1 FROM users WHERE username = $1),
                    EXISTS (SELECT 1 FROM students WHERE email = $2)
                        OR EXISTS (SELECT 1 FROM users WHERE email = $2)
            "#,
        )
        .bind(&registration_number)
        .bind(&email)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if registration_taken {
            return Err(AppError::BusinessRuleViolation(DUPLICATE_REGISTRATION.into()));
        }
        if email_taken {
            return Err(AppError::BusinessRuleViolation(DUPLICATE_EMAIL.into()));
        }

        let sql = format!(
            r#"
                INSERT INTO students (registration_number, name, email, phone_number, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {STUDENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&registration_number)
            .bind(name)
            .bind(&email)
            .bind(phone_number)
            .bind(StudentStatus::Active.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_violation_as(DUPLICATE_REGISTRATION))?;

        let res = sqlx::query(
            r#"
                INSERT INTO users (username, email, password_hash, role, student_id)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&registration_number)
        .bind(&email)
        .bind(password_hash)
        .bind(Role::Student.to_string())
        .bind(row.student_id)
        .execute(&mut *tx)
        .await
        .map_err(unique_violation_as(DUPLICATE_EMAIL))?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(student_id = %row.student_id, %registration_number, "student registered");
        Student::try_from(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY registration_number");
        sqlx::query_as::<_, StudentRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Student::try_from)
            .collect()
    }

    async fn find_by_id(&self, student_id: StudentId) -> AppResult<Option<Student>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1");
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(student_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Student::try_from)
            .transpose()
    }

    async fn update(&self, event: UpdateStudent) -> AppResult<Student> {
        let mut tx = self.db.begin().await?;

        let current_email: Option<String> =
            sqlx::query_scalar("SELECT email FROM students WHERE student_id = $1 FOR UPDATE")
                .bind(event.student_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let current_email = current_email.ok_or_else(|| {
            AppError::EntityNotFound(format!("Student not found with id: {}", event.student_id))
        })?;

        if current_email != event.email {
            let taken: bool = sqlx::query_scalar(
                r#"
                    SELECT
                        EXISTS (SELECT 1 FROM students WHERE email = $1)
                            OR EXISTS (
                                SELECT 1 FROM users
                                WHERE email = $1
                                  AND student_id IS DISTINCT FROM $2
                            )
                "#,
            )
            .bind(&event.email)
            .bind(event.student_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
            if taken {
                return Err(AppError::BusinessRuleViolation(DUPLICATE_EMAIL.into()));
            }
        }

        let sql = format!(
            r#"
                UPDATE students
                SET name = $2, email = $3, phone_number = $4, status = COALESCE($5, status)
                WHERE student_id = $1
                RETURNING {STUDENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(event.student_id)
            .bind(event.name)
            .bind(event.email)
            .bind(event.phone_number)
            .bind(event.status.map(|s| s.to_string()))
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_violation_as(DUPLICATE_EMAIL))?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Student::try_from(row)
    }

    async fn delete(&self, event: DeleteStudent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let found: Option<StudentId> = sqlx::query_scalar(
            "SELECT student_id FROM students WHERE student_id = $1 FOR UPDATE",
        )
        .bind(event.student_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if found.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Student not found with id: {}",
                event.student_id
            )));
        }

        let has_history: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM access_records WHERE student_id = $1)",
        )
        .bind(event.student_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if has_history {
            sqlx::query("UPDATE students SET status = $2 WHERE student_id = $1")
                .bind(event.student_id)
                .bind(StudentStatus::Inactive.to_string())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        } else {
            sqlx::query("DELETE FROM users WHERE student_id = $1")
                .bind(event.student_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            let res = sqlx::query("DELETE FROM students WHERE student_id = $1")
                .bind(event.student_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No student record has been deleted".into(),
                ));
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(student_id = %event.student_id, deactivated = has_history, "student deleted");
        Ok(())
    }
}
