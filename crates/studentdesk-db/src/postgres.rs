//! PostgreSQL-backed stores.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use studentdesk_models::students::{NewStudent, Student, StudentChanges, StudentFilterParams};
use studentdesk_models::users::{FederatedProfile, NewLocalUser, User, UserCredentials};
use tracing::instrument;
use uuid::Uuid;

use crate::error::StoreError;
use crate::pool::SchemaGuard;
use crate::students::StudentStore;
use crate::users::UserStore;

const STUDENT_COLUMNS: &str = "id, name, image, age, status, created_at, updated_at";
const USER_COLUMNS: &str = "id, google_id, username, display_name, email, created_at, updated_at";

/// Escapes `%`, `_` and `\` so user input matches literally inside `LIKE`.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
    schema: SchemaGuard,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_schema(SchemaGuard::new(pool))
    }

    /// Shares `schema` with other stores on the same pool.
    pub fn with_schema(schema: SchemaGuard) -> Self {
        Self {
            pool: schema.pool().clone(),
            schema,
        }
    }

    /// Inserts many students with a single multi-row `INSERT`.
    #[instrument(skip(self, students), fields(count = students.len()))]
    pub async fn insert_batch(&self, students: &[NewStudent]) -> Result<u64, StoreError> {
        self.schema.ensure().await?;
        if students.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO students (id, name, image, age, status) ");
        builder.push_values(students, |mut b, student| {
            b.push_bind(Uuid::new_v4())
                .push_bind(&student.name)
                .push_bind(&student.image)
                .push_bind(student.age)
                .push_bind(student.status);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    #[instrument(skip(self))]
    async fn list(&self, filter: &StudentFilterParams) -> Result<Vec<Student>, StoreError> {
        self.schema.ensure().await?;
        let pattern = filter
            .name_filter()
            .map(|needle| format!("%{}%", escape_like(needle)));

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE $1::TEXT IS NULL OR name ILIKE $1 \
             ORDER BY seq"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        self.schema.ensure().await?;
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self, student))]
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        self.schema.ensure().await?;
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (id, name, image, age, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(student.name)
        .bind(student.image)
        .bind(student.age)
        .bind(student.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        self.schema.ensure().await?;
        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET \
                 name = COALESCE($2, name), \
                 image = COALESCE($3, image), \
                 age = COALESCE($4, age), \
                 status = COALESCE($5, status), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.image)
        .bind(changes.age)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.schema.ensure().await?;
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<u64, StoreError> {
        self.schema.ensure().await?;
        let result = sqlx::query("DELETE FROM students")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    schema: SchemaGuard,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_schema(SchemaGuard::new(pool))
    }

    /// Shares `schema` with other stores on the same pool.
    pub fn with_schema(schema: SchemaGuard) -> Self {
        Self {
            pool: schema.pool().clone(),
            schema,
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_google_id(&self, subject: &str) -> Result<Option<User>, StoreError> {
        self.schema.ensure().await?;
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE google_id = $1"
        ))
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        self.schema.ensure().await?;
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id AS user_id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(self, profile), fields(subject = %profile.subject))]
    async fn find_or_create_federated(
        &self,
        profile: &FederatedProfile,
    ) -> Result<User, StoreError> {
        self.schema.ensure().await?;
        // The no-op DO UPDATE makes RETURNING yield the existing row on conflict.
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, google_id, display_name, email) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (google_id) DO UPDATE SET google_id = EXCLUDED.google_id \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&profile.subject)
        .bind(&profile.display_name)
        .bind(&profile.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_local(&self, user: NewLocalUser) -> Result<User, StoreError> {
        self.schema.ensure().await?;
        let username = user.username.clone();
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, display_name, email, password_hash) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user.username)
        .bind(user.display_name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::Conflict(_) => {
                StoreError::Conflict(format!("User {username} already exists"))
            }
            other => other,
        })?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Alice"), "Alice");
    }
}
