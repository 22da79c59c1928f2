use async_trait::async_trait;
use studentdesk_models::students::{NewStudent, Student, StudentChanges, StudentFilterParams};
use uuid::Uuid;

use crate::error::StoreError;

/// Record Store for student documents.
///
/// `update` and `delete` return `None`/`false` for an unknown id instead of an
/// error so the caller decides how to report it.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students in insertion order, optionally narrowed by `filter`.
    async fn list(&self, filter: &StudentFilterParams) -> Result<Vec<Student>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Student>, StoreError>;

    /// Persists a new student with a fresh id and both timestamps set to now.
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError>;

    /// Applies `changes` and refreshes `updated_at` in one atomic step.
    async fn update(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Removes every student, returning how many were deleted.
    async fn clear(&self) -> Result<u64, StoreError>;
}
