use anyhow::anyhow;
use studentdesk_core::AppError;
use studentdesk_db::StudentStore;
use studentdesk_models::students::{
    CreateStudentDto, DeleteStudentResponse, NewStudent, Student, StudentChanges,
    StudentFilterParams, UpdateStudentDto,
};
use tracing::instrument;
use uuid::Uuid;

pub struct StudentService;

pub(crate) fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}

impl StudentService {
    /// Parses a path id. Anything that is not a UUID cannot name a stored
    /// record, so it is reported as not found.
    pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw).map_err(|_| student_not_found())
    }

    #[instrument(skip(store))]
    pub async fn list_students(
        store: &dyn StudentStore,
        filter: &StudentFilterParams,
    ) -> Result<Vec<Student>, AppError> {
        let students = store.list(filter).await?;
        Ok(students)
    }

    #[instrument(skip(store))]
    pub async fn get_student(store: &dyn StudentStore, id: Uuid) -> Result<Student, AppError> {
        store.find(id).await?.ok_or_else(student_not_found)
    }

    #[instrument(skip(store, dto))]
    pub async fn create_student(
        store: &dyn StudentStore,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let student = store.insert(NewStudent::from(dto)).await?;
        tracing::info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_student(
        store: &dyn StudentStore,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        store
            .update(id, StudentChanges::from(dto))
            .await?
            .ok_or_else(student_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_student(
        store: &dyn StudentStore,
        id: Uuid,
    ) -> Result<DeleteStudentResponse, AppError> {
        if !store.delete(id).await? {
            return Err(student_not_found());
        }

        Ok(DeleteStudentResponse {
            success: true,
            message: "Student deleted successfully".to_string(),
        })
    }
}
