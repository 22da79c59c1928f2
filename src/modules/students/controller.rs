use crate::middleware::auth::AuthUser;
use crate::modules::students::service::{StudentService, student_not_found};
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
};
use studentdesk_core::{AppError, ErrorResponse};
use studentdesk_models::students::{
    CreateStudentDto, DeleteStudentResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use studentdesk_observability::{
    track_student_created, track_student_deleted, track_student_updated,
};
use tracing::instrument;
use uuid::Uuid;

/// Student id taken from the path.
///
/// Extracted from the request parts, so a malformed id is answered with 404
/// before any request body is read or validated.
#[derive(Debug, Clone, Copy)]
pub struct StudentId(pub Uuid);

impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| student_not_found())?;
        StudentService::parse_id(&raw).map(StudentId)
    }
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.user_id))]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(state.students.as_ref(), dto).await?;
    track_student_created();
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(
        StudentFilterParams
    ),
    responses(
        (status = 200, description = "All students in insertion order", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filter): Query<StudentFilterParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(state.students.as_ref(), &filter).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    StudentId(id): StudentId,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(state.students.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.user_id))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    StudentId(id): StudentId,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(state.students.as_ref(), id, dto).await?;
    track_student_updated();
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    responses(
        (status = 200, description = "Student deleted successfully", body = DeleteStudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    StudentId(id): StudentId,
) -> Result<Json<DeleteStudentResponse>, AppError> {
    let response = StudentService::delete_student(state.students.as_ref(), id).await?;
    track_student_deleted();
    Ok(Json(response))
}
