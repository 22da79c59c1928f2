use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use studentdesk_core::ErrorResponse;
use studentdesk_models::auth::{GoogleLoginRequest, LoginRequest, TokenResponse};
use studentdesk_models::students::{
    CreateStudentDto, DeleteStudentResponse, Student, StudentStatus, UpdateStudentDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::google_login,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
    ),
    components(
        schemas(
            LoginRequest,
            GoogleLoginRequest,
            TokenResponse,
            ErrorResponse,
            Student,
            StudentStatus,
            CreateStudentDto,
            UpdateStudentDto,
            DeleteStudentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Local and Google login"),
        (name = "Students", description = "Student record management")
    ),
    info(
        title = "studentdesk API",
        version = "0.1.0",
        description = "Student records admin console backend: session-token authentication and student CRUD.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
