//! Student domain models and DTOs.
//!
//! A [`Student`] always carries a non-empty name, an image URL, an age and a
//! [`StudentStatus`]. Create requests must provide the first three; status
//! falls back to [`StudentStatus::Active`]. Update requests may provide any
//! subset.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::serde::{deserialize_number_from_string, deserialize_optional_number_from_string};

/// Enrollment status of a student.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "student_status")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

/// A student record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// URL of the student's picture
    pub image: String,
    pub age: i32,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(
        length(min = 1, max = 200, message = "name must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    /// Defaults to `Active` when omitted
    #[serde(default)]
    pub status: Option<StudentStatus>,
}

/// DTO for updating an existing student.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(
        length(min = 1, max = 200, message = "name must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(url(message = "image must be a valid URL"))]
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number_from_string")]
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
    #[serde(default)]
    pub status: Option<StudentStatus>,
}

/// Fully resolved values for a record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub image: String,
    pub age: i32,
    pub status: StudentStatus,
}

impl From<CreateStudentDto> for NewStudent {
    fn from(dto: CreateStudentDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            image: dto.image.trim().to_string(),
            age: dto.age,
            status: dto.status.unwrap_or_default(),
        }
    }
}

/// Partial changes merged into an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub age: Option<i32>,
    pub status: Option<StudentStatus>,
}

impl StudentChanges {
    /// Applies the changes to `student` in place. Timestamps are left to the
    /// caller.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(image) = &self.image {
            student.image = image.clone();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(status) = self.status {
            student.status = status;
        }
    }
}

impl From<UpdateStudentDto> for StudentChanges {
    fn from(dto: UpdateStudentDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            image: dto.image.map(|i| i.trim().to_string()),
            age: dto.age,
            status: dto.status,
        }
    }
}

/// Query parameters for listing students.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StudentFilterParams {
    /// Case-insensitive substring match on the student name
    pub name: Option<String>,
}

impl StudentFilterParams {
    /// The name filter, ignoring blank values.
    pub fn name_filter(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn matches(&self, student: &Student) -> bool {
        match self.name_filter() {
            Some(needle) => student
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteStudentResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_dto() -> CreateStudentDto {
        CreateStudentDto {
            name: "Ann".to_string(),
            image: "http://x/a.png".to_string(),
            age: 20,
            status: None,
        }
    }

    fn sample_student() -> Student {
        let now = chrono::Utc::now();
        Student {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            image: "http://x/a.png".to_string(),
            age: 20,
            status: StudentStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_dto_validation() {
        assert!(valid_create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_blank_name() {
        let dto = CreateStudentDto {
            name: "   ".to_string(),
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_long_name() {
        let dto = CreateStudentDto {
            name: "x".repeat(201),
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_invalid_image() {
        let dto = CreateStudentDto {
            image: "not a url".to_string(),
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_negative_age() {
        let dto = CreateStudentDto {
            age: -1,
            ..valid_create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_missing_age_fails_to_deserialize() {
        let result: Result<CreateStudentDto, _> =
            serde_json::from_str(r#"{"name":"Ann","image":"http://x/a.png"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_dto_accepts_string_age() {
        let dto: CreateStudentDto =
            serde_json::from_str(r#"{"name":"Ann","image":"http://x/a.png","age":"20"}"#).unwrap();
        assert_eq!(dto.age, 20);
    }

    #[test]
    fn test_new_student_defaults_to_active() {
        let new_student = NewStudent::from(valid_create_dto());
        assert_eq!(new_student.status, StudentStatus::Active);
    }

    #[test]
    fn test_new_student_keeps_given_status() {
        let dto = CreateStudentDto {
            status: Some(StudentStatus::Inactive),
            ..valid_create_dto()
        };
        assert_eq!(NewStudent::from(dto).status, StudentStatus::Inactive);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let result: Result<StudentStatus, _> = serde_json::from_str(r#""Graduated""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_dto_empty_is_valid() {
        let dto: UpdateStudentDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(StudentChanges::from(dto), StudentChanges::default());
    }

    #[test]
    fn test_update_dto_invalid_image() {
        let dto = UpdateStudentDto {
            image: Some("nope".to_string()),
            ..UpdateStudentDto::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_changes_apply_only_provided_fields() {
        let mut student = sample_student();
        let changes = StudentChanges {
            age: Some(21),
            ..StudentChanges::default()
        };
        changes.apply_to(&mut student);
        assert_eq!(student.age, 21);
        assert_eq!(student.name, "Ann");
        assert_eq!(student.status, StudentStatus::Active);
    }

    #[test]
    fn test_student_serializes_camel_case() {
        let json = serde_json::to_value(sample_student()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn test_filter_matches_case_insensitive_substring() {
        let student = sample_student();
        let filter = StudentFilterParams {
            name: Some("aN".to_string()),
        };
        assert!(filter.matches(&student));

        let miss = StudentFilterParams {
            name: Some("bob".to_string()),
        };
        assert!(!miss.matches(&student));
    }

    #[test]
    fn test_blank_filter_matches_everything() {
        let filter = StudentFilterParams {
            name: Some("  ".to_string()),
        };
        assert_eq!(filter.name_filter(), None);
        assert!(filter.matches(&sample_student()));
    }
}
