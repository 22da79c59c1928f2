//! Process-local stores backed by `tokio::sync::RwLock`.
//!
//! Each operation holds the lock for its whole read-modify-write, which gives
//! the same per-record atomicity as a single SQL statement.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use studentdesk_models::students::{NewStudent, Student, StudentChanges, StudentFilterParams};
use studentdesk_models::users::{FederatedProfile, NewLocalUser, User, UserCredentials};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::students::StudentStore;
use crate::users::UserStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStudentStore {
    students: Arc<RwLock<Vec<Student>>>,
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self, filter: &StudentFilterParams) -> Result<Vec<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students.iter().filter(|s| filter.matches(s)).cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            name: student.name,
            image: student.image,
            age: student.age,
            status: student.status,
            created_at: now,
            updated_at: now,
        };

        self.students.write().await.push(student.clone());
        Ok(student)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        let mut students = self.students.write().await;
        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        changes.apply_to(student);
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|s| s.id != id);
        Ok(students.len() < before)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut students = self.students.write().await;
        let removed = students.len() as u64;
        students.clear();
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<UserRecord>>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_google_id(&self, subject: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|r| r.user.google_id.as_deref() == Some(subject))
            .map(|r| r.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find_map(|r| {
            (r.user.username.as_deref() == Some(username)).then(|| UserCredentials {
                user_id: r.user.id,
                username: username.to_string(),
                password_hash: r.password_hash.clone(),
            })
        }))
    }

    async fn find_or_create_federated(
        &self,
        profile: &FederatedProfile,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if let Some(existing) = users
            .iter()
            .find(|r| r.user.google_id.as_deref() == Some(profile.subject.as_str()))
        {
            return Ok(existing.user.clone());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            google_id: Some(profile.subject.clone()),
            username: None,
            display_name: profile.display_name.clone(),
            email: profile.email.clone(),
            created_at: now,
            updated_at: now,
        };
        users.push(UserRecord {
            user: user.clone(),
            password_hash: None,
        });

        Ok(user)
    }

    async fn create_local(&self, new_user: NewLocalUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|r| r.user.username.as_deref() == Some(new_user.username.as_str()))
        {
            return Err(StoreError::Conflict(format!(
                "User {} already exists",
                new_user.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            google_id: None,
            username: Some(new_user.username),
            display_name: new_user.display_name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        users.push(UserRecord {
            user: user.clone(),
            password_hash: Some(new_user.password_hash),
        });

        Ok(user)
    }
}
