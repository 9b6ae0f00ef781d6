use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub created_at: OffsetDateTime,
}

/// One enrollment joined with its course, as the dashboard reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentWithCourse {
    pub enrollment_id: Uuid,
    pub progress: i32,
    pub completed_units: i32,
    pub course_id: Uuid,
    pub title: String,
    pub category: String,
    pub mentor_name: String,
    pub mentor_avatar: Option<String>,
    pub total_units: i32,
    pub image: Option<String>,
}

/// How a caller identifies the user whose data it wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Id(Uuid),
    Email(String),
}

/// Log-safe rendering: ids as-is, addresses reduced to their domain.
impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserKey::Id(id) => write!(f, "id:{}", id),
            UserKey::Email(email) => match email.rsplit_once('@') {
                Some((_, domain)) => write!(f, "email:***@{}", domain),
                None => f.write_str("email:***"),
            },
        }
    }
}

/// Read access to users and their enrollments.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn enrollments_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<EnrollmentWithCourse>>;

    async fn find_user(&self, key: &UserKey) -> anyhow::Result<Option<User>> {
        match key {
            UserKey::Id(id) => self.find_user_by_id(*id).await,
            UserKey::Email(email) => self.find_user_by_email(email).await,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, avatar, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, role, avatar, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn enrollments_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<EnrollmentWithCourse>> {
        let rows = sqlx::query_as::<_, EnrollmentWithCourse>(
            r#"
            SELECT e.id AS enrollment_id, e.progress, e.completed_units,
                   c.id AS course_id, c.title, c.category, c.mentor_name,
                   c.mentor_avatar, c.total_units, c.image
              FROM enrollments e
              JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list enrollments for user")?;
        Ok(rows)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// In-memory store for tests. `fail` makes every call return an error.
    #[derive(Default)]
    pub struct MemoryStore {
        users: Mutex<Vec<User>>,
        enrollments: Mutex<Vec<(Uuid, EnrollmentWithCourse)>>,
        fail: AtomicBool,
    }

    impl MemoryStore {
        pub fn add_user(&self, email: &str, password_hash: &str, name: &str) -> Uuid {
            let id = Uuid::new_v4();
            self.users.lock().unwrap().push(User {
                id,
                email: email.into(),
                password_hash: password_hash.into(),
                name: name.into(),
                role: "Student".into(),
                avatar: Some(format!("https://i.pravatar.cc/150?u={}", id)),
                created_at: OffsetDateTime::now_utc(),
            });
            id
        }

        pub fn enroll(
            &self,
            user_id: Uuid,
            title: &str,
            category: &str,
            total_units: i32,
            progress: i32,
            completed_units: i32,
        ) -> Uuid {
            let course_id = Uuid::new_v4();
            self.enrollments.lock().unwrap().push((
                user_id,
                EnrollmentWithCourse {
                    enrollment_id: Uuid::new_v4(),
                    progress,
                    completed_units,
                    course_id,
                    title: title.into(),
                    category: category.into(),
                    mentor_name: "Padhang Satrio".into(),
                    mentor_avatar: None,
                    total_units,
                    image: None,
                },
            ));
            course_id
        }

        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn check(&self) -> anyhow::Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Store for MemoryStore {
        async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            self.check()?;
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
            self.check()?;
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn enrollments_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<EnrollmentWithCourse>> {
            self.check()?;
            Ok(self
                .enrollments
                .lock()
                .unwrap()
                .iter()
                .filter(|(uid, _)| *uid == user_id)
                .map(|(_, e)| e.clone())
                .collect())
        }
    }
}
