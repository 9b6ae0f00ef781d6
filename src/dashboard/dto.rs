use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the dashboard screen needs for one student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardView {
    pub user: DashboardUser,
    pub courses_in_progress: Vec<CourseProgress>,
    pub continue_learning: Vec<ContinueLearningItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardUser {
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
}

/// One progress card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseProgress {
    pub id: Uuid,
    pub title: String,
    pub progress: i32,
    pub total: i32,
    pub completed: i32,
    pub color: String,
    pub icon: String, // key into CourseIcon
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContinueLearningItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub image: Option<String>,
    pub mentor_name: String,
    pub mentor_avatar: Option<String>,
}
