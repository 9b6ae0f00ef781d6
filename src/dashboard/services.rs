use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::dto::{ContinueLearningItem, CourseProgress, DashboardUser, DashboardView};
use super::styles::style_for_category;
use crate::auth::services::normalize_email;
use crate::db::{EnrollmentWithCourse, Store, User, UserKey};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("data unavailable")]
    Unavailable(#[source] anyhow::Error),
}

/// Loads the dashboard for one user.
///
/// `Ok(None)` means no such user. A user without enrollments yields
/// `Ok(Some(view))` with empty lists. Storage failures are `Err`.
#[instrument(skip(store, key), fields(key = %key))]
pub async fn get_dashboard_data(
    store: &dyn Store,
    key: &UserKey,
) -> Result<Option<DashboardView>, DashboardError> {
    let key = match key {
        UserKey::Email(email) => UserKey::Email(normalize_email(email)),
        UserKey::Id(id) => UserKey::Id(*id),
    };

    let Some(user) = store
        .find_user(&key)
        .await
        .map_err(DashboardError::Unavailable)?
    else {
        warn!(%key, "dashboard requested for unknown user");
        return Ok(None);
    };

    let rows = store
        .enrollments_for_user(user.id)
        .await
        .map_err(DashboardError::Unavailable)?;

    debug!(user_id = %user.id, enrollments = rows.len(), "dashboard loaded");
    Ok(Some(build_view(user, rows)))
}

pub fn build_view(user: User, rows: Vec<EnrollmentWithCourse>) -> DashboardView {
    let mut courses_in_progress = Vec::with_capacity(rows.len());
    let mut continue_learning = Vec::with_capacity(rows.len());

    for row in rows {
        if row.completed_units > row.total_units {
            warn!(
                enrollment_id = %row.enrollment_id,
                completed = row.completed_units,
                total = row.total_units,
                "completed units exceed course total"
            );
        }
        let style = style_for_category(&row.category);
        courses_in_progress.push(CourseProgress {
            id: row.course_id,
            title: row.title.clone(),
            progress: row.progress,
            total: row.total_units,
            completed: row.completed_units,
            color: style.color.to_string(),
            icon: style.icon.key().to_string(),
        });
        continue_learning.push(ContinueLearningItem {
            id: row.course_id,
            title: row.title,
            category: row.category,
            image: row.image,
            mentor_name: row.mentor_name,
            mentor_avatar: row.mentor_avatar,
        });
    }

    DashboardView {
        user: DashboardUser {
            name: user.name,
            role: user.role,
            avatar: user.avatar,
        },
        courses_in_progress,
        continue_learning,
    }
}
