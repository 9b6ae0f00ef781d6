use crate::dashboard::dto::DashboardView;
use crate::dashboard::styles::CourseIcon;

/// Dashboard screen lifecycle. Resolves once; there is no retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DashboardScreen {
    #[default]
    Loading,
    Loaded(DashboardView),
    /// The user does not exist; shown with default placeholders.
    Empty,
    /// Storage or transport failed; never presented as an empty dashboard.
    Unavailable,
}

/// A progress card ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressCard {
    pub glyph: &'static str,
    pub units: String,
    pub title: String,
    pub progress: i32,
}

impl DashboardScreen {
    pub fn resolve<E>(&mut self, outcome: Result<Option<DashboardView>, E>) {
        if *self != DashboardScreen::Loading {
            return;
        }
        *self = match outcome {
            Ok(Some(view)) => DashboardScreen::Loaded(view),
            Ok(None) => DashboardScreen::Empty,
            Err(_) => DashboardScreen::Unavailable,
        };
    }

    /// First name of the student, or "Student".
    pub fn greeting_name(&self) -> &str {
        match self {
            DashboardScreen::Loaded(view) => view
                .user
                .name
                .split_whitespace()
                .next()
                .unwrap_or("Student"),
            _ => "Student",
        }
    }

    pub fn cards(&self) -> Vec<ProgressCard> {
        let DashboardScreen::Loaded(view) = self else {
            return Vec::new();
        };
        view.courses_in_progress
            .iter()
            .map(|c| ProgressCard {
                glyph: CourseIcon::from_key(&c.icon).glyph(),
                units: format!("{}/{} Units", c.completed, c.total),
                title: c.title.clone(),
                progress: c.progress,
            })
            .collect()
    }
}
