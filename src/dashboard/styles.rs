//! Category to visual treatment lookup for progress cards.

/// Closed set of icons a progress card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseIcon {
    LayoutDashboard,
    BookOpen,
    ClipboardList,
}

impl CourseIcon {
    pub fn key(self) -> &'static str {
        match self {
            CourseIcon::LayoutDashboard => "LayoutDashboard",
            CourseIcon::BookOpen => "BookOpen",
            CourseIcon::ClipboardList => "ClipboardList",
        }
    }

    /// Unknown keys fall back to `BookOpen`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "LayoutDashboard" => CourseIcon::LayoutDashboard,
            "ClipboardList" => CourseIcon::ClipboardList,
            _ => CourseIcon::BookOpen,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CourseIcon::LayoutDashboard => "▦",
            CourseIcon::BookOpen => "📖",
            CourseIcon::ClipboardList => "📋",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseStyle {
    pub icon: CourseIcon,
    pub color: &'static str,
}

pub const DEFAULT_STYLE: CourseStyle = CourseStyle {
    icon: CourseIcon::LayoutDashboard,
    color: "bg-violet-100 text-violet-600",
};

const CATEGORY_STYLES: &[(&str, CourseStyle)] = &[
    (
        "ui/ux",
        CourseStyle {
            icon: CourseIcon::LayoutDashboard,
            color: "bg-violet-100 text-violet-600",
        },
    ),
    (
        "ui/ux design",
        CourseStyle {
            icon: CourseIcon::LayoutDashboard,
            color: "bg-violet-100 text-violet-600",
        },
    ),
    (
        "frontend",
        CourseStyle {
            icon: CourseIcon::BookOpen,
            color: "bg-blue-100 text-blue-600",
        },
    ),
    (
        "front end",
        CourseStyle {
            icon: CourseIcon::BookOpen,
            color: "bg-blue-100 text-blue-600",
        },
    ),
    (
        "backend",
        CourseStyle {
            icon: CourseIcon::ClipboardList,
            color: "bg-emerald-100 text-emerald-600",
        },
    ),
];

/// Case-insensitive; unknown categories get `DEFAULT_STYLE`.
pub fn style_for_category(category: &str) -> CourseStyle {
    let wanted = category.trim().to_lowercase();
    CATEGORY_STYLES
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_their_style() {
        assert_eq!(style_for_category("UI/UX").icon, CourseIcon::LayoutDashboard);
        assert_eq!(style_for_category("Frontend").icon, CourseIcon::BookOpen);
        assert_eq!(style_for_category(" BACKEND ").icon, CourseIcon::ClipboardList);
    }

    #[test]
    fn unknown_category_gets_default() {
        assert_eq!(style_for_category("Underwater Basket Weaving"), DEFAULT_STYLE);
        assert_eq!(style_for_category(""), DEFAULT_STYLE);
    }

    #[test]
    fn icon_keys_are_stable_and_unknown_falls_back() {
        for icon in [
            CourseIcon::LayoutDashboard,
            CourseIcon::BookOpen,
            CourseIcon::ClipboardList,
        ] {
            assert_eq!(CourseIcon::from_key(icon.key()), icon);
        }
        assert_eq!(CourseIcon::from_key("Rocket"), CourseIcon::BookOpen);
    }
}
