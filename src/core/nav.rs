//! # Navigation
//!
//! The four top-level screens and the sidebar's notion of "active item".
//!
//! Routes keep the path strings of the original web dashboard so the
//! active-item contract stays a plain string comparison: a menu entry is
//! highlighted iff its path equals the current path exactly. No prefix
//! matching — `/trends` does not light up for `/trends/x`.

use serde::{Deserialize, Serialize};

/// A top-level screen. Exactly one is rendered in the content slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Chat,
    Trends,
    MealSim,
    Settings,
}

impl Route {
    /// All routes in sidebar order.
    pub const ALL: [Route; 4] = [Route::Chat, Route::Trends, Route::MealSim, Route::Settings];

    /// The logical path this screen occupied in the original dashboard.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Chat => "/",
            Route::Trends => "/trends",
            Route::MealSim => "/meal-sim",
            Route::Settings => "/settings",
        }
    }

    /// Sidebar label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Chat => "Agent Chat",
            Route::Trends => "Glucose Trends",
            Route::MealSim => "Meal Simulator",
            Route::Settings => "Settings",
        }
    }

    /// Next route in sidebar order, wrapping.
    pub fn next(&self) -> Route {
        let idx = Route::ALL.iter().position(|r| r == self).unwrap_or(0);
        Route::ALL[(idx + 1) % Route::ALL.len()]
    }

    /// Previous route in sidebar order, wrapping.
    pub fn prev(&self) -> Route {
        let idx = Route::ALL.iter().position(|r| r == self).unwrap_or(0);
        Route::ALL[(idx + Route::ALL.len() - 1) % Route::ALL.len()]
    }
}

/// True iff `item_path` is the active menu entry for `current_path`.
/// Exact equality only; total over arbitrary strings.
pub fn is_active(current_path: &str, item_path: &str) -> bool {
    current_path == item_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        assert!(is_active("/trends", "/trends"));
        assert!(!is_active("/trends", "/trends/x"));
        assert!(!is_active("/trends/x", "/trends"));
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/trends"));
    }

    #[test]
    fn test_route_paths_are_distinct() {
        for a in Route::ALL {
            for b in Route::ALL {
                assert_eq!(a == b, is_active(a.path(), b.path()));
            }
        }
    }

    #[test]
    fn test_cycle_covers_all_routes() {
        let mut route = Route::Chat;
        for expected in [Route::Trends, Route::MealSim, Route::Settings, Route::Chat] {
            route = route.next();
            assert_eq!(route, expected);
        }
        assert_eq!(Route::Chat.prev(), Route::Settings);
    }
}
