//! crates/tongue_balance_core/src/features.rs
//!
//! Feature flags, chosen per deployment environment.

use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFlags {
    pub login_button: bool,
    pub user_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationFlags {
    pub suggested_course: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub auth: AuthFlags,
    pub recommendations: RecommendationFlags,
}

impl FeatureFlags {
    pub const ALL_ENABLED: FeatureFlags = FeatureFlags {
        auth: AuthFlags {
            login_button: true,
            user_history: true,
        },
        recommendations: RecommendationFlags {
            suggested_course: true,
        },
    };

    /// Flags for `development` (default), `staging` or `production`.
    /// Unknown names fall back to development.
    pub fn for_environment(environment: &str) -> Self {
        match environment.trim().to_ascii_lowercase().as_str() {
            "staging" => Self::ALL_ENABLED,
            // Paid courses are not on sale yet.
            "production" => FeatureFlags {
                recommendations: RecommendationFlags {
                    suggested_course: false,
                },
                ..Self::ALL_ENABLED
            },
            _ => Self::ALL_ENABLED,
        }
    }

    /// Looks a flag up by its dotted path, e.g. `auth.loginButton`.
    pub fn is_enabled(&self, feature_path: &str) -> bool {
        match feature_path {
            "auth.loginButton" => self.auth.login_button,
            "auth.userHistory" => self.auth.user_history,
            "recommendations.suggestedCourse" => self.recommendations.suggested_course,
            other => {
                warn!("Feature flag not found: {}", other);
                false
            }
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::ALL_ENABLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_hides_the_course_offer() {
        let flags = FeatureFlags::for_environment("production");
        assert!(flags.is_enabled("auth.loginButton"));
        assert!(!flags.is_enabled("recommendations.suggestedCourse"));
    }

    #[test]
    fn unknown_paths_are_disabled() {
        let flags = FeatureFlags::for_environment("development");
        assert!(flags.is_enabled("auth.userHistory"));
        assert!(!flags.is_enabled("auth.darkMode"));
        assert!(!flags.is_enabled("auth"));
    }
}
