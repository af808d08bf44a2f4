//! crates/tongue_balance_core/src/report.rs
//!
//! Presentation models. Each one is built from controller state alone and is
//! what the HTTP layer serializes back to the client.

use serde::Serialize;

use crate::controller::{AuthMode, Overlays, Screen, ViewState};
use crate::domain::{Difficulty, Language, TongueAnalysis};
use crate::features::FeatureFlags;
use crate::i18n::{translations, Translations};
use crate::legal::{LegalDocument, LegalKind};

//=========================================================================================
// Analysis report
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationView {
    pub title: String,
    /// Three tags: color, shape/thickness, moisture/texture.
    pub tags: [String; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    pub label: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub id: String,
    pub date: String,
    pub image_url: String,
    pub heading: String,
    pub pattern: String,
    pub explanation: String,
    pub observation_title: String,
    pub tongue_body: ObservationView,
    pub coating: ObservationView,
    pub plan_title: String,
    pub diet_title: String,
    pub eat_label: String,
    pub eat: String,
    pub avoid_label: String,
    pub avoid: String,
    pub lifestyle_title: String,
    pub lifestyle: Vec<String>,
    pub exercise: String,
    /// Absent when the course offer is switched off.
    pub suggested_course: Option<CourseView>,
    pub analyze_another: String,
}

/// Picks `value` unless it is missing or blank.
fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn joined_or(items: &[String], placeholder: &str) -> String {
    let joined = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

impl ReportView {
    /// Renders an analysis, filling every section the model left out with a
    /// placeholder.
    pub fn build(
        analysis: &TongueAnalysis,
        language: Language,
        t: &Translations,
        flags: &FeatureFlags,
    ) -> Self {
        let findings = &analysis.findings;

        let tongue_body = match &findings.tongue_body {
            Some(body) => [
                or_placeholder(Some(body.color.as_str()), t.unknown),
                or_placeholder(Some(body.shape.as_str()), t.unknown),
                or_placeholder(Some(body.moisture.as_str()), t.unknown),
            ],
            None => [t.unknown.to_string(), t.unknown.to_string(), t.unknown.to_string()],
        };
        let coating = match &findings.coating {
            Some(coating) => [
                or_placeholder(Some(coating.color.as_str()), t.unknown),
                or_placeholder(Some(coating.thickness.as_str()), t.unknown),
                or_placeholder(Some(coating.texture.as_str()), t.unknown),
            ],
            None => [t.unknown.to_string(), t.unknown.to_string(), t.unknown.to_string()],
        };

        let recommendations = findings.recommendations.clone().unwrap_or_default();
        let diet = recommendations.diet.unwrap_or_default();
        let lifestyle: Vec<String> = recommendations
            .lifestyle
            .unwrap_or_default()
            .into_iter()
            .filter(|tip| !tip.trim().is_empty())
            .collect();
        let lifestyle = if lifestyle.is_empty() {
            vec![t.general_rest.to_string()]
        } else {
            lifestyle
        };

        let suggested_course = flags.recommendations.suggested_course.then(|| {
            match &findings.suggested_course {
                Some(course) => CourseView {
                    label: t.premium_rec.to_string(),
                    name: or_placeholder(Some(course.name.as_str()), t.general_wellness),
                    description: or_placeholder(Some(course.description.as_str()), t.general_wellness),
                    difficulty: course.difficulty,
                    action: t.start_course.to_string(),
                },
                None => CourseView {
                    label: t.premium_rec.to_string(),
                    name: t.general_wellness.to_string(),
                    description: t.general_wellness.to_string(),
                    difficulty: Difficulty::Beginner,
                    action: t.start_course.to_string(),
                },
            }
        });

        Self {
            id: analysis.id.clone(),
            date: language.format_date(analysis.timestamp),
            image_url: analysis.image_url.clone(),
            heading: t.diagnosis_result.to_string(),
            pattern: or_placeholder(findings.pattern.as_deref(), t.pattern_analysis),
            explanation: or_placeholder(findings.explanation.as_deref(), t.no_explanation),
            observation_title: t.clinical_observation.to_string(),
            tongue_body: ObservationView {
                title: t.tongue_body.to_string(),
                tags: tongue_body,
            },
            coating: ObservationView {
                title: t.tongue_coating.to_string(),
                tags: coating,
            },
            plan_title: t.wellness_plan.to_string(),
            diet_title: t.dietary_guidance.to_string(),
            eat_label: t.beneficial.to_string(),
            eat: joined_or(&diet.eat, t.none_specified),
            avoid_label: t.avoid.to_string(),
            avoid: joined_or(&diet.avoid, t.none_specified),
            lifestyle_title: t.lifestyle_exercise.to_string(),
            lifestyle,
            exercise: or_placeholder(recommendations.exercise.as_deref(), t.general_rest),
            suggested_course,
            analyze_another: t.analyze_another.to_string(),
        }
    }
}

//=========================================================================================
// History sidebar
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntryView {
    pub id: String,
    pub date: String,
    pub pattern: String,
    pub explanation: String,
}

impl HistoryEntryView {
    pub fn build(analysis: &TongueAnalysis, language: Language, t: &Translations) -> Self {
        Self {
            id: analysis.id.clone(),
            date: language.format_date(analysis.timestamp),
            pattern: or_placeholder(analysis.findings.pattern.as_deref(), t.pattern_analysis),
            explanation: analysis.findings.explanation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub title: String,
    pub entries: Vec<HistoryEntryView>,
    /// Shown instead of the list when there are no entries.
    pub empty_message: Option<[String; 2]>,
}

impl HistoryView {
    pub fn build(history: &[TongueAnalysis], language: Language, t: &Translations) -> Self {
        let entries: Vec<_> = history
            .iter()
            .map(|item| HistoryEntryView::build(item, language, t))
            .collect();
        let empty_message = entries
            .is_empty()
            .then(|| [t.no_records.to_string(), t.start_journey.to_string()]);
        Self {
            title: t.history_title.to_string(),
            entries,
            empty_message,
        }
    }
}

//=========================================================================================
// Whole-screen snapshot
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenView {
    Home,
    AnalyzeForm,
    AnalyzeResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub has_image: bool,
    pub image_url: Option<String>,
    pub symptoms: String,
    pub loading: bool,
    pub listening: bool,
    pub can_submit: bool,
    pub error: Option<String>,
    /// Reminder that results are not kept without an account.
    pub login_note: Option<String>,
}

/// The sign-in / sign-up form, with every text picked for its current mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFormView {
    pub open: bool,
    pub mode: AuthMode,
    pub title: String,
    pub subtitle: String,
    pub username_label: String,
    pub username_placeholder: String,
    pub password_label: String,
    pub password_placeholder: String,
    pub submit: String,
    /// "Don't have an account?" and the link that flips the mode.
    pub switch_prompt: String,
    pub switch_action: String,
    pub error: Option<String>,
}

impl AuthFormView {
    pub fn build(mode: AuthMode, open: bool, error: Option<String>, t: &Translations) -> Self {
        let (title, subtitle, submit, switch_prompt, switch_action) = match mode {
            AuthMode::Login => (
                t.welcome_back,
                t.continue_path,
                t.sign_in,
                t.dont_have_account,
                t.sign_up,
            ),
            AuthMode::Signup => (
                t.join_journey,
                t.create_record,
                t.create_account,
                t.already_have_account,
                t.sign_in,
            ),
        };
        Self {
            open,
            mode,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            username_label: t.username.to_string(),
            username_placeholder: t.enter_username.to_string(),
            password_label: t.password.to_string(),
            password_placeholder: t.enter_password.to_string(),
            submit: submit.to_string(),
            switch_prompt: switch_prompt.to_string(),
            switch_action: switch_action.to_string(),
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewSnapshot {
    pub screen: ScreenView,
    pub language: Language,
    pub language_label: &'static str,
    pub username: Option<String>,
    pub greeting: Option<String>,
    pub overlays: Overlays,
    pub form: Option<FormView>,
    pub report: Option<ReportView>,
    pub history: Option<HistoryView>,
    pub auth: AuthFormView,
    pub legal: Option<&'static LegalDocument>,
    pub features: FeatureFlags,
}

impl ViewSnapshot {
    pub fn render(state: &ViewState, flags: &FeatureFlags) -> Self {
        let language = state.language;
        let t = translations(language);

        let screen = match (state.screen, &state.current_analysis) {
            (Screen::Home, _) => ScreenView::Home,
            (Screen::Analyze, None) => ScreenView::AnalyzeForm,
            (Screen::Analyze, Some(_)) => ScreenView::AnalyzeResult,
        };

        let form = (screen == ScreenView::AnalyzeForm).then(|| FormView {
            has_image: state.selected_image.is_some(),
            image_url: state.selected_image.as_ref().map(|image| image.to_data_url()),
            symptoms: state.symptoms.clone(),
            loading: state.loading,
            listening: state.listening,
            can_submit: state.selected_image.is_some() && !state.loading,
            error: state.error.clone(),
            login_note: (state.user.is_none() && state.selected_image.is_some())
                .then(|| t.login_note.to_string()),
        });

        let report = match (screen, &state.current_analysis) {
            (ScreenView::AnalyzeResult, Some(analysis)) => {
                Some(ReportView::build(analysis, language, t, flags))
            }
            _ => None,
        };

        let history = state
            .overlays
            .history
            .then(|| HistoryView::build(&state.history, language, t));

        // Privacy wins if both are somehow open; they are separate modals.
        let legal = if state.overlays.privacy {
            Some(LegalKind::PrivacyPolicy.document())
        } else if state.overlays.terms {
            Some(LegalKind::TermsOfService.document())
        } else {
            None
        };

        let username = state.user.as_ref().map(|user| user.username.clone());
        let greeting = username
            .as_ref()
            .map(|name| format!("{}, {}", t.hello, name));

        Self {
            screen,
            language,
            language_label: language.toggle_label(),
            username,
            greeting,
            overlays: state.overlays,
            form,
            report,
            history,
            auth: AuthFormView::build(
                state.auth_mode,
                state.overlays.auth,
                state.auth_error.clone(),
                t,
            ),
            legal,
            features: *flags,
        }
    }
}
