//! crates/tongue_balance_core/src/controller.rs
//!
//! The view/controller for one device: screen and overlay state, the analysis
//! form, the signed-in user and their history.
//!
//! Long-running work (the AI request, speech recognition) is split into a
//! `begin_*` and a `finish_*` step so the caller can run it without holding
//! whatever lock guards the controller. The `loading` and `listening` flags
//! reject a second request while one is pending.

use chrono::Utc;
use serde::Serialize;
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::accounts::AccountService;
use crate::domain::{AnalysisFindings, ImagePayload, Language, TongueAnalysis, User};
use crate::features::FeatureFlags;
use crate::i18n::{translations, Translations};
use crate::ports::{PortError, PortResult, TongueAnalysisService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Home,
    /// Shows the form, or the result once `current_analysis` is set.
    Analyze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    History,
    Auth,
    Terms,
    Privacy,
}

impl FromStr for Overlay {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "history" => Ok(Overlay::History),
            "auth" => Ok(Overlay::Auth),
            "terms" => Ok(Overlay::Terms),
            "privacy" => Ok(Overlay::Privacy),
            other => Err(PortError::NotFound(format!("Unknown overlay '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overlays {
    pub history: bool,
    pub auth: bool,
    pub terms: bool,
    pub privacy: bool,
}

impl Overlays {
    fn flag_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::History => &mut self.history,
            Overlay::Auth => &mut self.auth,
            Overlay::Terms => &mut self.terms,
            Overlay::Privacy => &mut self.privacy,
        }
    }
}

/// Which form the auth overlay shows. It survives closing the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub screen: Screen,
    pub current_analysis: Option<TongueAnalysis>,
    pub overlays: Overlays,
    pub language: Language,
    pub user: Option<User>,
    /// Newest first. Only persisted while a user is signed in.
    pub history: Vec<TongueAnalysis>,
    pub selected_image: Option<ImagePayload>,
    pub symptoms: String,
    pub loading: bool,
    pub error: Option<String>,
    pub auth_error: Option<String>,
    pub auth_mode: AuthMode,
    pub listening: bool,
}

/// Everything the AI request needs, captured when the user submits.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImagePayload,
    pub symptoms: String,
    pub language: Language,
}

pub struct AppController {
    accounts: AccountService,
    flags: FeatureFlags,
    state: ViewState,
}

impl AppController {
    pub fn new(accounts: AccountService, flags: FeatureFlags) -> Self {
        Self {
            accounts,
            flags,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    pub fn translations(&self) -> &'static Translations {
        translations(self.state.language)
    }

    /// Page load: picks up the session left in local storage.
    pub async fn restore_session(&mut self) -> PortResult<()> {
        if let Some(user) = self.accounts.current_user().await? {
            info!("Restored session for {}", user.username);
            self.state.history = user.history.clone();
            self.state.user = Some(user);
        }
        Ok(())
    }

    //=====================================================================================
    // Navigation
    //=====================================================================================

    pub fn start_diagnosis(&mut self) {
        self.state.screen = Screen::Analyze;
    }

    pub fn go_home(&mut self) {
        self.state.screen = Screen::Home;
        self.state.current_analysis = None;
    }

    /// Back to an empty form after looking at a result.
    pub fn analyze_another(&mut self) {
        self.state.screen = Screen::Analyze;
        self.state.current_analysis = None;
        self.state.selected_image = None;
        self.state.symptoms.clear();
    }

    pub fn toggle_language(&mut self) -> Language {
        self.state.language = self.state.language.next();
        self.state.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
    }

    pub fn open_overlay(&mut self, overlay: Overlay) -> PortResult<()> {
        match overlay {
            Overlay::Auth => {
                self.require_flag("auth.loginButton")?;
                self.state.auth_error = None;
            }
            Overlay::History => {
                self.require_flag("auth.userHistory")?;
                if self.state.user.is_none() {
                    return Err(PortError::Unauthorized);
                }
            }
            Overlay::Terms | Overlay::Privacy => {}
        }
        *self.state.overlays.flag_mut(overlay) = true;
        Ok(())
    }

    pub fn close_overlay(&mut self, overlay: Overlay) {
        *self.state.overlays.flag_mut(overlay) = false;
    }

    /// Switches the auth form between signing in and creating an account.
    pub fn toggle_auth_mode(&mut self) -> PortResult<AuthMode> {
        self.require_flag("auth.loginButton")?;
        self.state.auth_mode = match self.state.auth_mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.state.auth_error = None;
        Ok(self.state.auth_mode)
    }

    fn require_flag(&self, path: &str) -> PortResult<()> {
        if self.flags.is_enabled(path) {
            Ok(())
        } else {
            Err(PortError::FeatureDisabled(path.to_string()))
        }
    }

    //=====================================================================================
    // Analysis form
    //=====================================================================================

    pub fn select_image(&mut self, image: ImagePayload) {
        self.state.selected_image = Some(image);
    }

    pub fn set_symptoms(&mut self, symptoms: impl Into<String>) {
        self.state.symptoms = symptoms.into();
    }

    /// Validates the form and marks the analysis as pending.
    pub fn begin_analysis(&mut self) -> PortResult<AnalysisRequest> {
        if self.state.loading {
            return Err(PortError::Busy);
        }
        let image = self.state.selected_image.clone().ok_or(PortError::NoImage)?;

        self.state.loading = true;
        self.state.error = None;
        Ok(AnalysisRequest {
            image,
            symptoms: self.state.symptoms.clone(),
            language: self.state.language,
        })
    }

    /// Merges the model's answer into a new record, shows it and saves it.
    ///
    /// Failures are logged and replaced by the localized generic message in
    /// `error`; the original error is still returned to the caller.
    pub async fn finish_analysis(
        &mut self,
        request: AnalysisRequest,
        outcome: PortResult<AnalysisFindings>,
    ) -> PortResult<()> {
        self.state.loading = false;

        let findings = match outcome {
            Ok(findings) => findings,
            Err(e) => {
                error!("Tongue analysis failed: {}", e);
                self.state.error = Some(self.translations().error.to_string());
                return Err(e);
            }
        };

        let timestamp = Utc::now().timestamp_millis();
        let analysis = TongueAnalysis {
            id: self.next_analysis_id(timestamp),
            timestamp,
            image_url: request.image.to_data_url(),
            symptoms: request.symptoms,
            findings,
        };

        self.state.current_analysis = Some(analysis.clone());
        self.state.screen = Screen::Analyze;
        self.save_to_history(analysis).await
    }

    /// Runs a whole analysis in place. Callers that share the controller across
    /// tasks should use `begin_analysis`/`finish_analysis` instead.
    pub async fn run_analysis(&mut self, service: &dyn TongueAnalysisService) -> PortResult<()> {
        let request = self.begin_analysis()?;
        let outcome = service
            .analyze_tongue(&request.image, &request.symptoms, request.language)
            .await;
        self.finish_analysis(request, outcome).await
    }

    /// Ids come from the creation time, bumped past any id already in history.
    fn next_analysis_id(&self, timestamp: i64) -> String {
        let mut candidate = timestamp;
        while self
            .state
            .history
            .iter()
            .any(|item| item.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }

    async fn save_to_history(&mut self, analysis: TongueAnalysis) -> PortResult<()> {
        self.state.history.insert(0, analysis);

        if let Some(user) = self.state.user.as_mut() {
            self.accounts
                .update_history(&user.username, &self.state.history)
                .await?;
            user.history = self.state.history.clone();
        }
        Ok(())
    }

    //=====================================================================================
    // History
    //=====================================================================================

    pub fn select_history_item(&mut self, id: &str) -> PortResult<()> {
        self.require_flag("auth.userHistory")?;
        let item = self
            .state
            .history
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Analysis {} not found", id)))?;

        self.state.current_analysis = Some(item);
        self.state.screen = Screen::Analyze;
        self.state.overlays.history = false;
        Ok(())
    }

    //=====================================================================================
    // Accounts
    //=====================================================================================

    pub async fn signup(&mut self, username: &str, password: &str) -> PortResult<()> {
        self.require_flag("auth.loginButton")?;
        let result = self.accounts.signup(username, password).await;
        self.complete_auth(result).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> PortResult<()> {
        self.require_flag("auth.loginButton")?;
        let result = self.accounts.login(username, password).await;
        self.complete_auth(result).await
    }

    async fn complete_auth(&mut self, result: PortResult<User>) -> PortResult<()> {
        match result {
            Ok(user) => {
                self.state.auth_error = None;
                self.state.overlays.auth = false;
                self.adopt_user(user).await
            }
            Err(e @ (PortError::DuplicateAccount | PortError::InvalidCredential)) => {
                self.state.auth_error = Some(e.to_string());
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Takes over the signed-in user's history. A result produced before signing
    /// in is added to it, once.
    async fn adopt_user(&mut self, mut user: User) -> PortResult<()> {
        if let Some(current) = &self.state.current_analysis {
            if !user.history.iter().any(|item| item.id == current.id) {
                user.history.insert(0, current.clone());
                self.accounts
                    .update_history(&user.username, &user.history)
                    .await?;
            }
        }

        info!("{} signed in", user.username);
        self.state.history = user.history.clone();
        self.state.user = Some(user);
        Ok(())
    }

    /// Ends the session and drops everything tied to it.
    pub async fn logout(&mut self) -> PortResult<()> {
        self.accounts.logout().await?;

        self.state.user = None;
        self.state.history.clear();
        self.state.screen = Screen::Home;
        self.state.current_analysis = None;
        self.state.selected_image = None;
        self.state.symptoms.clear();
        self.state.error = None;
        self.state.overlays.history = false;
        Ok(())
    }

    //=====================================================================================
    // Voice input
    //=====================================================================================

    /// Marks the microphone as active and returns the language to recognize.
    pub fn begin_listening(&mut self) -> PortResult<Language> {
        if self.state.listening {
            return Err(PortError::Busy);
        }
        self.state.listening = true;
        Ok(self.state.language)
    }

    /// Stops listening. A transcript that arrives afterwards is dropped.
    pub fn cancel_listening(&mut self) {
        self.state.listening = false;
    }

    /// Appends the transcript to the symptoms field.
    ///
    /// The transcript is trimmed first so `append_transcript` controls the
    /// spacing between phrases.
    pub fn finish_listening(&mut self, outcome: PortResult<String>) -> PortResult<()> {
        if !self.state.listening {
            info!("Voice input was cancelled; dropping the transcript");
            return Ok(());
        }
        self.state.listening = false;
        match outcome {
            Ok(transcript) => {
                let transcript = transcript.trim();
                if !transcript.is_empty() {
                    self.state.symptoms = append_transcript(&self.state.symptoms, transcript);
                }
                Ok(())
            }
            Err(PortError::Unsupported(reason)) => {
                warn!("Voice input unavailable: {}", reason);
                Err(PortError::Unsupported(
                    self.translations().voice_unsupported.to_string(),
                ))
            }
            Err(e) => {
                error!("Speech recognition error: {}", e);
                Err(e)
            }
        }
    }
}

/// Joins a transcribed phrase onto the symptom text with a single space,
/// unless the text is empty or already ends in whitespace.
pub fn append_transcript(symptoms: &str, transcript: &str) -> String {
    let needs_space = !symptoms.is_empty() && !symptoms.ends_with([' ', '\n']);
    let spacer = if needs_space { " " } else { "" };
    format!("{}{}{}", symptoms, spacer, transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{PlainTextCredentials, SESSION_KEY};
    use crate::ports::KeyValueStore;
    use crate::storage::{LocalStorage, MemoryStore};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedAnalysis(AnalysisFindings);

    #[async_trait]
    impl TongueAnalysisService for FixedAnalysis {
        async fn analyze_tongue(
            &self,
            _image: &ImagePayload,
            _symptoms: &str,
            _language: Language,
        ) -> PortResult<AnalysisFindings> {
            Ok(self.0.clone())
        }
    }

    struct FailingAnalysis;

    #[async_trait]
    impl TongueAnalysisService for FailingAnalysis {
        async fn analyze_tongue(
            &self,
            _image: &ImagePayload,
            _symptoms: &str,
            _language: Language,
        ) -> PortResult<AnalysisFindings> {
            Err(PortError::EmptyResponse)
        }
    }

    fn findings(pattern: &str) -> AnalysisFindings {
        AnalysisFindings {
            pattern: Some(pattern.to_string()),
            explanation: Some("Some explanation".to_string()),
            ..Default::default()
        }
    }

    fn controller() -> (AppController, AccountService, LocalStorage) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let storage = LocalStorage::new(store, "device");
        let accounts = AccountService::new(storage.clone(), Arc::new(PlainTextCredentials));
        (
            AppController::new(accounts.clone(), FeatureFlags::default()),
            accounts,
            storage,
        )
    }

    fn tongue_photo() -> ImagePayload {
        ImagePayload::new("image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    #[tokio::test]
    async fn analysis_requires_an_image() {
        let (mut app, _, _) = controller();
        app.start_diagnosis();

        assert!(matches!(app.begin_analysis(), Err(PortError::NoImage)));
        assert!(!app.state().loading);
    }

    #[tokio::test]
    async fn second_submit_is_rejected_while_pending() {
        let (mut app, _, _) = controller();
        app.select_image(tongue_photo());

        let request = app.begin_analysis().unwrap();
        assert!(app.state().loading);
        assert!(matches!(app.begin_analysis(), Err(PortError::Busy)));

        app.finish_analysis(request, Ok(findings("Qi Deficiency")))
            .await
            .unwrap();
        assert!(!app.state().loading);
    }

    #[tokio::test]
    async fn signed_in_analysis_is_saved_at_the_front() {
        let (mut app, accounts, _) = controller();
        app.signup("mei", "pw").await.unwrap();
        app.select_image(tongue_photo());
        app.run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();
        app.analyze_another();
        app.select_image(tongue_photo());
        app.set_symptoms("bloating");

        app.run_analysis(&FixedAnalysis(findings("Qi Deficiency")))
            .await
            .unwrap();

        let stored = accounts.current_user().await.unwrap().unwrap();
        assert_eq!(stored.history.len(), 2);
        assert_eq!(stored.history[0].findings.pattern.as_deref(), Some("Qi Deficiency"));
        assert_eq!(stored.history[0].symptoms, "bloating");
        assert_ne!(stored.history[0].id, stored.history[1].id);
        assert_eq!(app.state().current_analysis.as_ref(), Some(&stored.history[0]));
        assert_eq!(app.state().screen, Screen::Analyze);
    }

    #[tokio::test]
    async fn anonymous_analysis_stays_in_memory() {
        let (mut app, _, storage) = controller();
        app.select_image(tongue_photo());

        app.run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();

        assert_eq!(app.state().history.len(), 1);
        assert_eq!(
            storage.get_item(crate::accounts::ACCOUNTS_KEY).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn failure_shows_localized_message() {
        let (mut app, _, _) = controller();
        app.set_language(Language::Fr);
        app.select_image(tongue_photo());

        let err = app.run_analysis(&FailingAnalysis).await.unwrap_err();

        assert!(err.is_analysis_failure());
        assert_eq!(
            app.state().error.as_deref(),
            Some(translations(Language::Fr).error)
        );
        assert!(app.state().current_analysis.is_none());
        assert!(!app.state().loading);
    }

    #[tokio::test]
    async fn login_adopts_pending_result_once() {
        let (mut app, accounts, _) = controller();
        accounts.signup("mei", "pw").await.unwrap();
        accounts.logout().await.unwrap();

        app.select_image(tongue_photo());
        app.run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();
        app.login("mei", "pw").await.unwrap();
        app.logout().await.unwrap();
        app.login("mei", "pw").await.unwrap();

        let stored = accounts.current_user().await.unwrap().unwrap();
        assert_eq!(stored.history.len(), 1);
        assert_eq!(app.state().history.len(), 1);
    }

    #[tokio::test]
    async fn failed_login_is_reported_on_the_form() {
        let (mut app, _, _) = controller();
        app.open_overlay(Overlay::Auth).unwrap();

        let err = app.login("mei", "pw").await.unwrap_err();

        assert!(matches!(err, PortError::InvalidCredential));
        assert_eq!(
            app.state().auth_error.as_deref(),
            Some("Invalid username or password")
        );
        assert!(app.state().overlays.auth);
    }

    #[tokio::test]
    async fn logout_returns_home_and_clears_session_state() {
        let (mut app, _, storage) = controller();
        app.signup("mei", "pw").await.unwrap();
        app.select_image(tongue_photo());
        app.set_symptoms("tired");
        app.run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();

        app.logout().await.unwrap();

        let state = app.state();
        assert_eq!(state.screen, Screen::Home);
        assert!(state.user.is_none());
        assert!(state.history.is_empty());
        assert!(state.current_analysis.is_none());
        assert!(state.selected_image.is_none());
        assert!(state.symptoms.is_empty());
        assert_eq!(storage.get_item(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn restore_session_loads_history() {
        let (mut first, _, _) = controller();
        first.signup("mei", "pw").await.unwrap();
        first.select_image(tongue_photo());
        first
            .run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();

        let mut reloaded = AppController::new(first.accounts.clone(), FeatureFlags::default());
        reloaded.restore_session().await.unwrap();

        assert_eq!(reloaded.state().user.as_ref().unwrap().username, "mei");
        assert_eq!(reloaded.state().history.len(), 1);
        assert_eq!(reloaded.state().screen, Screen::Home);
    }

    #[tokio::test]
    async fn history_overlay_needs_a_user() {
        let (mut app, _, _) = controller();
        assert!(matches!(
            app.open_overlay(Overlay::History),
            Err(PortError::Unauthorized)
        ));

        app.signup("mei", "pw").await.unwrap();
        app.open_overlay(Overlay::History).unwrap();
        assert!(app.state().overlays.history);
    }

    #[tokio::test]
    async fn selecting_history_shows_the_record() {
        let (mut app, _, _) = controller();
        app.signup("mei", "pw").await.unwrap();
        app.select_image(tongue_photo());
        app.run_analysis(&FixedAnalysis(findings("Damp-Heat")))
            .await
            .unwrap();
        let id = app.state().history[0].id.clone();
        app.go_home();
        app.open_overlay(Overlay::History).unwrap();

        app.select_history_item(&id).unwrap();

        assert_eq!(app.state().screen, Screen::Analyze);
        assert_eq!(app.state().current_analysis.as_ref().unwrap().id, id);
        assert!(!app.state().overlays.history);
        assert!(matches!(
            app.select_history_item("missing"),
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn disabled_login_button_blocks_auth() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let accounts = AccountService::new(
            LocalStorage::new(store, "device"),
            Arc::new(PlainTextCredentials),
        );
        let mut flags = FeatureFlags::default();
        flags.auth.login_button = false;
        let mut app = AppController::new(accounts, flags);

        assert!(matches!(
            app.open_overlay(Overlay::Auth),
            Err(PortError::FeatureDisabled(_))
        ));
        assert!(matches!(
            app.signup("mei", "pw").await,
            Err(PortError::FeatureDisabled(_))
        ));
        assert!(matches!(
            app.toggle_auth_mode(),
            Err(PortError::FeatureDisabled(_))
        ));
    }

    #[tokio::test]
    async fn voice_transcript_is_appended() {
        let (mut app, _, _) = controller();
        app.set_symptoms("headache");

        assert_eq!(app.begin_listening().unwrap(), Language::En);
        assert!(matches!(app.begin_listening(), Err(PortError::Busy)));
        app.finish_listening(Ok(" poor sleep ".to_string())).unwrap();

        assert_eq!(app.state().symptoms, "headache poor sleep");
        assert!(!app.state().listening);
    }

    #[tokio::test]
    async fn cancelled_listening_drops_the_transcript() {
        let (mut app, _, _) = controller();
        app.set_symptoms("headache");
        app.begin_listening().unwrap();

        app.cancel_listening();
        assert!(!app.state().listening);
        app.finish_listening(Ok("poor sleep".to_string())).unwrap();

        assert_eq!(app.state().symptoms, "headache");
        assert_eq!(app.begin_listening().unwrap(), Language::En);
    }

    #[tokio::test]
    async fn auth_form_toggles_between_modes() {
        let (mut app, _, _) = controller();
        app.open_overlay(Overlay::Auth).unwrap();
        assert_eq!(app.state().auth_mode, AuthMode::Login);
        app.login("mei", "pw").await.unwrap_err();
        assert!(app.state().auth_error.is_some());

        assert_eq!(app.toggle_auth_mode().unwrap(), AuthMode::Signup);
        assert!(app.state().auth_error.is_none());

        app.close_overlay(Overlay::Auth);
        app.open_overlay(Overlay::Auth).unwrap();
        assert_eq!(app.state().auth_mode, AuthMode::Signup);
        assert_eq!(app.toggle_auth_mode().unwrap(), AuthMode::Login);
    }

    #[tokio::test]
    async fn unsupported_voice_input_is_localized() {
        let (mut app, _, _) = controller();
        app.set_language(Language::Zh);
        app.begin_listening().unwrap();

        let err = app
            .finish_listening(Err(PortError::Unsupported("no provider".into())))
            .unwrap_err();

        assert_eq!(err.to_string(), translations(Language::Zh).voice_unsupported);
        assert!(!app.state().listening);
    }

    #[test]
    fn transcript_spacing() {
        assert_eq!(append_transcript("", "tired"), "tired");
        assert_eq!(append_transcript("cold hands", "tired"), "cold hands tired");
        assert_eq!(append_transcript("cold hands ", "tired"), "cold hands tired");
        assert_eq!(append_transcript("cold hands\n", "tired"), "cold hands\ntired");
    }
}
