//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-device controllers.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tongue_balance_core::accounts::AccountService;
use tongue_balance_core::controller::AppController;
use tongue_balance_core::features::FeatureFlags;
use tongue_balance_core::ports::{
    CredentialHasher, KeyValueStore, PortResult, SpeechToTextService, TongueAnalysisService,
};
use tongue_balance_core::storage::LocalStorage;
use tracing::info;
use uuid::Uuid;

/// A device's controller. The lock serializes everything that device does.
pub type SharedController = Arc<Mutex<AppController>>;

//=========================================================================================
// AppState (Shared Across All Devices)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub storage: Arc<dyn KeyValueStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub analysis_adapter: Arc<dyn TongueAnalysisService>,
    pub sst_adapter: Arc<dyn SpeechToTextService>,
    pub flags: FeatureFlags,
    devices: Mutex<HashMap<Uuid, SharedController>>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        hasher: Arc<dyn CredentialHasher>,
        analysis_adapter: Arc<dyn TongueAnalysisService>,
        sst_adapter: Arc<dyn SpeechToTextService>,
        flags: FeatureFlags,
    ) -> Self {
        Self {
            storage,
            hasher,
            analysis_adapter,
            sst_adapter,
            flags,
            devices: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh controller for `device` with its session restored from storage.
    async fn fresh_controller(&self, device: Uuid) -> PortResult<SharedController> {
        let storage = LocalStorage::new(self.storage.clone(), device.to_string());
        let accounts = AccountService::new(storage, self.hasher.clone());
        let mut controller = AppController::new(accounts, self.flags);
        controller.restore_session().await?;
        Ok(Arc::new(Mutex::new(controller)))
    }

    /// The device's current controller, created on first contact.
    pub async fn controller_for(&self, device: Uuid) -> PortResult<SharedController> {
        let mut devices = self.devices.lock().await;
        if let Some(controller) = devices.get(&device) {
            return Ok(controller.clone());
        }
        let controller = self.fresh_controller(device).await?;
        devices.insert(device, controller.clone());
        Ok(controller)
    }

    /// The device's controller if it has one. Never registers a new device.
    pub async fn registered(&self, device: Uuid) -> Option<SharedController> {
        self.devices.lock().await.get(&device).cloned()
    }

    /// For read-only routes: the registered controller, or a fresh one that is
    /// not kept. A request without a cookie then leaves nothing behind.
    pub async fn view_controller(&self, device: Uuid) -> PortResult<SharedController> {
        match self.registered(device).await {
            Some(controller) => Ok(controller),
            None => self.fresh_controller(device).await,
        }
    }

    /// Page load: throws the device's view state away and starts over from storage.
    /// Anything still pending on the old controller is abandoned.
    pub async fn reload(&self, device: Uuid) -> PortResult<SharedController> {
        let controller = self.fresh_controller(device).await?;
        let previous = self.devices.lock().await.insert(device, controller.clone());
        if previous.is_some() {
            info!("Device {} reloaded", device);
        }
        Ok(controller)
    }

    /// False once the device has reloaded since `controller` was handed out.
    pub async fn is_current(&self, device: Uuid, controller: &SharedController) -> bool {
        self.devices
            .lock()
            .await
            .get(&device)
            .is_some_and(|current| Arc::ptr_eq(current, controller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tongue_balance_core::domain::{AnalysisFindings, ImagePayload, Language};
    use tongue_balance_core::ports::{AudioFormat, PortError};
    use tongue_balance_core::{MemoryStore, PlainTextCredentials};

    struct Offline;

    #[async_trait]
    impl TongueAnalysisService for Offline {
        async fn analyze_tongue(
            &self,
            _image: &ImagePayload,
            _symptoms: &str,
            _language: Language,
        ) -> PortResult<AnalysisFindings> {
            Err(PortError::Remote("offline".to_string()))
        }
    }

    #[async_trait]
    impl SpeechToTextService for Offline {
        async fn transcribe_audio(
            &self,
            _audio_data: &[u8],
            _format: AudioFormat,
            _language: Language,
        ) -> PortResult<String> {
            Err(PortError::Remote("offline".to_string()))
        }
    }

    fn app_state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PlainTextCredentials),
            Arc::new(Offline),
            Arc::new(Offline),
            FeatureFlags::default(),
        )
    }

    #[tokio::test]
    async fn read_only_lookups_do_not_register_devices() {
        let state = app_state();
        let device = Uuid::new_v4();

        let viewed = state.view_controller(device).await.unwrap();
        assert!(state.registered(device).await.is_none());
        assert!(state.devices.lock().await.is_empty());

        let created = state.controller_for(device).await.unwrap();
        assert!(!Arc::ptr_eq(&viewed, &created));
        let again = state.view_controller(device).await.unwrap();
        assert!(Arc::ptr_eq(&again, &created));
    }

    #[tokio::test]
    async fn reload_replaces_the_current_controller() {
        let state = app_state();
        let device = Uuid::new_v4();
        let first = state.controller_for(device).await.unwrap();

        let second = state.reload(device).await.unwrap();

        assert!(!state.is_current(device, &first).await);
        assert!(state.is_current(device, &second).await);
    }
}
