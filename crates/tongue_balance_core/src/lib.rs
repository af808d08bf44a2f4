pub mod accounts;
pub mod controller;
pub mod domain;
pub mod features;
pub mod i18n;
pub mod legal;
pub mod ports;
pub mod report;
pub mod storage;

pub use accounts::{AccountService, PlainTextCredentials};
pub use controller::{AnalysisRequest, AppController, AuthMode, Overlay, Screen, ViewState};
pub use domain::{
    AnalysisFindings, Coating, Diet, Difficulty, ImagePayload, Language, Recommendations,
    StoredAccount, SuggestedCourse, TongueAnalysis, TongueBody, User,
};
pub use features::FeatureFlags;
pub use ports::{
    AudioFormat, CredentialHasher, KeyValueStore, PortError, PortResult, SpeechToTextService,
    TongueAnalysisService,
};
pub use report::ViewSnapshot;
pub use storage::{LocalStorage, MemoryStore};
