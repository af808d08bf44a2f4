pub mod analysis_llm;
pub mod credentials;
pub mod sst;
pub mod storage;

pub use analysis_llm::GeminiAnalysisAdapter;
pub use credentials::Argon2Hasher;
pub use sst::OpenAiSstAdapter;
pub use storage::SqliteStorageAdapter;
