pub mod classify;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompts;

pub use classify::{classify, is_permission_denied};
pub use config::StudioConfig;
pub use credentials::{
    resolve_credential, Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    NoRegisteredKey,
};
pub use error::{GenerationError, Result, ServiceError};
pub use gemini::{
    ClientProvider, ContentGenerator, HttpContentGenerator, ImageClient, PersonaClient,
    PersonaStudio,
};
pub use models::*;
