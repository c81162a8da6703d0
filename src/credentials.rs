use crate::error::{GenerationError, Result};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// API key for the generation service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***{} chars)", self.0.len())
    }
}

/// Where a user-registered key lives. Implementations must re-read their
/// backing state on every call.
pub trait CredentialStore: Send + Sync {
    fn registered_key(&self) -> Option<String>;
}

/// A store with nothing registered; only the environment default applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegisteredKey;

impl CredentialStore for NoRegisteredKey {
    fn registered_key(&self) -> Option<String> {
        None
    }
}

/// In-process registration, e.g. a key typed into a settings dialog.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    key: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, key: impl Into<String>) {
        if let Ok(mut slot) = self.key.write() {
            *slot = Some(key.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.key.write() {
            *slot = None;
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn registered_key(&self) -> Option<String> {
        self.key.read().ok().and_then(|slot| slot.clone())
    }
}

/// A single credential string persisted in a file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn register(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GenerationError::Config(format!("Cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        fs::write(&self.path, key.trim()).map_err(|e| {
            GenerationError::Config(format!("Cannot write {}: {}", self.path.display(), e))
        })
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GenerationError::Config(format!(
                "Cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn registered_key(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(key) => Some(key),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!(
                    "Cannot read registered key at {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Registered key first, then the named environment variable.
pub fn resolve_credential(store: &dyn CredentialStore, env_var: &str) -> Result<Credential> {
    if let Some(key) = non_blank(store.registered_key()) {
        log::debug!("Using registered API key");
        return Ok(Credential::new(key));
    }

    if let Some(key) = non_blank(env::var(env_var).ok()) {
        log::debug!("Using API key from {}", env_var);
        return Ok(Credential::new(key));
    }

    log::error!("No API key registered and {} is not set", env_var);
    Err(GenerationError::MissingCredential)
}
