//! Binding storage trait and implementations.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::binding::ScriptBinding;
use crate::origin::Origin;

/// Errors that can occur in binding store operations.
#[derive(Debug, thiserror::Error)]
pub enum BindingStoreError {
    /// Failed to read bindings from storage.
    #[error("Failed to read bindings: {0}")]
    Read(String),

    /// Failed to write bindings to storage.
    #[error("Failed to write bindings: {0}")]
    Write(String),

    /// IO error during storage operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for binding storage implementations.
///
/// Stores persist the origin → script mapping so it survives restarts.
/// Implementations handle the mechanics of saving and loading bindings;
/// the consistency rules (one binding per origin, binding ⟺ permission ⟺
/// registration) are owned by the callers.
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// Look up the binding for one origin.
    async fn get(&self, origin: &Origin) -> Result<Option<ScriptBinding>, BindingStoreError>;

    /// Look up bindings for several origins at once.
    ///
    /// Origins without a binding are simply absent from the result.
    async fn get_many(&self, origins: &[Origin]) -> Result<Vec<ScriptBinding>, BindingStoreError>;

    /// Save a binding, replacing any previous binding for the same origin.
    async fn put(&self, binding: ScriptBinding) -> Result<(), BindingStoreError>;

    /// Remove the binding for an origin.
    ///
    /// Returns `true` if a binding was removed, `false` if none existed.
    async fn remove(&self, origin: &Origin) -> Result<bool, BindingStoreError>;

    /// All stored bindings.
    async fn all(&self) -> Result<Vec<ScriptBinding>, BindingStoreError>;
}

/// In-memory binding store.
///
/// Bindings are cleared when the process exits. This is the default store
/// used by the menu controller and the store of choice for tests.
///
/// # Example
///
/// ```rust
/// use sitewire_core::{BindingStore, MemoryBindingStore, Origin, ScriptBinding, ScriptId};
///
/// # tokio_test::block_on(async {
/// let store = MemoryBindingStore::new();
/// let origin = Origin::parse("https://github.com").unwrap();
///
/// store
///     .put(ScriptBinding::new(origin.clone(), ScriptId::Github))
///     .await
///     .unwrap();
///
/// let found = store.get(&origin).await.unwrap();
/// assert_eq!(found.unwrap().script, ScriptId::Github);
/// # });
/// ```
pub struct MemoryBindingStore {
    bindings: RwLock<HashMap<Origin, ScriptBinding>>,
}

impl MemoryBindingStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBindingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BindingStore for MemoryBindingStore {
    async fn get(&self, origin: &Origin) -> Result<Option<ScriptBinding>, BindingStoreError> {
        Ok(self
            .bindings
            .read()
            .expect("RwLock poisoned")
            .get(origin)
            .cloned())
    }

    async fn get_many(&self, origins: &[Origin]) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        let bindings = self.bindings.read().expect("RwLock poisoned");
        Ok(origins
            .iter()
            .filter_map(|o| bindings.get(o).cloned())
            .collect())
    }

    async fn put(&self, binding: ScriptBinding) -> Result<(), BindingStoreError> {
        let mut bindings = self.bindings.write().expect("RwLock poisoned");
        bindings.insert(binding.origin.clone(), binding);
        Ok(())
    }

    async fn remove(&self, origin: &Origin) -> Result<bool, BindingStoreError> {
        let mut bindings = self.bindings.write().expect("RwLock poisoned");
        Ok(bindings.remove(origin).is_some())
    }

    async fn all(&self) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        Ok(self
            .bindings
            .read()
            .expect("RwLock poisoned")
            .values()
            .cloned()
            .collect())
    }
}

/// File-based binding store.
///
/// Bindings are persisted to a JSON file keyed by origin string. The file
/// is created automatically when the first binding is stored.
pub struct FileBindingStore {
    path: PathBuf,
    cache: RwLock<Option<HashMap<Origin, ScriptBinding>>>,
}

impl FileBindingStore {
    /// Create a new file-based store at the given path.
    ///
    /// The file does not need to exist - it will be created when
    /// the first binding is saved.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Load bindings from file into cache if not already loaded.
    fn ensure_loaded(&self) -> Result<(), BindingStoreError> {
        let mut cache = self.cache.write().expect("RwLock poisoned");
        if cache.is_some() {
            return Ok(());
        }

        let bindings = if self.path.exists() {
            let contents = std::fs::read_to_string(&self.path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            HashMap::new()
        };

        *cache = Some(bindings);
        Ok(())
    }

    /// Write cache to file.
    fn flush(&self) -> Result<(), BindingStoreError> {
        let cache = self.cache.read().expect("RwLock poisoned");
        if let Some(ref bindings) = *cache {
            if let Some(parent) = self.path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let json = serde_json::to_string_pretty(bindings)?;
            std::fs::write(&self.path, json)?;
        }
        Ok(())
    }
}

#[async_trait]
impl BindingStore for FileBindingStore {
    async fn get(&self, origin: &Origin) -> Result<Option<ScriptBinding>, BindingStoreError> {
        self.ensure_loaded()?;
        let cache = self.cache.read().expect("RwLock poisoned");
        Ok(cache.as_ref().and_then(|b| b.get(origin).cloned()))
    }

    async fn get_many(&self, origins: &[Origin]) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        self.ensure_loaded()?;
        let cache = self.cache.read().expect("RwLock poisoned");
        Ok(cache
            .as_ref()
            .map(|bindings| {
                origins
                    .iter()
                    .filter_map(|o| bindings.get(o).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(&self, binding: ScriptBinding) -> Result<(), BindingStoreError> {
        self.ensure_loaded()?;
        {
            let mut cache = self.cache.write().expect("RwLock poisoned");
            if let Some(ref mut bindings) = *cache {
                bindings.insert(binding.origin.clone(), binding);
            }
        }
        self.flush()
    }

    async fn remove(&self, origin: &Origin) -> Result<bool, BindingStoreError> {
        self.ensure_loaded()?;
        let removed = {
            let mut cache = self.cache.write().expect("RwLock poisoned");
            cache
                .as_mut()
                .map(|bindings| bindings.remove(origin).is_some())
                .unwrap_or(false)
        };
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }

    async fn all(&self) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        self.ensure_loaded()?;
        let cache = self.cache.read().expect("RwLock poisoned");
        Ok(cache
            .as_ref()
            .map(|b| b.values().cloned().collect())
            .unwrap_or_default())
    }
}
