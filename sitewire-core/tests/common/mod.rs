//! Common test utilities shared across test files.
//!
//! Mock host implementations and a wired-up controller harness.
//! Items here may not be used by all test files, hence the module-level allow.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sitewire_core::{
    BindingStore, BindingStoreError, MemoryBindingStore, MenuClick, MenuController, MenuEvent,
    MenuHook, MenuState, MenuSurface, Origin, PermissionError, PermissionHost, RegistrationHandle,
    RegistrationRequest, RegistryError, ScriptBinding, ScriptHost, ScriptId, TabError, TabHost,
    TabId,
};

// ===== Permission Host =====

/// A permission host with a fixed manifest and a mutable granted set.
///
/// Prompts are auto-approved unless told otherwise; every prompt is
/// counted so tests can assert a toggle never reached the platform.
pub struct MockPermissionHost {
    manifest: Vec<String>,
    granted: Mutex<Vec<String>>,
    approve_prompts: AtomicBool,
    refuse_removals: AtomicBool,
    prompts: AtomicUsize,
}

impl MockPermissionHost {
    pub fn new(manifest: &[&str]) -> Self {
        Self {
            manifest: manifest.iter().map(|s| s.to_string()).collect(),
            granted: Mutex::new(Vec::new()),
            approve_prompts: AtomicBool::new(true),
            refuse_removals: AtomicBool::new(false),
            prompts: AtomicUsize::new(0),
        }
    }

    /// Make future prompts resolve as denied/dismissed.
    pub fn deny_prompts(&self) {
        self.approve_prompts.store(false, Ordering::SeqCst);
    }

    /// Make future removals resolve `false` without touching the granted
    /// set, as a platform that refuses to release the permission would.
    pub fn refuse_removals(&self) {
        self.refuse_removals.store(true, Ordering::SeqCst);
    }

    /// Pre-grant a pattern without a prompt, as the browser's own
    /// permissions UI would.
    pub fn grant(&self, pattern: &str) {
        self.granted.lock().unwrap().push(pattern.to_string());
    }

    /// Revoke a pattern out-of-band.
    pub fn revoke_out_of_band(&self, pattern: &str) {
        self.granted.lock().unwrap().retain(|p| p != pattern);
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn granted_patterns(&self) -> Vec<String> {
        self.granted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PermissionHost for MockPermissionHost {
    async fn manifest_origins(&self) -> Result<Vec<String>, PermissionError> {
        Ok(self.manifest.clone())
    }

    async fn granted_origins(&self) -> Result<Vec<String>, PermissionError> {
        Ok(self.granted.lock().unwrap().clone())
    }

    async fn request_origin(&self, pattern: &str) -> Result<bool, PermissionError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let approve = self.approve_prompts.load(Ordering::SeqCst);
        if approve {
            let mut granted = self.granted.lock().unwrap();
            if !granted.iter().any(|p| p == pattern) {
                granted.push(pattern.to_string());
            }
        }
        Ok(approve)
    }

    async fn remove_origin(&self, pattern: &str) -> Result<bool, PermissionError> {
        if self.refuse_removals.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.granted.lock().unwrap().retain(|p| p != pattern);
        Ok(true)
    }
}

// ===== Script Host =====

/// A script host that tracks live registrations by id.
pub struct MockScriptHost {
    next_id: AtomicU64,
    live: Mutex<HashMap<u64, RegistrationRequest>>,
    fail_register: AtomicBool,
}

impl MockScriptHost {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            live: Mutex::new(HashMap::new()),
            fail_register: AtomicBool::new(false),
        }
    }

    /// Make future register calls fail.
    pub fn fail_registrations(&self) {
        self.fail_register.store(true, Ordering::SeqCst);
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    /// The injected files currently live, in no particular order.
    pub fn live_files(&self) -> Vec<String> {
        self.live
            .lock()
            .unwrap()
            .values()
            .map(|r| r.js_file.clone())
            .collect()
    }
}

impl Default for MockScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptHost for MockScriptHost {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationHandle, RegistryError> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(RegistryError::Host("registration refused".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live.lock().unwrap().insert(id, request);
        Ok(RegistrationHandle::new(id))
    }

    async fn unregister(&self, handle: RegistrationHandle) -> Result<(), RegistryError> {
        self.live.lock().unwrap().remove(&handle.id());
        Ok(())
    }
}

// ===== Binding Store =====

/// A memory-backed store whose reads can be made to fail, standing in
/// for corrupted or unavailable storage.
pub struct FlakyBindingStore {
    inner: MemoryBindingStore,
    fail_reads: AtomicBool,
}

impl FlakyBindingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBindingStore::new(),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Make future reads fail; writes keep working.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), BindingStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BindingStoreError::Read("storage unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for FlakyBindingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BindingStore for FlakyBindingStore {
    async fn get(&self, origin: &Origin) -> Result<Option<ScriptBinding>, BindingStoreError> {
        self.check_read()?;
        self.inner.get(origin).await
    }

    async fn get_many(&self, origins: &[Origin]) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        self.check_read()?;
        self.inner.get_many(origins).await
    }

    async fn put(&self, binding: ScriptBinding) -> Result<(), BindingStoreError> {
        self.inner.put(binding).await
    }

    async fn remove(&self, origin: &Origin) -> Result<bool, BindingStoreError> {
        self.inner.remove(origin).await
    }

    async fn all(&self) -> Result<Vec<ScriptBinding>, BindingStoreError> {
        self.check_read()?;
        self.inner.all().await
    }
}

// ===== Tab Host =====

/// A tab host with programmable URLs and a reload log.
pub struct MockTabHost {
    urls: Mutex<HashMap<TabId, String>>,
    reloads: Mutex<Vec<TabId>>,
}

impl MockTabHost {
    pub fn new() -> Self {
        Self {
            urls: Mutex::new(HashMap::new()),
            reloads: Mutex::new(Vec::new()),
        }
    }

    pub fn set_url(&self, tab: TabId, url: &str) {
        self.urls.lock().unwrap().insert(tab, url.to_string());
    }

    /// Drop the tab entirely, as if it had been closed.
    pub fn close(&self, tab: TabId) {
        self.urls.lock().unwrap().remove(&tab);
    }

    pub fn reload_count(&self, tab: TabId) -> usize {
        self.reloads.lock().unwrap().iter().filter(|t| **t == tab).count()
    }
}

impl Default for MockTabHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabHost for MockTabHost {
    async fn tab_url(&self, tab: TabId) -> Result<String, TabError> {
        self.urls
            .lock()
            .unwrap()
            .get(&tab)
            .cloned()
            .ok_or(TabError::Unresolvable(tab))
    }

    async fn reload(&self, tab: TabId) -> Result<(), TabError> {
        self.reloads.lock().unwrap().push(tab);
        Ok(())
    }
}

// ===== Menu Surface =====

/// A surface that records every rendered state.
pub struct RecordingSurface {
    states: Mutex<Vec<MenuState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(Vec::new()),
        }
    }

    pub fn last_state(&self) -> Option<MenuState> {
        self.states.lock().unwrap().last().copied()
    }

    pub fn render_count(&self) -> usize {
        self.states.lock().unwrap().len()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuSurface for RecordingSurface {
    async fn render(&self, state: MenuState) {
        self.states.lock().unwrap().push(state);
    }
}

// ===== Event Collector =====

/// A hook that collects event debug strings for order assertions.
pub struct EventCollector {
    events: Mutex<Vec<String>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Variant names of every event seen so far, in order.
    pub fn names(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for EventCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuHook for EventCollector {
    fn on_event(&self, event: &MenuEvent) {
        let debug = format!("{:?}", event);
        let name = debug
            .split([' ', '{'])
            .next()
            .unwrap_or_default()
            .to_string();
        self.events.lock().unwrap().push(name);
    }
}

// ===== Harness =====

/// A controller wired to mocks, with every mock kept inspectable.
pub struct Harness {
    pub permissions: Arc<MockPermissionHost>,
    pub scripts: Arc<MockScriptHost>,
    pub tabs: Arc<MockTabHost>,
    pub surface: Arc<RecordingSurface>,
    pub store: Arc<MemoryBindingStore>,
    pub controller: Arc<MenuController>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_manifest(&[])
    }

    pub fn with_manifest(manifest: &[&str]) -> Self {
        let permissions = Arc::new(MockPermissionHost::new(manifest));
        let scripts = Arc::new(MockScriptHost::new());
        let tabs = Arc::new(MockTabHost::new());
        let surface = Arc::new(RecordingSurface::new());
        let store = Arc::new(MemoryBindingStore::new());

        let controller = Arc::new(
            MenuController::builder()
                .permission_host(permissions.clone())
                .script_host(scripts.clone())
                .tab_host(tabs.clone())
                .surface(surface.clone())
                .store(store.clone())
                .build()
                .expect("harness controller"),
        );

        Self {
            permissions,
            scripts,
            tabs,
            surface,
            store,
            controller,
        }
    }

    /// The stored script for `url`'s origin, if any.
    pub async fn store_binding(&self, url: &str) -> Option<ScriptId> {
        let origin = Origin::parse(url).expect("test origin");
        self.store
            .get(&origin)
            .await
            .expect("store read")
            .map(|b| b.script)
    }

    /// A click on `script`'s checkbox for a tab showing `url`.
    pub fn click(&self, script: ScriptId, tab: TabId, url: &str, checked: bool) -> MenuClick {
        MenuClick {
            item_id: script.menu_item_id().to_string(),
            checked,
            tab,
            url: Some(url.to_string()),
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
