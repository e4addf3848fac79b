use crate::access::tier::Tier;

/// Where a role tag lives: surviving browser restarts or only the tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Persistent,
    Session,
}

/// Key-value backing for the role tag, one slot per scope.
///
/// In the browser this maps onto `localStorage`/`sessionStorage` under the
/// well-known role key; [`MemoryStorage`] backs tests and native embedders.
pub trait RoleStorage {
    fn get(&self, scope: StorageScope) -> Option<String>;
    fn set(&mut self, scope: StorageScope, value: String);
    fn remove(&mut self, scope: StorageScope);
}

/// In-memory [`RoleStorage`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    persistent: Option<String>,
    session: Option<String>,
}

impl RoleStorage for MemoryStorage {
    fn get(&self, scope: StorageScope) -> Option<String> {
        match scope {
            StorageScope::Persistent => self.persistent.clone(),
            StorageScope::Session => self.session.clone(),
        }
    }

    fn set(&mut self, scope: StorageScope, value: String) {
        match scope {
            StorageScope::Persistent => self.persistent = Some(value),
            StorageScope::Session => self.session = Some(value),
        }
    }

    fn remove(&mut self, scope: StorageScope) {
        match scope {
            StorageScope::Persistent => self.persistent = None,
            StorageScope::Session => self.session = None,
        }
    }
}

/// Explicit get/set/clear store for the persisted role tag.
#[derive(Debug)]
pub struct RoleStore<S> {
    storage: S,
}

impl<S: RoleStorage> RoleStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored role: persistent scope wins, then session scope, then
    /// `Visitor`. Unknown tags degrade to `Visitor` rather than erroring.
    pub fn stored_role(&self) -> Tier {
        self.storage
            .get(StorageScope::Persistent)
            .or_else(|| self.storage.get(StorageScope::Session))
            .and_then(|value| value.parse().ok())
            .unwrap_or(Tier::Visitor)
    }

    /// Persist a role tag. A persistent write removes the session copy so
    /// the two scopes never disagree.
    pub fn set_role(&mut self, role: Tier, persistent: bool) {
        if persistent {
            self.storage
                .set(StorageScope::Persistent, role.as_str().to_string());
            self.storage.remove(StorageScope::Session);
        } else {
            self.storage
                .set(StorageScope::Session, role.as_str().to_string());
        }
    }

    /// Remove the role tag from both scopes.
    pub fn clear(&mut self) {
        self.storage.remove(StorageScope::Persistent);
        self.storage.remove(StorageScope::Session);
    }
}
