//! In-process registry of open tabs keyed by the tab cookie id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use kernel::id::TabSessionId;
use tokio::sync::Mutex;

use crate::application::portal_tab::PortalTab;

pub type SharedTab<C> = Arc<Mutex<PortalTab<C>>>;

struct Entry<C> {
    tab: SharedTab<C>,
    last_seen_ms: AtomicI64,
}

pub struct TabRegistry<C> {
    tabs: RwLock<HashMap<TabSessionId, Arc<Entry<C>>>>,
}

impl<C> Default for TabRegistry<C> {
    fn default() -> Self {
        Self {
            tabs: RwLock::new(HashMap::new()),
        }
    }
}

impl<C> TabRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tab and mark it seen
    pub fn get(&self, id: &TabSessionId, now_ms: i64) -> Option<SharedTab<C>> {
        let tabs = self.tabs.read().unwrap_or_else(|e| e.into_inner());
        let entry = tabs.get(id)?;
        entry.last_seen_ms.store(now_ms, Ordering::Relaxed);
        Some(entry.tab.clone())
    }

    pub fn insert(&self, id: TabSessionId, tab: PortalTab<C>, now_ms: i64) -> SharedTab<C> {
        let tab = Arc::new(Mutex::new(tab));
        let entry = Arc::new(Entry {
            tab: tab.clone(),
            last_seen_ms: AtomicI64::new(now_ms),
        });
        self.tabs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, entry);
        tab
    }

    pub fn remove(&self, id: &TabSessionId) -> bool {
        self.tabs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    /// Drop tabs not seen within `idle_ttl_ms`; returns how many were dropped
    pub fn prune_idle(&self, now_ms: i64, idle_ttl_ms: i64) -> usize {
        let mut tabs = self.tabs.write().unwrap_or_else(|e| e.into_inner());
        let before = tabs.len();
        tabs.retain(|_, entry| now_ms - entry.last_seen_ms.load(Ordering::Relaxed) < idle_ttl_ms);
        let pruned = before - tabs.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = tabs.len(), "Pruned idle tabs");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.tabs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
