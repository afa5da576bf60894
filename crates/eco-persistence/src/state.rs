//! Application state container.
//!
//! State is loaded once from the store when the application starts and each
//! mutation writes the full snapshot of the slot it changed. A mutation is
//! only applied in memory after its snapshot has been written.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use eco_model::{IdCase, InspectionRecord, Inspector, NewInspector, User, generate_id};

use crate::archive::RecordArchive;
use crate::directory::InspectorDirectory;
use crate::error::{PersistenceError, Result};
use crate::store::{KeyValueStore, Slot};

/// Counts shown on the dashboard's local database panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStatus {
    pub user: Option<String>,
    pub inspectors: usize,
    pub records: usize,
}

#[derive(Debug)]
pub struct AppState<S: KeyValueStore> {
    store: S,
    user: Option<User>,
    inspectors: InspectorDirectory,
    archive: RecordArchive,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load every slot from `store`.
    ///
    /// Absent slots start empty. Unreadable or malformed slots are logged
    /// and also start empty; loading never fails.
    pub fn load(store: S) -> Self {
        let user = load_slot::<Option<User>>(&store, Slot::User);
        let inspectors = load_slot::<InspectorDirectory>(&store, Slot::Inspectors);
        let archive = load_slot::<RecordArchive>(&store, Slot::History);
        info!(
            logged_in = user.is_some(),
            inspectors = inspectors.len(),
            records = archive.len(),
            "loaded application state"
        );
        Self {
            store,
            user,
            inspectors,
            archive,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Stamp the operator name. No verification takes place.
    pub fn login(&mut self, name: &str) -> Result<&User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PersistenceError::InvalidLogin);
        }
        let user = User {
            name: name.to_string(),
        };
        save_slot(&mut self.store, Slot::User, &user)?;
        info!(user = %user.name, "logged in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(Slot::User)?;
        if let Some(user) = self.user.take() {
            info!(user = %user.name, "logged out");
        }
        Ok(())
    }

    pub fn inspectors(&self) -> &InspectorDirectory {
        &self.inspectors
    }

    /// Register an inspector under a freshly generated id.
    pub fn add_inspector(&mut self, draft: NewInspector) -> Result<Inspector> {
        let id = generate_id(IdCase::Lower, |candidate| self.inspectors.contains(candidate))?;
        let inspector = draft.into_inspector(id)?;

        let mut inspectors = self.inspectors.clone();
        inspectors.push(inspector.clone());
        save_slot(&mut self.store, Slot::Inspectors, &inspectors)?;
        self.inspectors = inspectors;

        info!(id = %inspector.id, name = %inspector.name, "registered inspector");
        Ok(inspector)
    }

    /// Delete an inspector from the directory.
    ///
    /// Archived records keep their own snapshot of the inspector and are not
    /// touched. Returns how many of them reference the removed id.
    pub fn remove_inspector(&mut self, id: &str) -> Result<usize> {
        let mut inspectors = self.inspectors.clone();
        let removed = inspectors
            .remove(id)
            .ok_or_else(|| PersistenceError::UnknownInspector { id: id.to_string() })?;
        save_slot(&mut self.store, Slot::Inspectors, &inspectors)?;
        self.inspectors = inspectors;

        let referenced = self.archive.count_for_inspector(id);
        if referenced > 0 {
            warn!(
                id,
                name = %removed.name,
                records = referenced,
                "removed inspector is still named on archived records"
            );
        } else {
            info!(id, name = %removed.name, "removed inspector");
        }
        Ok(referenced)
    }

    pub fn archive(&self) -> &RecordArchive {
        &self.archive
    }

    /// A record id not used by any archived record.
    pub fn next_record_id(&self) -> Result<String> {
        Ok(generate_id(IdCase::Upper, |candidate| {
            self.archive.contains(candidate)
        })?)
    }

    /// Store a finished record at the front of the archive.
    pub fn add_record(&mut self, record: InspectionRecord) -> Result<()> {
        let id = record.id.clone();
        let mut archive = self.archive.clone();
        archive.prepend(record);
        save_slot(&mut self.store, Slot::History, &archive)?;
        self.archive = archive;
        info!(id = %id, records = self.archive.len(), "archived inspection record");
        Ok(())
    }

    pub fn status(&self) -> DashboardStatus {
        DashboardStatus {
            user: self.user.as_ref().map(|user| user.name.clone()),
            inspectors: self.inspectors.len(),
            records: self.archive.len(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn load_slot<T: DeserializeOwned + Default>(store: &impl KeyValueStore, slot: Slot) -> T {
    let raw = match store.get(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(slot = slot.key(), "slot is empty");
            return T::default();
        }
        Err(e) => {
            warn!(slot = slot.key(), error = %e, "could not read slot, starting empty");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(slot = slot.key(), error = %e, "malformed slot, starting empty");
            T::default()
        }
    }
}

fn save_slot<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    slot: Slot,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|source| PersistenceError::Serialization {
        slot: slot.key(),
        source,
    })?;
    store.set(slot, &json)
}
