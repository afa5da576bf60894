//! Local storage for EcoInspect.
//!
//! Everything the application remembers between runs lives in three
//! key-value slots, each holding a full JSON snapshot:
//!
//! ```text
//! ecoinspect_user        the logged-in operator ({"name": ...})
//! ecoinspect_inspectors  the inspector directory (array)
//! ecoinspect_history     the record archive, most recent first (array)
//! ```
//!
//! # Architecture
//!
//! - `store/` - [`KeyValueStore`] trait, [`FileStore`] (atomic writes) and
//!   [`MemoryStore`]
//! - `directory.rs` / `archive.rs` - the two persisted collections
//! - `state.rs` - [`AppState`], load-on-start and save-on-change
//! - `error.rs` - Error types with user-friendly messages
//!
//! # Example
//!
//! ```ignore
//! use eco_persistence::{AppState, FileStore};
//!
//! let mut state = AppState::load(FileStore::new("/var/lib/ecoinspect"));
//! state.login("Rina")?;
//! for record in state.archive().filter("hijau") {
//!     println!("{} {}", record.id, record.business.name);
//! }
//! ```

mod archive;
mod directory;
mod error;
mod state;
mod store;

pub use archive::RecordArchive;
pub use directory::InspectorDirectory;
pub use error::{PersistenceError, Result};
pub use state::{AppState, DashboardStatus};
pub use store::{FileStore, KeyValueStore, MemoryStore, Slot};
