//! JSON-backed collection stores.
//!
//! Every entity collection round-trips through the same generic file store;
//! the purchase log reuses it through `append`. An absent or unreadable file
//! loads as an empty collection; write failures surface as errors.

use std::cell::RefCell;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use coinop_common::game::Game;
use coinop_common::machine::Machine;
use coinop_common::purchase::Purchase;
use coinop_common::user::User;

/// Failure at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/save boundary over one entity collection.
///
/// Object-safe so the shop holds `Box<dyn Store<_>>` and tests can swap in
/// `MemStore` for the file-backed stores.
pub trait Store<T> {
    /// Load the whole collection. A store that does not exist yet is an
    /// empty collection, not an error.
    fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the whole collection.
    fn save(&self, items: &[T]) -> Result<(), StoreError>;

    /// Append one record, rewriting the collection.
    fn append(&self, item: T) -> Result<(), StoreError> {
        let mut items = self.load()?;
        items.push(item);
        self.save(&items)
    }
}

/// File-backed store holding one pretty-printed JSON array.
pub struct JsonStore<T> {
    path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for JsonStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!("treating unreadable store {} as empty: {err}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let mut body =
            serde_json::to_string_pretty(items).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        body.push('\n');
        fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store, for tests and dry runs.
pub struct MemStore<T> {
    items: RefCell<Vec<T>>,
}

impl<T> MemStore<T> {
    pub fn new() -> Self {
        MemStore {
            items: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Default for MemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Store<T> for MemStore<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.borrow().clone())
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.borrow_mut() = items.to_vec();
        Ok(())
    }
}

/// The four stores backing the shop, injected into the workflow.
pub struct Stores {
    pub users: Box<dyn Store<User>>,
    pub games: Box<dyn Store<Game>>,
    pub machines: Box<dyn Store<Machine>>,
    pub purchases: Box<dyn Store<Purchase>>,
}

impl Stores {
    /// File-backed stores under `data_dir`: users.json, games.json,
    /// machines.json and the purchases.json log.
    pub fn json(data_dir: &Path) -> Self {
        Stores {
            users: Box::new(JsonStore::new(data_dir.join("users.json"))),
            games: Box::new(JsonStore::new(data_dir.join("games.json"))),
            machines: Box::new(JsonStore::new(data_dir.join("machines.json"))),
            purchases: Box::new(JsonStore::new(data_dir.join("purchases.json"))),
        }
    }

    /// Memory-backed stores.
    pub fn in_memory() -> Self {
        Stores {
            users: Box::new(MemStore::new()),
            games: Box::new(MemStore::new()),
            machines: Box::new(MemStore::new()),
            purchases: Box::new(MemStore::new()),
        }
    }
}
