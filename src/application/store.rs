//! JSON persistence: an explicit load-then-mutate-then-save cycle.
//!
//! The store reads and writes the flat record list (`family.json`
//! contract). Persistence is an independent step after a mutation
//! succeeds; there is no transactional coupling with the in-memory
//! tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{FamilyTree, PersonRecord};

/// File-backed store for a forest's flat record list.
pub struct TreeStore {
    path: PathBuf,
    root_label: String,
}

impl TreeStore {
    pub fn new(path: impl Into<PathBuf>, root_label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root_label: root_label.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the forest from disk.
    ///
    /// A missing file yields a fresh single-root tree. An unreadable
    /// or unparsable file also falls back to a fresh tree, with a
    /// warning instead of an error so a corrupt store never locks the
    /// user out. A file that parses but breaks the forest invariants
    /// is loaded as-is and warned about (permissive reconstruction).
    pub fn load(&self) -> FamilyTree {
        if !self.path.exists() {
            debug!("no data file at {}, starting fresh", self.path.display());
            return FamilyTree::new(&self.root_label);
        }
        match self.read_records() {
            Ok(records) => {
                let tree = FamilyTree::from_records(records, &self.root_label);
                if let Err(e) = tree.verify_invariants() {
                    warn!("{} fails the integrity check: {}", self.path.display(), e);
                }
                tree
            }
            Err(e) => {
                warn!("cannot load {}: {}; starting fresh", self.path.display(), e);
                FamilyTree::new(&self.root_label)
            }
        }
    }

    /// Write the complete record list, replacing the file.
    pub fn save(&self, tree: &FamilyTree) -> ApplicationResult<()> {
        let json = to_json(tree)?;
        fs::write(&self.path, json).map_err(|e| ApplicationError::Store {
            context: format!("write {}", self.path.display()),
            source: Box::new(e),
        })
    }

    fn read_records(&self) -> ApplicationResult<Vec<PersonRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|e| ApplicationError::Store {
            context: format!("read {}", self.path.display()),
            source: Box::new(e),
        })?;
        serde_json::from_str(&content).map_err(|e| ApplicationError::Store {
            context: format!("parse {}", self.path.display()),
            source: Box::new(e),
        })
    }
}

/// Render the forest's record list as pretty-printed JSON.
pub fn to_json(tree: &FamilyTree) -> ApplicationResult<String> {
    serde_json::to_string_pretty(&tree.to_records()).map_err(|e| ApplicationError::Store {
        context: "serialize record list".to_string(),
        source: Box::new(e),
    })
}
