//! Study catalog entries.
//!
//! Whether an entry is reserved (never rendered as its own report column) is
//! decided once, when the entry enters the system, and carried as a flag.

use serde::{Deserialize, Serialize};

pub type StudyId = i64;

/// Catalog names that are billed but never get a dynamic column.
pub const RESERVED_STUDY_NAMES: &[&str] = &["PAP/LABS", "PAPANICOLAOU"];

/// Returns true if `name` matches a reserved study name (case-insensitive).
pub fn is_reserved_study_name(name: &str) -> bool {
    let trimmed = name.trim();
    RESERVED_STUDY_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
}

/// A billable study category known to the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogEntryRow")]
pub struct StudyCatalogEntry {
    pub id: StudyId,
    pub name: String,
    pub reserved: bool,
}

impl StudyCatalogEntry {
    /// Build an entry, deriving the reserved flag from its name.
    pub fn new(id: StudyId, name: impl Into<String>) -> Self {
        let name = name.into();
        let reserved = is_reserved_study_name(&name);
        Self { id, name, reserved }
    }

    #[must_use]
    pub fn with_reserved(mut self, reserved: bool) -> Self {
        self.reserved = reserved;
        self
    }
}

/// Catalog entry as stored; `reserved` may be absent in older exports.
#[derive(Deserialize)]
struct CatalogEntryRow {
    id: StudyId,
    name: String,
    #[serde(default)]
    reserved: Option<bool>,
}

impl From<CatalogEntryRow> for StudyCatalogEntry {
    fn from(row: CatalogEntryRow) -> Self {
        let entry = StudyCatalogEntry::new(row.id, row.name);
        match row.reserved {
            Some(reserved) => entry.with_reserved(reserved),
            None => entry,
        }
    }
}
