//! In-memory entry list with change notifications.
//!
//! # Invariants
//! - Storage order is insertion order; persisted rows use it unchanged.
//! - Display order is derived on demand and never written back.
//! - No two stored entries share an `EntryId`.
//! - Edit/delete misses are logged and become no-ops, never errors.

use crate::model::entry::{BibliographyEntry, EntryId, EntryRow};
use crate::registry::TemplateRegistry;
use log::{debug, error, info, warn};

/// Ordering used by `EntryList::display`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayOrder {
    /// Ascending by rendered text (byte order, stable for ties).
    #[default]
    Alphabetical,
    /// Same as storage order.
    Insertion,
}

/// Notification emitted for every applied mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    Added(BibliographyEntry),
    Edited {
        previous: BibliographyEntry,
        current: BibliographyEntry,
    },
    /// Carries the full removed entry.
    Deleted(BibliographyEntry),
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_unknown_type: usize,
    pub skipped_invalid_values: usize,
}

/// Ordered bibliography entries of one document session.
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<BibliographyEntry>,
    order: DisplayOrder,
    changes: Vec<ListChange>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: DisplayOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn order(&self) -> DisplayOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[BibliographyEntry] {
        &self.entries
    }

    /// Entries in display order.
    pub fn display(&self) -> Vec<&BibliographyEntry> {
        let mut view: Vec<&BibliographyEntry> = self.entries.iter().collect();
        if self.order == DisplayOrder::Alphabetical {
            view.sort_by(|a, b| a.rendered_text.cmp(&b.rendered_text));
        }
        view
    }

    /// Appends an entry.
    ///
    /// Returns `false` (and stores nothing) when the id is already present.
    pub fn add(&mut self, entry: BibliographyEntry) -> bool {
        if self.position(entry.id).is_some() {
            warn!(
                "event=entry_add module=list status=skipped reason=duplicate_id id={}",
                entry.id
            );
            return false;
        }
        debug!(
            "event=entry_add module=list status=ok id={} type={}",
            entry.id, entry.type_name
        );
        self.entries.push(entry.clone());
        self.changes.push(ListChange::Added(entry));
        true
    }

    pub fn get(&self, id: EntryId) -> Option<&BibliographyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Locates the first entry whose content equals `entry`, ignoring ids.
    pub fn find_by_value(&self, entry: &BibliographyEntry) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|candidate| candidate.same_content(entry))
            .map(|candidate| candidate.id)
    }

    /// Locates the first entry matching a persisted/wire row.
    pub fn find_row(&self, row: &EntryRow) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|candidate| candidate.matches_row(row))
            .map(|candidate| candidate.id)
    }

    /// Replaces entry `id` in place, keeping its position and id.
    ///
    /// Returns the previous entry, or `None` when `id` is unknown.
    pub fn edit(
        &mut self,
        id: EntryId,
        mut replacement: BibliographyEntry,
    ) -> Option<BibliographyEntry> {
        let Some(index) = self.position(id) else {
            error!("event=entry_edit module=list status=miss id={id}");
            return None;
        };
        replacement.id = id;
        let previous = std::mem::replace(&mut self.entries[index], replacement.clone());
        debug!(
            "event=entry_edit module=list status=ok id={id} type={}",
            replacement.type_name
        );
        self.changes.push(ListChange::Edited {
            previous: previous.clone(),
            current: replacement,
        });
        Some(previous)
    }

    /// Edits the first entry whose content equals `previous`.
    pub fn edit_by_value(
        &mut self,
        previous: &BibliographyEntry,
        replacement: BibliographyEntry,
    ) -> Option<BibliographyEntry> {
        match self.find_by_value(previous) {
            Some(id) => self.edit(id, replacement),
            None => {
                error!("event=entry_edit module=list status=miss reason=no_structural_match");
                None
            }
        }
    }

    /// Removes entry `id`; a second delete of the same id is a no-op.
    pub fn delete(&mut self, id: EntryId) -> Option<BibliographyEntry> {
        let Some(index) = self.position(id) else {
            warn!("event=entry_delete module=list status=miss id={id}");
            return None;
        };
        let removed = self.entries.remove(index);
        debug!("event=entry_delete module=list status=ok id={id}");
        self.changes.push(ListChange::Deleted(removed.clone()));
        Some(removed)
    }

    /// Removes the first entry whose content equals `entry`.
    pub fn delete_by_value(&mut self, entry: &BibliographyEntry) -> Option<BibliographyEntry> {
        match self.find_by_value(entry) {
            Some(id) => self.delete(id),
            None => {
                warn!("event=entry_delete module=list status=miss reason=no_structural_match");
                None
            }
        }
    }

    /// Dumps every entry as a persisted row, in insertion order.
    pub fn serialize(&self) -> Vec<EntryRow> {
        self.entries.iter().map(BibliographyEntry::to_row).collect()
    }

    /// Appends persisted rows under fresh ids.
    ///
    /// Rows naming an unregistered template or carrying undecodable values
    /// are logged and skipped. No change notifications are emitted.
    pub fn load_all(&mut self, rows: &[EntryRow], registry: &TemplateRegistry) -> LoadReport {
        let mut report = LoadReport::default();
        for row in rows {
            if !registry.contains(&row.type_name) {
                error!(
                    "event=entry_load module=list status=skipped reason=unknown_type type={}",
                    row.type_name
                );
                report.skipped_unknown_type += 1;
                continue;
            }
            match BibliographyEntry::from_row(row) {
                Ok(entry) => {
                    self.entries.push(entry);
                    report.loaded += 1;
                }
                Err(err) => {
                    error!("event=entry_load module=list status=skipped reason=invalid_values error={err}");
                    report.skipped_invalid_values += 1;
                }
            }
        }
        info!(
            "event=entries_load module=list status=ok loaded={} skipped={}",
            report.loaded,
            report.skipped_unknown_type + report.skipped_invalid_values
        );
        report
    }

    /// Drains pending change notifications, oldest first.
    pub fn take_changes(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.changes)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}
