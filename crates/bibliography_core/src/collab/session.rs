//! Shared editing session over an entry list.
//!
//! # Responsibility
//! - Apply local mutations, then broadcast them to peers.
//! - Replay peer messages against the local list.
//!
//! # Invariants
//! - Local apply happens before broadcast; a failed post is logged, not undone.
//! - Local and remote entries alike must name a registered template and are
//!   re-rendered, so `rendered_text` always matches the local registry.
//! - Remote misses (unknown target) are logged and dropped.

use crate::collab::message::CollabMessage;
use crate::format::FormatError;
use crate::list::{EntryList, ListChange};
use crate::model::entry::{BibliographyEntry, EntryError, EntryId, EntryRow};
use crate::registry::{RegistryError, TemplateRegistry};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Transport failure reported by a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Session channel is gone.
    Closed,
    /// Transport-specific failure text.
    Transport(String),
}

impl Display for ChannelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "collaboration channel is closed"),
            Self::Transport(message) => write!(f, "collaboration transport failed: {message}"),
        }
    }
}

impl Error for ChannelError {}

/// Outbound side of the externally owned session channel.
pub trait MessageChannel: Send + Sync {
    fn post(&self, message: &CollabMessage) -> Result<(), ChannelError>;
}

/// Errors raised while replaying a peer message.
#[derive(Debug)]
pub enum CollabError {
    Decode(serde_json::Error),
    UnknownType(RegistryError),
    InvalidValues(EntryError),
    Render(FormatError),
}

impl Display for CollabError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid collaboration message: {err}"),
            Self::UnknownType(err) => write!(f, "{err}"),
            Self::InvalidValues(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "remote entry cannot be rendered: {err}"),
        }
    }
}

impl Error for CollabError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::UnknownType(err) => Some(err),
            Self::InvalidValues(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CollabError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<RegistryError> for CollabError {
    fn from(value: RegistryError) -> Self {
        Self::UnknownType(value)
    }
}

impl From<EntryError> for CollabError {
    fn from(value: EntryError) -> Self {
        Self::InvalidValues(value)
    }
}

impl From<FormatError> for CollabError {
    fn from(value: FormatError) -> Self {
        Self::Render(value)
    }
}

/// Result of replaying one peer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    Applied,
    /// Target entry not found (or id already present); nothing changed.
    Missed,
}

/// Entry list plus optional broadcast channel.
pub struct CollabSession {
    registry: Arc<TemplateRegistry>,
    list: EntryList,
    channel: Option<Arc<dyn MessageChannel>>,
}

impl CollabSession {
    /// Unshared session; mutations are applied locally only.
    pub fn new(registry: Arc<TemplateRegistry>, list: EntryList) -> Self {
        Self {
            registry,
            list,
            channel: None,
        }
    }

    /// Starts broadcasting local mutations on `channel`.
    pub fn join(&mut self, channel: Arc<dyn MessageChannel>) {
        self.channel = Some(channel);
    }

    pub fn leave(&mut self) {
        self.channel = None;
    }

    pub fn is_shared(&self) -> bool {
        self.channel.is_some()
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn list(&self) -> &EntryList {
        &self.list
    }

    pub fn into_list(self) -> EntryList {
        self.list
    }

    /// Drains list change notifications (local and remote).
    pub fn take_changes(&mut self) -> Vec<ListChange> {
        self.list.take_changes()
    }

    /// Adds a locally created entry and broadcasts it.
    ///
    /// Returns `Ok(None)` when the id is already present; nothing is sent.
    ///
    /// # Errors
    /// - `UnknownType` / `Render` when the entry's template cannot render it.
    ///   The list is left unchanged and nothing is sent.
    pub fn add(&mut self, entry: BibliographyEntry) -> Result<Option<EntryId>, CollabError> {
        let entry = self.checked_local(entry, "add_item")?;
        let id = entry.id;
        let row = entry.to_row();
        if !self.list.add(entry) {
            return Ok(None);
        }
        self.broadcast(CollabMessage::AddItem {
            args: row,
            id: Some(id),
        });
        Ok(Some(id))
    }

    /// Replaces entry `id` locally and broadcasts the edit.
    ///
    /// Returns `Ok(None)` when `id` is unknown; nothing is sent.
    ///
    /// # Errors
    /// - `UnknownType` / `Render`, as for [`CollabSession::add`].
    pub fn edit(
        &mut self,
        id: EntryId,
        replacement: BibliographyEntry,
    ) -> Result<Option<BibliographyEntry>, CollabError> {
        let replacement = self.checked_local(replacement, "edit_item")?;
        let row = replacement.to_row();
        let Some(previous) = self.list.edit(id, replacement) else {
            return Ok(None);
        };
        self.broadcast(CollabMessage::EditItem {
            path: Some(id),
            args: row,
            previous: Some(previous.to_row()),
        });
        Ok(Some(previous))
    }

    /// Deletes entry `id` locally and broadcasts the removed row.
    pub fn delete(&mut self, id: EntryId) -> Option<BibliographyEntry> {
        let removed = self.list.delete(id)?;
        self.broadcast(CollabMessage::DeleteRow {
            args: removed.to_row(),
            path: Some(id),
        });
        Some(removed)
    }

    /// Decodes and replays one wire message.
    pub fn receive_json(&mut self, text: &str) -> Result<RemoteOutcome, CollabError> {
        let message = CollabMessage::from_json(text).map_err(|err| {
            warn!("event=collab_receive module=collab status=dropped reason=decode");
            CollabError::from(err)
        })?;
        self.receive(message)
    }

    /// Replays one peer message against the local list.
    ///
    /// Errors are logged and returned; the list is left unchanged.
    pub fn receive(&mut self, message: CollabMessage) -> Result<RemoteOutcome, CollabError> {
        let action = message.action();
        let outcome = self.apply_remote(message);
        match &outcome {
            Ok(RemoteOutcome::Applied) => {
                debug!("event=collab_receive module=collab status=ok action={action}");
            }
            Ok(RemoteOutcome::Missed) => {
                warn!("event=collab_receive module=collab status=missed action={action}");
            }
            Err(err) => {
                error!("event=collab_receive module=collab status=dropped action={action} error={err}");
            }
        }
        outcome
    }

    fn apply_remote(&mut self, message: CollabMessage) -> Result<RemoteOutcome, CollabError> {
        match message {
            CollabMessage::AddItem { args, id } => {
                let entry = self.rebuild(id, &args)?;
                Ok(outcome(self.list.add(entry)))
            }
            CollabMessage::EditItem {
                path,
                args,
                previous,
            } => {
                let target = self.resolve(path, previous.as_ref());
                let Some(target) = target else {
                    return Ok(RemoteOutcome::Missed);
                };
                let entry = self.rebuild(Some(target), &args)?;
                Ok(outcome(self.list.edit(target, entry).is_some()))
            }
            CollabMessage::DeleteRow { args, path } => {
                let Some(target) = self.resolve(path, Some(&args)) else {
                    return Ok(RemoteOutcome::Missed);
                };
                Ok(outcome(self.list.delete(target).is_some()))
            }
        }
    }

    /// Picks the local target: the id when known here, else a content match.
    fn resolve(&self, path: Option<EntryId>, row: Option<&EntryRow>) -> Option<EntryId> {
        path.filter(|id| self.list.get(*id).is_some())
            .or_else(|| row.and_then(|row| self.list.find_row(row)))
    }

    fn rebuild(
        &self,
        id: Option<EntryId>,
        row: &EntryRow,
    ) -> Result<BibliographyEntry, CollabError> {
        let values = row.raw_values()?;
        let id = id.unwrap_or_else(Uuid::new_v4);
        self.render_checked(id, &row.type_name, values, &row.rendered_text)
    }

    fn checked_local(
        &self,
        entry: BibliographyEntry,
        action: &str,
    ) -> Result<BibliographyEntry, CollabError> {
        let BibliographyEntry {
            id,
            rendered_text,
            type_name,
            raw_values,
        } = entry;
        self.render_checked(id, &type_name, raw_values, &rendered_text)
            .map_err(|err| {
                error!("event=collab_local module=collab status=rejected action={action} error={err}");
                err
            })
    }

    /// Re-renders `values` with the registered template named `type_name`.
    fn render_checked(
        &self,
        id: EntryId,
        type_name: &str,
        values: Vec<String>,
        claimed_text: &str,
    ) -> Result<BibliographyEntry, CollabError> {
        let template = self.registry.lookup(type_name)?;
        let rendered = template.render(&values)?;
        if rendered != claimed_text {
            warn!("event=entry_render module=collab status=rerendered type={type_name}");
        }
        Ok(BibliographyEntry::with_id(id, rendered, template.name(), values))
    }

    fn broadcast(&self, message: CollabMessage) {
        let Some(channel) = &self.channel else {
            return;
        };
        match channel.post(&message) {
            Ok(()) => debug!(
                "event=collab_post module=collab status=ok action={}",
                message.action()
            ),
            Err(err) => warn!(
                "event=collab_post module=collab status=dropped action={} error={err}",
                message.action()
            ),
        }
    }
}

fn outcome(applied: bool) -> RemoteOutcome {
    if applied {
        RemoteOutcome::Applied
    } else {
        RemoteOutcome::Missed
    }
}
