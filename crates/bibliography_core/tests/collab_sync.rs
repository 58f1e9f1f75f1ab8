use bibliography_core::{
    BibliographyEntry, ChannelError, CollabError, CollabMessage, CollabSession, EntryForm,
    EntryId, EntryList, EntryRow, ListChange, MessageChannel, RemoteOutcome, TemplateRegistry,
};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<CollabMessage>>,
}

impl RecordingChannel {
    fn drain(&self) -> Vec<CollabMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl MessageChannel for RecordingChannel {
    fn post(&self, message: &CollabMessage) -> Result<(), ChannelError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct ClosedChannel;

impl MessageChannel for ClosedChannel {
    fn post(&self, _message: &CollabMessage) -> Result<(), ChannelError> {
        Err(ChannelError::Closed)
    }
}

fn film(registry: &TemplateRegistry, title: &str, place: &str) -> BibliographyEntry {
    let template = registry.lookup("Film").expect("Film is built in");
    let mut form = EntryForm::new(template, NaiveDate::from_ymd_opt(2015, 1, 3).unwrap());
    form.set(0, title).unwrap();
    form.set(1, "1999").unwrap();
    form.set(2, "DVD").unwrap();
    form.set(3, "Buena Vista").unwrap();
    form.set(4, place).unwrap();
    form.submit().expect("every Film field is filled or optional")
}

fn peers() -> (
    Arc<TemplateRegistry>,
    CollabSession,
    Arc<RecordingChannel>,
    CollabSession,
) {
    let registry = Arc::new(TemplateRegistry::builtin().expect("builtin catalogue is valid"));
    let channel = Arc::new(RecordingChannel::default());
    let mut local = CollabSession::new(registry.clone(), EntryList::new());
    local.join(channel.clone());
    let remote = CollabSession::new(registry.clone(), EntryList::new());
    (registry, local, channel, remote)
}

fn added(result: Result<Option<EntryId>, CollabError>) -> EntryId {
    result
        .expect("film template renders the entry")
        .expect("fresh entry id is not a duplicate")
}

fn replay(channel: &RecordingChannel, peer: &mut CollabSession) {
    for message in channel.drain() {
        let wire = message.to_json().unwrap();
        assert_eq!(peer.receive_json(&wire).unwrap(), RemoteOutcome::Applied);
    }
}

#[test]
fn local_mutations_are_broadcast_in_order() {
    let (registry, mut local, channel, _) = peers();
    let id = added(local.add(film(&registry, "Toy Story 2", "")));
    local
        .edit(id, film(&registry, "Toy Story 2", "Burbank"))
        .expect("film template renders the edit");
    local.delete(id);

    let actions: Vec<&str> = channel.drain().iter().map(|m| m.action()).collect();
    assert_eq!(actions, vec!["add_item", "edit_item", "delete_row"]);
}

#[test]
fn remote_edit_matches_local_edit() {
    let (registry, mut local, channel, mut remote) = peers();
    let id = added(local.add(film(&registry, "Toy Story 2", "")));
    added(local.add(film(&registry, "Up", "")));
    replay(&channel, &mut remote);
    assert_eq!(remote.list().entries(), local.list().entries());

    local
        .edit(id, film(&registry, "Toy Story 2", "Burbank"))
        .expect("film template renders the edit")
        .expect("edited entry exists");
    replay(&channel, &mut remote);

    assert_eq!(remote.list().entries(), local.list().entries());
    assert_eq!(
        remote.list().get(id).unwrap().rendered_text,
        "<i>Toy Story 2</i> 1999, DVD, Buena Vista, Burbank. "
    );
}

#[test]
fn remote_delete_twice_is_a_noop() {
    let (registry, mut local, channel, mut remote) = peers();
    let id = added(local.add(film(&registry, "Cars", "")));
    replay(&channel, &mut remote);

    local.delete(id);
    let messages = channel.drain();
    assert_eq!(messages.len(), 1);
    let delete = messages[0].clone();

    assert_eq!(remote.receive(delete.clone()).unwrap(), RemoteOutcome::Applied);
    assert_eq!(remote.receive(delete).unwrap(), RemoteOutcome::Missed);
    assert!(remote.list().is_empty());
}

#[test]
fn legacy_messages_match_by_content() {
    let (registry, _, _, mut remote) = peers();
    let entry = film(&registry, "Cars", "");
    let row = entry.to_row();

    let add = CollabMessage::AddItem {
        args: row.clone(),
        id: None,
    };
    assert_eq!(remote.receive(add).unwrap(), RemoteOutcome::Applied);

    let replacement = film(&registry, "Cars", "Emeryville").to_row();
    let edit = CollabMessage::EditItem {
        path: None,
        args: replacement.clone(),
        previous: Some(row),
    };
    assert_eq!(remote.receive(edit).unwrap(), RemoteOutcome::Applied);

    let delete = CollabMessage::DeleteRow {
        args: replacement,
        path: None,
    };
    assert_eq!(remote.receive(delete).unwrap(), RemoteOutcome::Applied);
    assert!(remote.list().is_empty());
}

#[test]
fn unknown_template_is_dropped() {
    let (_, _, _, mut remote) = peers();
    let message = CollabMessage::AddItem {
        args: EntryRow {
            rendered_text: "a scroll".to_string(),
            type_name: "Clay Tablet".to_string(),
            raw_values_json: "[]".to_string(),
        },
        id: None,
    };
    let err = remote.receive(message).unwrap_err();
    assert!(matches!(err, CollabError::UnknownType(_)));
    assert!(remote.list().is_empty());
}

#[test]
fn malformed_wire_text_is_dropped() {
    let (_, _, _, mut remote) = peers();
    let err = remote.receive_json("{\"action\": \"add_item\"}").unwrap_err();
    assert!(matches!(err, CollabError::Decode(_)));
}

#[test]
fn remote_text_is_rerendered_locally() {
    let (registry, _, _, mut remote) = peers();
    let mut row = film(&registry, "Cars", "").to_row();
    row.rendered_text = "<b>tampered</b>".to_string();

    remote
        .receive(CollabMessage::AddItem { args: row, id: None })
        .unwrap();
    let stored = &remote.list().entries()[0];
    assert!(stored.is_consistent_with(registry.lookup("Film").unwrap()));
}

#[test]
fn closed_channel_does_not_undo_local_apply() {
    let registry = Arc::new(TemplateRegistry::builtin().unwrap());
    let mut session = CollabSession::new(registry.clone(), EntryList::new());
    session.join(Arc::new(ClosedChannel));
    assert!(session.is_shared());

    let id = added(session.add(film(&registry, "Cars", "")));
    assert!(session.list().get(id).is_some());

    let changes = session.take_changes();
    assert!(matches!(changes.as_slice(), [ListChange::Added(_)]));
}

#[test]
fn local_add_of_unregistered_type_is_rejected_and_not_sent() {
    let (_, mut local, channel, _) = peers();
    let stray = BibliographyEntry::new("<b>anything</b>", "Clay Tablet", vec!["x".to_string()]);

    let err = local.add(stray).unwrap_err();
    assert!(matches!(err, CollabError::UnknownType(_)));
    assert!(local.list().is_empty());
    assert!(channel.drain().is_empty());
}

#[test]
fn local_entries_are_rerendered_before_storing_and_sending() {
    let (registry, mut local, channel, mut remote) = peers();
    let mut forged = film(&registry, "Cars", "");
    forged.rendered_text = "<b>not what Film renders</b>".to_string();

    let id = added(local.add(forged));
    let stored = local.list().get(id).expect("added entry is stored");
    assert!(stored.is_consistent_with(registry.lookup("Film").expect("Film is built in")));

    replay(&channel, &mut remote);
    assert_eq!(remote.list().entries(), local.list().entries());
}

#[test]
fn local_edit_with_unregistered_type_keeps_previous_entry() {
    let (registry, mut local, channel, _) = peers();
    let id = added(local.add(film(&registry, "Cars", "")));
    channel.drain();

    let stray = BibliographyEntry::new("x", "Clay Tablet", vec!["x".to_string()]);
    assert!(matches!(local.edit(id, stray), Err(CollabError::UnknownType(_))));
    assert_eq!(local.list().get(id).map(|e| e.type_name.as_str()), Some("Film"));
    assert!(channel.drain().is_empty());
}

#[test]
fn duplicate_local_add_reports_none_and_sends_once() {
    let (registry, mut local, channel, _) = peers();
    let entry = film(&registry, "Cars", "");

    let first = local.add(entry.clone()).expect("film renders");
    assert_eq!(first, Some(entry.id));
    assert_eq!(local.add(entry).expect("film renders"), None);

    assert_eq!(channel.drain().len(), 1);
    assert_eq!(local.list().len(), 1);
}

#[test]
fn edit_of_unknown_id_reports_none_and_sends_nothing() {
    let (registry, mut local, channel, _) = peers();
    let missing = uuid::Uuid::new_v4();
    let outcome = local
        .edit(missing, film(&registry, "Cars", ""))
        .expect("film renders");
    assert!(outcome.is_none());
    assert!(channel.drain().is_empty());
}
