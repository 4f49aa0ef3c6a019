use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::*;
use crate::field::{FieldDescriptor, FieldKind};
use crate::messages::{Locale, ENGLISH};
use crate::notifier::{Notification, Notifier, ToastColor};
use crate::submit::{SubmitResult, Submitter};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

enum Answer {
    Resolve(SubmitResult),
    Fail,
}

struct FakeSubmitter {
    answer: Answer,
    calls: AtomicUsize,
    last: Mutex<Option<(FormValues, bool)>>,
}

impl FakeSubmitter {
    fn new(answer: Answer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Submitter for FakeSubmitter {
    async fn submit(&self, data: FormValues, is_edit: bool) -> anyhow::Result<SubmitResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((data, is_edit));
        match &self.answer {
            Answer::Resolve(result) => Ok(result.clone()),
            Answer::Fail => Err(anyhow::anyhow!("connection reset")),
        }
    }
}

fn values(v: Value) -> FormValues {
    v.as_object().cloned().unwrap()
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(FieldKind::Text, "nama", "Nama").required(),
        FieldDescriptor::new(FieldKind::Email, "email", "Email"),
        FieldDescriptor::new(FieldKind::Select, "rayon", "Rayon").with_endpoint("/rayon"),
    ]
}

fn config() -> ModalConfig {
    ModalConfig::new("Jemaat", fields())
        .with_locale(Locale::En)
        .with_defaults(values(json!({"nama": "", "email": "", "rayon": null})))
        .with_descriptor_schema()
}

fn open_modal() -> FormModal {
    let mut modal = FormModal::new(config());
    modal.open(None);
    modal
}

#[test]
fn test_create_open_seeds_defaults() {
    let modal = open_modal();
    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Create));
    assert_eq!(
        modal.state().values(),
        &values(json!({"nama": "", "email": "", "rayon": null}))
    );
}

#[test]
fn test_edit_open_overlays_edit_data() {
    let mut modal = FormModal::new(config());
    modal.open(Some(values(json!({"id": 7, "nama": "Debora", "rayon": 2}))));

    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Edit));
    assert_eq!(
        modal.state().values(),
        &values(json!({"id": 7, "nama": "Debora", "email": "", "rayon": 2}))
    );
}

#[tokio::test]
async fn test_invalid_input_never_reaches_submitter() {
    let mut modal = open_modal();
    modal.set_value("email", json!("bukan email")).unwrap();
    let submitter = FakeSubmitter::new(Answer::Resolve(SubmitResult::ok()));
    let notifier = RecordingNotifier::default();

    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    match outcome {
        SubmitOutcome::Invalid { errors } => {
            assert_eq!(errors["nama"], ENGLISH.required);
            assert_eq!(errors["email"], ENGLISH.invalid_email);
        }
        other => panic!("expected invalid, got {:?}", other),
    }
    assert_eq!(submitter.calls(), 0);
    assert!(notifier.sent().is_empty());
    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Create));
    assert_eq!(
        modal.state().error("nama").map(|e| e.source),
        Some(ErrorSource::Schema)
    );
}

#[tokio::test]
async fn test_success_notifies_once_runs_hook_and_closes() {
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = hook_calls.clone();
    let mut modal = FormModal::new(config().with_on_success(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })));
    modal.open(None);
    modal.set_value("nama", json!("Samuel")).unwrap();

    let submitter = FakeSubmitter::new(Answer::Resolve(SubmitResult::ok()));
    let notifier = RecordingNotifier::default();
    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Saved {
            message: ENGLISH.created.to_string(),
            data: None,
        }
    );
    assert_eq!(submitter.calls(), 1);
    let (data, is_edit) = submitter.last.lock().unwrap().clone().unwrap();
    assert_eq!(data["nama"], json!("Samuel"));
    assert!(!is_edit);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].color, ToastColor::Success);
    assert_eq!(sent[0].description, ENGLISH.created);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert!(modal.state().values().is_empty());
}

#[tokio::test]
async fn test_success_message_from_result_and_edit_default() {
    let mut modal = FormModal::new(config());
    modal.open(Some(values(json!({"id": 1, "nama": "Rut"}))));
    let notifier = RecordingNotifier::default();

    let submitter = FakeSubmitter::new(Answer::Resolve(SubmitResult::ok()));
    modal.submit(&submitter, &notifier).await.unwrap();
    assert_eq!(notifier.sent()[0].description, ENGLISH.updated);
    assert!(submitter.last.lock().unwrap().as_ref().unwrap().1);

    modal.open(None);
    modal.set_value("nama", json!("Naomi")).unwrap();
    let submitter = FakeSubmitter::new(Answer::Resolve(
        SubmitResult::ok().with_message("Jemaat tersimpan"),
    ));
    modal.submit(&submitter, &notifier).await.unwrap();
    assert_eq!(notifier.sent()[1].description, "Jemaat tersimpan");
}

#[tokio::test]
async fn test_rejection_maps_field_errors_and_stays_open() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Lidia")).unwrap();
    modal.set_value("email", json!("lidia@gereja.id")).unwrap();
    let before = modal.state().values().clone();

    let submitter = FakeSubmitter::new(Answer::Resolve(
        SubmitResult::default().with_field_error("email", "taken"),
    ));
    let notifier = RecordingNotifier::default();
    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    match outcome {
        SubmitOutcome::Rejected {
            message,
            field_errors,
            dropped,
        } => {
            assert_eq!(message, ENGLISH.create_failed);
            assert_eq!(field_errors.len(), 1);
            assert!(dropped.is_empty());
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Create));
    let error = modal.state().error("email").unwrap();
    assert_eq!(error.message, "taken");
    assert_eq!(error.source, ErrorSource::Manual);
    assert_eq!(modal.state().errors().len(), 1);
    assert_eq!(modal.state().values(), &before);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].color, ToastColor::Error);
    assert_eq!(sent[0].title, ENGLISH.create_failed_title);
}

#[tokio::test]
async fn test_rejection_drops_unknown_error_keys() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Lidia")).unwrap();

    let submitter = FakeSubmitter::new(Answer::Resolve(
        SubmitResult::rejected("NIK sudah terdaftar").with_field_error("nik", "duplicate"),
    ));
    let notifier = RecordingNotifier::default();
    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "NIK sudah terdaftar".to_string(),
            field_errors: FieldErrors::new(),
            dropped: vec!["nik".to_string()],
        }
    );
    assert!(!modal.state().has_errors());
    assert_eq!(notifier.sent()[0].description, "NIK sudah terdaftar");
}

#[tokio::test]
async fn test_submitter_failure_is_one_generic_notification() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Timotius")).unwrap();

    let submitter = FakeSubmitter::new(Answer::Fail);
    let notifier = RecordingNotifier::default();
    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(
        notifier.sent(),
        vec![Notification::error(ENGLISH.system_error_title, ENGLISH.system_error)]
    );
    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Create));
    assert!(!modal.state().has_errors());
    assert!(!modal.state().is_submitting());
}

#[test]
fn test_controls_locked_while_submitting() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Petrus")).unwrap();

    let ticket = match modal.begin_submit().unwrap() {
        Prepared::Ticket(ticket) => ticket,
        Prepared::Invalid(errors) => panic!("unexpected errors {:?}", errors),
    };
    assert!(matches!(modal.phase(), ModalPhase::Submitting(_)));
    assert!(modal.state().is_submitting());

    let view = modal.view();
    assert!(view.controls_disabled);
    assert_eq!(view.confirm_label, ENGLISH.saving);

    assert!(modal.close(CloseReason::Cancel).is_err());
    assert!(modal.close(CloseReason::Backdrop).is_err());
    assert!(modal.set_value("nama", json!("Paulus")).is_err());
    assert!(modal.begin_submit().is_err());

    let notifier = RecordingNotifier::default();
    let outcome = modal.finish_submit(ticket, Ok(SubmitResult::ok()), &notifier);
    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
}

#[test]
fn test_stale_ticket_after_reopen_is_discarded() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Petrus")).unwrap();
    let ticket = match modal.begin_submit().unwrap() {
        Prepared::Ticket(ticket) => ticket,
        Prepared::Invalid(_) => unreachable!(),
    };

    // The owner switches to editing another record before the save lands.
    modal.open(Some(values(json!({"id": 9, "nama": "Yakobus"}))));
    let reseeded = modal.state().clone();

    let notifier = RecordingNotifier::default();
    let outcome = modal.finish_submit(ticket, Ok(SubmitResult::ok()), &notifier);

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(notifier.sent().is_empty());
    assert_eq!(modal.phase(), ModalPhase::Open(FormMode::Edit));
    assert_eq!(modal.state(), &reseeded);
}

#[test]
fn test_dismiss_while_submitting_invalidates_ticket() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Petrus")).unwrap();
    let ticket = match modal.begin_submit().unwrap() {
        Prepared::Ticket(ticket) => ticket,
        Prepared::Invalid(_) => unreachable!(),
    };

    modal.close(CloseReason::Dismissed).unwrap();
    let notifier = RecordingNotifier::default();
    let outcome = modal.finish_submit(ticket, Err(anyhow::anyhow!("timeout")), &notifier);

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(notifier.sent().is_empty());
    assert_eq!(modal.phase(), ModalPhase::Closed);
}

#[test]
fn test_sync_reseeds_only_on_edge_or_new_target() {
    let mut modal = FormModal::new(config());
    let target = values(json!({"id": 1, "nama": "Ester"}));

    modal.sync(true, Some(target.clone()));
    let first = modal.generation();
    modal.set_value("email", json!("ester@gereja.id")).unwrap();

    // Same target: user input survives.
    modal.sync(true, Some(target.clone()));
    assert_eq!(modal.generation(), first);
    assert_eq!(modal.state().value("email"), Some(&json!("ester@gereja.id")));

    // New target: re-seeded from scratch.
    modal.sync(true, Some(values(json!({"id": 2, "nama": "Miriam"}))));
    assert!(modal.generation() > first);
    assert_eq!(modal.state().value("email"), Some(&json!("")));
    assert_eq!(modal.state().value("nama"), Some(&json!("Miriam")));

    modal.sync(false, None);
    assert_eq!(modal.phase(), ModalPhase::Closed);
}

#[test]
fn test_cancel_discards_state() {
    let mut modal = open_modal();
    modal.set_value("nama", json!("Markus")).unwrap();
    modal.close(CloseReason::Cancel).unwrap();

    assert!(!modal.is_open());
    assert!(modal.state().values().is_empty());
    assert!(modal.view().fields.is_empty());

    modal.open(None);
    assert_eq!(modal.state().value("nama"), Some(&json!("")));
}

#[test]
fn test_unknown_field_is_rejected() {
    let mut modal = open_modal();
    assert!(matches!(
        modal.set_value("alamat", json!("Jl. Damai")),
        Err(FlockError::FieldNotFound(_))
    ));
}

#[test]
fn test_view_headings_follow_mode() {
    let mut modal = FormModal::new(ModalConfig::new("Rayon", fields()));
    modal.open(None);
    let view = modal.view();
    assert_eq!(view.heading, "Tambah Rayon");
    assert_eq!(view.confirm_label, "Simpan");
    assert_eq!(view.fields.len(), 3);
    assert_eq!(view.fields[0].value, Value::Null);

    modal.open(Some(values(json!({"nama": "Rayon 1"}))));
    let view = modal.view();
    assert_eq!(view.heading, "Edit Rayon");
    assert_eq!(view.confirm_label, "Perbarui");
    assert_eq!(view.fields[0].value, json!("Rayon 1"));
}

#[tokio::test]
async fn test_without_schema_nothing_is_validated_locally() {
    let mut modal = FormModal::new(ModalConfig::new("Rayon", fields()).with_locale(Locale::En));
    modal.open(None);

    let submitter = FakeSubmitter::new(Answer::Resolve(SubmitResult::ok()));
    let notifier = RecordingNotifier::default();
    let outcome = modal.submit(&submitter, &notifier).await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
    assert_eq!(submitter.calls(), 1);
}
