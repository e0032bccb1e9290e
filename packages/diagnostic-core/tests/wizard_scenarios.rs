//! End-to-end wizard scenarios driven through the session host.

use diagnostic::testing::{
    valid_answers, valid_environmental, valid_identification_events, valid_operational_events,
    RecordingSubmitter,
};
use diagnostic::{
    EnvironmentalAnswer, EnvironmentalSystem, Field, FieldStore, FieldValue, GeoPoint, GeoSelector,
    Machine, OrganizationKind, Step, SubmissionPayload, ValidationErrors, WizardController,
    WizardEvent, WizardSession, WizardState, WizardView, MSG_ATTACH_DOCUMENT, MSG_INVALID_NUMBER,
};

fn changed(field: Field, value: impl Into<FieldValue>) -> WizardEvent {
    WizardEvent::FieldChanged {
        field,
        value: value.into(),
    }
}

/// Session already sitting on step 2 with valid step-1 answers.
fn session_on_operational_step() -> (WizardSession<RecordingSubmitter>, RecordingSubmitter) {
    let recorder = RecordingSubmitter::new();
    let mut session = WizardSession::new(recorder.clone());
    session.dispatch_all(&valid_identification_events());
    assert_eq!(session.dispatch(&WizardEvent::Advance), WizardState::Operational);
    (session, recorder)
}

#[test]
fn empty_record_cannot_advance() {
    let mut wizard = WizardController::new();

    let command = wizard.decide(&WizardEvent::Advance);

    assert!(command.is_none());
    assert_eq!(wizard.state(), WizardState::Identification);
    let fields: Vec<Field> = wizard.errors().fields().collect();
    assert_eq!(
        fields,
        vec![
            Field::Email,
            Field::OrganizationName,
            Field::LegalRepresentative,
            Field::IdNumber,
            Field::Address,
            Field::Georeference,
        ]
    );
}

#[test]
fn legal_entity_without_representative_is_blocked_on_that_field_only() {
    let mut wizard = WizardController::new();
    for event in valid_identification_events() {
        wizard.decide(&event);
    }
    wizard.decide(&changed(Field::LegalRepresentative, ""));

    wizard.decide(&WizardEvent::Advance);

    assert_eq!(wizard.state(), WizardState::Identification);
    assert_eq!(
        wizard.errors().fields().collect::<Vec<_>>(),
        vec![Field::LegalRepresentative]
    );
}

#[test]
fn natural_person_advances_without_representative() {
    let mut wizard = WizardController::new();
    for event in valid_identification_events() {
        wizard.decide(&event);
    }
    wizard.decide(&changed(Field::LegalRepresentative, "   "));
    wizard.decide(&changed(Field::OrganizationKind, OrganizationKind::NaturalPerson));

    wizard.decide(&WizardEvent::Advance);

    assert_eq!(wizard.state(), WizardState::Operational);
    assert!(wizard.errors().is_empty());
}

#[test]
fn yes_without_documents_blocks_submit_on_attachments_only() {
    let (mut session, recorder) = session_on_operational_step();
    session.dispatch_all(&valid_operational_events());
    session.dispatch(&WizardEvent::EnvironmentalSystemSelected {
        choice: EnvironmentalSystem::Yes,
    });

    let state = session.dispatch(&WizardEvent::Submit);

    assert_eq!(state, WizardState::Operational);
    let errors = session.view().errors;
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::AttachedDocuments]);
    assert_eq!(errors.get(Field::AttachedDocuments), Some(MSG_ATTACH_DOCUMENT));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn switching_yes_to_no_drops_documents_and_submits() {
    let (mut session, recorder) = session_on_operational_step();
    session.dispatch_all(&valid_operational_events());
    session.dispatch(&WizardEvent::EnvironmentalSystemSelected {
        choice: EnvironmentalSystem::Yes,
    });
    session.dispatch(&WizardEvent::DocumentsSelected {
        names: vec!["pga-2024.pdf".into(), "residuos.xlsx".into()],
    });
    assert_eq!(session.view().environmental.documents.len(), 2);
    assert!(session.view().visible.contains(&Field::AttachedDocuments));

    session.dispatch(&WizardEvent::EnvironmentalSystemSelected {
        choice: EnvironmentalSystem::No,
    });
    assert!(session.view().environmental.documents.is_empty());
    assert!(!session.view().visible.contains(&Field::AttachedDocuments));

    assert_eq!(session.dispatch(&WizardEvent::Submit), WizardState::Submitted);

    let payloads = recorder.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0].environmental_management_system,
        EnvironmentalAnswer::No
    );
    assert_eq!(payloads[0].attached_document_names, None);
}

#[test]
fn yes_with_documents_submits_their_names() {
    let (mut session, recorder) = session_on_operational_step();
    session.dispatch_all(&valid_operational_events());
    session.dispatch(&WizardEvent::EnvironmentalSystemSelected {
        choice: EnvironmentalSystem::Yes,
    });
    session.dispatch(&WizardEvent::DocumentsSelected {
        names: vec!["iso14001.pdf".into()],
    });

    assert_eq!(session.dispatch(&WizardEvent::Submit), WizardState::Submitted);

    let payload = &recorder.payloads()[0];
    assert_eq!(payload.environmental_management_system, EnvironmentalAnswer::Yes);
    assert_eq!(
        payload.attached_document_names,
        Some(vec!["iso14001.pdf".to_string()])
    );
    assert_eq!(payload.answers.georeference, "4.571300, -74.136900");
}

#[test]
fn worker_count_error_clears_once_numeric() {
    let (mut session, _recorder) = session_on_operational_step();
    session.dispatch_all(&valid_operational_events());
    session.dispatch(&changed(Field::WorkerCount, "abc"));

    session.dispatch(&WizardEvent::Submit);
    let errors = session.view().errors;
    assert_eq!(errors.get(Field::WorkerCount), Some(MSG_INVALID_NUMBER));

    session.dispatch(&changed(Field::WorkerCount, "12"));
    let recomputed = diagnostic::validate_operational(&session.controller().snapshot());
    assert!(!recomputed.contains(Field::WorkerCount));
    assert_eq!(session.dispatch(&WizardEvent::Submit), WizardState::Submitted);
}

#[test]
fn back_preserves_every_answer() {
    let (mut session, _recorder) = session_on_operational_step();
    session.dispatch(&changed(Field::EconomicActivity, "Printing"));
    let before = session.view().answers;

    assert_eq!(session.dispatch(&WizardEvent::Back), WizardState::Identification);

    let view = session.view();
    assert_eq!(view.step, Step::Identification);
    assert_eq!(view.answers, before);
    assert!(view.errors.is_empty());
}

#[test]
fn map_click_round_trip_through_the_controller() {
    let mut wizard = WizardController::new();
    wizard.decide(&WizardEvent::Advance);
    assert!(wizard.errors().contains(Field::Georeference));

    wizard.decide(&WizardEvent::MapClicked {
        lat: 4.711000,
        lng: -74.072100,
    });

    assert_eq!(wizard.geo().current_marker(), GeoPoint::new(4.711000, -74.072100));
    assert_eq!(wizard.store().answers().georeference, "4.711000, -74.072100");
    assert!(!wizard.errors().contains(Field::Georeference));
    assert_eq!(wizard.view().map.center, GeoPoint::new(4.711, -74.0721));
}

#[test]
fn prefilled_store_submits_after_two_transitions() {
    let store = FieldStore::with_answers(valid_answers(), valid_environmental());
    let recorder = RecordingSubmitter::new();
    let mut session = WizardSession::with_controller(WizardController::with_store(store), recorder.clone());

    assert_eq!(session.dispatch(&WizardEvent::Advance), WizardState::Operational);
    assert_eq!(session.dispatch(&WizardEvent::Submit), WizardState::Submitted);
    assert_eq!(recorder.payloads()[0].answers, valid_answers());

    // terminal
    assert_eq!(session.dispatch(&WizardEvent::Back), WizardState::Submitted);
    assert_eq!(recorder.count(), 1);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn wizard_types_can_cross_threads() {
    assert_send_sync::<WizardController>();
    assert_send_sync::<WizardSession<RecordingSubmitter>>();
    assert_send_sync::<FieldStore>();
    assert_send_sync::<GeoSelector>();
    assert_send_sync::<ValidationErrors>();
    assert_send_sync::<WizardView>();
    assert_send_sync::<WizardEvent>();
    assert_send_sync::<SubmissionPayload>();
}
