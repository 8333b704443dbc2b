use assert_matches::assert_matches;
use appointment_cell::models::AppointmentError;
use appointment_cell::services::bot::{keyboard_rows, BotSlotAdapter};
use doctor_cell::AvailabilityService;
use shared_models::ExceptionKind;
use shared_utils::test_utils::{reference_monday, reference_now, seed_clinic, time, TestConfig};

#[tokio::test]
async fn test_bot_offers_the_same_slots_as_http() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let monday = reference_monday();

    state.db
        .insert_exception(
            clinic.doctor.id,
            monday,
            ExceptionKind::Break { start_time: time(12, 0), end_time: time(13, 0) },
            None,
        )
        .await
        .unwrap();

    let buttons = BotSlotAdapter::new(&state)
        .slot_buttons(clinic.doctor.id, clinic.service.id, monday)
        .await
        .unwrap();
    let slots = AvailabilityService::new(&state)
        .get_slots_for_date(clinic.doctor.id, clinic.service.id, monday)
        .await
        .unwrap();

    assert_eq!(buttons.len(), slots.len());
    assert!(buttons.iter().all(|button| button.label != "12:00"));
    assert_eq!(buttons[0].callback_data, "slot:2026-10-19:09:00");

    let rows = keyboard_rows(buttons, 4);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].len(), 4);
}

#[tokio::test]
async fn test_bot_books_from_button_press() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let adapter = BotSlotAdapter::new(&state);

    let appointment = adapter
        .book_from_callback(clinic.doctor.id, clinic.service.id, "slot:2026-10-19:10:30", "Ivan", None)
        .await
        .unwrap();
    assert_eq!(appointment.start_time, time(10, 30));
    assert_eq!(appointment.end_time, time(11, 30));

    let buttons = adapter
        .slot_buttons(clinic.doctor.id, clinic.service.id, reference_monday())
        .await
        .unwrap();
    assert!(buttons.iter().all(|button| button.label != "10:30"));

    assert_matches!(
        adapter.book_from_callback(clinic.doctor.id, clinic.service.id, "slot:2026-10-19:10:30", "Olga", None).await,
        Err(AppointmentError::SlotNotAvailable)
    );
    assert_matches!(
        adapter.book_from_callback(clinic.doctor.id, clinic.service.id, "noise", "Olga", None).await,
        Err(AppointmentError::ValidationError(_))
    );
}
