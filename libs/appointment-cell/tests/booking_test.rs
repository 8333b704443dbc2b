use chrono::Duration;

use appointment_cell::models::{AppointmentError, BookAppointmentRequest};
use appointment_cell::services::BookingService;
use assert_matches::assert_matches;
use doctor_cell::{AvailabilityService, DoctorError};
use shared_models::{AppointmentStatus, ExceptionKind, ServiceChanges};
use shared_utils::test_utils::{reference_monday, reference_now, seed_clinic, time, SeededClinic, TestConfig};

fn request(clinic: &SeededClinic, hour: u32, minute: u32) -> BookAppointmentRequest {
    BookAppointmentRequest {
        doctor_id: clinic.doctor.id,
        service_id: clinic.service.id,
        date: reference_monday(),
        start_time: time(hour, minute),
        client_name: "Maria Petrova".to_string(),
        client_phone: Some("+10000000000".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn test_booking_spans_service_duration() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 90).await;

    let appointment = BookingService::new(&state)
        .book_appointment(request(&clinic, 9, 30))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.start_time, time(9, 30));
    assert_eq!(appointment.end_time, time(11, 0));
    assert_eq!(appointment.client_name, "Maria Petrova");
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let booking = BookingService::new(&state);

    booking.book_appointment(request(&clinic, 10, 0)).await.unwrap();

    assert_matches!(
        booking.book_appointment(request(&clinic, 10, 30)).await,
        Err(AppointmentError::SlotNotAvailable)
    );
    // Back-to-back bookings share only an endpoint.
    assert!(booking.book_appointment(request(&clinic, 11, 0)).await.is_ok());
}

#[tokio::test]
async fn test_booking_outside_working_window() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let booking = BookingService::new(&state);

    assert_matches!(
        booking.book_appointment(request(&clinic, 16, 30)).await,
        Err(AppointmentError::SlotNotAvailable)
    );
    assert_matches!(
        booking.book_appointment(request(&clinic, 8, 0)).await,
        Err(AppointmentError::SlotNotAvailable)
    );

    let mut sunday = request(&clinic, 10, 0);
    sunday.date = reference_monday() + Duration::days(6);
    assert_matches!(booking.book_appointment(sunday).await, Err(AppointmentError::SlotNotAvailable));
}

#[tokio::test]
async fn test_booking_respects_breaks() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;

    state.db
        .insert_exception(
            clinic.doctor.id,
            reference_monday(),
            ExceptionKind::Break { start_time: time(12, 0), end_time: time(13, 0) },
            None,
        )
        .await
        .unwrap();

    assert_matches!(
        BookingService::new(&state).book_appointment(request(&clinic, 11, 30)).await,
        Err(AppointmentError::SlotNotAvailable)
    );
}

#[tokio::test]
async fn test_booking_in_the_past_is_rejected() {
    let monday = reference_monday();
    let state = TestConfig::default().state_at(monday.and_time(time(12, 0)));
    let clinic = seed_clinic(&state, 60).await;
    let booking = BookingService::new(&state);

    assert_matches!(
        booking.book_appointment(request(&clinic, 10, 0)).await,
        Err(AppointmentError::SlotNotAvailable)
    );
    assert!(booking.book_appointment(request(&clinic, 13, 0)).await.is_ok());
}

#[tokio::test]
async fn test_booking_validates_inputs() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let booking = BookingService::new(&state);

    let mut blank = request(&clinic, 10, 0);
    blank.client_name = "   ".to_string();
    assert_matches!(booking.book_appointment(blank).await, Err(AppointmentError::ValidationError(_)));

    let mut unknown_service = request(&clinic, 10, 0);
    unknown_service.service_id = 9999;
    assert_matches!(booking.book_appointment(unknown_service).await, Err(AppointmentError::ServiceNotFound(9999)));

    let mut unknown_doctor = request(&clinic, 10, 0);
    unknown_doctor.doctor_id = 9999;
    assert_matches!(
        booking.book_appointment(unknown_doctor).await,
        Err(AppointmentError::Scheduling(DoctorError::NotFound(9999)))
    );

    state.db
        .update_service(clinic.service.id, ServiceChanges { is_active: Some(false), ..Default::default() })
        .await
        .unwrap();
    assert_matches!(
        booking.book_appointment(request(&clinic, 10, 0)).await,
        Err(AppointmentError::ServiceInactive(_))
    );
}

#[tokio::test]
async fn test_cancel_frees_the_slot() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let monday = reference_monday();
    let booking = BookingService::new(&state);
    let availability = AvailabilityService::new(&state);

    let appointment = booking.book_appointment(request(&clinic, 10, 0)).await.unwrap();
    let slots = availability
        .get_available_slots(clinic.doctor.id, clinic.service.id, monday, monday)
        .await
        .unwrap();
    assert_eq!(slots.len(), 12);

    let cancelled = booking.cancel_appointment(appointment.id).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    let slots = availability
        .get_available_slots(clinic.doctor.id, clinic.service.id, monday, monday)
        .await
        .unwrap();
    assert_eq!(slots.len(), 15);
    assert!(booking.book_appointment(request(&clinic, 10, 0)).await.is_ok());
}

#[tokio::test]
async fn test_status_transitions() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let booking = BookingService::new(&state);

    let appointment = booking.book_appointment(request(&clinic, 10, 0)).await.unwrap();

    assert_matches!(
        booking.complete_appointment(appointment.id).await,
        Err(AppointmentError::InvalidStatusTransition { from: AppointmentStatus::Pending, to: AppointmentStatus::Completed })
    );

    let confirmed = booking.confirm_appointment(appointment.id).await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let completed = booking.complete_appointment(appointment.id).await.unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    assert_matches!(
        booking.cancel_appointment(appointment.id).await,
        Err(AppointmentError::InvalidStatusTransition { .. })
    );
    assert_matches!(booking.confirm_appointment(9999).await, Err(AppointmentError::NotFound(9999)));
}

#[tokio::test]
async fn test_doctor_appointments_are_ordered() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 30).await;
    let booking = BookingService::new(&state);
    let monday = reference_monday();

    booking.book_appointment(request(&clinic, 15, 0)).await.unwrap();
    booking.book_appointment(request(&clinic, 9, 0)).await.unwrap();
    let mut tuesday = request(&clinic, 9, 0);
    tuesday.date = monday + Duration::days(1);
    booking.book_appointment(tuesday).await.unwrap();

    let appointments = booking
        .get_doctor_appointments(clinic.doctor.id, monday, monday + Duration::days(1))
        .await
        .unwrap();
    let order: Vec<_> = appointments.iter().map(|a| (a.date, a.start_time)).collect();

    assert_eq!(order, vec![
        (monday, time(9, 0)),
        (monday, time(15, 0)),
        (monday + Duration::days(1), time(9, 0)),
    ]);
}

#[tokio::test]
async fn test_concurrent_bookings_of_one_slot() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        let req = request(&clinic, 14, 0);
        handles.push(tokio::spawn(async move {
            BookingService::new(&state).book_appointment(req).await
        }));
    }

    let mut booked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(err) => assert_matches!(err, AppointmentError::SlotNotAvailable | AppointmentError::Database(_)),
        }
    }
    assert_eq!(booked, 1);
}
