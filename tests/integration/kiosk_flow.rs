//! Kiosk controller driven end to end over HTTP

use std::time::Duration;

use self_checkout::kiosk::{
    session::CHECKED_OUT, Command, Controller, HttpBackend, KioskError, Session, SessionPhase,
};

use crate::support::{spawn_stack, DUE_DATE};

async fn kiosk() -> (crate::support::FakeUpstream, Controller<HttpBackend>) {
    let (upstream, service) = spawn_stack().await;
    let backend = HttpBackend::new(&service, Duration::from_secs(5)).unwrap();
    (upstream, Controller::new(backend))
}

#[tokio::test]
async fn test_full_checkout() {
    let (upstream, mut controller) = kiosk().await;

    controller
        .dispatch(Command::FindPatron("12345".to_string()))
        .await
        .unwrap();
    assert_eq!(
        controller.screen().patron_status.as_ref().map(|s| s.text.as_str()),
        Some("Patron Found: John Doe")
    );
    assert!(controller.buttons().add_item);

    for barcode in ["123", "456"] {
        controller
            .dispatch(Command::AddItem(barcode.to_string()))
            .await
            .unwrap();
    }

    let duplicate = controller.dispatch(Command::AddItem("123".to_string())).await;
    assert_eq!(duplicate, Err(KioskError::DuplicateItem("123".to_string())));
    assert_eq!(controller.session().items().len(), 2);
    assert_eq!(controller.session().items()[0].call_number, "BT 112 .M3 2000");

    controller.dispatch(Command::Checkout).await.unwrap();

    let summary = controller.summary().expect("summary shown").clone();
    assert_eq!(summary.rows.len(), 2);
    for row in &summary.rows {
        assert_eq!(row.status, CHECKED_OUT);
        assert_eq!(row.due_date_or_error, DUE_DATE);
    }
    for item in controller.session().items() {
        assert_eq!(item.display_status(), CHECKED_OUT);
    }
    assert_eq!(upstream.state.checkouts().len(), 2);

    controller.dispatch(Command::CloseSummary).await.unwrap();
    assert_eq!(controller.session(), &Session::new());
    assert_eq!(controller.phase(), SessionPhase::NoPatron);
}

#[tokio::test]
async fn test_service_messages_reach_the_patron() {
    let (_upstream, mut controller) = kiosk().await;

    let err = controller
        .dispatch(Command::FindPatron("99999".to_string()))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: Patron not found. Please check the barcode and try again."
    );
    assert!(!controller.buttons().add_item);

    controller
        .dispatch(Command::FindPatron("12345".to_string()))
        .await
        .unwrap();

    // The service refuses unavailable items before the kiosk sees a status
    let err = controller
        .dispatch(Command::AddItem("789".to_string()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        KioskError::ItemNotFound("Item is not available for checkout. Status: checked out".to_string())
    );

    // "Ready" passes the service but not the kiosk
    let err = controller
        .dispatch(Command::AddItem("321".to_string()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        KioskError::ItemUnavailable {
            status: "Ready".to_string()
        }
    );
    assert!(controller.session().items().is_empty());
    assert!(!controller.buttons().checkout);
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on the discard port
    let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let mut controller = Controller::new(backend);

    let err = controller
        .dispatch(Command::FindPatron("12345".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, KioskError::Transport(_)));
    assert!(!controller.session().patron_found());
}
