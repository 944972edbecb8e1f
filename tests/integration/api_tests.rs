//! API integration tests
//!
//! These hit a running server on localhost:8080 with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create a booking and return its JSON body
async fn create_test_booking(client: &Client, date_time: &str) -> Value {
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "main_visitor_name": "Test Guest",
            "main_visitor_phone": "+7 (913) 555-01-02",
            "visitors_count": 2,
            "date_time": date_time
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse booking response")
}

async fn delete_booking(client: &Client, id: &str) {
    let response = client
        .delete(format!("{}/bookings/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_booking() {
    let client = Client::new();

    let body = create_test_booking(&client, "2030-06-15T19:30:00").await;
    let booking_id = body["id"].as_str().expect("No booking ID").to_string();

    // New bookings land in the triage queue
    assert_eq!(body["status"], "PENDING");
    // Phone is stored digits-only
    assert_eq!(body["main_visitor_phone"], "79135550102");
    // Unassigned table defaults to "-1"
    assert_eq!(body["table_id"], "-1");

    // Fetch it back
    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    delete_booking(&client, &booking_id).await;
}

#[tokio::test]
#[ignore]
async fn test_create_booking_rejects_unaligned_time() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "main_visitor_name": "Test Guest",
            "main_visitor_phone": "89135550102",
            "visitors_count": 2,
            "date_time": "2030-06-15T19:15:00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_form_intake() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings/request", BASE_URL))
        .form(&[
            ("main_visitor_name", "Form Guest"),
            ("main_visitor_phone", "+7 913 555 01 02"),
            ("visitors_count", "3"),
            ("date_time", "15.06.2030, 20:00"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    // Form submissions normalize to the local 8XXXXXXXXXX form
    assert_eq!(body["main_visitor_phone"], "89135550102");

    let booking_id = body["id"].as_str().expect("No booking ID").to_string();
    delete_booking(&client, &booking_id).await;
}

#[tokio::test]
#[ignore]
async fn test_booking_form_requires_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings/request", BASE_URL))
        .form(&[
            ("main_visitor_name", "  "),
            ("main_visitor_phone", "89135550102"),
            ("visitors_count", "2"),
            ("date_time", "15.06.2030, 20:00"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_booking_form_rejects_blank_phone_and_zero_guests() {
    let client = Client::new();

    for (phone, count) in [("  ", "2"), ("89135550102", "0")] {
        let response = client
            .post(format!("{}/bookings/request", BASE_URL))
            .form(&[
                ("main_visitor_name", "Form Guest"),
                ("main_visitor_phone", phone),
                ("visitors_count", count),
                ("date_time", "15.06.2030, 20:00"),
            ])
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
#[ignore]
async fn test_booking_status_transitions() {
    let client = Client::new();

    let body = create_test_booking(&client, "2030-06-16T18:00:00").await;
    let booking_id = body["id"].as_str().expect("No booking ID").to_string();

    // PATCH to the wait list
    let response = client
        .patch(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .json(&json!({ "status": "WAIT_LIST" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "WAIT_LIST");

    // Confirm via the dedicated route
    let response = client
        .post(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "CONFIRMED");

    delete_booking(&client, &booking_id).await;
}

#[tokio::test]
#[ignore]
async fn test_booking_queue() {
    let client = Client::new();

    let body = create_test_booking(&client, "2030-06-17T19:00:00").await;
    let booking_id = body["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .get(format!("{}/bookings/queue", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let queue: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<&str> = queue
        .as_array()
        .expect("Queue is not an array")
        .iter()
        .filter_map(|b| b["id"].as_str())
        .collect();
    assert!(ids.contains(&booking_id.as_str()));

    delete_booking(&client, &booking_id).await;
}

#[tokio::test]
#[ignore]
async fn test_booking_history_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings/history", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["page"].is_number());
    assert!(body["total_pages"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_visitor_create_is_idempotent_by_phone() {
    let client = Client::new();

    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({
            "phone_number": "89135550199",
            "name": "Regular Guest"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let visitor_id = body["id"].as_str().expect("No visitor ID").to_string();

    // Same phone again: the existing visitor comes back unchanged
    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({
            "phone_number": "8 913 555-01-99",
            "name": "Someone Else"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_str(), Some(visitor_id.as_str()));
    assert_eq!(body["name"], "Regular Guest");

    // Cleanup
    let response = client
        .delete(format!("{}/visitors/{}", BASE_URL, visitor_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_guest_list_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/visitors/guests", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_disabled_date_blocks_availability() {
    let client = Client::new();

    let response = client
        .post(format!("{}/disabled-dates", BASE_URL))
        .json(&json!({
            "date": "2031-02-20",
            "description": "Private event"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let disabled_id = body["id"].as_str().expect("No disabled date ID").to_string();

    let response = client
        .get(format!("{}/availability/date/2031-02-20", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["disabled"], true);

    // Cleanup and verify the date opens back up
    let response = client
        .delete(format!("{}/disabled-dates/{}", BASE_URL, disabled_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/availability/date/2031-02-20", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["disabled"], false);
}

#[tokio::test]
#[ignore]
async fn test_disabled_date_requires_paired_times() {
    let client = Client::new();

    let response = client
        .post(format!("{}/disabled-dates", BASE_URL))
        .json(&json!({
            "date": "2031-03-01",
            "start_time": "18:00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_disabled_slots_listing() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/availability/disabled-slots?start_date=2031-04-01&end_date=2031-04-02",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}
