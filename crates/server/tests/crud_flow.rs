mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{routing::get, Router};
use serde_json::{json, Value};
use server::errors::GENERIC_FAILURE;
use server::routes;

use support::{build_app, on_disk, send};

fn seed_properties() -> Value {
    json!([
        {"id": "p1", "title": "Loft", "location": "Paris", "pricePerNight": 90, "amenities": "Wifi, Kitchen"},
        {"id": "p2", "title": "Villa", "location": "Nice", "pricePerNight": 250.5, "amenities": "Pool, Wifi"},
        {"id": "p3", "title": "Studio", "location": "paris", "pricePerNight": 100, "amenities": "Parking"}
    ])
}

fn ids(body: &Value) -> Vec<String> {
    let mut out: Vec<String> = body
        .as_array()
        .map(|a| a.iter().filter_map(|r| r["id"].as_str().map(String::from)).collect())
        .unwrap_or_default();
    out.sort();
    out
}

#[tokio::test]
async fn root_reports_liveness() -> anyhow::Result<()> {
    let app = build_app(&[]).await?;
    let r = send(&app.router, "GET", "/", None).await?;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.text, "Server is working");
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_returns_equivalent_record() -> anyhow::Result<()> {
    let app = build_app(&[("bookings", json!([]))]).await?;
    let r = send(
        &app.router,
        "POST",
        "/bookings",
        Some(json!({"userId": "u1", "propertyId": "p1", "numberOfGuests": 2})),
    )
    .await?;
    assert_eq!(r.status, StatusCode::CREATED);
    let id = r.body["id"].as_str().expect("generated id").to_string();

    let fetched = send(&app.router, "GET", &format!("/bookings/{id}"), None).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, r.body);

    let doc = on_disk(&app, "bookings").await?;
    assert_eq!(doc["bookings"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn update_merges_without_dropping_fields() -> anyhow::Result<()> {
    let app = build_app(&[("properties", seed_properties())]).await?;
    let r = send(&app.router, "PUT", "/properties/p1", Some(json!({"pricePerNight": 95}))).await?;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["pricePerNight"], 95);
    assert_eq!(r.body["title"], "Loft");
    assert_eq!(r.body["amenities"], "Wifi, Kitchen");

    let missing = send(&app.router, "PUT", "/properties/nope", Some(json!({"title": "x"}))).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Property not found");
    Ok(())
}

#[tokio::test]
async fn delete_removes_one_record_then_404s() -> anyhow::Result<()> {
    let app = build_app(&[("properties", seed_properties())]).await?;

    let r = send(&app.router, "DELETE", "/properties/p2", None).await?;
    assert_eq!(r.status, StatusCode::NO_CONTENT);
    assert!(r.text.is_empty());

    let list = send(&app.router, "GET", "/properties", None).await?;
    assert_eq!(ids(&list.body), vec!["p1", "p3"]);

    let again = send(&app.router, "DELETE", "/properties/p2", None).await?;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    let gone = send(&app.router, "GET", "/properties/p2", None).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_replies_with_message_for_hosts_amenities_reviews() -> anyhow::Result<()> {
    let app = build_app(&[
        ("hosts", json!([{"id": "h1", "name": "Ann", "password": "pw"}])),
        ("amenities", json!([{"id": "a1", "name": "Wifi"}])),
        ("reviews", json!([{"id": "r1", "rating": 5}])),
    ])
    .await?;

    for (uri, message) in [
        ("/hosts/h1", "Host deleted successfully"),
        ("/amenities/a1", "Amenity deleted successfully"),
        ("/reviews/r1", "Review deleted successfully"),
    ] {
        let r = send(&app.router, "DELETE", uri, None).await?;
        assert_eq!(r.status, StatusCode::OK, "{uri}");
        assert_eq!(r.body["message"], message);
    }

    let r = send(&app.router, "DELETE", "/amenities/a1", None).await?;
    assert_eq!(r.status, StatusCode::NOT_FOUND);
    assert_eq!(r.body["message"], "Amenity not found");
    Ok(())
}

#[tokio::test]
async fn hosts_never_expose_passwords_on_reads() -> anyhow::Result<()> {
    let app = build_app(&[(
        "hosts",
        json!([
            {"id": "h1", "name": "Linda Smith", "password": "pw1"},
            {"id": "h2", "name": "Bob", "password": "pw2"}
        ]),
    )])
    .await?;

    let list = send(&app.router, "GET", "/hosts", None).await?;
    assert_eq!(ids(&list.body), vec!["h1", "h2"]);
    assert!(list.body.as_array().unwrap().iter().all(|h| h.get("password").is_none()));

    let filtered = send(&app.router, "GET", "/hosts?name=linda%20smith", None).await?;
    assert_eq!(ids(&filtered.body), vec!["h1"]);

    let one = send(&app.router, "GET", "/hosts/h2", None).await?;
    assert_eq!(one.body["name"], "Bob");
    assert!(one.body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn property_filters_price_location_and_amenities() -> anyhow::Result<()> {
    let app = build_app(&[("properties", seed_properties())]).await?;

    let cheap = send(&app.router, "GET", "/properties?pricePerNight=100", None).await?;
    assert_eq!(ids(&cheap.body), vec!["p1", "p3"]);

    let paris = send(&app.router, "GET", "/properties?location=PARIS", None).await?;
    assert_eq!(ids(&paris.body), vec!["p1", "p3"]);

    let wifi = send(&app.router, "GET", "/properties?amenities=wifi", None).await?;
    assert_eq!(ids(&wifi.body), vec!["p1", "p2"]);

    let combined = send(&app.router, "GET", "/properties?location=paris&amenities=park", None).await?;
    assert_eq!(ids(&combined.body), vec!["p3"]);

    let garbage = send(&app.router, "GET", "/properties?pricePerNight=cheap", None).await?;
    assert_eq!(garbage.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn empty_filter_values_are_ignored() -> anyhow::Result<()> {
    let app = build_app(&[("properties", seed_properties())]).await?;

    let blank_location = send(&app.router, "GET", "/properties?location=", None).await?;
    assert_eq!(blank_location.status, StatusCode::OK);
    assert_eq!(ids(&blank_location.body), vec!["p1", "p2", "p3"]);

    let blank_price = send(&app.router, "GET", "/properties?pricePerNight=&location=paris", None).await?;
    assert_eq!(ids(&blank_price.body), vec!["p1", "p3"]);
    Ok(())
}

#[tokio::test]
async fn bookings_filter_by_user_id() -> anyhow::Result<()> {
    let app = build_app(&[(
        "bookings",
        json!([
            {"id": "b1", "userId": "u1"},
            {"id": "b2", "userId": "u2"},
            {"id": "b3", "userId": "u1"}
        ]),
    )])
    .await?;
    let r = send(&app.router, "GET", "/bookings?userId=u1", None).await?;
    assert_eq!(ids(&r.body), vec!["b1", "b3"]);
    Ok(())
}

#[tokio::test]
async fn users_are_listed_filtered_and_fetched_without_password() -> anyhow::Result<()> {
    let app = build_app(&[(
        "users",
        json!([
            {"id": "u1", "username": "jdoe", "password": "pw", "email": "John@Example.com"},
            {"id": "u2", "username": "asmith", "password": "pw", "email": "anna@example.com"}
        ]),
    )])
    .await?;

    let all = send(&app.router, "GET", "/users", None).await?;
    assert_eq!(ids(&all.body), vec!["u1", "u2"]);
    assert!(all.body.as_array().unwrap().iter().all(|u| u.get("password").is_none()));

    let by_email = send(&app.router, "GET", "/users?email=john@example.com", None).await?;
    assert_eq!(ids(&by_email.body), vec!["u1"]);

    let by_name = send(&app.router, "GET", "/users?username=ASMITH", None).await?;
    assert_eq!(ids(&by_name.body), vec!["u2"]);

    let one = send(&app.router, "GET", "/users/u1", None).await?;
    assert_eq!(one.body["username"], "jdoe");
    assert!(one.body.get("password").is_none());

    let missing = send(&app.router, "GET", "/users/zzz", None).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "User not found");
    Ok(())
}

#[tokio::test]
async fn creating_users_validates_and_rejects_duplicates() -> anyhow::Result<()> {
    let app = build_app(&[("users", json!([{"id": "u1", "username": "jdoe", "password": "pw", "email": "j@d.com"}]))])
        .await?;

    let missing = send(&app.router, "POST", "/users", Some(json!({"username": "new", "password": "pw"}))).await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "Username, password, and email are required");

    let dup = send(
        &app.router,
        "POST",
        "/users",
        Some(json!({"username": "jdoe", "password": "x", "email": "x@y.com"})),
    )
    .await?;
    assert_eq!(dup.status, StatusCode::CONFLICT);
    assert_eq!(dup.body["message"], "Username already exists");

    let ok = send(
        &app.router,
        "POST",
        "/users",
        Some(json!({"username": "anna", "password": "secret", "email": "a@b.com", "isAdmin": true})),
    )
    .await?;
    assert_eq!(ok.status, StatusCode::CREATED);
    assert!(ok.body.get("password").is_none());
    assert!(ok.body.get("isAdmin").is_none());
    assert_eq!(ok.body["email"], "a@b.com");

    let doc = on_disk(&app, "users").await?;
    let stored = doc["users"].as_array().unwrap().iter().find(|u| u["username"] == "anna").cloned().unwrap();
    assert_eq!(stored["password"], "secret");
    Ok(())
}

#[tokio::test]
async fn generic_create_keeps_host_password_in_reply() -> anyhow::Result<()> {
    let app = build_app(&[("hosts", json!([]))]).await?;
    let r = send(&app.router, "POST", "/hosts", Some(json!({"name": "Ann", "password": "pw"}))).await?;
    assert_eq!(r.status, StatusCode::CREATED);
    assert_eq!(r.body["password"], "pw");
    Ok(())
}

#[tokio::test]
async fn non_object_body_is_rejected() -> anyhow::Result<()> {
    let app = build_app(&[("amenities", json!([]))]).await?;
    let r = send(&app.router, "POST", "/amenities", Some(json!(["Wifi"]))).await?;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert!(r.body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn unreadable_collection_lists_as_empty() -> anyhow::Result<()> {
    let app = build_app(&[]).await?;
    tokio::fs::write(app.data_dir.join("reviews.json"), b"{broken").await?;
    let r = send(&app.router, "GET", "/reviews", None).await?;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body, json!([]));

    let none = send(&app.router, "GET", "/amenities", None).await?;
    assert_eq!(none.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_are_all_persisted() -> anyhow::Result<()> {
    let app = build_app(&[("reviews", json!([]))]).await?;
    let router = Arc::new(app.router.clone());

    let mut tasks = Vec::new();
    for i in 0..20 {
        let router = Arc::clone(&router);
        tasks.push(tokio::spawn(async move {
            send(&router, "POST", "/reviews", Some(json!({"rating": i % 5 + 1}))).await
        }));
    }
    for t in tasks {
        assert_eq!(t.await??.status, StatusCode::CREATED);
    }

    let doc = on_disk(&app, "reviews").await?;
    assert_eq!(doc["reviews"].as_array().map(Vec::len), Some(20));
    Ok(())
}

#[tokio::test]
async fn error_route_hides_detail() -> anyhow::Result<()> {
    let app = build_app(&[]).await?;
    let r = send(&app.router, "GET", "/error", None).await?;
    assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(r.body["message"], GENERIC_FAILURE);
    assert!(!r.text.contains("Example error"));
    Ok(())
}

#[tokio::test]
async fn panics_become_generic_500() -> anyhow::Result<()> {
    async fn boom() -> &'static str {
        panic!("kaboom")
    }
    let app = routes::with_error_boundary(Router::new().route("/boom", get(boom)));
    let r = send(&app, "GET", "/boom", None).await?;
    assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(r.body["message"], GENERIC_FAILURE);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404_json() -> anyhow::Result<()> {
    let app = build_app(&[]).await?;
    let r = send(&app.router, "GET", "/listings", None).await?;
    assert_eq!(r.status, StatusCode::NOT_FOUND);
    assert_eq!(r.body["message"], "Route not found");
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_routes() -> anyhow::Result<()> {
    let app = build_app(&[]).await?;
    let r = send(&app.router, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(r.status, StatusCode::OK);
    assert!(r.body["paths"].get("/login").is_some());
    assert!(r.body["paths"].get("/{resource}/{id}").is_some());
    Ok(())
}
