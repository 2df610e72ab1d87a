mod helpers;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use helpers::*;
use hotel_directory::domain::entities::NewHotel;
use serde_json::{json, Value};

fn create_payload() -> Value {
    json!({
        "name": "  Grand Lisboa  ",
        "country": "Portugal",
        "city": "Lisbon",
        "address": "Praça do Comércio 1",
        "latitude": 38.7,
        "longitude": -9.13,
        "description": "By the river",
        "rating": 4.5,
        "images": ["a.jpg", "b.jpg"]
    })
}

fn field_names(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["field"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_hotel() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/hotels",
        Some(ADMIN_KEY),
        Some(create_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Hotel created successfully");

    let data = &body["data"];
    assert!(data["id"].as_i64().unwrap() >= 1);
    assert_eq!(data["name"], "Grand Lisboa");
    assert_eq!(data["is_available"], true);
    assert_eq!(data["images"], json!(["a.jpg", "b.jpg"]));
    assert_eq!(data["rooms"], json!([]));
    assert_eq!(data["created_at"], data["updated_at"]);

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    for i in 0..20 {
        // Park a pooled connection so reads and writes land on different ones.
        let parked = test_db.db().pool().acquire().await.expect("Failed to acquire");

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/hotels",
            Some(ADMIN_KEY),
            Some(create_payload()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "iteration {}", i);
        let id = created["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/hotels/{}", id);

        let (status, body) = send(&app, Method::GET, &uri, Some(USER_KEY), None).await;
        assert_eq!(status, StatusCode::OK, "iteration {}", i);
        assert_eq!(body["message"], "Hotel retrieved successfully");
        assert_eq!(body["data"], created["data"]);

        drop(parked);

        let (status, _) = send(
            &app,
            Method::PUT,
            &uri,
            Some(ADMIN_KEY),
            Some(json!({ "name": format!("Renamed {}", i) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "iteration {}", i);

        let (_, body) = send(&app, Method::GET, &uri, Some(USER_KEY), None).await;
        assert_eq!(body["data"]["name"], format!("Renamed {}", i));
    }

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_seeded_hotels_are_visible_to_requests() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    for i in 0..20 {
        let hotel = seed_hotel(test_db.db(), sample_hotel(&format!("Seeded {}", i))).await;

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/hotels/{}", hotel.id),
            Some(USER_KEY),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "iteration {}", i);
        assert_eq!(body["data"]["name"], hotel.name);
    }

    let (_, list) = send(&app, Method::GET, "/api/hotels?limit=50", Some(USER_KEY), None).await;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(20));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_create_reports_invalid_fields() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let mut payload = create_payload();
    payload["rating"] = json!(7);
    payload["latitude"] = json!(120);

    let (status, body) = send(&app, Method::POST, "/api/hotels", Some(ADMIN_KEY), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation errors");
    assert_eq!(field_names(&body), vec!["latitude", "rating"]);
    assert_eq!(body["errors"][0]["location"], "body");
    assert_eq!(body["errors"][0]["message"], "Latitude must be between -90 and 90");
    assert_eq!(body["errors"][1]["message"], "Rating must be between 0 and 5");

    let (_, list) = send(&app, Method::GET, "/api/hotels", Some(ADMIN_KEY), None).await;
    assert_eq!(list["data"], json!([]));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_create_requires_fields() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/hotels",
        Some(ADMIN_KEY),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        field_names(&body),
        vec!["address", "city", "country", "description", "latitude", "longitude", "name"]
    );
    assert_eq!(body["errors"][6]["message"], "Name is required");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/hotels")
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation errors");
    assert_eq!(body["errors"][0]["field"], "body");

    let mut payload = create_payload();
    payload["images"] = json!("a.jpg");
    let (status, body) = send(&app, Method::POST, "/api/hotels", Some(ADMIN_KEY), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("images"));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_list_with_rooms_and_filters() {
    let test_db = setup_test_db().await;
    let db = test_db.db();

    let mut hotels = Vec::new();
    for (name, rating) in [("Three", 3.0), ("FourHalf", 4.5), ("Two", 2.0)] {
        let hotel = seed_hotel(
            db,
            NewHotel {
                rating,
                ..sample_hotel(name)
            },
        )
        .await;
        hotels.push(hotel);
    }
    seed_room(db, hotels[1].id, "Suite", 250.0).await;
    let app = test_app(db);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/hotels?min_rating=3",
        Some(USER_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hotels retrieved successfully");
    let data = body["data"].as_array().unwrap();
    let names: Vec<&str> = data.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Three", "FourHalf"]);

    // Rooms are summarized in listings
    assert_eq!(data[0]["rooms"], json!([]));
    let room = &data[1]["rooms"][0];
    assert_eq!(room["name"], "Suite");
    assert_eq!(room["type"], "double");
    assert_eq!(room["price"], 250.0);
    assert!(room.get("description").is_none());

    // Pagination applies to the filtered set
    let (_, body) = send(
        &app,
        Method::GET,
        "/api/hotels?min_rating=3&page=2&limit=1",
        Some(USER_KEY),
        None,
    )
    .await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "FourHalf");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/hotels?city=Porto",
        Some(USER_KEY),
        None,
    )
    .await;
    assert_eq!(body["data"], json!([]));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_list_pagination() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    for name in ["First", "Second", "Third"] {
        seed_hotel(db, sample_hotel(name)).await;
    }
    let app = test_app(db);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/hotels?page=2&limit=1",
        Some(ADMIN_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Second");

    let (_, body) = send(&app, Method::GET, "/api/hotels?page=5", Some(ADMIN_KEY), None).await;
    assert_eq!(body["data"], json!([]));

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/hotels?page=0&min_rating=9",
        Some(ADMIN_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["min_rating", "page"]);
    assert_eq!(body["errors"][0]["location"], "query");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/hotels?is_available=maybe",
        Some(ADMIN_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_get_missing_and_invalid_id() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let (status, body) = send(&app, Method::GET, "/api/hotels/999", Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Hotel not found" }));

    let (status, body) = send(&app, Method::GET, "/api/hotels/0", Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["location"], "params");
    assert_eq!(body["errors"][0]["message"], "Hotel ID must be a positive integer");

    let (status, _) = send(&app, Method::GET, "/api/hotels/abc", Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_get_includes_full_rooms() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let hotel = seed_hotel(db, sample_hotel("Roomy")).await;
    seed_room(db, hotel.id, "Twin", 90.0).await;
    seed_room(db, hotel.id, "Suite", 300.0).await;
    let app = test_app(db);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/hotels/{}", hotel.id),
        Some(USER_KEY),
        None,
    )
    .await;
    let rooms = body["data"]["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["name"], "Twin");
    assert_eq!(rooms[0]["hotel_id"], hotel.id);
    assert_eq!(rooms[0]["description"], "Two beds");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_update_hotel() {
    let test_db = setup_test_db().await;
    let hotel = seed_hotel(test_db.db(), sample_hotel("Old name")).await;
    let app = test_app(test_db.db());
    let uri = format!("/api/hotels/{}", hotel.id);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(ADMIN_KEY),
        Some(json!({ "name": " New name ", "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hotel updated successfully");
    assert_eq!(body["data"]["name"], "New name");
    assert_eq!(body["data"]["is_available"], false);
    assert_eq!(body["data"]["city"], "Lisbon");
    assert_eq!(body["data"]["created_at"], hotel.created_at);

    let (_, fetched) = send(&app, Method::GET, &uri, Some(ADMIN_KEY), None).await;
    assert_eq!(fetched["data"]["name"], "New name");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_update_without_body_changes_nothing() {
    let test_db = setup_test_db().await;
    let hotel = seed_hotel(test_db.db(), sample_hotel("Untouched")).await;
    let app = test_app(test_db.db());
    let uri = format!("/api/hotels/{}", hotel.id);

    let (status, body) = send(&app, Method::PUT, &uri, Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hotel updated successfully");
    assert_eq!(body["data"]["name"], "Untouched");
    assert_eq!(body["data"]["rating"], 4.0);

    let (status, body) = send(&app, Method::PUT, &uri, Some(ADMIN_KEY), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"], "Lisbon");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_update_missing_hotel_is_not_found_before_validation() {
    let test_db = setup_test_db().await;
    let app = test_app(test_db.db());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/hotels/999",
        Some(ADMIN_KEY),
        Some(json!({ "rating": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Hotel not found");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let test_db = setup_test_db().await;
    let hotel = seed_hotel(test_db.db(), sample_hotel("Strict")).await;
    let app = test_app(test_db.db());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/hotels/{}", hotel.id),
        Some(ADMIN_KEY),
        Some(json!({ "rating": 5.5, "city": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body), vec!["city", "rating"]);
    assert_eq!(body["errors"][0]["message"], "City must be non-empty");

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_delete_hotel_cascades_rooms() {
    let test_db = setup_test_db().await;
    let db = test_db.db();
    let hotel = seed_hotel(db, sample_hotel("Doomed")).await;
    seed_room(db, hotel.id, "Single", 50.0).await;
    let app = test_app(db);
    let uri = format!("/api/hotels/{}", hotel.id);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Hotel deleted successfully" })
    );

    let (status, _) = send(&app, Method::GET, &uri, Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(ADMIN_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE hotel_id = ?")
        .bind(hotel.id)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    teardown_test_db(test_db).await;
}

#[tokio::test]
async fn test_add_room_checks_price_and_hotel() {
    use hotel_directory::application::services::HotelService;
    use hotel_directory::domain::errors::DomainError;
    use std::sync::Arc;

    let test_db = setup_test_db().await;
    let db = test_db.db();
    let hotel = seed_hotel(db, sample_hotel("Priced")).await;
    let service = HotelService::new(Arc::new(db.clone()));

    let result = service.add_room(sample_room(hotel.id, "Free", -1.0)).await;
    assert!(matches!(result, Err(DomainError::ValidationError(_))));

    let result = service.add_room(sample_room(hotel.id + 100, "Orphan", 10.0)).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));

    let room = tokio_test::assert_ok!(service.add_room(sample_room(hotel.id, "Free", 0.0)).await);
    assert_eq!(room.hotel_id, hotel.id);
    assert_eq!(room.price, 0.0);

    let listed = tokio_test::assert_ok!(service.get_hotel(hotel.id).await);
    assert_eq!(listed.rooms, vec![room]);

    teardown_test_db(test_db).await;
}
