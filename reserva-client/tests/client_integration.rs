// reserva-client/tests/client_integration.rs
// Integration tests against an in-process mock of the reservation backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use reserva_client::{Api, ClientConfig, ClientError, Session};
use shared::{BookingPayload, LoginRequest, RegisterRequest, RestaurantPayload};

#[derive(Default)]
struct Recorded {
    auth_headers: Vec<Option<String>>,
    put_bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Recorded>>;

fn restaurant_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "foodtype": "Thai",
        "address": "1 Main Rd",
        "province": "Bangkok",
        "postalcode": "10110",
        "tel": "021112222",
        "picture": "https://example.com/p.jpg"
    })
}

fn record_auth(state: &Shared, headers: &HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().auth_headers.push(auth);
}

fn mock_router(state: Shared) -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "a@b.com" && body["password"] == "secret" {
                    Json(json!({"token": "t1"})).into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Invalid credentials"})),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/auth/register",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["role"], "user");
                Json(json!({"success": true}))
            }),
        )
        .route(
            "/auth/me",
            get(
                |State(state): State<Shared>, headers: HeaderMap| async move {
                    record_auth(&state, &headers);
                    let authed = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        == Some("Bearer t1");
                    if authed {
                        Json(json!({"data": {
                            "_id": "u1",
                            "name": "Alice",
                            "email": "a@b.com",
                            "tel": "0812345678",
                            "role": "admin"
                        }}))
                        .into_response()
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"message": "Not authorized"})),
                        )
                            .into_response()
                    }
                },
            ),
        )
        .route(
            "/restaurants",
            get(|State(state): State<Shared>, headers: HeaderMap| async move {
                record_auth(&state, &headers);
                Json(json!({"data": [restaurant_json("r1", "Thai Garden")]}))
            })
            .post(|Json(body): Json<Value>| async move {
                let mut record = restaurant_json("r2", "created");
                record["name"] = body["name"].clone();
                Json(json!({"data": record}))
            }),
        )
        .route(
            "/restaurants/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "r1" {
                    Json(json!({"data": restaurant_json("r1", "Thai Garden")})).into_response()
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "Restaurant not found"})),
                    )
                        .into_response()
                }
            })
            .put(
                |State(state): State<Shared>, Path(_id): Path<String>, Json(body): Json<Value>| async move {
                    state.lock().unwrap().put_bodies.push(body);
                    Json(json!({"data": {}}))
                },
            )
            .delete(|Path(_id): Path<String>| async move { Json(json!({"data": {}})) }),
        )
        .route(
            "/restaurants/{id}/bookings",
            post(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "full-text" => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "message": "The user with ID u1 has already made 3 bookings"
                        })),
                    )
                        .into_response(),
                    "full-code" => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "message": "Booking limit reached",
                            "code": "BOOKING_LIMIT"
                        })),
                    )
                        .into_response(),
                    _ => Json(json!({"data": {}})).into_response(),
                }
            }),
        )
        .route(
            "/bookings",
            get(|| async {
                Json(json!({"data": [{
                    "_id": "b1",
                    "bookingDate": "2026-09-01T19:30:00Z",
                    "numOfGuests": 4,
                    "user": "u1",
                    "restaurant": restaurant_json("r1", "Thai Garden"),
                    "createdAt": "2026-08-01T10:00:00Z"
                }]}))
            }),
        )
        .route(
            "/bookings/{id}",
            put(
                |State(state): State<Shared>, Path(_id): Path<String>, Json(body): Json<Value>| async move {
                    state.lock().unwrap().put_bodies.push(body);
                    Json(json!({"data": {}}))
                },
            )
            .delete(|Path(_id): Path<String>| async move { Json(json!({"data": {}})) }),
        )
        .with_state(state)
}

async fn spawn_backend(state: Shared) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_router(state)).await.unwrap();
    });
    addr
}

fn api_at(addr: SocketAddr, session: Session) -> Api {
    let config = ClientConfig::new(format!("http://{addr}"));
    Api::new(&config, session)
}

#[tokio::test]
async fn login_returns_unwrapped_token() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let resp = api
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(resp.token, "t1");
}

#[tokio::test]
async fn bad_credentials_map_to_unauthorized() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let err = api
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn me_attaches_bearer_token_and_parses_user() {
    let state = Shared::default();
    let addr = spawn_backend(state.clone()).await;
    let session = Session::new();
    session.set_token("t1");
    let api = api_at(addr, session);

    let user = api.me().await.unwrap();
    assert_eq!(user.id, "u1");
    assert!(user.is_admin());

    let recorded = state.lock().unwrap();
    assert_eq!(
        recorded.auth_headers.first().and_then(|a| a.as_deref()),
        Some("Bearer t1")
    );
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let err = api.me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn register_checks_success_flag() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    api.register(&RegisterRequest::new(
        "Alice",
        "a@b.com",
        "0812345678",
        "secret1",
    ))
    .await
    .unwrap();
}

#[tokio::test]
async fn restaurant_list_and_detail_unwrap_the_envelope() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let restaurants = api.list_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].name, "Thai Garden");

    let one = api.get_restaurant("r1").await.unwrap();
    assert_eq!(one.id, "r1");

    let err = api.get_restaurant("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn create_returns_the_new_record() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let payload = RestaurantPayload {
        name: "New Place".into(),
        foodtype: "Italian".into(),
        address: "2 Side St".into(),
        province: "Phuket".into(),
        postalcode: "83000".into(),
        tel: "021112222".into(),
        picture: "https://example.com/q.jpg".into(),
    };
    let created = api.create_restaurant(&payload).await.unwrap();
    assert_eq!(created.name, "New Place");
}

#[tokio::test]
async fn repeated_identical_updates_send_identical_puts() {
    let state = Shared::default();
    let addr = spawn_backend(state.clone()).await;
    let api = api_at(addr, Session::new());

    let payload = RestaurantPayload {
        name: "Renamed".into(),
        foodtype: "Thai".into(),
        address: "1 Main Rd".into(),
        province: "Bangkok".into(),
        postalcode: "10110".into(),
        tel: "021112222".into(),
        picture: "https://example.com/p.jpg".into(),
    };
    api.update_restaurant("r1", &payload).await.unwrap();
    api.update_restaurant("r1", &payload).await.unwrap();

    let recorded = state.lock().unwrap();
    assert_eq!(recorded.put_bodies.len(), 2);
    assert_eq!(recorded.put_bodies[0], recorded.put_bodies[1]);
}

#[tokio::test]
async fn booking_limit_is_classified_from_free_text() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let payload = BookingPayload::new(chrono::Utc::now(), 2);
    let err = api.create_booking("full-text", &payload).await.unwrap_err();
    assert!(err.is_booking_limit());
}

#[tokio::test]
async fn booking_limit_is_classified_from_structured_code() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let payload = BookingPayload::new(chrono::Utc::now(), 2);
    let err = api.create_booking("full-code", &payload).await.unwrap_err();
    assert!(err.is_booking_limit());
    match err {
        ClientError::Rejected { code, .. } => assert_eq!(code.as_deref(), Some("BOOKING_LIMIT")),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn bookings_roundtrip() {
    let addr = spawn_backend(Shared::default()).await;
    let api = api_at(addr, Session::new());

    let bookings = api.list_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].restaurant.name, "Thai Garden");

    let payload = BookingPayload::new(chrono::Utc::now(), 3);
    api.create_booking("r1", &payload).await.unwrap();
    api.update_booking("b1", &payload).await.unwrap();
    api.delete_booking("b1").await.unwrap();
}
