//! Integration tests for the API client against a local mock of the
//! backend REST service.
//!
//! The mock is a small axum router bound to an ephemeral port. It checks
//! the bearer header the way the real backend does and records checkout
//! bodies so the wire shape can be asserted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use clerk_api::{ApiClient, Session, SessionStore};
use clerk_core::{Cart, Money, Product, Role, User};

const TOKEN: &str = "test-token-1";

// =============================================================================
// Mock Backend
// =============================================================================

#[derive(Clone, Default)]
struct MockState {
    /// Bodies received by POST /sales, in arrival order.
    checkout_bodies: Arc<Mutex<Vec<Value>>>,
    /// When set, POST /sales answers 400 with a server message.
    fail_checkout: Arc<AtomicBool>,
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Not authorized"})),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "aye" && body["password"] == "hunter2x" {
        (
            StatusCode::OK,
            Json(json!({
                "token": TOKEN,
                "user": {"id": "u-1", "name": "Aye Chan", "role": "staff", "username": "aye"}
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn list_products(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": "p-1", "name": "Coca-Cola 330ml", "price": 1200, "stock": 24,
             "category": {"id": "c-1", "name": "Drinks"}, "barcode": "5449000000996"},
            {"id": "p-2", "name": "Instant Noodles", "price": 800, "stock": 0}
        ])),
    )
}

async fn delete_product(
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if id == "p-bad" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Product is referenced by sales"})),
        );
    }
    (StatusCode::OK, Json(json!({})))
}

async fn create_sale(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    if state.fail_checkout.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Stock changed, please refresh"})),
        );
    }
    state.checkout_bodies.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({})))
}

async fn list_sales(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let id = uuid::Uuid::new_v4().to_string();
    (
        StatusCode::OK,
        Json(json!([{
            "id": id,
            "receiptNumber": "R-0001",
            "cashier": {"id": "u-1", "name": "Aye Chan"},
            "items": [{"product": {"id": "p-1", "name": "Coca-Cola 330ml"}, "quantity": 2, "price": 1200}],
            "totalAmount": 2400,
            "createdAt": chrono::Utc::now().to_rfc3339()
        }])),
    )
}

async fn sales_stats(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"sales": 152000, "orders": 17})))
}

/// Binds the mock on an ephemeral port; returns its /api base URL.
async fn spawn_mock() -> (String, MockState) {
    let state = MockState::default();

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/products", get(list_products))
        .route("/products/{id}", delete(delete_product))
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/stats", get(sales_stats))
        .with_state(state.clone());

    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), state)
}

fn stale_session() -> Session {
    Session {
        token: "stale-token".to_string(),
        user: User {
            id: "u-1".to_string(),
            name: "Aye Chan".to_string(),
            role: Role::Staff,
            username: None,
        },
    }
}

fn logged_in_client(base_url: &str) -> ApiClient {
    let store = SessionStore::in_memory();
    store
        .set(Session {
            token: TOKEN.to_string(),
            user: stale_session().user,
        })
        .unwrap();
    ApiClient::new(base_url, store).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn login_installs_session_and_bearer_reaches_protected_endpoints() {
    let (base_url, _state) = spawn_mock().await;
    let api = ApiClient::new(&base_url, SessionStore::in_memory()).unwrap();

    let session = api.auth().login("aye", "hunter2x").await.unwrap();
    assert_eq!(session.user.name, "Aye Chan");
    assert_eq!(api.session().token().unwrap(), TOKEN);

    // The mock rejects any request without the bearer header, so a
    // successful list proves the token was attached.
    let products = api.products().list().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, Money::from_amount(1200));
    assert!(!products[1].in_stock());
}

#[tokio::test]
async fn login_failure_surfaces_server_message_and_leaves_session_empty() {
    let (base_url, _state) = spawn_mock().await;
    let api = ApiClient::new(&base_url, SessionStore::in_memory()).unwrap();

    let err = api.auth().login("aye", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn unauthorized_response_clears_session() {
    let (base_url, _state) = spawn_mock().await;

    let store = SessionStore::in_memory();
    store.set(stale_session()).unwrap();
    let api = ApiClient::new(&base_url, store).unwrap();

    let err = api.products().list().await.unwrap_err();
    assert!(err.is_unauthorized());

    // Token and user are both gone - forced logout.
    assert!(!api.session().is_authenticated());
    assert!(api.session().user().is_none());
}

#[tokio::test]
async fn checkout_posts_draft_shape_and_cart_clears_on_success() {
    let (base_url, state) = spawn_mock().await;
    let api = logged_in_client(&base_url);

    let product = Product {
        id: "p-1".to_string(),
        name: "Coca-Cola 330ml".to_string(),
        price: Money::from_amount(1200),
        stock: 24,
        category: None,
        barcode: None,
        image: None,
        created_at: None,
        updated_at: None,
    };

    let mut cart = Cart::new();
    cart.add_product(&product).unwrap();
    cart.add_product(&product).unwrap();

    let cashier = api.session().user().unwrap();
    let draft = cart.begin_checkout(&cashier.id).unwrap();
    api.sales().create(&draft).await.unwrap();
    cart.commit_checkout();

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Money::ZERO);

    // The wire body carries exactly the fields the backend expects.
    let bodies = state.checkout_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["cashierId"], "u-1");
    assert_eq!(bodies[0]["totalAmount"], 2400);
    assert_eq!(bodies[0]["items"][0]["product"], "p-1");
    assert_eq!(bodies[0]["items"][0]["quantity"], 2);
    assert_eq!(bodies[0]["items"][0]["price"], 1200);
    drop(bodies);

    // The post-checkout refresh sees the (mock) stock again.
    let products = api.products().list().await.unwrap();
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn checkout_failure_keeps_cart_and_surfaces_message() {
    let (base_url, state) = spawn_mock().await;
    state.fail_checkout.store(true, Ordering::SeqCst);
    let api = logged_in_client(&base_url);

    let product = Product {
        id: "p-1".to_string(),
        name: "Coca-Cola 330ml".to_string(),
        price: Money::from_amount(1200),
        stock: 24,
        category: None,
        barcode: None,
        image: None,
        created_at: None,
        updated_at: None,
    };

    let mut cart = Cart::new();
    cart.add_product(&product).unwrap();

    let draft = cart.begin_checkout("u-1").unwrap();
    let err = api.sales().create(&draft).await.unwrap_err();
    assert_eq!(err.to_string(), "Stock changed, please refresh");

    cart.abort_checkout();
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.total(), Money::from_amount(1200));
}

#[tokio::test]
async fn bulk_delete_reports_exactly_which_ids_failed() {
    let (base_url, _state) = spawn_mock().await;
    let api = logged_in_client(&base_url);

    let ids = vec![
        "p-1".to_string(),
        "p-bad".to_string(),
        "p-2".to_string(),
    ];
    let report = api.products().delete_many(&ids).await;

    assert_eq!(report.len(), 3);
    assert_eq!(report.succeeded(), 2);
    assert!(!report.is_all_ok());

    let failed = report.failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "p-bad");
    assert_eq!(failed[0].1.to_string(), "Product is referenced by sales");
}

#[tokio::test]
async fn receipts_and_stats_decode_into_typed_schemas() {
    let (base_url, _state) = spawn_mock().await;
    let api = logged_in_client(&base_url);

    let sales = api.sales().list().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].receipt_number, "R-0001");
    assert_eq!(sales[0].cashier_name(), "Aye Chan");
    assert_eq!(sales[0].items[0].line_total(), Money::from_amount(2400));

    let stats = api.sales().stats().await.unwrap();
    assert_eq!(stats.sales, Money::from_amount(152000));
    assert_eq!(stats.orders, 17);
}
