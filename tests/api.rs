//! HTTP tests against the router on the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shop_backend::services::EventPublisher;
use shop_backend::store::MemoryStore;
use shop_backend::{router, AppState};

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    router(AppState::new(store.clone(), store, EventPublisher::disabled(), Duration::from_secs(5)))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn signup(app: &Router, email: &str, phone: &str) -> String {
    let (status, user) = call(app, Method::POST, "/users/signup", Some(json!({
        "first_name": "Tokha", "last_name": "Tester", "email": email, "phone": phone
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    user["id"].as_str().unwrap().to_string()
}

async fn add_product(app: &Router, name: &str, price: f64) -> String {
    let (status, product) = call(app, Method::POST, "/admin/addproduct", Some(json!({
        "name": name, "price": price, "rating": 5, "image": "img.png"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    product["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health() {
    let (status, body) = call(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn cart_to_order_flow() {
    let app = app();
    let user = signup(&app, "a@example.com", "5550001").await;
    let laptop = add_product(&app, "Laptop", 1000.0).await;
    let mouse = add_product(&app, "Mouse", 25.5).await;

    for product in [&laptop, &mouse, &mouse] {
        let (status, body) = call(&app, Method::GET, &format!("/addtocart?id={product}&userID={user}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("successfully added to the cart"));
    }

    let (status, cart) = call(&app, Method::GET, &format!("/cart?id={user}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["line_items"].as_array().unwrap().len(), 3);
    assert_eq!(cart["total"].as_f64().unwrap(), 1051.0);

    let (status, body) = call(&app, Method::GET, &format!("/removeitem?id={mouse}&userID={user}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("successfully removed from the cart"));
    let (_, cart) = call(&app, Method::GET, &format!("/cart?id={user}"), None).await;
    assert_eq!(cart["line_items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["total"].as_f64().unwrap(), 1000.0);

    let (status, placed) = call(&app, Method::POST, &format!("/committedorder?userID={user}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["message"], "successfully placed the order");
    assert!(placed["order_id"].is_string());

    let (_, cart) = call(&app, Method::GET, &format!("/cart?id={user}"), None).await;
    assert!(cart["line_items"].as_array().unwrap().is_empty());
    assert_eq!(cart["total"].as_f64().unwrap(), 0.0);

    let (status, body) = call(&app, Method::POST, &format!("/committedorder?userID={user}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "cart is empty");
}

#[tokio::test]
async fn instant_buy_keeps_cart() {
    let app = app();
    let user = signup(&app, "b@example.com", "5550002").await;
    let book = add_product(&app, "Book", 12.0).await;
    let pen = add_product(&app, "Pen", 2.0).await;
    call(&app, Method::GET, &format!("/addtocart?id={book}&userID={user}"), None).await;

    let (status, placed) = call(&app, Method::GET, &format!("/instantbuy?id={pen}&userID={user}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["message"], "successfully placed the order");

    let (_, cart) = call(&app, Method::GET, &format!("/cart?id={user}"), None).await;
    assert_eq!(cart["line_items"][0]["product_id"], json!(book));
    assert_eq!(cart["total"].as_f64().unwrap(), 12.0);
}

#[tokio::test]
async fn parameter_and_identifier_errors() {
    let app = app();
    let user = signup(&app, "c@example.com", "5550003").await;

    let (status, body) = call(&app, Method::GET, &format!("/addtocart?userID={user}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing query parameter `id`");

    let (status, _) = call(&app, Method::GET, "/addtocart?id=not-an-id&userID=also-not", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = "0190a5d4-0000-7000-8000-000000000000";
    let (status, _) = call(&app, Method::GET, &format!("/addtocart?id={missing}&userID={user}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, &format!("/instantbuy?id={missing}&userID={user}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::GET, &format!("/cart?id={missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::POST, "/committedorder", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = app();
    let user = signup(&app, "f@example.com", "5550007").await;

    let (status, body) = call(&app, Method::POST, "/users/signup", Some(json!({"first_name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("last_name"));

    let (status, body) = call(&app, Method::GET, &format!("/addtocart?id=a&id=b&userID={user}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));

    let req = Request::builder().method(Method::POST).uri(format!("/addaddress?id={user}")).body(Body::from("{}")).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn catalog_search() {
    let app = app();
    add_product(&app, "Apple iPhone 14", 999.0).await;
    add_product(&app, "Samsung Galaxy", 899.0).await;

    let (status, all) = call(&app, Method::GET, "/users/productview", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, found) = call(&app, Method::GET, "/users/search?name=iphone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found[0]["name"], "Apple iPhone 14");
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, _) = call(&app, Method::GET, "/users/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/admin/addproduct", Some(json!({"name": "Broken", "price": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_conflict() {
    let app = app();
    signup(&app, "d@example.com", "5550004").await;
    let (status, _) = call(&app, Method::POST, "/users/signup", Some(json!({
        "first_name": "Other", "last_name": "Person", "email": "d@example.com", "phone": "5550005"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn address_management() {
    let app = app();
    let user = signup(&app, "e@example.com", "5550006").await;
    let address = |city: &str| json!({"house_name": "1", "street_name": "Main", "city_name": city, "pin_code": "050000"});

    let (status, _) = call(&app, Method::PUT, &format!("/edithomeaddress?id={user}"), Some(address("Almaty"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for city in ["Almaty", "Astana"] {
        let (status, _) = call(&app, Method::POST, &format!("/addaddress?id={user}"), Some(address(city))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = call(&app, Method::POST, &format!("/addaddress?id={user}"), Some(address("Taraz"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "at most 2 addresses are allowed");

    let (status, body) = call(&app, Method::PUT, &format!("/editworkaddress?id={user}"), Some(address("Aktau"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("successfully updated work address"));

    let (status, body) = call(&app, Method::DELETE, &format!("/deleteaddresses?id={user}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("successfully deleted"));

    let (status, _) = call(&app, Method::POST, &format!("/addaddress?id={user}"), Some(address("Taraz"))).await;
    assert_eq!(status, StatusCode::CREATED);
}
