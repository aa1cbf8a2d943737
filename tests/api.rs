//! End-to-end tests driving the real router through `tower::ServiceExt`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mobilia_back::{AppState, routes, store::Store};

fn test_app() -> Router {
    let store = Arc::new(Store::new());
    routes::create_router().with_state(AppState { store })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["products"], 0);
}

#[tokio::test]
async fn category_crud_flow() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/internal/category",
        Some(json!({ "name": "Sala de Estar", "featured": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["slug"], "sala-de-estar");
    assert_eq!(body["data"]["level"], 1);
    let root_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/internal/category",
        Some(json!({ "name": "Sofás", "parent_id": root_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], 2);
    let child_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/api/internal/category/slug/sofas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], child_id);

    let uri = format!("/api/internal/category?parent_id={}", root_id);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/internal/category/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], root_id);

    // Renaming regenerates the slug.
    let uri = format!("/api/internal/category/{}", child_id);
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "Poltronas" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "poltronas");

    // Deleting a parent with children is blocked.
    let uri = format!("/api/internal/category/{}", root_id);
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BUSINESS_RULE_ERROR");

    let uri = format!("/api/internal/category/{}", child_id);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/internal/category/{}", root_id);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn validation_errors_carry_field_details() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/internal/category",
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details[0]["field"], "name");
}

#[tokio::test]
async fn missing_records_return_not_found_envelope() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/internal/product/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = send(&app, "GET", "/api/internal/category/slug/nada", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn product_listing_paginates_and_sorts() {
    let app = test_app();

    for i in 0..10 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/internal/product",
            Some(json!({ "name": format!("Produto {:02}", i), "category": "Sofás" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/internal/product", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 9);
    assert_eq!(body["data"]["total"], 10);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["has_next"], true);
    assert_eq!(body["data"]["has_previous"], false);

    let (status, body) = send(&app, "GET", "/api/internal/product?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["has_next"], false);
    assert_eq!(body["data"]["has_previous"], true);

    let (status, body) = send(
        &app,
        "GET",
        "/api/internal/product?sort_by=name_asc&page_size=18",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["name"], "Produto 00");
    assert_eq!(items[9]["name"], "Produto 09");
    // List items are the slim projection.
    assert!(items[0].get("description").is_none());

    let (status, body) = send(&app, "GET", "/api/internal/product?page_size=11", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        "GET",
        "/api/internal/product?sort_by=price_desc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn gallery_flow_orders_and_reorders() {
    let app = test_app();

    let (_, body) = send(
        &app,
        "POST",
        "/api/internal/product",
        Some(json!({ "name": "Sofá Oslo", "category": "Sofás" })),
    )
    .await;
    let product_id = body["data"]["id"].as_i64().unwrap();

    let image = |angle: &str| {
        json!({
            "image_url": "https://cdn.example.com/a.jpg",
            "thumbnail_url": "https://cdn.example.com/a-thumb.jpg",
            "high_res_url": "https://cdn.example.com/a-hd.jpg",
            "alt_text": "Sofá Oslo",
            "view_angle": angle,
        })
    };

    let uri = format!("/api/internal/product/{}/image", product_id);
    let (status, body) = send(&app, "POST", &uri, Some(image("front"))).await;
    assert_eq!(status, StatusCode::OK);
    let first_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["display_order"], 1);

    let (status, body) = send(&app, "POST", &uri, Some(image("angle"))).await;
    assert_eq!(status, StatusCode::OK);
    let second_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["display_order"], 2);

    let reorder_uri = format!("/api/internal/product/{}/image/reorder", product_id);
    let (status, body) = send(
        &app,
        "PUT",
        &reorder_uri,
        Some(json!({
            "image_order": [
                { "image_id": first_id, "display_order": 2 },
                { "image_id": second_id, "display_order": 1 },
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 2);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let gallery = body["data"].as_array().unwrap();
    assert_eq!(gallery[0]["id"], second_id);
    assert_eq!(gallery[1]["id"], first_id);

    // Reorder referencing an image of another product changes nothing.
    let (_, body) = send(
        &app,
        "POST",
        "/api/internal/product",
        Some(json!({ "name": "Mesa Lateral", "category": "Mesas" })),
    )
    .await;
    let other_product = body["data"]["id"].as_i64().unwrap();
    let other_uri = format!("/api/internal/product/{}/image", other_product);
    let (_, body) = send(&app, "POST", &other_uri, Some(image("front"))).await;
    let foreign_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &reorder_uri,
        Some(json!({
            "image_order": [{ "image_id": foreign_id, "display_order": 5 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BUSINESS_RULE_ERROR");

    // Deleting the last image of the other product is blocked.
    let delete_uri = format!("/api/internal/product-image/{}", foreign_id);
    let (status, body) = send(&app, "DELETE", &delete_uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BUSINESS_RULE_ERROR");
}
