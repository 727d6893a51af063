mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn create_then_get_returns_the_same_body() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/product"))
        .json(&json!({"name": "Widget", "price": 9.99}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED, "expected 201, got {}", res.status());
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/api/product/1")
    );
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({"id": 1, "name": "Widget", "price": 9.99}));

    let res = server.client.get(server.url("/api/product/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    Ok(())
}

#[tokio::test]
async fn ids_are_unique() -> Result<()> {
    let server = common::spawn_server().await?;

    let a = server.create("product", json!({"name": "A", "price": 1})).await?;
    let b = server.create("product", json!({"name": "B", "price": 2})).await?;
    assert_ne!(common::id_of(&a)?, common::id_of(&b)?);

    Ok(())
}

#[tokio::test]
async fn missing_fields_are_reported_per_field() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/product"))
        .json(&json!({"name": "  "}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR", "unexpected body: {}", body);
    assert!(body["field_errors"].get("name").is_some(), "missing name error: {}", body);
    assert!(body["field_errors"].get("price").is_some(), "missing price error: {}", body);
    assert!(server.list("product").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/product"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{\"name\": \"Widget\", \"price\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = server
        .client
        .post(server.url("/api/product"))
        .json(&json!({"name": "Widget", "price": "cheap"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    Ok(())
}

#[tokio::test]
async fn non_numeric_path_id_is_a_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/product/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "BAD_REQUEST");

    Ok(())
}

#[tokio::test]
async fn update_returns_the_new_state() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create("product", json!({"name": "Widget", "price": 9.99})).await?;
    let id = common::id_of(&created)?;

    let res = server
        .client
        .put(server.url(&format!("/api/product/{}", id)))
        .json(&json!({"id": id, "name": "Gadget", "price": 12.5}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"id": id, "name": "Gadget", "price": 12.5})
    );

    Ok(())
}

#[tokio::test]
async fn mismatched_ids_leave_the_row_unchanged() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create("product", json!({"name": "Widget", "price": 9.99})).await?;
    let id = common::id_of(&created)?;

    let res = server
        .client
        .put(server.url(&format!("/api/product/{}", id)))
        .json(&json!({"id": id + 1, "name": "Gadget", "price": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "ID_MISMATCH");

    let res = server
        .client
        .get(server.url(&format!("/api/product/{}", id)))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, created);

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found_without_a_body() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/product/42")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = server
        .client
        .put(server.url("/api/product/42"))
        .json(&json!({"id": 42, "name": "Ghost", "price": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.client.delete(server.url("/api/product/42")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create("product", json!({"name": "Widget", "price": 9.99})).await?;
    let url = server.url(&format!("/api/product/{}", common::id_of(&created)?));

    let res = server.client.delete(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = server.client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn list_holds_creates_minus_deletes() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut ids = Vec::new();
    for i in 0..6 {
        let dto = server
            .create("product", json!({"name": format!("P{}", i), "price": i}))
            .await?;
        ids.push(common::id_of(&dto)?);
    }
    for id in &ids[..4] {
        let res = server
            .client
            .delete(server.url(&format!("/api/product/{}", id)))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    assert_eq!(server.list("product").await?.len(), 2);

    Ok(())
}
