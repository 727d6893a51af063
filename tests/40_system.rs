mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use store_manager::config::AppConfig;

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body.get("timestamp").is_some(), "missing timestamp: {}", body);

    Ok(())
}

#[tokio::test]
async fn root_lists_the_resources() -> Result<()> {
    let server = common::spawn_server().await?;

    let body = server
        .client
        .get(server.url("/api"))
        .send()
        .await?
        .json::<Value>()
        .await?;

    let collections: Vec<&str> = body["resources"]
        .as_array()
        .map(|items| items.iter().filter_map(|r| r["collection"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        collections,
        vec!["/api/customer", "/api/product", "/api/store", "/api/sale"]
    );

    Ok(())
}

#[tokio::test]
async fn serves_the_client_with_history_fallback() -> Result<()> {
    let dist = std::env::temp_dir().join(format!("store-manager-dist-{}", std::process::id()));
    std::fs::create_dir_all(&dist)?;
    std::fs::write(dist.join("index.html"), "<html>store manager</html>")?;
    std::fs::write(dist.join("app.js"), "console.log('hi')")?;

    let server = common::spawn_server_with_client(dist.clone()).await?;

    let res = server.client.get(server.url("/app.js")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "console.log('hi')");

    // Client-side routes get index.html
    let res = server.client.get(server.url("/sales/12")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("store manager"));

    // Unknown API paths are still 404
    let res = server.client.get(server.url("/api/nothing/here")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dist);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_published_in_development() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/openapi.json")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let doc = res.json::<Value>().await?;
    assert_eq!(doc["info"]["title"], "Store Manager API");
    for name in ["customer", "product", "store", "sale"] {
        let collection = &doc["paths"][format!("/api/{}", name)];
        assert!(collection.get("get").is_some(), "no list for {}", name);
        assert!(collection.get("post").is_some(), "no create for {}", name);

        let record = &doc["paths"][format!("/api/{}/{{id}}", name)];
        for method in ["get", "put", "delete"] {
            assert!(record.get(method).is_some(), "no {} for {}", method, name);
        }
    }
    assert!(doc["components"]["schemas"]["SalePayload"]["properties"]
        .get("productId")
        .is_some());

    Ok(())
}

#[tokio::test]
async fn openapi_document_is_hidden_outside_development() -> Result<()> {
    let server = common::spawn_with_config(AppConfig::production()).await?;

    let res = server.client.get(server.url("/api/openapi.json")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn store_failures_are_500_with_context() -> Result<()> {
    let server = common::spawn_server().await?;
    let (product, customer, store) = server.seed_references().await?;

    sqlx::query("DROP TABLE sales").execute(&server.pool).await?;

    let res = server.client.get(server.url("/api/sale")).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "Error retrieving sales");
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.contains("no such table"), "unexpected error: {}", error);

    let res = server
        .client
        .post(server.url("/api/sale"))
        .json(&serde_json::json!({
            "productId": product,
            "customerId": customer,
            "storeId": store,
            "date": "2024-06-01",
            "quantity": 1
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["message"], "Error creating sale");

    // Other resources are unaffected
    assert_eq!(server.list("product").await?.len(), 1);

    Ok(())
}
