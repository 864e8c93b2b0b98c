mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn full_grant_runs_the_whole_crud_flow() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let auth = common::bearer(
        "admin",
        &["user/create", "user/read", "user/update", "user/delete"],
    );

    // Create
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .header("Authorization", &auth)
        .json(&json!({ "name": "Alice", "email": "alice@crud-flow.test" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Read back
    let res = client
        .get(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], "Alice");

    // Update
    let res = client
        .put(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &auth)
        .json(&json!({ "name": "Alice B", "email": "alice@crud-flow.test" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], "Alice B");

    // Delete, then the record is gone
    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn read_only_grant_cannot_delete_and_record_survives() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let admin = common::bearer("admin", &["user/create", "user/read", "user/delete"]);
    let reader = common::bearer("u1", &["user/read"]);

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .header("Authorization", &admin)
        .json(&json!({ "name": "Bob", "email": "bob@read-only.test" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Denied, naming exactly the missing permission
    let res = client
        .delete(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &reader)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(body["missing_permissions"], json!(["user/delete"]));

    // No mutation happened
    let res = client
        .get(format!("{}/api/users/{}", server.base_url, id))
        .header("Authorization", &reader)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["name"], "Bob");
    Ok(())
}

#[tokio::test]
async fn create_without_grant_is_denied_before_validation() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let reader = common::bearer("u1", &["user/read"]);

    // Invalid payload, but the permission check fires first
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .header("Authorization", &reader)
        .json(&json!({ "name": "", "email": "not-an-email" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        res.json::<Value>().await?["missing_permissions"],
        json!(["user/create"])
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let auth = common::bearer("admin", &["user/create"]);

    let payload = json!({ "name": "Cara", "email": "cara@conflict.test" });
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .header("Authorization", &auth)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .header("Authorization", &auth)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn concurrent_principals_keep_their_own_permissions() -> Result<()> {
    let server = common::ensure_server().await?;
    let base = server.base_url.clone();

    // Two principals with different grants hammer the same endpoint at once;
    // the weaker grant must never be able to create, the stronger always can.
    let reader_task = {
        let base = base.clone();
        tokio::spawn(async move {
            let client = reqwest::Client::new();
            let reader = common::bearer("u1", &["user/read"]);
            for _ in 0..10 {
                let res = client
                    .post(format!("{}/api/users", base))
                    .header("Authorization", &reader)
                    .json(&json!({ "name": "X", "email": "x@iso.test" }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::FORBIDDEN);
            }
        })
    };

    let writer_task = tokio::spawn(async move {
        let client = reqwest::Client::new();
        let writer = common::bearer("u2", &["user/create", "user/read", "user/delete"]);
        for i in 0..10 {
            let res = client
                .post(format!("{}/api/users", base))
                .header("Authorization", &writer)
                .json(&json!({
                    "name": "Y",
                    "email": format!("y{}@iso.test", i)
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);

            let id = res.json::<Value>().await.unwrap()["data"]["id"]
                .as_str()
                .unwrap()
                .to_string();
            let res = client
                .delete(format!("{}/api/users/{}", base, id))
                .header("Authorization", &writer)
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
    });

    reader_task.await?;
    writer_task.await?;
    Ok(())
}
