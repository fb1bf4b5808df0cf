//! End-to-end tests of the HTTP API, driven in-process through the router

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sheetapi_core::Store;
use sheetapi_server::{router, AppState};
use tower::ServiceExt;

struct TestClient {
    app: Router,
}

impl TestClient {
    fn new() -> Self {
        Self {
            app: router(AppState::new(Store::new())),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_spreadsheet(&self, name: &str) -> String {
        let (status, body) = self
            .json(Method::POST, "/v1/spreadsheets", Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn put_cell(&self, id: &str, name: &str, value: &str) -> StatusCode {
        let uri = format!("/v1/spreadsheets/{id}/cells/{name}");
        let body = json!({ "value": value, "type": "literal" });
        self.send(Method::PUT, &uri, Some(body)).await.0
    }
}

// === Spreadsheets ===

#[tokio::test]
async fn test_create_and_list_spreadsheets() {
    let client = TestClient::new();

    let (status, body) = client
        .json(
            Method::POST,
            "/v1/spreadsheets",
            Some(json!({ "name": "first_test_spreadsheet" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "first_test_spreadsheet");
    assert!(body["id"].is_string());

    client.create_spreadsheet("second_test_spreadsheet").await;

    let (status, body) = client.json(Method::GET, "/v1/spreadsheets", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first_test_spreadsheet", "second_test_spreadsheet"]);
}

#[tokio::test]
async fn test_get_rename_delete_spreadsheet() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("new_spreadsheet").await;
    let uri = format!("/v1/spreadsheets/{id}");

    let (status, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "name": "new_spreadsheet" }));

    let (status, body) = client
        .json(Method::PUT, &uri, Some(json!({ "name": "new_spreadsheet_name" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (_, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(body["name"], "new_spreadsheet_name");

    let (status, _) = client.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = client.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_spreadsheet() {
    let client = TestClient::new();
    let uri = "/v1/spreadsheets/doesnt_exist";

    assert_eq!(client.send(Method::GET, uri, None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        client
            .send(Method::PUT, uri, Some(json!({ "name": "new_name" })))
            .await
            .0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(client.send(Method::DELETE, uri, None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_create_spreadsheet_without_name() {
    let client = TestClient::new();
    let (status, body) = client
        .json(Method::POST, "/v1/spreadsheets", Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

// === Cells ===

#[tokio::test]
async fn test_cell_lifecycle() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("new_spreadsheet").await;
    let uri = format!("/v1/spreadsheets/{id}/cells/A1");

    // Unset cell is null, not an error
    let (status, bytes) = client.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"null");

    assert_eq!(client.put_cell(&id, "A1", "dummy value").await, StatusCode::OK);
    let (status, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "name": "A1", "data": { "value": "dummy value", "type": "literal" } })
    );

    assert_eq!(
        client.put_cell(&id, "A1", "dummy value update").await,
        StatusCode::OK
    );
    let (_, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(body["data"]["value"], "dummy value update");

    assert_eq!(client.send(Method::DELETE, &uri, None).await.0, StatusCode::OK);
    assert_eq!(client.send(Method::DELETE, &uri, None).await.0, StatusCode::OK);
    let (status, bytes) = client.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"null");
}

#[tokio::test]
async fn test_put_cell_returns_stored_cell() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("put").await;
    let (status, body) = client
        .json(
            Method::PUT,
            &format!("/v1/spreadsheets/{id}/cells/AA12"),
            Some(json!({ "value": "far", "type": "literal" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "name": "AA12", "data": { "value": "far", "type": "literal" } })
    );
}

#[tokio::test]
async fn test_cells_on_unknown_spreadsheet() {
    let client = TestClient::new();
    let base = "/v1/spreadsheets/doesnt_exist";

    assert_eq!(
        client.send(Method::GET, &format!("{base}/cells/A1"), None).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(client.put_cell("doesnt_exist", "A1", "dummy value").await, StatusCode::NOT_FOUND);
    assert_eq!(
        client.send(Method::DELETE, &format!("{base}/cells/A1"), None).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.send(Method::GET, &format!("{base}/cells"), None).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_invalid_cell_requests_are_422() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("validation").await;

    // Validation runs before the spreadsheet lookup
    for sheet in ["doesnt_exist", id.as_str()] {
        for name in ["A0", "1B", "a1", "A01"] {
            assert_eq!(
                client.put_cell(sheet, name, "dummy value").await,
                StatusCode::UNPROCESSABLE_ENTITY,
                "PUT {name} on {sheet}"
            );
        }

        let (status, _) = client
            .send(
                Method::PUT,
                &format!("/v1/spreadsheets/{sheet}/cells/1B"),
                Some(json!({ "value": "dummy value", "type": "badtype" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = client
            .send(
                Method::PUT,
                &format!("/v1/spreadsheets/{sheet}/cells/B2"),
                Some(json!({ "value": "dummy value", "type": "badtype" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = client
            .send(
                Method::PUT,
                &format!("/v1/spreadsheets/{sheet}/cells/B2"),
                Some(json!({ "type": "literal" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    // Nothing was written
    let (_, body) = client
        .json(Method::GET, &format!("/v1/spreadsheets/{id}/cells"), None)
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_cell_reads_check_spreadsheet_before_address() {
    let client = TestClient::new();
    let base = "/v1/spreadsheets/doesnt_exist/cells";

    for name in ["a1", "A0", "1B"] {
        let uri = format!("{base}/{name}");
        assert_eq!(
            client.send(Method::GET, &uri, None).await.0,
            StatusCode::NOT_FOUND,
            "GET {name}"
        );
        assert_eq!(
            client.send(Method::DELETE, &uri, None).await.0,
            StatusCode::NOT_FOUND,
            "DELETE {name}"
        );
    }

    // On a real spreadsheet the bad address is what gets reported
    let id = client.create_spreadsheet("reads").await;
    let uri = format!("/v1/spreadsheets/{id}/cells/a1");
    assert_eq!(
        client.send(Method::GET, &uri, None).await.0,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        client.send(Method::DELETE, &uri, None).await.0,
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_addresses_past_sheet_limits_are_rejected() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("limits").await;

    for name in ["A4294967295", "A1048577", "XFE1"] {
        assert_eq!(
            client.put_cell(&id, name, "too far").await,
            StatusCode::UNPROCESSABLE_ENTITY,
            "PUT {name}"
        );
    }
    assert_eq!(client.put_cell(&id, "XFD1", "edge").await, StatusCode::OK);

    let (status, bytes) = client
        .send(Method::GET, &format!("/v1/spreadsheets/{id}/view"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let view = String::from_utf8(bytes).unwrap();
    assert_eq!(view.split('\n').count(), 2);
    assert!(view.ends_with("\tedge"));
}

#[tokio::test]
async fn test_list_cells() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("new_spreadsheet").await;
    let uri = format!("/v1/spreadsheets/{id}/cells");

    let (status, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let mut expected = Vec::new();
    for col in ["A", "B", "C", "D"] {
        for row in 1..=4 {
            let name = format!("{col}{row}");
            let status = client
                .put_cell(&id, &name, &format!("dummy value {name}"))
                .await;
            assert_eq!(status, StatusCode::OK);
            expected.push(name);
        }
    }

    let (status, body) = client.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let cells = body.as_array().unwrap();
    assert_eq!(cells.len(), 16);

    let mut names: Vec<String> = cells
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    expected.sort();
    assert_eq!(names, expected);

    for cell in cells {
        let name = cell["name"].as_str().unwrap();
        assert_eq!(cell["data"]["value"], format!("dummy value {name}"));
        assert_eq!(cell["data"]["type"], "literal");
    }
}

#[tokio::test]
async fn test_delete_spreadsheet_removes_cells() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("cascade").await;
    client.put_cell(&id, "B3", "gone soon").await;

    client
        .send(Method::DELETE, &format!("/v1/spreadsheets/{id}"), None)
        .await;

    assert_eq!(
        client
            .send(Method::GET, &format!("/v1/spreadsheets/{id}/cells/B3"), None)
            .await
            .0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .send(Method::GET, &format!("/v1/spreadsheets/{id}/view"), None)
            .await
            .0,
        StatusCode::NOT_FOUND
    );
}

// === View ===

#[tokio::test]
async fn test_view_unknown_spreadsheet() {
    let client = TestClient::new();
    let (status, _) = client
        .send(Method::GET, "/v1/spreadsheets/doesnt_exist/view", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_empty_spreadsheet() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("new_spreadsheet").await;
    let (status, bytes) = client
        .send(Method::GET, &format!("/v1/spreadsheets/{id}/view"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(bytes).unwrap(), "");
}

#[tokio::test]
async fn test_view_spreadsheet() {
    let client = TestClient::new();
    let id = client.create_spreadsheet("new_spreadsheet").await;
    client.put_cell(&id, "A1", "a1").await;
    client.put_cell(&id, "B2", "b2").await;
    client.put_cell(&id, "D5", "d5").await;

    let response = client
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/spreadsheets/{id}/view"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );

    let (status, bytes) = client
        .send(Method::GET, &format!("/v1/spreadsheets/{id}/view"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "*\tA\tB\tC\tD\n1\ta1\t\t\t\n2\t\tb2\t\t\n3\t\t\t\t\n4\t\t\t\t\n5\t\t\t\td5"
    );
}
