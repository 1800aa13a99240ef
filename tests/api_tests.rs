//! HTTP-level tests of the `/api` surface
//!
//! Every request goes through the full router built by `ServerBuilder`:
//! JSON → handler → ledger → document store → JSON.

use axum::http::StatusCode;
use axum_test::TestServer;
use invoicer::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;

fn server_with(store: impl DocumentStore + 'static, settings: Settings) -> TestServer {
    let router = ServerBuilder::new()
        .with_ledger(Ledger::open(store, settings))
        .build()
        .unwrap();
    TestServer::new(router)
}

fn make_server() -> TestServer {
    server_with(InMemoryStore::new(), Settings::default())
}

async fn create_acme(server: &TestServer) -> Value {
    let response = server
        .post("/api/customers")
        .json(&json!({ "name": "Acme", "email": "a@acme.com" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_widget_invoice(server: &TestServer, customer_id: u64) -> Value {
    let response = server
        .post("/api/invoices")
        .json(&json!({
            "customerId": customer_id,
            "date": "2024-03-01",
            "dueDate": "2024-03-31",
            "items": [{ "description": "Widget", "quantity": 2, "rate": 50 }],
            "tax": 5
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Store whose every save fails
struct FailingStore;

impl DocumentStore for FailingStore {
    fn load(&self) -> Snapshot {
        Snapshot::default()
    }

    fn save(&self, _: &[Invoice], _: &[Customer], _: &Meta) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: PathBuf::from("/read-only/invoices.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn set_data_directory(&mut self, _dir: &str) {}

    fn data_directory(&self) -> PathBuf {
        PathBuf::from("/read-only")
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = make_server();

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "invoicer");
    }
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_invoice_from_customer_scenario() {
    let server = make_server();

    let customer = create_acme(&server).await;
    assert_eq!(customer["id"], 1);

    let invoice = create_widget_invoice(&server, 1).await;
    assert_eq!(invoice["id"], 1);
    assert_eq!(invoice["invoiceNum"], "INV-0001");
    assert_eq!(invoice["client"]["name"], "Acme");
    assert_eq!(invoice["client"]["email"], "a@acme.com");
    assert_eq!(invoice["items"][0]["amount"], 100.0);
    assert_eq!(invoice["subtotal"], 100.0);
    assert_eq!(invoice["tax"], 5.0);
    assert_eq!(invoice["total"], 105.0);
    assert_eq!(invoice["template"], false);
}

#[tokio::test]
async fn test_invoice_ids_are_sequential() {
    let server = make_server();

    for expected in 1..=3u64 {
        let invoice = create_widget_invoice(&server, 0).await;
        assert_eq!(invoice["id"], expected);
        assert_eq!(invoice["invoiceNum"], format!("INV-{:04}", expected));
    }

    let list: Vec<Value> = server.get("/api/invoices").await.json();
    let ids: Vec<u64> = list.iter().map(|i| i["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_unknown_customer_keeps_client_from_body() {
    let server = make_server();

    let response = server
        .post("/api/invoices")
        .json(&json!({
            "customerId": 42,
            "client": { "name": "Walk-in" },
            "items": []
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let invoice: Value = response.json();
    assert_eq!(invoice["client"]["name"], "Walk-in");
    assert_eq!(invoice["total"], 0.0);
}

#[tokio::test]
async fn test_percentage_items() {
    let server = make_server();

    let response = server
        .post("/api/invoices")
        .json(&json!({
            "items": [
                { "description": "Base", "quantity": 1, "rate": 200 },
                { "description": "Commission", "rate": 200, "percentage": 10 }
            ]
        }))
        .await;
    let invoice: Value = response.json();

    assert_eq!(invoice["items"][1]["amount"], 20.0);
    assert_eq!(invoice["subtotal"], 220.0);
}

#[tokio::test]
async fn test_get_invoice_bad_and_missing_ids() {
    let server = make_server();

    let response = server.get("/api/invoices/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_ID");

    let response = server.get("/api/invoices/-3").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/api/invoices/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    assert_eq!(body["message"], "Invoice not found");
}

#[tokio::test]
async fn test_create_invoice_with_malformed_json() {
    let server = make_server();

    let response = server.post("/api/invoices").text("{\"items\": [").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_JSON");

    let list: Vec<Value> = server.get("/api/invoices").await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_delete_invoice_then_get_is_not_found() {
    let server = make_server();
    create_widget_invoice(&server, 0).await;
    create_widget_invoice(&server, 0).await;

    let response = server.delete("/api/invoices/1").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invoice deleted successfully");

    server
        .get("/api/invoices/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/api/invoices/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list: Vec<Value> = server.get("/api/invoices").await.json();
    assert_eq!(list.len(), 1);

    // Ids are never reused
    let next = create_widget_invoice(&server, 0).await;
    assert_eq!(next["id"], 3);
}

// =============================================================================
// Templates
// =============================================================================

#[tokio::test]
async fn test_toggle_template_twice() {
    let server = make_server();
    create_widget_invoice(&server, 0).await;

    let response = server
        .put("/api/invoices/1/template")
        .json(&json!({ "templateName": "Monthly retainer" }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Template status updated");
    assert_eq!(body["template"], true);
    assert_eq!(body["templateName"], "Monthly retainer");

    let response = server
        .put("/api/invoices/1/template")
        .json(&json!({ "templateName": "ignored" }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["template"], false);
    assert_eq!(body["templateName"], "");

    let invoice: Value = server.get("/api/invoices/1").await.json();
    assert_eq!(invoice["template"], false);
    assert!(invoice.get("templateName").is_none());
}

#[tokio::test]
async fn test_toggle_template_without_or_with_broken_body() {
    let server = make_server();
    create_widget_invoice(&server, 0).await;

    let response = server.put("/api/invoices/1/template").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["template"], true);
    assert_eq!(body["templateName"], "");

    server.put("/api/invoices/1/template").await;
    let response = server.put("/api/invoices/1/template").text("not json").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["template"], true);
    assert_eq!(body["templateName"], "");
}

#[tokio::test]
async fn test_toggle_template_unknown_invoice() {
    let server = make_server();

    server
        .put("/api/invoices/7/template")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .put("/api/invoices/x/template")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// PDF
// =============================================================================

#[tokio::test]
async fn test_invoice_pdf_download() {
    let server = make_server();
    create_acme(&server).await;
    create_widget_invoice(&server, 1).await;

    let response = server.get("/api/invoices/1/pdf").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=invoice-INV-0001.pdf"
    );
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_invoice_pdf_errors() {
    let server = make_server();

    server
        .get("/api/invoices/1/pdf")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/invoices/one/pdf")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn test_customer_crud() {
    let server = make_server();
    create_acme(&server).await;

    let customer: Value = server.get("/api/customers/1").await.json();
    assert_eq!(customer["name"], "Acme");

    let response = server
        .put("/api/customers/1")
        .json(&json!({ "id": 99, "name": "Acme Ltd", "phone": "555-0100" }))
        .await;
    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Acme Ltd");
    assert_eq!(updated["phone"], "555-0100");
    // Whole-record replacement
    assert_eq!(updated["email"], "");

    let response = server.delete("/api/customers/1").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Customer deleted successfully");

    server
        .get("/api/customers/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let list: Vec<Value> = server.get("/api/customers").await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_customer_update_errors() {
    let server = make_server();

    server
        .put("/api/customers/5")
        .json(&json!({ "name": "Nobody" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .put("/api/customers/abc")
        .json(&json!({ "name": "Nobody" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    create_acme(&server).await;
    server
        .put("/api/customers/1")
        .text("{")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_update_does_not_touch_invoice_snapshot() {
    let server = make_server();
    create_acme(&server).await;
    create_widget_invoice(&server, 1).await;

    server
        .put("/api/customers/1")
        .json(&json!({ "name": "Renamed" }))
        .await
        .assert_status(StatusCode::OK);

    let invoice: Value = server.get("/api/invoices/1").await.json();
    assert_eq!(invoice["client"]["name"], "Acme");
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings_round_trip() {
    let defaults = Settings {
        company: CompanyInfo {
            name: "Default Co".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let server = server_with(InMemoryStore::new(), defaults);

    let settings: Value = server.get("/api/settings").await.json();
    assert_eq!(settings["company"]["name"], "Default Co");

    let response = server
        .post("/api/settings")
        .json(&json!({
            "company": { "name": "Studio Nine", "email": "hi@studio9.test" },
            "dataDirectory": ""
        }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");

    let settings: Value = server.get("/api/settings").await.json();
    assert_eq!(settings["company"]["name"], "Studio Nine");
    assert_eq!(settings["company"]["email"], "hi@studio9.test");
}

#[tokio::test]
async fn test_settings_malformed_json() {
    let server = make_server();

    server
        .post("/api/settings")
        .text("company=Acme")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_redirect_data_directory() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let server = server_with(JsonFileStorage::new(first.path()), Settings::default());

    server
        .post("/api/settings")
        .json(&json!({
            "company": { "name": "Moved Co" },
            "dataDirectory": second.path().to_str().unwrap()
        }))
        .await
        .assert_status(StatusCode::OK);
    create_widget_invoice(&server, 0).await;

    let reopened = Ledger::open(JsonFileStorage::new(second.path()), Settings::default());
    assert_eq!(reopened.invoices().len(), 1);
    assert_eq!(reopened.settings().company.name, "Moved Co");
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let server = server_with(JsonFileStorage::new(dir.path()), Settings::default());
        create_acme(&server).await;
        create_widget_invoice(&server, 1).await;
        create_widget_invoice(&server, 1).await;
        server.delete("/api/invoices/1").await;
    }
    assert!(dir.path().join("meta.json").exists());

    let server = server_with(JsonFileStorage::new(dir.path()), Settings::default());
    let invoices: Vec<Value> = server.get("/api/invoices").await.json();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["invoiceNum"], "INV-0002");

    let next = create_widget_invoice(&server, 1).await;
    assert_eq!(next["id"], 3);

    let customer = create_acme(&server).await;
    assert_eq!(customer["id"], 2);
}

#[tokio::test]
async fn test_storage_failure_is_a_500() {
    let server = server_with(FailingStore, Settings::default());

    let response = server
        .post("/api/customers")
        .json(&json!({ "name": "Acme" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");

    // The in-memory change is kept
    let list: Vec<Value> = server.get("/api/customers").await.json();
    assert_eq!(list.len(), 1);
}

// =============================================================================
// Static frontend
// =============================================================================

#[tokio::test]
async fn test_static_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Invoicer</h1>").unwrap();

    let router = ServerBuilder::new()
        .with_ledger(Ledger::open(InMemoryStore::new(), Settings::default()))
        .with_static_dir(dir.path())
        .build()
        .unwrap();
    let server = TestServer::new(router);

    let response = server.get("/index.html").await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains("Invoicer"));

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);

    server
        .get("/missing.js")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // API routes still win over the fallback
    server
        .get("/api/invoices")
        .await
        .assert_status(StatusCode::OK);
}
