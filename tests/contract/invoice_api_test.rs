// Contract tests for the invoice endpoints
//
// POST /api/invoices/preview and POST /api/invoices, run against the full
// route table with an in-memory ERP backend.

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use helpers::{authed, MockBackend, COMPANY_ID, USER_ID};

fn draft_body() -> Value {
    json!({
        "customerId": 12,
        "issueDate": "2026-03-01",
        "dueDate": "2026-03-31",
        "notes": "Livraison Kinshasa",
        "invoiceLines": [
            {"productId": 10, "quantity": 2, "unitPrice": 50, "discountRate": 0, "taxId": 1},
            {"productId": 11, "quantity": "3", "unitPrice": "10", "discountRate": "10", "taxId": "1"}
        ]
    })
}

#[actix_web::test]
async fn test_preview_returns_lines_and_totals() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices/preview"))
        .set_json(json!({"invoiceLines": draft_body()["invoiceLines"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["lines"][0]["netAmountExclTax"], json!(100.0));
    assert_eq!(body["lines"][1]["vatAmount"], json!(4.32));
    assert_eq!(body["totals"]["subtotalExclTax"], json!(127.0));
    assert_eq!(body["totals"]["totalVat"], json!(20.32));
    assert_eq!(body["totals"]["totalInclTax"], json!(147.32));

    assert_eq!(backend.tax_calls(), 1);
    assert_eq!(backend.product_calls(), 1);
}

#[actix_web::test]
async fn test_preview_with_client_tables_skips_backend() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices/preview"))
        .set_json(json!({
            "invoiceLines": [
                {"productId": 20, "quantity": 1, "unitPrice": 25, "taxId": 999},
                {"productId": 21, "quantity": 2, "taxId": 7}
            ],
            "taxRates": [{"id": 7, "code": "TVA16", "rate": 16}],
            "products": [{"id": 21, "name": "Ciment", "unitPrice": 50}]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["totals"]["subtotalExclTax"], json!(125.0));
    assert_eq!(body["totals"]["totalVat"], json!(16.0));
    assert_eq!(body["totals"]["totalInclTax"], json!(141.0));
    assert_eq!(body["lines"][0]["taxRate"], json!(0.0));

    assert_eq!(backend.tax_calls(), 0);
    assert_eq!(backend.product_calls(), 0);
}

#[actix_web::test]
async fn test_preview_drops_invalid_client_rates() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices/preview"))
        .set_json(json!({
            "invoiceLines": [
                {"productId": 20, "quantity": 1, "unitPrice": 100, "taxId": 7},
                {"productId": 20, "quantity": 1, "unitPrice": 100, "taxId": 8}
            ],
            "taxRates": [
                {"id": 7, "code": "HUGE", "rate": 150},
                {"id": 8, "code": "PRECISE", "rate": "7.12345"}
            ],
            "products": []
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["lines"][0]["taxRate"], json!(0.0));
    assert_eq!(body["lines"][1]["taxRate"], json!(0.0));
    assert_eq!(body["totals"]["totalVat"], json!(0.0));
    assert_eq!(body["totals"]["totalInclTax"], json!(200.0));
}

#[actix_web::test]
async fn test_preview_total_is_the_submitted_total() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let mut draft = draft_body();
    draft["invoiceLines"] = json!([
        {"productId": 10, "quantity": 2, "unitPrice": "", "taxId": 1},
        {"productId": 11, "quantity": "3", "discountRate": "10", "taxId": 1}
    ]);

    let req = authed(test::TestRequest::post().uri("/api/invoices/preview"))
        .set_json(json!({"invoiceLines": draft["invoiceLines"]}))
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(preview["totals"]["totalInclTax"], json!(147.32));

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (_, payload) = &backend.created()[0];
    assert_eq!(payload.total_amount_incl_tax, dec!(147.32));
    assert_eq!(
        preview["totals"]["totalInclTax"],
        serde_json::to_value(payload).unwrap()["totalAmountInclTax"]
    );
}

#[actix_web::test]
async fn test_preview_of_half_typed_form_succeeds() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend);

    let req = authed(test::TestRequest::post().uri("/api/invoices/preview"))
        .set_json(json!({"invoiceLines": [{"quantity": "3.", "unitPrice": "abc", "taxId": ""}, {}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["lines"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["totals"]["totalInclTax"], json!(0.0));
}

#[actix_web::test]
async fn test_preview_without_session_is_unauthorized() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({"invoiceLines": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(backend.tax_calls(), 0);
}

#[actix_web::test]
async fn test_create_invoice_submits_recomputed_payload() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(draft_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["invoiceNumber"], "FV-2026-0001");
    assert_eq!(body["status"], "DRAFT");

    let created = backend.created();
    assert_eq!(created.len(), 1);

    let (session, payload) = &created[0];
    assert_eq!(session.access_token.as_deref(), Some("test-token"));
    assert_eq!(payload.company_id, COMPANY_ID);
    assert_eq!(payload.created_by_id, USER_ID);
    assert_eq!(payload.customer_id, 12);
    assert_eq!(payload.currency, facturix::core::Currency::CDF);
    assert_eq!(payload.invoice_lines.len(), 2);
    assert_eq!(payload.invoice_lines[1].discount_amount, dec!(3));
    assert_eq!(payload.invoice_lines[1].description, "Sac vide");
    assert_eq!(payload.total_amount_excl_tax, dec!(127));
    assert_eq!(payload.total_vat, dec!(20.32));
    assert_eq!(payload.total_amount_incl_tax, dec!(147.32));
}

#[actix_web::test]
async fn test_create_invoice_fills_blank_price_from_catalog() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let mut body = draft_body();
    body["invoiceLines"] = json!([{"productId": 10, "quantity": 2, "unitPrice": "", "taxId": 1}]);

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (_, payload) = &backend.created()[0];
    assert_eq!(payload.invoice_lines[0].unit_price, dec!(50));
    assert_eq!(payload.total_amount_incl_tax, dec!(116));
}

#[actix_web::test]
async fn test_invalid_draft_never_reaches_backend() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(json!({
            "customerId": "",
            "issueDate": "2026-03-01",
            "invoiceLines": [{"productId": 10, "quantity": "abc", "unitPrice": 50, "taxId": 1}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(body["error"]["fields"][0]["field"], "customerId");
    assert_eq!(body["error"]["fields"][1]["field"], "invoiceLines[0].quantity");
    assert_eq!(body["error"]["fields"][1]["message"], "Quantity must be a number");

    assert_eq!(backend.tax_calls(), 0);
    assert_eq!(backend.product_calls(), 0);
    assert!(backend.created().is_empty());
}

#[actix_web::test]
async fn test_backend_rejection_is_relayed() {
    let backend = Arc::new(MockBackend::standard().failing_create(409, "Duplicate invoice number"));
    let app = init_app!(backend.clone());

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(draft_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .is_some_and(|message| message.contains("Duplicate invoice number")));
}

#[actix_web::test]
async fn test_backend_outage_is_bad_gateway() {
    let backend = Arc::new(MockBackend::standard().failing_create(503, "maintenance"));
    let app = init_app!(backend);

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .set_json(draft_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_malformed_json_uses_error_shape() {
    let backend = Arc::new(MockBackend::standard());
    let app = init_app!(backend);

    let req = authed(test::TestRequest::post().uri("/api/invoices"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}
