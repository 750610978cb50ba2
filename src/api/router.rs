//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All routes sit at the root, CORS is wide open for the browser UI, and
//! the body limit matches the documented 10 MB upload ceiling.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config::MAX_UPLOAD_BYTES;

pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/scan", post(endpoints::scan::scan))
        .route("/save", post(endpoints::records::save))
        .route("/records", get(endpoints::records::list))
        .route("/sheet_url", get(endpoints::records::sheet_url))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::pipeline::extraction::MockOcrEngine;
    use crate::storage::MemoryStore;

    const BOUNDARY: &str = "medscan-test-boundary";

    fn unconfigured_ctx() -> ApiContext {
        ApiContext::new(None, None, None)
    }

    fn ctx_with_ocr(text: &str) -> ApiContext {
        ApiContext::new(
            Some(Arc::new(MockOcrEngine::new(text))),
            Some(Arc::new(MemoryStore::new())),
            Some("https://docs.google.com/spreadsheets/d/test/edit".into()),
        )
    }

    fn multipart_body(files: &[(&str, &[u8])]) -> Body {
        let mut body = Vec::new();
        for (filename, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"images\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn multipart_request(uri: &str, files: &[(&str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(files))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_configuration() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["ocr_configured"], true);
        assert_eq!(json["storage_configured"], true);
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_without_ocr_key_returns_503() {
        let app = api_router(unconfigured_ctx());
        let req = multipart_request("/scan", &[("a.jpg", b"bytes")]);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn scan_without_files_returns_400() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = multipart_request("/scan", &[]);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scan_printed_report_returns_structured_data() {
        let text = "Patient Name: John Doe\nAge: 45 Years Gender: Male\n\
                    Blood Pressure: 150/95 mmHg\nFasting Blood Sugar: 130 mg/dL";
        let app = api_router(ctx_with_ocr(text));

        let req = multipart_request("/scan", &[("report.jpg", b"fake image bytes")]);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["filename"], "report.jpg");
        assert_eq!(results[0]["success"], true);
        assert_eq!(results[0]["mode"], "printed");
        assert_eq!(results[0]["data"]["Patient Name"], "John Doe");
        assert_eq!(results[0]["data"]["Systolic BP"], "150");
        assert_eq!(results[0]["data"]["BP Status"], "High");
    }

    #[tokio::test]
    async fn scan_empty_file_yields_per_file_failure() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = multipart_request("/scan", &[("empty.jpg", b"")]);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results[0]["success"], false);
        assert_eq!(results[0]["error"], "Empty file");
    }

    #[tokio::test]
    async fn scan_processes_every_file_in_batch() {
        let app = api_router(ctx_with_ocr("Patient Name: A B\nAge: 30"));
        let req = multipart_request(
            "/scan",
            &[("one.jpg", b"x"), ("two.png", b""), ("three.jpg", b"y")],
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["success"], true);
        assert_eq!(results[1]["success"], false);
        assert_eq!(results[2]["success"], true);
    }

    #[tokio::test]
    async fn scan_with_only_unnamed_parts_returns_empty_results() {
        // Parts without a filename are skipped; the 400 is reserved for a
        // request that never sent the images field at all.
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = multipart_request("/scan", &[("", b"bytes"), ("", b"more")]);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["results"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn save_rejects_empty_rows() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = json_request("POST", "/save", r#"{"rows": []}"#);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["message"], "No data");
    }

    #[tokio::test]
    async fn save_without_store_returns_503() {
        let app = api_router(unconfigured_ctx());
        let req = json_request("POST", "/save", r#"{"rows": [{"Patient Name": "A"}]}"#);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn save_appends_and_reports_totals() {
        let ctx = ctx_with_ocr("irrelevant");
        let app = api_router(ctx.clone());
        let req = json_request(
            "POST",
            "/save",
            r#"{"rows": [{"Patient Name": "A"}, {"Patient Name": "B"}]}"#,
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["saved"], 2);
        assert_eq!(json["total"], 2);

        // Saved rows are visible through /records
        let app = api_router(ctx);
        let req = Request::builder()
            .uri("/records")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["Patient Name"], "A");
    }

    #[tokio::test]
    async fn save_normalizes_rows_to_sheet_schema() {
        let ctx = ctx_with_ocr("irrelevant");
        let app = api_router(ctx.clone());
        // A reviewed vitals row: extra keys the sheet has no columns for,
        // plus most columns missing entirely.
        let req = json_request(
            "POST",
            "/save",
            r#"{"rows": [{"Patient Name": "John Doe", "Systolic BP": "150",
                          "Pulse / PR (bpm)": "72", "Notes": "stable"}]}"#,
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let app = api_router(ctx);
        let req = Request::builder()
            .uri("/records")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        let row = json[0].as_object().unwrap();
        assert_eq!(row.len(), crate::models::SHEET_COLUMNS.len());
        assert!(row.get("Notes").is_none());
        assert!(row.get("Pulse / PR (bpm)").is_none());
        assert_eq!(row["Systolic BP"], "150");
        assert_eq!(row["Fasting Sugar (mg/dL)"], "");
    }

    #[tokio::test]
    async fn save_rejects_non_object_rows() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = json_request("POST", "/save", r#"{"rows": [["John", "150"]]}"#);
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["message"], "Rows must be objects");
    }

    #[tokio::test]
    async fn records_empty_when_store_unconfigured() {
        let app = api_router(unconfigured_ctx());
        let req = Request::builder()
            .uri("/records")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn sheet_url_reflects_configuration() {
        let app = api_router(ctx_with_ocr("irrelevant"));
        let req = Request::builder()
            .uri("/sheet_url")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["url"], "https://docs.google.com/spreadsheets/d/test/edit");

        let app = api_router(unconfigured_ctx());
        let req = Request::builder()
            .uri("/sheet_url")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["url"], "");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = api_router(unconfigured_ctx());
        let req = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
