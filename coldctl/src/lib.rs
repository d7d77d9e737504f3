//! # coldctl: customer directory for a refrigeration service business
//!
//! `coldctl` is the backend of a small CRM: customer cards with logos,
//! attached file records and contact employees, served over a REST/JSON API.
//!
//! ## Overview
//!
//! The customer is the aggregate root. A customer card owns an optional
//! inline-encoded logo, a list of file records and a list of employees; all
//! of it lives and dies with the customer row. Clients supply every id, the
//! server generates none.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). The
//! **API layer** ([`api`]) exposes the CRUD surface under `/api/*`, with
//! OpenAPI docs at `/docs`. The **database layer** ([`db`]) puts one
//! [`db::CustomerStore`] trait in front of three interchangeable backends:
//! MySQL, PostgreSQL and an in-memory map used by tests and for development.
//! Backend choice and connection settings come from the [`config`] module.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use coldctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = coldctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     coldctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::db::CustomerStore;
use crate::openapi::ApiDoc;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{Router, routing::get};
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
    pub config: Config,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // A wildcard cannot be mixed into an origin list, it swallows the rest.
    let wildcard = config
        .cors
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard));

    let cors = if wildcard {
        CorsLayer::new().allow_origin(tower_http::cors::Any)
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        CorsLayer::new().allow_origin(origins)
    };

    Ok(cors
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}

/// Build the application router: the `/api` surface, a health probe,
/// OpenAPI docs, and the body-limit/CORS/tracing middleware stack.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;
    let max_body_size = state.config.max_body_size;

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api::routes())
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        // The default 2 MB limit is too small for inline logo uploads.
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the storage backend, ensures
///    the schema exists, and builds the router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles requests
/// 3. **Shutdown**: on the shutdown signal, the storage backend is closed
pub struct Application {
    router: Router,
    config: Config,
    store: Arc<dyn CustomerStore>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting with configuration: {:#?}", config);

        let store = db::connect(&config.database).await?;
        store.init_schema().await?;

        let state = AppState {
            store: store.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, store })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "API server listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing storage backend...");
        self.store.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::create_test_server;
    use serde_json::{Value, json};

    fn customer_body(id: &str, company: &str) -> Value {
        json!({
            "id": id,
            "companyName": company,
            "inn": "7701234567",
            "address": "Москва, ул. Холодильная, 12",
            "contact": "Иванов И.И.",
            "status": "Активен"
        })
    }

    #[test_log::test(tokio::test)]
    async fn customer_crud_round_trip() {
        let server = create_test_server().await;

        let create = server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;
        create.assert_status(axum::http::StatusCode::CREATED);
        create.assert_json(&json!({
            "id": "c-1",
            "companyName": "ООО Холод",
            "inn": "7701234567",
            "address": "Москва, ул. Холодильная, 12",
            "contact": "Иванов И.И.",
            "status": "Активен"
        }));

        let list = server.get("/api/customers").await;
        list.assert_status_ok();
        let customers: Vec<Value> = list.json();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0]["companyName"], "ООО Холод");

        let detail = server.get("/api/customers/c-1").await;
        detail.assert_status_ok();
        let card: Value = detail.json();
        assert_eq!(card["id"], "c-1");
        assert!(card["logo"].is_null());
        assert_eq!(card["files"], json!([]));
        assert_eq!(card["employees"], json!([]));

        let update = server
            .put("/api/customers/c-1")
            .json(&json!({
                "companyName": "ООО Холод Плюс",
                "inn": "7701234567",
                "status": "Приостановлен"
            }))
            .await;
        update.assert_status_ok();
        let updated: Value = update.json();
        assert_eq!(updated["companyName"], "ООО Холод Плюс");
        // Omitted optional fields come back as empty strings, not nulls.
        assert_eq!(updated["address"], "");
        assert_eq!(updated["contact"], "");

        let delete = server.delete("/api/customers/c-1").await;
        delete.assert_status(axum::http::StatusCode::NO_CONTENT);

        let missing = server.get("/api/customers/c-1").await;
        missing.assert_status_not_found();
        missing.assert_json(&json!({ "message": "Заказчик не найден." }));
    }

    #[test_log::test(tokio::test)]
    async fn create_without_required_fields_is_rejected() {
        let server = create_test_server().await;

        let response = server
            .post("/api/customers")
            .json(&json!({ "id": "c-1", "companyName": "", "inn": "", "status": "Активен" }))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "message": "Заполните обязательные поля.",
            "error": "companyName, inn"
        }));
    }

    #[test_log::test(tokio::test)]
    async fn duplicate_customer_id_returns_the_storage_envelope() {
        let server = create_test_server().await;

        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;
        let duplicate = server.post("/api/customers").json(&customer_body("c-1", "ООО Мороз")).await;

        duplicate.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = duplicate.json();
        assert_eq!(body["message"], "Не удалось создать заказчика.");
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[test_log::test(tokio::test)]
    async fn update_of_missing_customer_echoes_without_writing() {
        let server = create_test_server().await;

        let response = server
            .put("/api/customers/ghost")
            .json(&json!({ "companyName": "ООО Призрак", "inn": "7700000000", "status": "Активен" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], "ghost");

        // Nothing was created.
        let list = server.get("/api/customers").await;
        let customers: Vec<Value> = list.json();
        assert!(customers.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn logo_upload_appears_in_the_card() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;

        let logo = server
            .put("/api/customers/c-1/logo")
            .json(&json!({ "name": "logo.png", "data": "data:image/png;base64,AAAA" }))
            .await;
        logo.assert_status_ok();
        logo.assert_json(&json!({ "ok": true }));

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        assert_eq!(card["logo"]["name"], "logo.png");
        assert_eq!(card["logo"]["data"], "data:image/png;base64,AAAA");
    }

    #[test_log::test(tokio::test)]
    async fn file_batch_is_echoed_and_attached() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;

        let files = json!({
            "files": [
                { "id": "f-1", "name": "договор.pdf", "sizeKb": 240, "uploadedAt": "2026-08-20 10:00" },
                { "id": "f-2", "name": "акт.pdf", "sizeKb": 80, "uploadedAt": "2026-08-21 09:30" }
            ]
        });
        let response = server.post("/api/customers/c-1/files").json(&files).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.assert_json(&files["files"]);

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        let names: Vec<&str> = card["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        // Newest upload first.
        assert_eq!(names, vec!["акт.pdf", "договор.pdf"]);

        let delete = server.delete("/api/customers/c-1/files/f-1").await;
        delete.assert_status(axum::http::StatusCode::NO_CONTENT);

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        assert_eq!(card["files"].as_array().unwrap().len(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn failed_file_batch_leaves_nothing_behind() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;
        server
            .post("/api/customers/c-1/files")
            .json(&json!({ "files": [{ "id": "f-1", "name": "a.pdf", "sizeKb": 1, "uploadedAt": "2026-08-20" }] }))
            .await;

        // Second record collides with f-1, so the whole batch must roll back.
        let response = server
            .post("/api/customers/c-1/files")
            .json(&json!({ "files": [
                { "id": "f-2", "name": "b.pdf", "sizeKb": 1, "uploadedAt": "2026-08-21" },
                { "id": "f-1", "name": "c.pdf", "sizeKb": 1, "uploadedAt": "2026-08-22" }
            ] }))
            .await;
        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Не удалось добавить файлы.");

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        let ids: Vec<&str> = card["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["f-1"]);
    }

    #[test_log::test(tokio::test)]
    async fn employee_lifecycle() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;

        let create = server
            .post("/api/customers/c-1/employees")
            .json(&json!({
                "id": "e-1",
                "firstName": "Пётр",
                "lastName": "Сидоров",
                "phone": "+7 999 111-22-33"
            }))
            .await;
        create.assert_status(axum::http::StatusCode::CREATED);
        let created: Value = create.json();
        assert_eq!(created["lastName"], "Сидоров");
        assert_eq!(created["email"], "");

        let update = server
            .put("/api/customers/c-1/employees/e-1")
            .json(&json!({
                "firstName": "Пётр",
                "lastName": "Сидоров",
                "email": "sidorov@example.com"
            }))
            .await;
        update.assert_status_ok();
        let updated: Value = update.json();
        assert_eq!(updated["id"], "e-1");
        assert_eq!(updated["email"], "sidorov@example.com");
        // The rewrite dropped the phone that was not resent.
        assert_eq!(updated["phone"], "");

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        assert_eq!(card["employees"][0]["email"], "sidorov@example.com");

        let delete = server.delete("/api/customers/c-1/employees/e-1").await;
        delete.assert_status(axum::http::StatusCode::NO_CONTENT);

        let detail = server.get("/api/customers/c-1").await;
        let card: Value = detail.json();
        assert_eq!(card["employees"], json!([]));
    }

    #[test_log::test(tokio::test)]
    async fn employee_without_name_is_rejected() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;

        let response = server
            .post("/api/customers/c-1/employees")
            .json(&json!({ "id": "e-1", "firstName": "", "lastName": "Сидоров" }))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "message": "Заполните обязательные поля.",
            "error": "firstName"
        }));
    }

    #[test_log::test(tokio::test)]
    async fn deleting_a_customer_removes_its_card_entirely() {
        let server = create_test_server().await;
        server.post("/api/customers").json(&customer_body("c-1", "ООО Холод")).await;
        server
            .post("/api/customers/c-1/files")
            .json(&json!({ "files": [{ "id": "f-1", "name": "a.pdf", "sizeKb": 1, "uploadedAt": "2026-08-20" }] }))
            .await;
        server
            .post("/api/customers/c-1/employees")
            .json(&json!({ "id": "e-1", "firstName": "Пётр", "lastName": "Сидоров" }))
            .await;

        server.delete("/api/customers/c-1").await.assert_status(axum::http::StatusCode::NO_CONTENT);

        // Deleting again is still a 204: the operation is idempotent.
        server.delete("/api/customers/c-1").await.assert_status(axum::http::StatusCode::NO_CONTENT);

        server.get("/api/customers/c-1").await.assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn health_endpoint_answers() {
        let server = create_test_server().await;
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }
}
