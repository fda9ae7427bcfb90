#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{ OpenApi, payload::Json, ApiResponse };
use serde_json::Value;

use crate::utils::errors::HttpError;
use crate::utils::site::SiteState;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct ListProductsApi;

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum TutResponse {
    #[oai(status = 200)]
    Http200(Json<Vec<Value>>),
    #[oai(status = 502)]
    Http502(Json<HttpError>),
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ListProductsApi {
    /// Relay the external catalog listing without transformation.
    #[oai(path = "/products", method = "get")]
    async fn list_products_api(&self, state: Data<&Arc<SiteState>>) -> TutResponse {
        match state.catalog.list_products().await {
            Ok(listing) => TutResponse::Http200(Json(listing)),
            Err(e) => TutResponse::Http502(Json(HttpError::new(e.to_string()))),
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poem::http::StatusCode;
    use poem::test::TestClient;

    use crate::routes;
    use crate::utils::catalog::tests::{config_for, start_upstream};
    use crate::utils::site::{tests::test_state, SiteState};
    use crate::utils::sink::LogSink;

    #[tokio::test]
    async fn relays_upstream_listing() {
        let base = start_upstream().await;
        let state = SiteState::new(config_for(format!("{}/products", base))).unwrap();
        let cli = TestClient::new(routes::app(Arc::new(state)));

        let resp = cli.get("/api/products").send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let list = json.value().array();
        list.assert_len(6);
        let first = list.get(0).object();
        first.get("id").assert_i64(1);
        first.get("title").assert_string("Product 1");
        first.get("image").assert_string("https://img.example.com/1.png");
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let cli = TestClient::new(routes::app(test_state(Arc::new(LogSink))));
        let resp = cli.get("/api/products").send().await;
        resp.assert_status(StatusCode::BAD_GATEWAY);
        let json = resp.json().await;
        let msg = json.value().object().get("error").string().to_string();
        assert!(msg.starts_with("Catalog service error"));
    }
}
