#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};
use serde_json::Value;

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;

// ---------------------------------------------------------------------------
// render_products:
// ---------------------------------------------------------------------------
/** Render the listing exactly as received.  A catalog failure renders the
 * same page with an error banner in place of the grid.
 */
pub fn render_products(state: &SiteState, listing: &Result<Vec<Value>, Errors>)
-> (Result<String, Errors>, StatusCode) {
    let mut ctx = state.context();
    ctx.insert("limit", &state.catalog.limit());
    let status = match listing {
        Ok(entries) => {
            ctx.insert("products", entries);
            ctx.insert("catalog_error", &false);
            StatusCode::OK
        }
        Err(e) => {
            ctx.insert("products", &Vec::<Value>::new());
            ctx.insert("catalog_error", &e.to_string());
            StatusCode::BAD_GATEWAY
        }
    };
    (state.render("products.html", &ctx), status)
}

#[handler]
pub async fn products(state: Data<&Arc<SiteState>>) -> Response {
    let listing = state.catalog.list_products().await;
    let (rendered, status) = render_products(&state, &listing);
    html_response(rendered, status)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use poem::test::TestClient;
    use serde_json::json;

    use crate::routes;
    use crate::routes::pages::tests::{body_text, client};
    use crate::utils::catalog::tests::{config_for, start_upstream};
    use crate::utils::site::tests::test_state;
    use crate::utils::sink::LogSink;

    #[test]
    fn renders_one_entry_per_product() {
        let state = test_state(Arc::new(LogSink));
        for n in [0usize, 1, 4] {
            let listing: Vec<Value> = (0..n)
                .map(|i| json!({"id": i, "title": format!("Lamp {}", i), "price": 12.5,
                                "description": "Warm light", "category": "home",
                                "image": "lamp.png"}))
                .collect();
            let (rendered, status) = render_products(&state, &Ok(listing));
            assert_eq!(status, StatusCode::OK);
            let body = rendered.unwrap();
            assert_eq!(body.matches("<div class=\"product\">").count(), n);
            for i in 0..n {
                assert!(body.contains(&format!("<h3>Lamp {}</h3>", i)));
            }
        }
    }

    #[test]
    fn keeps_upstream_values_and_tolerates_missing_fields() {
        let state = test_state(Arc::new(LogSink));
        let listing = vec![
            json!({"title": "Backpack", "price": 109.95, "category": "men's clothing"}),
            json!({"id": 7}),
        ];
        let body = render_products(&state, &Ok(listing)).0.unwrap();
        assert_eq!(body.matches("<div class=\"product\">").count(), 2);
        assert!(body.contains("<h3>Backpack</h3>"));
        assert!(body.contains("<span class=\"price\">$109.95</span>"));
        assert!(body.contains("<span class=\"category\">men&#x27;s clothing</span>"));
    }

    #[tokio::test]
    async fn fetches_at_render_time() {
        let base = start_upstream().await;
        let state = SiteState::new(config_for(format!("{}/products", base))).unwrap();
        let cli = TestClient::new(routes::app(Arc::new(state)));

        let resp = cli.get("/products").send().await;
        resp.assert_status_is_ok();
        let body = body_text(resp).await;
        assert_eq!(body.matches("<div class=\"product\">").count(), 6);
        assert!(body.contains("<h3>Product 6</h3>"));
        assert!(body.contains("<p>Description of product 3</p>"));
    }

    #[tokio::test]
    async fn catalog_failure_renders_banner() {
        let resp = client().get("/products").send().await;
        resp.assert_status(StatusCode::BAD_GATEWAY);
        let body = body_text(resp).await;
        assert!(body.contains("The product catalog is unavailable."));
        assert!(!body.contains("<div class=\"product\">"));
    }
}
