#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::endpoint::BoxEndpoint;
use poem::{get, EndpointExt, Route};

use crate::routes::pages::{about, api_demo, blog, counter, form, home, products};
use crate::utils::site::SiteState;

pub mod api;
pub mod pages;

// ***************************************************************************
//                                Constants
// ***************************************************************************
pub const API_PREFIX: &str = "/api";

// ---------------------------------------------------------------------------
// app:
// ---------------------------------------------------------------------------
/** Assemble the pages, the JSON API and its documentation into one endpoint
 * that shares the site state with every handler.
 */
pub fn app(state: Arc<SiteState>) -> BoxEndpoint<'static> {
    // Assign base URL advertised in the OpenAPI document.
    let api_url = format!("{}:{}{}",
        state.config.http_addr,
        state.config.http_port,
        API_PREFIX);
    let api_service = api::api_service(&state.config.title, &api_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .at("/", get(home::home))
        .at("/about", get(about::about))
        .at("/counter", get(counter::counter))
        .at("/products", get(products::products))
        .at("/blog/:slug", get(blog::blog_post))
        .at("/form", get(form::form_page).post(form::submit_form))
        .at(form::FORM_SUCCESS_PATH, get(form::form_success))
        .at("/api-demo", get(api_demo::api_demo))
        .nest(API_PREFIX, api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .data(state)
        .boxed()
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use crate::routes::pages::tests::{body_text, client};

    #[tokio::test]
    async fn openapi_document_lists_endpoints() {
        let resp = client().get("/spec").send().await;
        resp.assert_status_is_ok();
        let body = body_text(resp).await;
        for path in ["/hello", "/users/{id}", "/products"] {
            assert!(body.contains(path), "missing {}", path);
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let resp = client().get("/nowhere").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_demo_page_renders() {
        let resp = client().get("/api-demo").send().await;
        resp.assert_status_is_ok();
        let body = body_text(resp).await;
        assert!(body.contains("GET /api/users/:id"));
    }
}
