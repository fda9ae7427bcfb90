#![forbid(unsafe_code)]

use poem::http::StatusCode;
use poem::web::Html;
use poem::{IntoResponse, Response};

use crate::utils::errors::Errors;

pub mod about;
pub mod api_demo;
pub mod blog;
pub mod counter;
pub mod form;
pub mod home;
pub mod products;

// ---------------------------------------------------------------------------
// html_response:
// ---------------------------------------------------------------------------
/** Turn a render result into a response.  Render errors were already logged
 * by SiteState::render and surface as a plain text 500.
 */
pub fn html_response(rendered: Result<String, Errors>, status: StatusCode) -> Response {
    match rendered {
        Ok(html) => Html(html).with_status(status).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use poem::endpoint::BoxEndpoint;
    use poem::test::{TestClient, TestResponse};

    use crate::routes;
    use crate::utils::site::tests::test_state;
    use crate::utils::sink::LogSink;

    pub(crate) fn client() -> TestClient<BoxEndpoint<'static>> {
        TestClient::new(routes::app(test_state(Arc::new(LogSink))))
    }

    pub(crate) async fn body_text(resp: TestResponse) -> String {
        resp.0.into_body().into_string().await.unwrap()
    }
}
