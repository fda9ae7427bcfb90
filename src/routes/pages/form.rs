#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use log::error;
use poem::http::StatusCode;
use poem::web::{Data, Form, Redirect};
use poem::{handler, IntoResponse, Response};
use uuid::Uuid;

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;
use crate::utils::sink::FormSubmission;

// Where a processed submission sends the browser.
pub const FORM_SUCCESS_PATH: &str = "/form/success";

pub fn render_form(state: &SiteState) -> Result<String, Errors> {
    state.render("form.html", &state.context())
}

pub fn render_form_success(state: &SiteState) -> Result<String, Errors> {
    state.render("form_success.html", &state.context())
}

#[handler]
pub fn form_page(state: Data<&Arc<SiteState>>) -> Response {
    html_response(render_form(&state), StatusCode::OK)
}

#[handler]
pub fn form_success(state: Data<&Arc<SiteState>>) -> Response {
    html_response(render_form_success(&state), StatusCode::OK)
}

// ---------------------------------------------------------------------------
// submit_form:
// ---------------------------------------------------------------------------
/** Record the submission, wait out the configured processing delay and send
 * the browser to the success page.  The fields are not re-validated here;
 * the form marks them as required.
 */
#[handler]
pub async fn submit_form(state: Data<&Arc<SiteState>>, Form(submission): Form<FormSubmission>) -> Response {
    let id = Uuid::new_v4();
    if let Err(e) = state.sink.record(&id, &submission) {
        let err = Errors::SinkError(format!("submission {}: {}", id, e));
        error!("{}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
    }

    tokio::time::sleep(Duration::from_millis(state.config.form_delay_ms)).await;
    Redirect::see_other(FORM_SUCCESS_PATH).into_response()
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use poem::test::TestClient;
    use std::time::Instant;

    use crate::routes;
    use crate::routes::pages::tests::{body_text, client};
    use crate::utils::catalog::tests::config_for;
    use crate::utils::config::Config;
    use crate::utils::site::tests::test_state;
    use crate::utils::sink::tests::{FailingSink, MemorySink};

    const FIELDS: [(&str, &str); 3] = [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("message", "Hello & welcome"),
    ];

    #[tokio::test]
    async fn submission_is_recorded_once_then_redirected() {
        let sink = Arc::new(MemorySink::default());
        let cli = TestClient::new(routes::app(test_state(sink.clone())));

        let resp = cli.post("/form").form(&FIELDS).send().await;
        resp.assert_status(StatusCode::SEE_OTHER);
        resp.assert_header("location", FORM_SUCCESS_PATH);

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, FormSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello & welcome".to_string(),
        });
    }

    #[tokio::test]
    async fn redirect_waits_for_processing_delay() {
        let sink = Arc::new(MemorySink::default());
        let config = Config { form_delay_ms: 100, ..config_for("http://127.0.0.1:1/products".to_string()) };
        let state = Arc::new(SiteState::with_sink(config, sink.clone()).unwrap());
        let cli = TestClient::new(routes::app(state));

        let start = Instant::now();
        let resp = cli.post("/form").form(&FIELDS).send().await;
        let elapsed = start.elapsed();

        resp.assert_status(StatusCode::SEE_OTHER);
        resp.assert_header("location", FORM_SUCCESS_PATH);
        assert!(elapsed >= Duration::from_millis(100), "redirected after {:?}", elapsed);
        assert_eq!(sink.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_field_is_rejected_without_record() {
        let sink = Arc::new(MemorySink::default());
        let cli = TestClient::new(routes::app(test_state(sink.clone())));

        let resp = cli.post("/form").form(&[("name", "Ada"), ("email", "ada@example.com")]).send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_server_error() {
        let cli = TestClient::new(routes::app(test_state(Arc::new(FailingSink))));
        let resp = cli.post("/form").form(&FIELDS).send().await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn form_and_success_pages_render() {
        let cli = client();
        let resp = cli.get("/form").send().await;
        resp.assert_status_is_ok();
        let body = body_text(resp).await;
        for field in ["name=\"name\"", "name=\"email\"", "name=\"message\""] {
            assert!(body.contains(field));
        }
        assert!(body.contains("<form method=\"post\" action=\"/form\">"));

        let resp = cli.get(FORM_SUCCESS_PATH).send().await;
        resp.assert_status_is_ok();
        assert!(body_text(resp).await.contains("Message sent!"));
    }
}
