#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;

pub fn render_api_demo(state: &SiteState) -> Result<String, Errors> {
    state.render("api_demo.html", &state.context())
}

#[handler]
pub fn api_demo(state: Data<&Arc<SiteState>>) -> Response {
    html_response(render_api_demo(&state), StatusCode::OK)
}
