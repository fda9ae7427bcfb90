#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;

pub fn render_about(state: &SiteState) -> Result<String, Errors> {
    state.render("about.html", &state.context())
}

#[handler]
pub fn about(state: Data<&Arc<SiteState>>) -> Response {
    html_response(render_about(&state), StatusCode::OK)
}
