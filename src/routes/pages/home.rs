#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Data;
use poem::{handler, Response};
use serde::Serialize;

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::site::SiteState;

// The examples advertised on the home page, in display order.
const EXAMPLES: [Example; 6] = [
    Example {href: "/about", icon: "📄", title: "1. About",
             description: "Simple routing with a static page"},
    Example {href: "/counter", icon: "🔢", title: "2. Interactive counter",
             description: "Local state carried from request to request"},
    Example {href: "/products", icon: "🛍️", title: "3. Product list",
             description: "Data fetched from a remote service at render time"},
    Example {href: "/blog/mon-premier-article", icon: "📝", title: "4. Blog (dynamic route)",
             description: "Dynamic routes with path parameters"},
    Example {href: "/form", icon: "📋", title: "5. Form",
             description: "Form handling with a server action"},
    Example {href: "/api-demo", icon: "🔌", title: "6. API routes demo",
             description: "Call the JSON endpoints interactively"},
];

#[derive(Serialize, Debug)]
struct Example {
    href: &'static str,
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

pub fn render_home(state: &SiteState) -> Result<String, Errors> {
    let mut ctx = state.context();
    ctx.insert("examples", &EXAMPLES);
    state.render("home.html", &ctx)
}

#[handler]
pub fn home(state: Data<&Arc<SiteState>>) -> Response {
    html_response(render_home(&state), StatusCode::OK)
}
