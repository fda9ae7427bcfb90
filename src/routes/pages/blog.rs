#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::{Data, Path};
use poem::{handler, Response};
use log::debug;

use crate::routes::pages::html_response;
use crate::utils::errors::Errors;
use crate::utils::records::{self, Article};
use crate::utils::site::SiteState;

// ***************************************************************************
//                               Blog Lookup
// ***************************************************************************
/** Result of resolving a slug: the article or the slug nobody knows. */
#[derive(Debug, PartialEq, Eq)]
pub enum BlogLookup<'a> {
    Found(&'static Article),
    NotFound(&'a str),
}

pub fn lookup(slug: &str) -> BlogLookup<'_> {
    match records::find_article(slug) {
        Some(article) => BlogLookup::Found(article),
        None => BlogLookup::NotFound(slug),
    }
}

// ---------------------------------------------------------------------------
// render_blog:
// ---------------------------------------------------------------------------
/** Render the page for a slug together with the status it should be served
 * with.  A found article also lists every article for navigation.
 */
pub fn render_blog(state: &SiteState, slug: &str) -> (Result<String, Errors>, StatusCode) {
    let mut ctx = state.context();
    ctx.insert("slug", slug);
    match lookup(slug) {
        BlogLookup::Found(article) => {
            ctx.insert("article", article);
            ctx.insert("articles", records::all_articles());
            (state.render("blog.html", &ctx), StatusCode::OK)
        }
        BlogLookup::NotFound(slug) => {
            debug!("Article '{}' not found.", slug);
            (state.render("blog_not_found.html", &ctx), StatusCode::NOT_FOUND)
        }
    }
}

#[handler]
pub fn blog_post(state: Data<&Arc<SiteState>>, Path(slug): Path<String>) -> Response {
    let (rendered, status) = render_blog(&state, &slug);
    html_response(rendered, status)
}
