#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::info;

use crate::routes::pages::{about, api_demo, blog, counter, form, home};
use crate::utils::errors::Errors;
use crate::utils::records;
use crate::utils::site::SiteState;

const INDEX_FILE: &str = "index.html";

// ---------------------------------------------------------------------------
// export_site:
// ---------------------------------------------------------------------------
/** Pre-render every page that can be produced without the product catalog
 * into dir, one <route>/index.html per page.  The blog pages come from the
 * slug enumeration so each article gets exactly one file.  Returns the
 * files written.
 */
pub fn export_site(state: &SiteState, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(String, Result<String, Errors>)> = vec![
        (String::new(),             home::render_home(state)),
        ("about".to_string(),       about::render_about(state)),
        ("counter".to_string(),     counter::render_counter(state, counter::Counter::default())),
        ("form".to_string(),        form::render_form(state)),
        ("form/success".to_string(), form::render_form_success(state)),
        ("api-demo".to_string(),    api_demo::render_api_demo(state)),
    ];
    for slug in records::article_slugs() {
        let (rendered, _) = blog::render_blog(state, slug);
        pages.push((format!("blog/{}", slug), rendered));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (route, rendered) in pages {
        let html = rendered?;
        let page_dir = if route.is_empty() {dir.to_path_buf()} else {dir.join(&route)};
        fs::create_dir_all(&page_dir).map_err(|e| export_error(&page_dir, e))?;

        let file = page_dir.join(INDEX_FILE);
        fs::write(&file, html).map_err(|e| export_error(&file, e))?;
        info!("Exported /{} to {}", route, file.display());
        written.push(file);
    }

    Ok(written)
}

fn export_error(path: &Path, e: std::io::Error) -> anyhow::Error {
    anyhow!(Errors::ExportError(format!("{}: {}", path.display(), e)))
}
