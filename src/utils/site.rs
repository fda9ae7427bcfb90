#![forbid(unsafe_code)]

use std::error::Error as StdError;
use std::sync::Arc;

use anyhow::Result;
use log::error;
use tera::{Context, Tera};

use crate::utils::catalog::CatalogClient;
use crate::utils::config::Config;
use crate::utils::errors::Errors;
use crate::utils::sink::{LogSink, SubmissionSink};

// Templates are compiled into the binary so that neither the server nor the
// exporter depends on the working directory.
const TEMPLATES: [(&str, &str); 10] = [
    ("base.html",            include_str!("../../templates/base.html")),
    ("home.html",            include_str!("../../templates/home.html")),
    ("about.html",           include_str!("../../templates/about.html")),
    ("counter.html",         include_str!("../../templates/counter.html")),
    ("products.html",        include_str!("../../templates/products.html")),
    ("blog.html",            include_str!("../../templates/blog.html")),
    ("blog_not_found.html",  include_str!("../../templates/blog_not_found.html")),
    ("form.html",            include_str!("../../templates/form.html")),
    ("form_success.html",    include_str!("../../templates/form_success.html")),
    ("api_demo.html",        include_str!("../../templates/api_demo.html")),
];

// ***************************************************************************
//                                Site State
// ***************************************************************************
/** Everything a request handler needs, shared read-only across requests. */
pub struct SiteState {
    pub config: Config,
    pub templates: Tera,
    pub catalog: CatalogClient,
    pub sink: Arc<dyn SubmissionSink>,
}

impl SiteState {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_sink(config, Arc::new(LogSink))
    }

    pub fn with_sink(config: Config, sink: Arc<dyn SubmissionSink>) -> Result<Self> {
        let templates = init_templates()?;
        let catalog = CatalogClient::new(&config)?;
        Ok(Self { config, templates, catalog, sink })
    }

    /// A context pre-populated with the values the base layout expects.
    pub fn context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site_title", &self.config.title);
        ctx
    }

    // ---------------------------------------------------------------------------
    // render:
    // ---------------------------------------------------------------------------
    pub fn render(&self, template: &str, ctx: &Context) -> Result<String, Errors> {
        self.templates.render(template, ctx).map_err(|e| {
            // Tera keeps the interesting part of the message in the source chain.
            let mut msg = e.to_string();
            let mut source = e.source();
            while let Some(s) = source {
                msg += ": ";
                msg += &s.to_string();
                source = s.source();
            }
            let err = Errors::RenderError(template.to_string(), msg);
            error!("{}", err);
            err
        })
    }
}

// ---------------------------------------------------------------------------
// init_templates:
// ---------------------------------------------------------------------------
/** Compile all page templates.  Templates named *.html are auto-escaped. */
pub fn init_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.to_vec())?;
    Ok(tera)
}
