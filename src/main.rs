#![forbid(unsafe_code)]

use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{error, info};
use poem::listener::{Listener, RustlsCertificate, RustlsConfig, TcpListener};

// Tutorial Utilities
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;
use crate::utils::export::export_site;
use crate::utils::site::SiteState;
use crate::utils::tut_utils::get_absolute_path;

// Modules
mod routes;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "TutorialServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting tutorial_server!");

    // Initialize the server.
    tut_init();

    // The data directories now exist.
    if RUNTIME_CTX.tut_args.create_dirs_only {
        info!("Data directories created under {}.", RUNTIME_CTX.tut_dirs.root_dir);
        return Ok(());
    }

    // Compile templates and create the catalog client.
    let config = RUNTIME_CTX.parms.config.clone();
    let state = match SiteState::new(config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Unable to initialize the site: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // Pre-render instead of serving when asked to.
    if let Some(dir) = &RUNTIME_CTX.tut_args.export_dir {
        let dir = get_absolute_path(dir);
        return match export_site(&state, Path::new(&dir)) {
            Ok(files) => {
                info!("Exported {} pages to {}.", files.len(), dir);
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                Err(std::io::Error::other(e.to_string()))
            }
        };
    }

    // --------------- Main Loop Set Up ---------------
    let app = routes::app(state);
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    info!("Listening on {} (tls={}).", addr, RUNTIME_CTX.parms.config.tls);

    // ------------------ Main Loop -------------------
    if RUNTIME_CTX.parms.config.tls {
        poem::Server::new(
            TcpListener::bind(addr).rustls(
                RustlsConfig::new().fallback(
                    RustlsCertificate::new()
                        .key(std::fs::read(RUNTIME_CTX.key_file())?)
                        .cert(std::fs::read(RUNTIME_CTX.cert_file())?),
                ),
            ),
        )
        .name(SERVER_NAME)
        .run(app)
        .await
    } else {
        poem::Server::new(TcpListener::bind(addr))
            .name(SERVER_NAME)
            .run(app)
            .await
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// tut_init:
// ---------------------------------------------------------------------------
/** Initialize logging and read the configuration.  Either failing aborts the
 * process.
 */
fn tut_init() {
    // Configure out log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));
    info!("Configuration read from {}.", RUNTIME_CTX.parms.config_source());

    // Log build info.
    print_version_info();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("\n*** Running TUTORIAL_SERVER={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}.",
          option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
          env!("GIT_BRANCH"),
          env!("GIT_COMMIT_SHORT"),
          env!("GIT_DIRTY"),
          env!("SOURCE_TIMESTAMP"),
          env!("RUSTC_VERSION"));
}
