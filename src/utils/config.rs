#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use serde::Deserialize;
use std::{env, fs, path::Path};
use fs_mistrust::Mistrust;
use std::os::unix::fs::PermissionsExt;
use lazy_static::lazy_static;
use structopt::StructOpt;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

// Tutorial Utilities
use crate::utils::{tut_utils, errors::Errors};

use super::tut_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_TUT_ROOT_DIR     : &str = "TUTORIAL_ROOT_DIR";
const ENV_TUT_LOGS_DIR     : &str = "TUTORIAL_LOGS_DIR"; // set for log4rs.yml
const DEFAULT_ROOT_DIR     : &str = "~/.tutorial_server";
const CONFIG_DIR           : &str = "/config";
const LOGS_DIR             : &str = "/logs";
const CERTS_DIR            : &str = "/certs";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";    // relative to config dir
const TUT_CONFIG_FILE      : &str = "/tutorial.toml"; // relative to config dir
const CERT_FILE            : &str = "/cert.pem";      // relative to certs dir
const KEY_FILE             : &str = "/key.pem";       // relative to certs dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 3000;

// External product catalog.
const DEFAULT_CATALOG_URL          : &str = "https://fakestoreapi.com/products";
const DEFAULT_CATALOG_LIMIT        : u32  = 6;
const DEFAULT_CATALOG_TIMEOUT_SECS : u64  = 10;

// Artificial processing time of the form action.
const DEFAULT_FORM_DELAY_MS: u64 = 1000;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref TUT_ARGS: TutArgs = init_tut_args();
}

// Calculate the data directories BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref TUT_DIRS: TutDirs = init_tut_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// TutDirs:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct TutDirs {
    pub root_dir: String,
    pub config_dir: String,
    pub logs_dir: String,
    pub certs_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "tut_args", about = "Command line arguments for the tutorial server.")]
pub struct TutArgs {
    /// Specify the server's root data directory.
    ///
    /// This directory contains the configuration, log and certificate
    /// files the server uses during execution.
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Create the data directories and then exit.
    ///
    /// The data directories will be rooted at a root directory calculated
    /// using the following priority order:
    ///
    ///   1. If set, the value of the TUTORIAL_ROOT_DIR environment,
    ///
    ///   2. Otherwise, if set, the value of the --root_dir command line argument,
    ///
    ///   3. Otherwise, ~/.tutorial_server
    ///
    #[structopt(short, long)]
    pub create_dirs_only: bool,

    /// Render every page that doesn't depend on the product catalog into
    /// this directory and then exit.
    #[structopt(short, long)]
    pub export_dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

impl Parms {
    /// Where the configuration came from; empty config_file means defaults.
    pub fn config_source(&self) -> &str {
        if self.config_file.is_empty() { "built-in defaults" } else { &self.config_file }
    }
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub tut_args: &'static TutArgs,
    pub tut_dirs: &'static TutDirs,
}

impl RuntimeCtx {
    pub fn cert_file(&self) -> String {
        self.tut_dirs.certs_dir.clone() + CERT_FILE
    }

    pub fn key_file(&self) -> String {
        self.tut_dirs.certs_dir.clone() + KEY_FILE
    }
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    pub catalog_url: String,
    pub catalog_limit: u32,
    pub catalog_timeout_secs: u64,
    pub form_delay_ms: u64,
    pub tls: bool,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Tutorial Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            catalog_timeout_secs: DEFAULT_CATALOG_TIMEOUT_SECS,
            form_delay_ms: DEFAULT_FORM_DELAY_MS,
            tls: false,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_tut_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_tut_args() -> TutArgs {
    let args = TutArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// init_tut_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories. */
fn init_tut_dirs() -> TutDirs {
    // Initialize the mistrust object.
    let mistrust = get_mistrust();

    // Check that each path is absolute and is a directory with the
    // proper permission assign if it exists.  If it doesn't exist,
    // create it.
    let root_dir = get_root_dir();
    check_tut_dir(&root_dir, "root directory", &mistrust);

    let config_dir = root_dir.clone() + CONFIG_DIR;
    check_tut_dir(&config_dir, "config directory", &mistrust);

    let logs_dir = root_dir.clone() + LOGS_DIR;
    check_tut_dir(&logs_dir, "logs directory", &mistrust);

    let certs_dir = root_dir.clone() + CERTS_DIR;
    check_tut_dir(&certs_dir, "certs directory", &mistrust);

    // Package up and return the directories.
    TutDirs { root_dir, config_dir, logs_dir, certs_dir }
}

// ---------------------------------------------------------------------------
// check_tut_dir:
// ---------------------------------------------------------------------------
/** Check that the path is absolute and, if it exists, that is has the proper
 * permissions assigned.  If it doesn't exist, create it.  The mistrust package
 * creates directories with 0o700 permissions.
 *
 * Any failure results in a panic.
 */
fn check_tut_dir(dir: &String, msgname: &str, mistrust: &Mistrust) {
    // Get the path object.
    let path = Path::new(dir);
    if !path.is_absolute() {
        panic!("The {} path must be absolute: {}", msgname, dir);
    }
    if path.exists() {
        // Make sure the path represents a directory.
        if !path.is_dir() {
            panic!("The {} path must be a directory: {}", msgname, dir);
        }

        // Make sure the directory had rwx for owner only.
        let meta = path.metadata().unwrap_or_else(|_| panic!("Unable to read metadata for {}: {}", msgname, dir));
        let perm = meta.permissions().mode();
        if perm & 0o777 != 0o700 {
            panic!("The {} path must be have 0o700 permissions: {}", msgname, dir);
        }
    } else {
        // Create the directory with the correct permissions.
        if let Err(e) = mistrust.make_directory(path) {
            panic!("Make directory error for {:?}: {}", path, &e.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// get_mistrust:
// ---------------------------------------------------------------------------
/** Configure a new mistrust object for initial directory processing. */
fn get_mistrust() -> Mistrust {
    match Mistrust::builder()
        .ignore_prefix(get_absolute_path("~"))
        .trust_group(0)
        .build() {
            Ok(m) => m,
            Err(e) => {
                panic!("Mistrust configuration error: {}", &e.to_string());
            }
        }
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_TUT_ROOT_DIR).unwrap_or_else(
        |_| {
            match TUT_ARGS.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the configuration directory.  When no log4rs file
 * has been installed we fall back to an info level console logger so that a
 * freshly created root directory is usable.
 */
pub fn init_log() {
    let logconfig = init_log_config();
    if Path::new(&logconfig).exists() {
        export_logs_dir(&TUT_DIRS);
        if let Err(e) = log4rs::init_file(logconfig.clone(), Default::default()) {
            println!("{}", e);
            let s = format!("{}", Errors::Log4rsInitialization(logconfig));
            panic!("{}", s);
        }
        info!("Log4rs initialized using: {}, log files under {}", logconfig, TUT_DIRS.logs_dir);
    } else {
        if let Err(e) = init_console_log() {
            println!("{}", e);
            let s = format!("{}", Errors::Log4rsInitialization("<console>".to_string()));
            panic!("{}", s);
        }
        info!("Log4rs initialized with console defaults, {} not found.", logconfig);
    }
}

// ---------------------------------------------------------------------------
// init_console_log:
// ---------------------------------------------------------------------------
fn init_console_log() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// export_logs_dir:
// ---------------------------------------------------------------------------
/** Publish the logs directory so file appenders in log4rs.yml can name it as
 * $ENV{TUTORIAL_LOGS_DIR}.  Must run before log4rs reads its file.
 */
fn export_logs_dir(dirs: &TutDirs) {
    env::set_var(ENV_TUT_LOGS_DIR, &dirs.logs_dir);
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    TUT_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config data directory.  If the file doesn't exist the default values are
 * used.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from its data directory.
    let config_file = TUT_DIRS.config_dir.clone() + TUT_CONFIG_FILE;

    // Read the cofiguration file.
    let config_file_abs = tut_utils::get_absolute_path(&config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config = match parse_config(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
/** Parse toml text into a configuration; absent keys keep their defaults. */
pub fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx {parms, tut_args: &TUT_ARGS, tut_dirs: &TUT_DIRS}
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::env;

    use crate::utils::config::{export_logs_dir, parse_config, Config, Parms, TutDirs, ENV_TUT_LOGS_DIR};

    #[test]
    fn default_config() {
        let c = Config::new();
        assert_eq!(c.http_port, 3000);
        assert_eq!(c.catalog_limit, 6);
        assert_eq!(c.form_delay_ms, 1000);
        assert!(!c.tls);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let c = parse_config("http_port = 8080\nform_delay_ms = 0\n").unwrap();
        assert_eq!(c.http_port, 8080);
        assert_eq!(c.form_delay_ms, 0);
        assert_eq!(c.catalog_url, "https://fakestoreapi.com/products");
        assert_eq!(c.title, "Tutorial Server");
    }

    #[test]
    fn bad_config_is_rejected() {
        assert!(parse_config("http_port = \"not a port\"").is_err());
        assert!(parse_config("this is not toml").is_err());
    }

    #[test]
    fn logs_dir_is_published_for_log4rs() {
        let dirs = TutDirs {
            root_dir: "/srv/tut".to_string(),
            config_dir: "/srv/tut/config".to_string(),
            logs_dir: "/srv/tut/logs".to_string(),
            certs_dir: "/srv/tut/certs".to_string(),
        };
        export_logs_dir(&dirs);
        assert_eq!(env::var(ENV_TUT_LOGS_DIR).unwrap(), "/srv/tut/logs");
    }

    #[test]
    fn config_source_names_file_or_defaults() {
        let p = Parms { config_file: String::new(), config: Config::new() };
        assert_eq!(p.config_source(), "built-in defaults");
        let p = Parms { config_file: "/srv/tut/config/tutorial.toml".to_string(), config: Config::new() };
        assert_eq!(p.config_source(), "/srv/tut/config/tutorial.toml");
    }
}
