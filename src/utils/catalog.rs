#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::Result;
use log::{debug, error};
use serde_json::Value;

use crate::utils::config::Config;
use crate::utils::errors::Errors;

// ***************************************************************************
//                              Catalog Client
// ***************************************************************************
/** Client for the external product catalog.  The catalog is opaque to us: we
 * ask for a bounded number of products and hand back whatever array of JSON
 * objects the service returns.
 */
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
    limit: u32,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.catalog_timeout_secs))
            .build()?;
        Ok(Self { client, url: config.catalog_url.clone(), limit: config.catalog_limit })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    // ---------------------------------------------------------------------------
    // list_products:
    // ---------------------------------------------------------------------------
    /** Issue the single fixed query to the catalog.  Transport failures,
     * non-success statuses and bodies that are not JSON arrays all become
     * CatalogError; nothing is retried.
     */
    pub async fn list_products(&self) -> Result<Vec<Value>, Errors> {
        debug!("Querying catalog {} with limit {}.", self.url, self.limit);
        let resp = self.client
            .get(&self.url)
            .query(&[("limit", self.limit)])
            .send()
            .await
            .map_err(|e| catalog_error(&self.url, e))?;

        let resp = resp.error_for_status().map_err(|e| catalog_error(&self.url, e))?;
        resp.json::<Vec<Value>>().await.map_err(|e| catalog_error(&self.url, e))
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
fn catalog_error(url: &str, e: reqwest::Error) -> Errors {
    let err = Errors::CatalogError(format!("{}: {}", url, e));
    error!("{}", err);
    err
}
