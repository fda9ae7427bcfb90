#![forbid(unsafe_code)]

use poem_openapi::OpenApiService;

use crate::routes::api::hello::HelloApi;
use crate::routes::api::products_list::ListProductsApi;
use crate::routes::api::users_get::GetUsersApi;

pub mod hello;
pub mod products_list;
pub mod users_get;

// From cargo.toml.
const TUT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub type TutApis = (HelloApi, GetUsersApi, ListProductsApi);

// ---------------------------------------------------------------------------
// api_service:
// ---------------------------------------------------------------------------
/** Collect every JSON endpoint into one OpenAPI service. */
pub fn api_service(title: &str, server_url: &str) -> OpenApiService<TutApis, ()> {
    let endpoints = (HelloApi, GetUsersApi, ListProductsApi);
    OpenApiService::new(endpoints, title, TUT_VERSION).server(server_url)
}
