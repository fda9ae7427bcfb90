#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object };
use serde_json::Value;

use crate::utils::tut_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct HelloApi;

#[derive(Object, Debug)]
struct RespHello
{
    message: String,
    timestamp: String,
    data: HelloData,
}

#[derive(Object, Debug)]
struct HelloData
{
    framework: String,
    version: String,
    feature: String,
}

struct ReqEcho<'a>
{
    body: &'a Value,
}

#[derive(Object, Debug)]
struct RespEcho
{
    message: String,
    #[oai(rename = "receivedData")]
    received_data: Value,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqEcho<'_> {
    type Req = Value;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:\n    ");
        s.push_str(&self.body.to_string());
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HelloApi {
    /// Fixed greeting stamped with the current time.
    #[oai(path = "/hello", method = "get")]
    async fn get_hello(&self) -> Json<RespHello> {
        Json(RespHello::process())
    }

    /// Echo an arbitrary JSON body back under `receivedData`.
    #[oai(path = "/hello", method = "post")]
    async fn post_hello(&self, http_req: &Request, body: Json<Value>) -> Json<RespEcho> {
        let req = ReqEcho {body: &body.0};
        tut_utils::debug_request(http_req, &req);
        Json(RespEcho::new(body.0))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespHello {
    fn process() -> Self {
        Self {
            message: "Hello from the tutorial API!".to_string(),
            timestamp: tut_utils::timestamp_str(),
            data: HelloData {
                framework: "poem".to_string(),
                version: "3".to_string(),
                feature: "API routes".to_string(),
            },
        }
    }
}

impl RespEcho {
    fn new(received_data: Value) -> Self {
        Self {message: "Data received!".to_string(), received_data}
    }
}
