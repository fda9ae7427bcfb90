#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path, ApiResponse };
use log::debug;

use crate::utils::errors::HttpError;
use crate::utils::records::{self, User};
use crate::utils::tut_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetUsersApi;

struct ReqGetUser
{
    id: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetUser {
    type Req = ReqGetUser;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request path:");
        s.push_str("\n    id: ");
        s.push_str(&self.id);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum TutResponse {
    #[oai(status = 200)]
    Http200(Json<User>),
    #[oai(status = 404)]
    Http404(Json<HttpError>),
}

fn make_http_200(resp: User) -> TutResponse {
    TutResponse::Http200(Json(resp))
}
fn make_http_404() -> TutResponse {
    TutResponse::Http404(Json(HttpError::new("not found")))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetUsersApi {
    /// Look up one of the fixed users by id.
    #[oai(path = "/users/:id", method = "get")]
    async fn get_user_api(&self, http_req: &Request, id: Path<String>) -> TutResponse {
        // Package the request parameters.
        let req = ReqGetUser {id: id.0};
        tut_utils::debug_request(http_req, &req);

        // The id is matched as given; no format is enforced beforehand.
        match records::find_user(&req.id) {
            Some(u) => make_http_200(u.clone()),
            None => {
                debug!("User '{}' not found.", req.id);
                make_http_404()
            }
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;

    use crate::routes;
    use crate::utils::site::tests::test_state;
    use crate::utils::sink::LogSink;

    fn client() -> TestClient<poem::endpoint::BoxEndpoint<'static>> {
        TestClient::new(routes::app(test_state(Arc::new(LogSink))))
    }

    #[tokio::test]
    async fn known_ids_return_records() {
        let cli = client();
        let expected = [
            json!({"id": 1, "name": "Alice", "email": "alice@example.com"}),
            json!({"id": 2, "name": "Bob", "email": "bob@example.com"}),
            json!({"id": 3, "name": "Charlie", "email": "charlie@example.com"}),
        ];
        for (i, user) in expected.into_iter().enumerate() {
            let resp = cli.get(format!("/api/users/{}", i + 1)).send().await;
            resp.assert_status_is_ok();
            resp.assert_json(user).await;
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let cli = client();
        for id in ["0", "4", "999", "abc", "x2"] {
            let resp = cli.get(format!("/api/users/{}", id)).send().await;
            resp.assert_status(StatusCode::NOT_FOUND);
            resp.assert_json(json!({"error": "not found"})).await;
        }
    }

    #[tokio::test]
    async fn leading_integer_ids_resolve() {
        let cli = client();
        let cases = [
            ("2.0", json!({"id": 2, "name": "Bob", "email": "bob@example.com"})),
            ("1abc", json!({"id": 1, "name": "Alice", "email": "alice@example.com"})),
        ];
        for (id, user) in cases {
            let resp = cli.get(format!("/api/users/{}", id)).send().await;
            resp.assert_status_is_ok();
            resp.assert_json(user).await;
        }
    }
}
