//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The round trip in between belongs to a transport, which keeps this module
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateUser, UpdateUser, User};

/// Synchronous, stateless client for the user API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/users", self.base_url), input)
    }

    pub fn build_update_user(&self, id: u64, input: &UpdateUser) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, format!("{}/users/{id}", self.base_url), input)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode(response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response)
    }
}

fn json_request<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Any 2xx passes; everything else becomes `HttpStatus`, 404 included.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Company, Geo};

    fn client() -> UserClient {
        UserClient::new("http://localhost:3000")
    }

    fn draft() -> CreateUser {
        CreateUser {
            name: "Kurtis Weissnat".to_string(),
            username: "Elwyn.Skiles".to_string(),
            email: "Telly.Hoeger@billy.biz".to_string(),
            phone: "210.067.6132".to_string(),
            website: "elvis.io".to_string(),
            address: Address {
                street: "Rex Trail".to_string(),
                suite: "Suite 280".to_string(),
                city: "Howemouth".to_string(),
                zipcode: "58804-1099".to_string(),
                geo: Geo {
                    lat: "24.8918".to_string(),
                    lng: "21.8984".to_string(),
                },
            },
            company: Company {
                name: "Johns Group".to_string(),
                catch_phrase: "Configurable multimedia task-force".to_string(),
                bs: "generate enterprise e-tailers".to_string(),
            },
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_user_produces_correct_request() {
        let req = client().build_create_user(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Kurtis Weissnat");
        assert_eq!(body["address"]["geo"]["lat"], "24.8918");
        assert_eq!(body["company"]["catchPhrase"], "Configurable multimedia task-force");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_user_produces_correct_request() {
        let input = UpdateUser {
            website: Some("elvis.dev".to_string()),
            ..UpdateUser::default()
        };
        let req = client().build_update_user(8, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/users/8");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "website": "elvis.dev" }));
    }

    #[test]
    fn parse_list_users_success() {
        let response = HttpResponse::new(200, r#"[{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz"}]"#);
        let users = client().parse_list_users(response).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Leanne Graham");
    }

    #[test]
    fn parse_get_user_not_found_is_plain_http_status() {
        let response = HttpResponse::new(404, "{}");
        let err = client().parse_get_user(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn parse_create_user_accepts_201() {
        let mut echoed = serde_json::to_value(draft()).unwrap();
        echoed["id"] = serde_json::json!(11);
        let response = HttpResponse::new(201, echoed.to_string());
        let user = client().parse_create_user(response).unwrap();
        assert_eq!(user.id, Some(11));
        assert_eq!(user.to_draft(), draft());
    }

    #[test]
    fn parse_create_user_without_id() {
        let body = serde_json::to_string(&draft()).unwrap();
        let user = client().parse_create_user(HttpResponse::new(200, body)).unwrap();
        assert_eq!(user.id, None);
    }

    #[test]
    fn parse_create_user_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_create_user(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn parse_update_user_success() {
        let response = HttpResponse::new(200, r#"{"id":8,"website":"elvis.dev"}"#);
        let user = client().parse_update_user(response).unwrap();
        assert_eq!(user.id, Some(8));
        assert_eq!(user.website, "elvis.dev");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = UserClient::new("http://localhost:3000/");
        let req = client.build_list_users();
        assert_eq!(req.path, "http://localhost:3000/users");
    }

    #[test]
    fn parse_list_users_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_list_users(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_users_rejects_object_body() {
        let response = HttpResponse::new(200, r#"{"id":1}"#);
        let err = client().parse_list_users(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
