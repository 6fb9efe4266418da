use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::{error, info};

const FIXTURE: &str = include_str!("../fixtures/users.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// Seeded users, keyed by id. Writes are echoed back but never stored.
pub type Db = Arc<BTreeMap<u64, User>>;

/// The users embedded in `fixtures/users.json`.
pub fn fixture_users() -> Vec<User> {
    serde_json::from_str(FIXTURE).unwrap_or_else(|error| {
        error!(%error, "embedded user fixture is invalid");
        Vec::new()
    })
}

pub fn app() -> Router {
    app_with(fixture_users())
}

pub fn app_with(users: Vec<User>) -> Router {
    let db: Db = Arc::new(users.into_iter().map(|user| (user.id, user)).collect());
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    info!(count = db.len(), "list users");
    Json(db.values().cloned().collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    info!(id, "get user");
    db.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Echo the posted object with the next free id, like the public service does.
async fn create_user(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let id = db.keys().next_back().map_or(1, |last| last + 1);
    info!(id, "create user");
    let body = with_id(input, id)?;
    Ok((StatusCode::CREATED, Json(body)))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    info!(id, "update user");
    if !db.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    with_id(input, id).map(Json)
}

fn with_id(input: Value, id: u64) -> Result<Value, StatusCode> {
    let mut object: Map<String, Value> = match input {
        Value::Object(object) => object,
        _ => return Err(StatusCode::UNPROCESSABLE_ENTITY),
    };
    object.insert("id".to_string(), Value::from(id));
    Ok(Value::Object(object))
}
