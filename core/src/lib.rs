//! Async API client core for the user directory service.
//!
//! # Overview
//! Lists, fetches, creates and updates user records against a REST service
//! and exposes each operation as an observable unit a view can bind to.
//!
//! # Design
//! - `UserClient` is stateless: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. It never touches the network.
//! - A `Transport` executes the round trip. `ReqwestTransport` does real HTTP;
//!   `mock::MockTransport` scripts responses for tests.
//! - `UserService` glues the two together behind async methods and reports
//!   failures as `ApiError`.
//! - The `units` wrap `UserService` calls with `loading` / `error` /
//!   `success` state and collapse every failure into one `UnitError` per
//!   operation.
//! - `search` and `form` hold the view-side logic: filtering a fetched list
//!   and editing a draft with typed field updates.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod mock;
pub mod search;
pub mod service;
pub mod transport;
pub mod types;
pub mod units;

pub use client::UserClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use form::{
    AddressField, AddressFieldUpdate, CompanyField, CompanyFieldUpdate, FieldUpdate, FormError, GeoField,
    GeoFieldUpdate, UserField, UserFieldUpdate, UserForm,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use search::filter_users;
pub use service::UserService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Address, Company, CreateUser, Geo, UpdateUser, User};
pub use units::{
    CreateUserUnit, MutationState, TriggerHandle, UnitError, UpdateUserUnit, UserState, UserUnit, UsersState,
    UsersUnit,
};
