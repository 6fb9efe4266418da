//! Domain DTOs for the user API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! Every leaf field is a `String`, coordinates included. Leaf fields default
//! to the empty string when a response omits them, so a record with missing
//! fields still decodes and shows up as blank values. A field carrying the
//! wrong JSON type is still a decode failure.

use serde::{Deserialize, Serialize};

/// A user record returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Assigned by the server. Absent on records that were never created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

/// Coordinates, kept as the strings the server sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

/// Request payload for creating a user: every field of [`User`] except `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

/// Request payload for updating a user. Only the fields present in the JSON
/// are sent; nested records are replaced whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl User {
    /// The record without its id, e.g. to seed an edit form.
    pub fn to_draft(&self) -> CreateUser {
        CreateUser {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            address: self.address.clone(),
            company: self.company.clone(),
        }
    }
}

impl CreateUser {
    pub fn into_user(self, id: Option<u64>) -> User {
        User {
            id,
            name: self.name,
            username: self.username,
            email: self.email,
            phone: self.phone,
            website: self.website,
            address: self.address,
            company: self.company,
        }
    }
}

impl UpdateUser {
    /// Overwrite the fields of `user` that this patch carries.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(username) = &self.username {
            user.username.clone_from(username);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        if let Some(phone) = &self.phone {
            user.phone.clone_from(phone);
        }
        if let Some(website) = &self.website {
            user.website.clone_from(website);
        }
        if let Some(address) = &self.address {
            user.address = address.clone();
        }
        if let Some(company) = &self.company {
            user.company = company.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A full overwrite: every field present.
impl From<CreateUser> for UpdateUser {
    fn from(draft: CreateUser) -> Self {
        Self {
            name: Some(draft.name),
            username: Some(draft.username),
            email: Some(draft.email),
            phone: Some(draft.phone),
            website: Some(draft.website),
            address: Some(draft.address),
            company: Some(draft.company),
        }
    }
}
