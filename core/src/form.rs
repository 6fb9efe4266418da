//! Add/edit form state with typed field updates.
//!
//! # Design
//! Each editable leaf of a user record has its own enum variant, and
//! updates are applied by exhaustive match. Input names coming from a view
//! (`"address.geo.lat"`) go through [`FieldUpdate::parse`], which rejects
//! unknown paths instead of ignoring them.

use thiserror::Error;

use crate::types::{Address, Company, CreateUser, Geo, UpdateUser, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Username,
    Email,
    Phone,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Street,
    Suite,
    City,
    Zipcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoField {
    Lat,
    Lng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    CatchPhrase,
    Bs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFieldUpdate {
    pub field: UserField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFieldUpdate {
    pub field: AddressField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoFieldUpdate {
    pub field: GeoField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyFieldUpdate {
    pub field: CompanyField,
    pub value: String,
}

/// One edit to one leaf of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    User(UserFieldUpdate),
    Address(AddressFieldUpdate),
    Geo(GeoFieldUpdate),
    Company(CompanyFieldUpdate),
}

impl FieldUpdate {
    /// Map a form input name to a typed update.
    pub fn parse(path: &str, value: impl Into<String>) -> Result<Self, FormError> {
        let value = value.into();
        let update = match path {
            "name" => Self::User(UserFieldUpdate { field: UserField::Name, value }),
            "username" => Self::User(UserFieldUpdate { field: UserField::Username, value }),
            "email" => Self::User(UserFieldUpdate { field: UserField::Email, value }),
            "phone" => Self::User(UserFieldUpdate { field: UserField::Phone, value }),
            "website" => Self::User(UserFieldUpdate { field: UserField::Website, value }),
            "address.street" => Self::Address(AddressFieldUpdate { field: AddressField::Street, value }),
            "address.suite" => Self::Address(AddressFieldUpdate { field: AddressField::Suite, value }),
            "address.city" => Self::Address(AddressFieldUpdate { field: AddressField::City, value }),
            "address.zipcode" => Self::Address(AddressFieldUpdate { field: AddressField::Zipcode, value }),
            "address.geo.lat" => Self::Geo(GeoFieldUpdate { field: GeoField::Lat, value }),
            "address.geo.lng" => Self::Geo(GeoFieldUpdate { field: GeoField::Lng, value }),
            "company.name" => Self::Company(CompanyFieldUpdate { field: CompanyField::Name, value }),
            "company.catchPhrase" => Self::Company(CompanyFieldUpdate { field: CompanyField::CatchPhrase, value }),
            "company.bs" => Self::Company(CompanyFieldUpdate { field: CompanyField::Bs, value }),
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        Ok(update)
    }
}

impl CreateUser {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::User(UserFieldUpdate { field, value }) => {
                let slot = match field {
                    UserField::Name => &mut self.name,
                    UserField::Username => &mut self.username,
                    UserField::Email => &mut self.email,
                    UserField::Phone => &mut self.phone,
                    UserField::Website => &mut self.website,
                };
                *slot = value;
            }
            FieldUpdate::Address(update) => self.address.apply(update),
            FieldUpdate::Geo(update) => self.address.geo.apply(update),
            FieldUpdate::Company(update) => self.company.apply(update),
        }
    }
}

impl Address {
    pub fn apply(&mut self, AddressFieldUpdate { field, value }: AddressFieldUpdate) {
        let slot = match field {
            AddressField::Street => &mut self.street,
            AddressField::Suite => &mut self.suite,
            AddressField::City => &mut self.city,
            AddressField::Zipcode => &mut self.zipcode,
        };
        *slot = value;
    }
}

impl Geo {
    pub fn apply(&mut self, GeoFieldUpdate { field, value }: GeoFieldUpdate) {
        match field {
            GeoField::Lat => self.lat = value,
            GeoField::Lng => self.lng = value,
        }
    }
}

impl Company {
    pub fn apply(&mut self, CompanyFieldUpdate { field, value }: CompanyFieldUpdate) {
        let slot = match field {
            CompanyField::Name => &mut self.name,
            CompanyField::CatchPhrase => &mut self.catch_phrase,
            CompanyField::Bs => &mut self.bs,
        };
        *slot = value;
    }
}

/// The draft behind an add or edit form. Submitting does not consume it,
/// so a failed submission leaves the entered data in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    draft: CreateUser,
}

impl UserForm {
    /// An edit form pre-filled from a fetched record.
    pub fn from_user(user: &User) -> Self {
        Self { draft: user.to_draft() }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    /// Parse and apply an update addressed by input name.
    pub fn set(&mut self, path: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.apply(FieldUpdate::parse(path, value)?);
        Ok(())
    }

    /// Required inputs left blank, in form order. Submit only when empty.
    pub fn missing_required(&self) -> Vec<UserField> {
        [
            (UserField::Name, &self.draft.name),
            (UserField::Username, &self.draft.username),
            (UserField::Email, &self.draft.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn draft(&self) -> &CreateUser {
        &self.draft
    }

    pub fn to_create(&self) -> CreateUser {
        self.draft.clone()
    }

    /// Every field, for an edit submitted as a full overwrite.
    pub fn to_update(&self) -> UpdateUser {
        UpdateUser::from(self.draft.clone())
    }
}
