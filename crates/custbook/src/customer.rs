//! Core customer types for custbook.
//!
//! This module defines the customer record, its identifier, and the set of
//! mutable fields an update replaces.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a customer, assigned by the caller at creation time.
///
/// Both integer and text identifiers are accepted. Comparison is strict:
/// `Number(1)` and `Text("1")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    /// A numeric identifier.
    Number(i64),
    /// A textual identifier.
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Parses as a number when the input is an integer, otherwise as text.
impl FromStr for CustomerId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number))
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// The mutable part of a customer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Country of residence.
    pub country: String,
}

/// A customer record.
///
/// Serialized flat, with the fields `id, name, email, address, phone, country`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier; never changes after creation.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Country of residence.
    pub country: String,
}

impl Customer {
    /// Build a customer from an id and its mutable fields.
    #[must_use]
    pub fn new(id: impl Into<CustomerId>, fields: CustomerFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            email: fields.email,
            address: fields.address,
            phone: fields.phone,
            country: fields.country,
        }
    }

    /// Copy out the mutable fields.
    #[must_use]
    pub fn fields(&self) -> CustomerFields {
        CustomerFields {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            country: self.country.clone(),
        }
    }

    /// Replace every mutable field, leaving `id` untouched.
    pub fn apply(&mut self, fields: CustomerFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.address = fields.address;
        self.phone = fields.phone;
        self.country = fields.country;
    }
}
