//! Wire request bodies accepted from external clients.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialSource {
    pub privacy: Option<String>,
    pub sensitive: Option<bool>,
    pub language: Option<String>,
}

/// Body of `PATCH /api/v1/accounts/update_credentials`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub discoverable: Option<bool>,
    pub bot: Option<bool>,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub locked: Option<bool>,
    pub source: Option<CredentialSource>,
    pub fields_attributes: Option<Vec<FieldAttribute>>,
}
