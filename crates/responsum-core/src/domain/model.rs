//! Tenant models used by the example operations
//!
//! Only the properties the operations touch are typed. Every model carries
//! its `type` so the API knows which model is being created or updated.

use serde::{Deserialize, Serialize};

use super::Link;

/// Model type names
pub mod model_types {
    pub const COUNTRY: &str = "country";
    pub const INFORMATION_MANAGEMENT_SYSTEM: &str = "information-management-system";
    pub const USER_ACCOUNT: &str = "user-account";
    pub const PERMISSION: &str = "permission";
}

/// Link type names
pub mod link_types {
    pub const IMS_COUNTRY: &str = "information-management-system-country";
    pub const PERMISSION_USER_ACCOUNT: &str = "permission-user-account";
}

/// A model in a create or update body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Model {
    InformationManagementSystem(InformationManagementSystem),
    UserAccount(UserAccount),
    Permission(Permission),
}

impl Model {
    pub fn uuid(&self) -> &str {
        match self {
            Self::InformationManagementSystem(m) => &m.uuid,
            Self::UserAccount(m) => &m.uuid,
            Self::Permission(m) => &m.uuid,
        }
    }
}

/// Country as returned by `GET /country`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<i64>,
}

/// Information management system (IMS)
///
/// Unset properties are left out, so the same type serves as a partial
/// update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationManagementSystem {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Setting this replaces all links of the property: missing links are
    /// deleted, new ones are created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Vec<Link>>,
    /// Set by the API on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Promoted users
    Normal,
    Power,
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub uuid: String,
    /// Must be valid and unique within the tenant for normal and power users
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDepth {
    Viewer,
    Editor,
}

/// Permission granting a depth of access over a list of model types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub uuid: String,
    pub depth: PermissionDepth,
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<i64>,
}

/// Find the internal id of a model in a create/update response
pub fn find_internal_id(data: &[serde_json::Value], model_type: &str, uuid: &str) -> Option<i64> {
    data.iter()
        .find(|model| {
            model.get("type").and_then(|t| t.as_str()) == Some(model_type)
                && model.get("uuid").and_then(|u| u.as_str()) == Some(uuid)
        })
        .and_then(|model| model.get("internalId"))
        .and_then(|id| id.as_i64())
}
