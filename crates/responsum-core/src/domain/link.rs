//! Links between models
//!
//! Links are always sent as arrays on the owning model property, even when
//! the link definition only allows one target. A link can not be updated,
//! only created and deleted, so every new link needs a fresh uuid.

use serde::{Deserialize, Serialize};

/// A link object (`"type": "link"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "link", rename_all = "camelCase")]
pub struct Link {
    pub uuid: String,
    /// Link type specific to the model property, e.g.
    /// `information-management-system-country`
    pub link_type: String,
    /// Both sides of the connection
    pub links: Vec<LinkBranch>,
}

/// One side of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBranch {
    /// Which side of the connection this is; matters for self-referencing links
    pub role: String,
    pub model_type: String,
    pub model_uuid: String,
}

impl LinkBranch {
    /// Branch whose role equals its model type (the common case)
    pub fn new(model_type: impl Into<String>, model_uuid: impl Into<String>) -> Self {
        let model_type = model_type.into();
        Self {
            role: model_type.clone(),
            model_type,
            model_uuid: model_uuid.into(),
        }
    }
}

impl Link {
    /// Link two models where each role equals the model type
    pub fn between(
        uuid: impl Into<String>,
        link_type: impl Into<String>,
        from: LinkBranch,
        to: LinkBranch,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            link_type: link_type.into(),
            links: vec![from, to],
        }
    }
}
