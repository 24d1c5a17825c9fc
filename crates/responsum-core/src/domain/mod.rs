//! Tenant schema types

mod link;
mod model;

pub use link::{Link, LinkBranch};
pub use model::{
    find_internal_id, link_types, model_types, Country, InformationManagementSystem, Model,
    Permission, PermissionDepth, UserAccount, UserType,
};
