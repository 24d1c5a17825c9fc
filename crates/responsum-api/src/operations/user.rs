//! User account creation

use responsum_core::{
    find_internal_id, link_types, model_types, Link, LinkBranch, Model, Permission,
    PermissionDepth, UserAccount, UserType,
};
use responsum_logging::AppLogger;

use super::ims::display_id;
use super::{first_uuids, get_uuids, log_api_error};
use crate::ResponsumClient;

/// Model types the example permission grants editor access to
pub const EDITOR_PERMISSION_MODELS: &[&str] = &[
    "compliance-training",
    "enrollment",
    "enrolment-automation",
    "course",
    "phishing-campaign",
    "phishing-attempt",
    "processing-activity",
    "processed-data-lifecycle",
    "transfer-impact-assessment",
    "balancing-test",
    "data-protection-impact",
    "legal-obligation",
    "data-subject-request-status",
    "data-subject-request-type",
    "data-subject-request-source",
    "data-subject-request",
    "framework-section",
    "control",
    "control-requirement",
    "evidence",
    "security-asset",
    "risk",
    "mitigation",
    "risk-threat",
    "incident",
    "information-management-system",
    "process",
    "project",
    "policy",
    "legal-template",
    "legislation",
    "advice",
    "legal-ground",
    "stakeholder",
    "stakeholder-contact",
    "agreement",
    "export-configuration",
    "assessments-2",
    "widget-dashboard",
    "reporting-widget",
    "import-file",
    "template-library",
];

/// The user account and permission created in one request; the link is
/// only declared on the user account
fn user_with_permission(user_uuid: &str, permission_uuid: &str, link_uuid: &str) -> [Model; 2] {
    let user = UserAccount {
        uuid: user_uuid.to_string(),
        email: format!("{}@example.com", user_uuid),
        first_name: "api".to_string(),
        last_name: "example".to_string(),
        user_type: UserType::Normal,
        is_enabled: true,
        permission: vec![Link::between(
            link_uuid,
            link_types::PERMISSION_USER_ACCOUNT,
            LinkBranch::new(model_types::USER_ACCOUNT, user_uuid),
            LinkBranch::new(model_types::PERMISSION, permission_uuid),
        )],
        internal_id: None,
    };
    let permission = Permission {
        uuid: permission_uuid.to_string(),
        depth: PermissionDepth::Editor,
        models: EDITOR_PERMISSION_MODELS.iter().map(|m| m.to_string()).collect(),
        internal_id: None,
    };
    [Model::UserAccount(user), Model::Permission(permission)]
}

/// Create an enabled normal user with an editor permission
pub async fn create_new_user_with_permissions(
    client: &ResponsumClient,
    logger: &AppLogger,
) -> Option<Vec<serde_json::Value>> {
    let Some([user_uuid, permission_uuid, link_uuid]) = get_uuids(client, logger, 3)
        .await
        .and_then(first_uuids::<3>)
    else {
        logger.warn("Could not generate needed uuids, exiting early", ());
        return None;
    };

    let models = user_with_permission(&user_uuid, &permission_uuid, &link_uuid);
    match client.create(&models).await {
        Ok(created) => {
            let internal_id = find_internal_id(&created, model_types::USER_ACCOUNT, &user_uuid);
            logger.info(
                format!("Created user account internal id: {}", display_id(internal_id)),
                (),
            );
            Some(created)
        }
        Err(e) => {
            log_api_error(logger, "Got an error for POST /create".to_string(), &e);
            None
        }
    }
}
