//! Information management system (IMS) operations

use chrono::{Datelike, Local, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

use responsum_core::{
    find_internal_id, link_types, model_types, InformationManagementSystem, Link, LinkBranch, Model,
};
use responsum_logging::AppLogger;

use super::{first_uuids, get_countries_by_filter, get_uuids, log_api_error};
use crate::{ModelFilter, ResponsumClient};

/// Name of the IMS created on `date`, e.g. `api-example 2024-3-5`
///
/// The update operation finds today's IMS by this name.
pub fn ims_name_for(date: NaiveDate) -> String {
    format!("api-example {}-{}-{}", date.year(), date.month(), date.day())
}

fn country_link(link_uuid: &str, ims_uuid: &str, country_uuid: &str) -> Link {
    Link::between(
        link_uuid,
        link_types::IMS_COUNTRY,
        LinkBranch::new(model_types::INFORMATION_MANAGEMENT_SYSTEM, ims_uuid),
        LinkBranch::new(model_types::COUNTRY, country_uuid),
    )
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Create today's IMS, linked to Belgium
pub async fn create_new_ims(client: &ResponsumClient, logger: &AppLogger) -> Option<Vec<serde_json::Value>> {
    let Some(country) = get_countries_by_filter(client, logger, "Belgium")
        .await
        .and_then(|countries| countries.into_iter().next())
    else {
        logger.warn("Could not get a country by filter, exiting early", ());
        return None;
    };

    let Some([ims_uuid, link_uuid]) = get_uuids(client, logger, 2)
        .await
        .and_then(first_uuids::<2>)
    else {
        logger.warn("Could not generate needed uuids, exiting early", ());
        return None;
    };

    let ims = InformationManagementSystem {
        name: Some(ims_name_for(Local::now().date_naive())),
        description: Some(format!(
            "This IMS was created through the API example on {}",
            now_iso()
        )),
        country: Some(vec![country_link(&link_uuid, &ims_uuid, &country.uuid)]),
        uuid: ims_uuid,
        internal_id: None,
    };
    let ims_uuid = ims.uuid.clone();

    match client.create(&[Model::InformationManagementSystem(ims)]).await {
        Ok(created) => {
            let internal_id =
                find_internal_id(&created, model_types::INFORMATION_MANAGEMENT_SYSTEM, &ims_uuid);
            logger.info(format!("Created IMS internal id: {}", display_id(internal_id)), ());
            Some(created)
        }
        Err(e) => {
            log_api_error(logger, "Got an error for POST /create".to_string(), &e);
            None
        }
    }
}

/// Append an update line to today's IMS description and relink it to the
/// Netherlands
pub async fn update_ims(client: &ResponsumClient, logger: &AppLogger) -> Option<Vec<serde_json::Value>> {
    let Some(country) = get_countries_by_filter(client, logger, "Netherlands")
        .await
        .and_then(|countries| countries.into_iter().next())
    else {
        logger.warn("Could not get a country by filter, exiting early", ());
        return None;
    };

    let Some(link_uuid) = get_uuids(client, logger, 1)
        .await
        .and_then(|uuids| uuids.into_iter().next())
    else {
        logger.warn("Could not generate needed uuids, exiting early", ());
        return None;
    };

    let ims_name = ims_name_for(Local::now().date_naive());
    let Some(existing) = find_ims_by_name(client, logger, &ims_name)
        .await
        .and_then(|imses| imses.into_iter().next())
    else {
        logger.warn(
            "Could not get an IMS by name, either run the POST /create example again or update the imsName to filter on in the code",
            (),
        );
        return None;
    };

    let update = InformationManagementSystem {
        description: Some(format!(
            "{}\r\nThis IMS was updated through the API example on {}",
            existing.description.as_deref().unwrap_or_default(),
            now_iso()
        )),
        country: Some(vec![country_link(&link_uuid, &existing.uuid, &country.uuid)]),
        uuid: existing.uuid.clone(),
        ..Default::default()
    };

    match client.update(&[Model::InformationManagementSystem(update)]).await {
        Ok(updated) => {
            let internal_id =
                find_internal_id(&updated, model_types::INFORMATION_MANAGEMENT_SYSTEM, &existing.uuid);
            logger.info(format!("Updated IMS internal id: {}", display_id(internal_id)), ());
            Some(updated)
        }
        Err(e) => {
            log_api_error(logger, "Got an error for PATCH /update".to_string(), &e);
            None
        }
    }
}

/// The parts of a stored IMS the update reads
#[derive(Debug, Deserialize)]
struct ImsSummary {
    uuid: String,
    #[serde(default)]
    description: Option<String>,
}

async fn find_ims_by_name(
    client: &ResponsumClient,
    logger: &AppLogger,
    name: &str,
) -> Option<Vec<ImsSummary>> {
    let filter = ModelFilter::by("name", name);
    match client
        .filter_models(model_types::INFORMATION_MANAGEMENT_SYSTEM, &filter)
        .await
    {
        Ok(imses) => Some(imses),
        Err(e) => {
            log_api_error(
                logger,
                "Got an error for GET /information-management-system".to_string(),
                &e,
            );
            None
        }
    }
}

pub(super) fn display_id(internal_id: Option<i64>) -> String {
    internal_id.map_or_else(|| "unknown".to_string(), |id| id.to_string())
}
