use responsum_core::{model_types, Country};
use responsum_logging::AppLogger;

use super::log_api_error;
use crate::{ModelFilter, ResponsumClient};

/// Countries whose name is exactly `country_name`
pub async fn get_countries_by_filter(
    client: &ResponsumClient,
    logger: &AppLogger,
    country_name: &str,
) -> Option<Vec<Country>> {
    let filter = ModelFilter::by("name", country_name);
    match client.filter_models(model_types::COUNTRY, &filter).await {
        Ok(countries) => Some(countries),
        Err(e) => {
            log_api_error(logger, "Got an error for GET /country".to_string(), &e);
            None
        }
    }
}
