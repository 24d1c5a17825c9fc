use responsum_logging::{AppLogger, Fields};

use super::log_api_error;
use crate::ResponsumClient;

/// Fetch `amount` uuids in the tenant's format
pub async fn get_uuids(client: &ResponsumClient, logger: &AppLogger, amount: u32) -> Option<Vec<String>> {
    match client.get_uuids(amount).await {
        Ok(uuids) => {
            logger.info(
                format!("GET /uuids/{}", amount),
                Fields::new().with("result", uuids.clone()),
            );
            Some(uuids)
        }
        Err(e) => {
            log_api_error(logger, format!("Got an error for GET /uuids/{}", amount), &e);
            None
        }
    }
}
