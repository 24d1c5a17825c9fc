//! Example operations
//!
//! Each operation takes the client and the logger, logs its outcome and
//! returns `None` after logging any failure. API calls within an operation
//! run one after the other.

mod countries;
mod ims;
mod user;
mod uuids;

pub use countries::get_countries_by_filter;
pub use ims::{create_new_ims, ims_name_for, update_ims};
pub use user::{create_new_user_with_permissions, EDITOR_PERMISSION_MODELS};
pub use uuids::get_uuids;

use responsum_logging::{AppLogger, ErrorInfo, Fields};

use crate::ApiError;

/// First `N` uuids of a `GET uuids/{n}` answer; extra uuids are ignored
fn first_uuids<const N: usize>(uuids: Vec<String>) -> Option<[String; N]> {
    uuids.into_iter().take(N).collect::<Vec<_>>().try_into().ok()
}

fn log_api_error(logger: &AppLogger, message: String, error: &ApiError) {
    logger.error(message, Fields::new().with("error", ErrorInfo::from(error)));
}
