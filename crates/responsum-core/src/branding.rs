//! Centralized branding constants
//!
//! All product naming and default endpoints come from this module.

/// Base name used for log files and the session banner.
pub const LOG_FILE_BASE: &str = "responsum-api-example";

/// Default base url of the Responsum SaaS production API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.responsum.app";

/// Default port for the local example server (also receives webhooks).
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// API version segment of every tenant url.
pub const API_VERSION: &str = "v1";

/// User agent sent to the tenant API.
pub const USER_AGENT: &str = "responsum-api-example/0.1";

/// Header carrying the API token.
pub const API_TOKEN_HEADER: &str = "Api-Token";

/// Build the tenant-scoped API root, always ending in a slash
///
/// # Example
/// ```
/// use responsum_core::branding;
///
/// let url = branding::tenant_base_url("https://api.responsum.app/", "acme");
/// assert_eq!(url, "https://api.responsum.app/v1/acme/");
/// ```
pub fn tenant_base_url(api_base_url: &str, tenant_key: &str) -> String {
    format!(
        "{}/{}/{}/",
        api_base_url.trim_end_matches('/'),
        API_VERSION,
        tenant_key.trim_matches('/')
    )
}
