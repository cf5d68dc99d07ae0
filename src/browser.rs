//! Browser Helpers
//!
//! Page URL and randomness, read through web-sys.

use item_board_core::{placeholder_image_url, ApiConfig, API_QUERY_PARAM};
use log::{error, info};

/// API configuration from the page URL, resolved against the page origin
pub fn api_config_from_location() -> ApiConfig {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return ApiConfig::default();
    };

    let param = location
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get(API_QUERY_PARAM));
    let config = ApiConfig::from_query_param(param.as_deref());

    let origin = location.origin().unwrap_or_default();
    match config.resolve(&origin) {
        Ok(resolved) => {
            info!("[Config] API base: {}", resolved.base());
            resolved
        }
        Err(e) => {
            error!("[Config] {}", e);
            config
        }
    }
}

/// Fresh placeholder image for a new draft
pub fn next_placeholder_image() -> String {
    placeholder_image_url(js_sys::Math::random())
}
