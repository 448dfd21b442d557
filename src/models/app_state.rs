use std::sync::Arc;

use crate::config;
use crate::services::{ImageCache, RateLimiter, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    /// WordPress site root; REST and AJAX paths are appended to it.
    pub beekeys_base_url: String,
    pub country: String,
    /// Session cookie forwarded to endpoints that need a logged-in upstream user.
    pub beekeys_cookie: String,
    pub proxy_secret: Option<String>,
    pub unsplash_key: Option<String>,
    pub unsplash_base_url: String,
    pub wp_api_url: Option<String>,
    pub wp_credentials: Option<(String, String)>,
    pub ninja_form_id: String,
    pub ninja_upload_field_id: String,
    pub ems_terms: Vec<String>,
    pub placeholder_markers: bool,
    pub allowed_origins: Vec<String>,
    pub image_cache: Arc<ImageCache>,
    pub reset_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build state from the process environment. Call
    /// [`config::load_env_file`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("beekeys-proxy/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config::get_upstream_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let clock = Arc::new(SystemClock);
        Ok(AppState {
            client,
            beekeys_base_url: config::get_beekeys_base_url(),
            country: config::get_country(),
            beekeys_cookie: config::get_beekeys_cookie(),
            proxy_secret: config::get_proxy_secret(),
            unsplash_key: config::get_unsplash_key(),
            unsplash_base_url: config::get_unsplash_base_url(),
            wp_api_url: config::get_wp_api_url(),
            wp_credentials: config::get_wp_credentials(),
            ninja_form_id: config::get_ninja_form_id(),
            ninja_upload_field_id: config::get_ninja_upload_field_id(),
            ems_terms: config::get_ems_terms(),
            placeholder_markers: config::get_placeholder_markers(),
            allowed_origins: config::get_allowed_origins(),
            image_cache: Arc::new(ImageCache::new(clock.clone())),
            reset_limiter: Arc::new(RateLimiter::password_reset(clock)),
        })
    }

    /// `<base>/wp-json/<route>`
    pub fn rest_url(&self, route: &str) -> String {
        crate::utils::join_url(&self.beekeys_base_url, &format!("wp-json/{}", route.trim_start_matches('/')))
    }

    pub fn ajax_url(&self) -> String {
        crate::utils::join_url(&self.beekeys_base_url, "wp-admin/admin-ajax.php")
    }
}
