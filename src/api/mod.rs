// Upstream API modules
pub mod client;
pub mod regions;
pub mod markers;
pub mod listings;
pub mod forms;
pub mod media;
pub mod users;
pub mod unsplash;

// Re-export commonly used functions
pub use client::{fetch_json, fetch_json_or, or_fallback, send_json, send_passthrough, FetchError};
pub use regions::{load_region_rows, load_regions};
pub use markers::{fetch_ems_markers, fetch_markers};
pub use listings::{fetch_business, fetch_listings, search_listings, ListingQuery};
pub use forms::{fetch_nonce, submit_ninja_form, submit_raw_form, upload_ninja_file};
pub use media::upload_media;
pub use users::{forgot_password, register_user};
pub use unsplash::search_region_photo;
