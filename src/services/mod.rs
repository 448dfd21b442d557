pub mod clock;
pub mod image_cache;
pub mod marker_merge;
pub mod marker_normalizer;
pub mod rate_limiter;
pub mod region_resolver;
pub mod state_details;
pub mod state_image;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use image_cache::ImageCache;
pub use marker_merge::merge_markers;
pub use marker_normalizer::{normalize_marker, normalize_markers, records_from_payload};
pub use rate_limiter::{Limited, RateLimiter};
pub use region_resolver::{resolve_in_list, resolve_region, static_region_name, REGION_MAP};
pub use state_details::{ems_markers_for, state_details, StateDetails, StateDetailsError};
pub use state_image::state_image;
