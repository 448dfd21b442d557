pub mod app_state;
pub mod business;
pub mod marker;
pub mod region;
pub mod state_image;
pub mod upload;

pub use app_state::AppState;
pub use business::BusinessSubmission;
pub use marker::{Marker, MarkerId};
pub use region::{Region, RegionSummary};
pub use state_image::{Credit, StateImage};
pub use upload::UploadedFile;
