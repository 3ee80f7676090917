//! Input processing module
//! Handles file detection, text extraction, and profile/role loading

pub mod file_detector;
pub mod manager;
pub mod profile;
pub mod text_extractor;

pub use manager::InputManager;
pub use profile::{MasterProfile, RoleConfig};
