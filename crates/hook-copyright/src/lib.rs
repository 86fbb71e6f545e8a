//! Copyright notices for the copyright hooks.
//!
//! Provides:
//! - Notice detection and rendering
//! - The add and update transforms
//! - Layered configuration for `add-copyright`

pub mod notice;
pub mod settings;
pub mod transform;

pub use notice::{NoticeMarker, NoticeScan, ParsedNotice, build_notice, find_notice};
pub use settings::{NoticeSettings, PartialConfig, ResolvedConfig};
pub use transform::{Edit, add_copyright, update_copyright};
