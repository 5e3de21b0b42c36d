//! Planner module for deciding where converted files go.
//!
//! Output directories are derived from the input directory according to a
//! [`LayoutPolicy`]:
//!
//! - `Mirror`: `/music/Radiohead/OK Computer` → `<export>/Radiohead/OK Computer`
//! - `Flatten`: `/music/Radiohead/OK Computer` → `<export>/OK Computer`
//!
//! Output files keep the input stem and take the destination extension.

mod error;
mod layout;
mod types;

pub use error::PlannerError;
pub use layout::{expand_home, plan_output_dir, resolve_output_dir, resolve_output_file};
pub use types::LayoutPolicy;
