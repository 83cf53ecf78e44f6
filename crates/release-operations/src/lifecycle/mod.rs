mod coordinator;
mod plugin_order;

pub use coordinator::{ReleaseCoordinator, Stage};
pub use plugin_order::check_plugin_order;
