//! List views: state machine, derived rows and the async controller

pub mod controller;
pub mod list;
pub mod render;
pub mod state;

pub use controller::ListController;
pub use list::ListView;
pub use render::{PagerControls, RenderedRow, RenderedTable, TableSpec};
pub use state::{RequestToken, ViewStatus};
