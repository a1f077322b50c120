//! Core module containing the list pipeline types shared by every page

pub mod error;
pub mod query;
pub mod record;
pub mod result;
pub mod validation;

pub use error::{ConfigError, FetchError};
pub use query::{ListQuery, PageState, PaginationMeta, apply_filters, paginate};
pub use record::ListItem;
pub use result::{FetchResult, SubmitResult};
pub use validation::FormRules;
