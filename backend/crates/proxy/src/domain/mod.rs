//! Domain Layer
//!
//! Route classification and upload validation.

pub mod route_rule;
pub mod upload;

pub use route_rule::{RouteKind, RouteMatch, RouteRule, RouteTable};
pub use upload::{CsvUpload, UploadedFile};
