//! Validation reports
//!
//! A [`Report`] is the structured result of one validation pass over the
//! mirror: one [`PageRecord`] per page found on disk, each listing the local
//! resources that the page server could not deliver.
//!
//! - **model**: the persisted data types
//! - **builder**: runs the validation pass
//! - **render**: the human-readable Markdown summary
//! - **store**: report files inside the report directory

mod builder;
mod model;
mod render;
mod store;

pub use builder::ReportBuilder;
pub use model::{PageRecord, Report, ResourceIssue};
pub use render::{MARKDOWN_ISSUE_CAP, render_markdown};
pub use store::ReportStore;
