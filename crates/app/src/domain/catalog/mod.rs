//! Catalog: the admin edit-and-upload workflow and the browsable menu view.

mod errors;
pub mod forms;
mod guard;
mod reconcile;
mod view;
mod workflow;

pub use errors::*;
pub use forms::{CategoryForm, ProductForm};
pub use guard::{FormToken, SubmissionGuard, SubmissionPermit};
pub use reconcile::{BucketSweep, ImageReconciler, SweepReport};
pub use view::*;
pub use workflow::CatalogWorkflow;
