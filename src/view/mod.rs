//! View controller subsystem
//!
//! Holds the session's view state and derives the current page through
//! a memoized Filter → Sort → Paginate pipeline.
//!
//! # Rules
//!
//! - A filter change resets the page to 1 before the next derived view
//! - A sort change leaves the page alone
//! - A stage only reruns when its inputs changed
//! - Nothing is derived while records are loading or after a failed fetch

mod controller;
mod pipeline;
mod session;
mod state;

pub use controller::{DerivedView, LoadState, ViewController, ViewStatus};
pub use pipeline::{Pipeline, PipelineStats};
pub use session::{load_session, reload};
pub use state::{Pagination, ViewState};
