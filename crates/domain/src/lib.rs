#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod builtin_metrics;
mod catalog;
mod error;
mod exercise;
mod metric;
mod name;
mod planner;
mod program;
mod service;
mod statistics;
mod volume_target;

pub use builtin_metrics::*;
pub use catalog::*;
pub use error::*;
pub use exercise::*;
pub use metric::*;
pub use name::*;
pub use planner::*;
pub use program::*;
pub use service::*;
pub use statistics::*;
pub use volume_target::*;
