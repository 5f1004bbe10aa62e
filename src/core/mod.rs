pub mod controller;
pub mod extractor;
pub mod harvester;
pub mod html;
pub mod http;
pub mod pipeline;
pub mod sink;
pub mod transformer;

pub use crate::domain::model::{ListingRef, ProfileRecord, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
