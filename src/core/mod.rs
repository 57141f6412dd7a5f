pub mod engine;
pub mod extractor;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{Extraction, OrderRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, DomNode, Pipeline, RecordObserver, Storage};
pub use crate::utils::error::Result;
