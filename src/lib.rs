pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::html::{HtmlDocument, HtmlNode};
pub use crate::core::{engine::ExportEngine, extractor::OrderExtractor, pipeline::OrderPipeline};
pub use domain::model::{OrderRecord, CSV_HEADER};
pub use utils::error::{ExportError, Result};
