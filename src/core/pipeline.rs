use crate::adapters::html::HtmlDocument;
use crate::core::extractor::OrderExtractor;
use crate::core::render::{append_to_body, render_json, render_output_surface, render_tsv};
use crate::core::{
    ConfigProvider, Extraction, OrderRecord, Pipeline, RecordObserver, Storage, TransformResult,
};
use crate::utils::error::Result;
use std::path::Path;

/// Writes one diagnostic line per extracted order.
#[derive(Debug, Default)]
pub struct LogObserver;

impl RecordObserver for LogObserver {
    fn on_record_extracted(&mut self, index: usize, _record: &OrderRecord, row: &str) {
        tracing::info!(index, "{}", row);
    }
}

pub struct OrderPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    extractor: OrderExtractor,
}

impl<S: Storage, C: ConfigProvider> OrderPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let extractor = OrderExtractor::new(config.extractor_options());
        Self {
            storage,
            config,
            extractor,
        }
    }

    /// Parses the page and runs the extractor. The parsed tree stays inside
    /// this synchronous call.
    pub fn extract_from_html(&self, source_html: &str) -> Result<(Vec<OrderRecord>, String)> {
        let document = HtmlDocument::parse(source_html);
        self.extractor.run(&document.root(), &mut LogObserver)
    }

    fn output_file(&self, extension: &str) -> String {
        Path::new(self.config.output_path())
            .join(format!("{}.{}", self.config.basename(), extension))
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for OrderPipeline<S, C> {
    async fn extract(&self) -> Result<Extraction> {
        let input = self.config.input_path();
        tracing::debug!("Reading order page from: {}", input);

        let bytes = self.storage.read_file(input).await?;
        let source_html = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!("Read {} bytes of HTML", source_html.len());

        let (records, csv_output) = self.extract_from_html(&source_html)?;

        Ok(Extraction {
            records,
            csv_output,
            source_html,
        })
    }

    async fn transform(&self, extraction: Extraction) -> Result<TransformResult> {
        let Extraction {
            records,
            csv_output,
            source_html,
        } = extraction;

        let tsv_output = if self.config.wants_format("tsv") {
            Some(render_tsv(&records)?)
        } else {
            None
        };

        let json_output = if self.config.wants_format("json") {
            Some(render_json(&records)?)
        } else {
            None
        };

        let annotated_page = if self.config.annotate_page() {
            let surface = render_output_surface(&csv_output);
            Some(append_to_body(&source_html, &surface))
        } else {
            None
        };

        Ok(TransformResult {
            records,
            csv_output,
            tsv_output,
            json_output,
            annotated_page,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let csv_path = self.output_file("csv");
        tracing::debug!("Writing CSV ({} bytes) to {}", result.csv_output.len(), csv_path);
        self.storage
            .write_file(&csv_path, result.csv_output.as_bytes())
            .await?;

        if let Some(tsv) = &result.tsv_output {
            let path = self.output_file("tsv");
            tracing::debug!("Writing TSV to {}", path);
            self.storage.write_file(&path, tsv.as_bytes()).await?;
        }

        if let Some(json) = &result.json_output {
            let path = self.output_file("json");
            tracing::debug!("Writing JSON to {}", path);
            self.storage.write_file(&path, json.as_bytes()).await?;
        }

        if let Some(page) = &result.annotated_page {
            let path = self.output_file("annotated.html");
            tracing::debug!("Writing annotated page to {}", path);
            self.storage.write_file(&path, page.as_bytes()).await?;
        }

        Ok(csv_path)
    }
}
