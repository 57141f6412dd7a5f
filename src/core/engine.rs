use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load; returns the path of the CSV export.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting order export");

        tracing::info!("Extracting orders...");
        let extraction = self.pipeline.extract().await?;
        tracing::info!("Extracted {} orders", extraction.records.len());

        tracing::info!("Rendering outputs...");
        let result = self.pipeline.transform(extraction).await?;

        tracing::info!("Writing outputs...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!(
            "Export finished in {:.2?}, CSV saved to: {}",
            started.elapsed(),
            output_path
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Extraction, OrderRecord, TransformResult};
    use crate::utils::error::ExportError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipeline {
        calls: AtomicUsize,
        fail_extract: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Extraction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_extract {
                return Err(ExportError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            Ok(Extraction {
                records: vec![OrderRecord {
                    date: "Wed Mar 03 2021".to_string(),
                    order_number: "1".to_string(),
                    delivery_address: String::new(),
                    price: "1.00".to_string(),
                    items: vec![],
                }],
                csv_output: "header\nrow".to_string(),
                source_html: String::new(),
            })
        }

        async fn transform(&self, extraction: Extraction) -> Result<TransformResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransformResult {
                records: extraction.records,
                csv_output: extraction.csv_output,
                tsv_output: None,
                json_output: None,
                annotated_page: None,
            })
        }

        async fn load(&self, result: TransformResult) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(result.csv_output, "header\nrow");
            Ok("out/orders.csv".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_stages() {
        let engine = ExportEngine::new(StubPipeline {
            calls: AtomicUsize::new(0),
            fail_extract: false,
        });

        let path = engine.run().await.unwrap();

        assert_eq!(path, "out/orders.csv");
        assert_eq!(engine.pipeline.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_stops_on_extract_failure() {
        let engine = ExportEngine::new(StubPipeline {
            calls: AtomicUsize::new(0),
            fail_extract: true,
        });

        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline.calls.load(Ordering::SeqCst), 1);
    }
}
