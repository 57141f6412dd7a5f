use crate::domain::model::{Extraction, ExtractorOptions, OrderRecord, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only query capability over a rendered document tree.
///
/// The extractor only talks to this trait, so it runs the same against a
/// parsed HTML page or any other tree that can answer CSS-style queries.
pub trait DomNode: Sized {
    /// Every descendant matching `selector`, in document order.
    fn find_all(&self, selector: &str) -> Vec<Self>;

    fn find_first(&self, selector: &str) -> Option<Self> {
        self.find_all(selector).into_iter().next()
    }

    /// Direct element children matching `selector`.
    fn children(&self, selector: &str) -> Vec<Self>;

    fn parent(&self) -> Option<Self>;

    /// Concatenated text of the subtree.
    fn text(&self) -> String;

    /// Serialized inner markup.
    fn html(&self) -> String;
}

/// Progress hook called once per extracted order, in document order.
///
/// `row` is the serialized CSV line for `record`.
pub trait RecordObserver {
    fn on_record_extracted(&mut self, index: usize, record: &OrderRecord, row: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RecordObserver for NoopObserver {
    fn on_record_extracted(&mut self, _index: usize, _record: &OrderRecord, _row: &str) {}
}

impl<F> RecordObserver for F
where
    F: FnMut(usize, &OrderRecord, &str),
{
    fn on_record_extracted(&mut self, index: usize, record: &OrderRecord, row: &str) {
        self(index, record, row)
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn basename(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn annotate_page(&self) -> bool;
    fn extractor_options(&self) -> ExtractorOptions;

    fn wants_format(&self, format: &str) -> bool {
        self.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extraction>;
    async fn transform(&self, extraction: Extraction) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
