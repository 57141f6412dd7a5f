use serde::{Deserialize, Serialize};

/// Column names of every export, in row order.
pub const CSV_HEADER: [&str; 5] = ["date", "order no", "delivery address", "price", "items"];

/// Separator used inside the items column.
pub const ITEM_SEPARATOR: &str = ";";

/// One purchase order as read from the history page.
///
/// Scalar fields are stored already sanitized. `items` keeps the trimmed
/// titles as they appear on the page; the items column is built from them
/// by [`OrderRecord::to_row`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub date: String,
    pub order_number: String,
    pub delivery_address: String,
    pub price: String,
    pub items: Vec<String>,
}

impl OrderRecord {
    pub fn items_column(&self) -> String {
        crate::core::extractor::join_items(&self.items)
    }

    /// The five serialized column values, in header order.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.order_number.clone(),
            self.delivery_address.clone(),
            self.price.clone(),
            self.items_column(),
        ]
    }

    pub fn to_csv_line(&self) -> String {
        self.to_row().join(",")
    }
}

/// Output of one extraction pass over a page.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<OrderRecord>,
    pub csv_output: String,
    /// Raw page text, kept so the output surface can be appended to a copy.
    pub source_html: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<OrderRecord>,
    pub csv_output: String,
    pub tsv_output: Option<String>,
    pub json_output: Option<String>,
    pub annotated_page: Option<String>,
}

/// What to do when an order heading does not parse as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Emit [`INVALID_DATE`] in the date column and keep going.
    #[default]
    Permissive,
    /// Abort the run with `ExportError::InvalidDate`.
    Strict,
}

/// Marker written in place of an unparseable date.
pub const INVALID_DATE: &str = "Invalid Date";

/// CSS selectors describing the order-history page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub order_node: String,
    pub heading: String,
    pub details: String,
    pub label: String,
    pub value: String,
    pub price: String,
    pub item_title: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            order_node: "div.order-level".to_string(),
            heading: "h2".to_string(),
            details: ".order-details".to_string(),
            label: ".info-title".to_string(),
            value: ".info-data".to_string(),
            price: ".price".to_string(),
            item_title: ".item-title".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorOptions {
    pub selectors: Selectors,
    pub date_policy: DatePolicy,
    pub order_number_label: String,
    pub delivery_address_label: String,
    pub currency_symbol: String,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            date_policy: DatePolicy::Permissive,
            order_number_label: "Order #".to_string(),
            delivery_address_label: "Delivery Address".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}
