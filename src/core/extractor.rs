use crate::domain::model::{
    DatePolicy, ExtractorOptions, OrderRecord, CSV_HEADER, INVALID_DATE, ITEM_SEPARATOR,
};
use crate::domain::ports::{DomNode, RecordObserver};
use crate::utils::error::{ExportError, Result};
use chrono::{Datelike, NaiveDate};

// `%Y` also reads two digits, so `%m/%d/%y` must come before `%m/%d/%Y`.
const DATE_FORMATS: [&str; 8] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
];

/// Years below this are two-digit or truncated years, never real orders.
const MIN_ORDER_YEAR: i32 = 100;

const DATE_OUTPUT_FORMAT: &str = "%a %b %d %Y";

/// Makes a value safe for comma/newline framing: commas are dropped and
/// every line break becomes `;`.
pub fn sanitize_field(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(',', "")
        .replace('\n', ";")
}

/// Parses an order heading such as `March 3, 2021` or
/// `Order placed March 3, 2021`. Leading words are dropped one at a time
/// until the remainder reads as a date.
pub fn parse_order_date(text: &str) -> Option<NaiveDate> {
    let words: Vec<&str> = text.split_whitespace().collect();
    (0..words.len()).find_map(|start| {
        let candidate = words[start..].join(" ");
        DATE_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(&candidate, fmt).ok())
            .find(|date| date.year() >= MIN_ORDER_YEAR)
    })
}

pub struct OrderExtractor {
    options: ExtractorOptions,
}

impl OrderExtractor {
    pub fn new(options: ExtractorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    pub fn extract_date<N: DomNode>(&self, index: usize, order: &N) -> Result<String> {
        let heading: String = order
            .find_all(&self.options.selectors.heading)
            .iter()
            .map(DomNode::text)
            .collect();

        match parse_order_date(&heading) {
            Some(date) => Ok(date.format(DATE_OUTPUT_FORMAT).to_string()),
            None => match self.options.date_policy {
                DatePolicy::Permissive => {
                    tracing::warn!("Order {}: unparseable date '{}'", index, heading.trim());
                    Ok(INVALID_DATE.to_string())
                }
                DatePolicy::Strict => Err(ExportError::InvalidDate {
                    index,
                    raw: heading.trim().to_string(),
                }),
            },
        }
    }

    pub fn extract_order_number<N: DomNode>(&self, order: &N) -> String {
        let text: String = self
            .labeled_values(order, &self.options.order_number_label)
            .iter()
            .map(DomNode::text)
            .collect();
        sanitize_field(&text)
    }

    pub fn extract_delivery_address<N: DomNode>(&self, order: &N) -> String {
        // Digital orders carry no address block at all.
        let Some(value) = self
            .labeled_values(order, &self.options.delivery_address_label)
            .into_iter()
            .next()
        else {
            return String::new();
        };

        let markup = value.html().replace("<br>", "\n");
        sanitize_field(markup.trim())
    }

    pub fn extract_price<N: DomNode>(&self, order: &N) -> String {
        let text: String = self
            .details(order)
            .iter()
            .flat_map(|details| details.find_all(&self.options.selectors.price))
            .map(|price| price.text())
            .collect();
        let price = text.trim().replacen(self.options.currency_symbol.as_str(), "", 1);
        sanitize_field(&price)
    }

    /// Item titles live beside the order node, so they are searched for in
    /// its parent container.
    pub fn extract_items<N: DomNode>(&self, order: &N) -> Vec<String> {
        let Some(container) = order.parent() else {
            return Vec::new();
        };
        container
            .find_all(&self.options.selectors.item_title)
            .iter()
            .map(|title| sanitize_field(title.text().trim()))
            .collect()
    }

    pub fn extract_record<N: DomNode>(&self, index: usize, order: &N) -> Result<OrderRecord> {
        Ok(OrderRecord {
            date: sanitize_field(&self.extract_date(index, order)?),
            order_number: self.extract_order_number(order),
            delivery_address: self.extract_delivery_address(order),
            price: self.extract_price(order),
            items: self.extract_items(order),
        })
    }

    /// Extracts every order node of `document` in document order and returns
    /// the records with the CSV text (header line first, no trailing newline).
    pub fn run<N, O>(&self, document: &N, observer: &mut O) -> Result<(Vec<OrderRecord>, String)>
    where
        N: DomNode,
        O: RecordObserver,
    {
        let orders = document.find_all(&self.options.selectors.order_node);
        if orders.is_empty() {
            tracing::warn!(
                "No order nodes matched '{}'",
                self.options.selectors.order_node
            );
        } else {
            tracing::debug!("Found {} order nodes", orders.len());
        }

        let mut csv = CSV_HEADER.join(",");
        let mut records = Vec::with_capacity(orders.len());

        for (index, order) in orders.iter().enumerate() {
            let record = self.extract_record(index, order)?;
            let row = record.to_csv_line();

            csv.push('\n');
            csv.push_str(&row);
            observer.on_record_extracted(index, &record, &row);
            records.push(record);
        }

        Ok((records, csv))
    }

    fn details<N: DomNode>(&self, order: &N) -> Vec<N> {
        order.find_all(&self.options.selectors.details)
    }

    /// Value nodes paired with every label whose text contains `label`.
    fn labeled_values<N: DomNode>(&self, order: &N, label: &str) -> Vec<N> {
        let selectors = &self.options.selectors;
        self.details(order)
            .iter()
            .flat_map(|details| details.find_all(&selectors.label))
            .filter(|title| title.text().contains(label))
            .filter_map(|title| title.parent())
            .flat_map(|row| row.children(&selectors.value))
            .collect()
    }
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new(ExtractorOptions::default())
    }
}

/// Items column value for a list of titles.
pub fn join_items(items: &[String]) -> String {
    sanitize_field(&items.join(ITEM_SEPARATOR))
}
