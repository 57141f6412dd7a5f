use crate::domain::model::{OrderRecord, CSV_HEADER};
use crate::utils::error::{ExportError, Result};

/// Tab-separated copy of the export for pasting into spreadsheets.
pub fn render_tsv(records: &[OrderRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::ProcessingError {
            message: format!("Failed to flush TSV writer: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| ExportError::ProcessingError {
        message: format!("TSV output is not UTF-8: {}", e),
    })
}

pub fn render_json(records: &[OrderRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Scrollable text control holding the CSV export.
pub fn render_output_surface(csv: &str) -> String {
    format!(
        "<textarea rows='12' cols='80'>{}</textarea>",
        escape_html(csv)
    )
}

/// Inserts `surface` before the last `</body>`, or at the end of the page
/// when there is none.
pub fn append_to_body(page: &str, surface: &str) -> String {
    let lowered = page.to_ascii_lowercase();
    match lowered.rfind("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(page.len() + surface.len());
            out.push_str(&page[..pos]);
            out.push_str(surface);
            out.push_str(&page[pos..]);
            out
        }
        None => format!("{}{}", page, surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<OrderRecord> {
        vec![
            OrderRecord {
                date: "Wed Mar 03 2021".to_string(),
                order_number: "12345".to_string(),
                delivery_address: "1 Main St;Apt 2".to_string(),
                price: "19.99".to_string(),
                items: vec!["Widget".to_string(), "Gadget, Pro".to_string()],
            },
            OrderRecord {
                date: "Thu Mar 04 2021".to_string(),
                order_number: "67890".to_string(),
                delivery_address: String::new(),
                price: "5.00".to_string(),
                items: vec![],
            },
        ]
    }

    #[test]
    fn test_render_tsv() {
        let tsv = render_tsv(&sample()).unwrap();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "date\torder no\tdelivery address\tprice\titems");
        assert_eq!(lines[1], "Wed Mar 03 2021\t12345\t1 Main St;Apt 2\t19.99\tWidget;Gadget Pro");
        assert_eq!(lines[2], "Thu Mar 04 2021\t67890\t\t5.00\t");
    }

    #[test]
    fn test_render_json_keeps_item_list() {
        let json = render_json(&sample()).unwrap();
        let parsed: Vec<OrderRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].items, vec!["Widget", "Gadget, Pro"]);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_output_surface_escapes_markup() {
        let surface = render_output_surface("a<b>&c");
        assert_eq!(
            surface,
            "<textarea rows='12' cols='80'>a&lt;b&gt;&amp;c</textarea>"
        );
    }

    #[test]
    fn test_append_to_body() {
        let page = "<html><BODY><p>x</p></BODY></html>";
        assert_eq!(
            append_to_body(page, "<hr>"),
            "<html><BODY><p>x</p><hr></BODY></html>"
        );
        assert_eq!(append_to_body("<p>x</p>", "<hr>"), "<p>x</p><hr>");
    }
}
