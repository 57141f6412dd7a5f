use crate::domain::ports::DomNode;
use scraper::{ElementRef, Html, Selector};

/// A parsed order-history page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::debug!("HTML parser recovered from {} errors", html.errors.len());
        }
        Self { html }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }
}

/// [`DomNode`] over a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!("Ignoring invalid selector '{}': {}", selector, e);
            None
        }
    }
}

impl<'a> DomNode for HtmlNode<'a> {
    fn find_all(&self, selector: &str) -> Vec<Self> {
        let Some(sel) = compile(selector) else {
            return Vec::new();
        };
        self.0.select(&sel).map(HtmlNode).collect()
    }

    fn children(&self, selector: &str) -> Vec<Self> {
        let Some(sel) = compile(selector) else {
            return Vec::new();
        };
        self.0
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| sel.matches(child))
            .map(HtmlNode)
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(HtmlNode)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }

    fn html(&self) -> String {
        self.0.inner_html()
    }
}
