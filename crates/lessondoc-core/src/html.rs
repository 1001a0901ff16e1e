//! HTML Generator
//!
//! This module serializes a presentation tree into HTML.
//!
//! # Example
//!
//! ```
//! use lessondoc_ast::DocumentNode;
//! use lessondoc_core::{render_document_html, RenderConfig};
//!
//! let doc = DocumentNode::new("doc").with_content(vec![
//!     DocumentNode::new("paragraph").with_content(vec![DocumentNode::text("Hello")]),
//! ]);
//!
//! let html = render_document_html(Some(&doc), &[], &RenderConfig::default());
//! assert!(html.contains("Hello"));
//! assert!(html.starts_with("<div class=\"lesson-content\">"));
//! ```

use lessondoc_ast::{DocumentNode, VocabularyEntry};

use crate::card::{CardContent, ReferenceCard};
use crate::config::{HtmlConfig, RenderConfig};
use crate::presentation::{Element, PresentationNode};
use crate::references::ReferenceMap;
use crate::renderer::{RenderContext, Renderer};

/// Stylesheet embedded in standalone pages
///
/// Popovers carry `hidden` while closed; the hover and focus rules reveal
/// them without scripting.
pub const STYLESHEET: &str = r#"body { font-family: sans-serif; line-height: 1.6; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
.paragraph { white-space: pre-wrap; margin: 0 0 1rem; }
.text-center { text-align: center; }
.text-right { text-align: right; }
.text-justify { text-align: justify; }
.mark-underline { text-decoration: underline; text-decoration-thickness: 2px; text-underline-offset: 4px; }
.reference-label { font-weight: 600; }
.reference-card { position: relative; display: inline-flex; }
.reference-card.inline { display: inline; }
.reference-trigger { cursor: help; font-weight: 600; color: #16a34a; }
.reference-popover { position: absolute; left: 50%; top: 100%; z-index: 20; margin-top: 0.5rem; transform: translateX(-50%); width: max-content; max-width: 20rem; padding: 0.75rem 1rem; border: 1px solid #ddd; border-radius: 0.75rem; background: #fff; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); font-weight: normal; }
.reference-card:hover > .reference-popover, .reference-card:focus-within > .reference-popover { display: block; }
.reference-popover > span { display: block; }
.card-heading { font-weight: 600; }
.card-reading, .card-field, .card-source { font-size: 0.75rem; color: #666; }
.card-source { text-transform: uppercase; font-size: 0.625rem; }
ruby { white-space: nowrap; }
rt { font-size: 0.75rem; color: #666; }
"#;

/// HTML generator
pub struct HtmlGenerator {
    config: HtmlConfig,
    output: String,
}

impl HtmlGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(HtmlConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: HtmlConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    /// Generate HTML for a node sequence, without any wrapper
    pub fn generate(&mut self, nodes: &[PresentationNode]) -> String {
        self.output.clear();
        for node in nodes {
            self.generate_node(node);
        }
        std::mem::take(&mut self.output)
    }

    /// Generate HTML for a rendered document
    ///
    /// A present document is wrapped in the configured container even when
    /// it rendered to nothing. An absent document yields the placeholder, if
    /// one is configured, or an empty string.
    pub fn generate_document(&mut self, nodes: Option<&[PresentationNode]>) -> String {
        let Some(nodes) = nodes else {
            return match self.config.empty_placeholder.as_deref() {
                Some(text) => format!(
                    "<p class=\"lesson-placeholder\">{}</p>",
                    escape_html(text)
                ),
                None => String::new(),
            };
        };

        let body = self.generate(nodes);
        format!(
            "<div class=\"{}\">{}</div>",
            escape_html(&self.config.container_class),
            body
        )
    }

    /// Generate a single node
    fn generate_node(&mut self, node: &PresentationNode) {
        match node {
            PresentationNode::Text { text } => self.output.push_str(&escape_html(text)),
            PresentationNode::Element(element) => self.generate_element(element),
            PresentationNode::ReferenceCard(card) => self.generate_card(card),
        }
    }

    /// Generate an element and its children
    fn generate_element(&mut self, element: &Element) {
        self.output.push('<');
        self.output.push_str(element.tag);
        if let Some(ref class) = element.class {
            self.push_attribute("class", class);
        }
        for (name, value) in &element.attributes {
            self.push_attribute(name, value);
        }
        self.output.push('>');

        for child in &element.children {
            self.generate_node(child);
        }

        self.output.push_str("</");
        self.output.push_str(element.tag);
        self.output.push('>');
    }

    /// Generate a reference card: a focusable trigger plus its popover
    fn generate_card(&mut self, card: &ReferenceCard) {
        let popover_id = card.popover_id();

        self.output.push_str("<span");
        let class = if card.inline {
            "reference-card inline"
        } else {
            "reference-card"
        };
        self.push_attribute("class", class);
        self.push_attribute("data-state", card.state.as_str());
        self.output.push('>');

        // Trigger
        self.output.push_str("<span");
        self.push_attribute("class", "reference-trigger");
        self.push_attribute("tabindex", "0");
        if card.is_open() {
            self.push_attribute("aria-describedby", &popover_id);
        }
        self.output.push('>');
        for child in &card.label {
            self.generate_node(child);
        }
        self.output.push_str("</span>");

        // Popover, out of layout while closed
        self.output.push_str("<span");
        self.push_attribute("id", &popover_id);
        self.push_attribute("role", "tooltip");
        self.push_attribute("class", "reference-popover");
        if !card.is_open() {
            self.output.push_str(" hidden");
        }
        self.output.push('>');
        self.generate_card_content(&card.content);
        self.output.push_str("</span>");

        self.output.push_str("</span>");
    }

    /// Generate the lines of a card popover
    fn generate_card_content(&mut self, content: &CardContent) {
        if let Some(ref heading) = content.heading {
            self.push_line("card-heading", heading);
        }
        if let Some(ref reading) = content.reading {
            self.push_line("card-reading", reading);
        }
        if let Some(ref meaning) = content.meaning {
            self.push_line("card-meaning", meaning);
        }
        if !content.details.is_empty() {
            self.output.push_str("<span class=\"card-fields\">");
            for field in &content.details {
                self.output.push_str("<span class=\"card-field\"><span class=\"card-field-name\">");
                self.output.push_str(&escape_html(&field.name));
                self.output.push_str(":</span> <span class=\"card-field-value\">");
                self.output.push_str(&escape_html(&field.value));
                self.output.push_str("</span></span>");
            }
            self.output.push_str("</span>");
        }
        if let Some(ref source) = content.source {
            self.push_line("card-source", &format!("Source: {}", source));
        }
    }

    fn push_line(&mut self, class: &str, text: &str) {
        self.output.push_str("<span class=\"");
        self.output.push_str(class);
        self.output.push_str("\">");
        self.output.push_str(&escape_html(text));
        self.output.push_str("</span>");
    }

    fn push_attribute(&mut self, name: &str, value: &str) {
        self.output.push(' ');
        self.output.push_str(name);
        self.output.push_str("=\"");
        self.output.push_str(&escape_html(value));
        self.output.push('"');
    }
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a body fragment in a complete page with the embedded stylesheet
pub fn generate_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLESHEET,
        body
    )
}

/// Render a document tree against vocabulary entries straight to HTML
///
/// Builds the reference map, renders, and wraps the result per
/// `config.html`.
pub fn render_document_html(
    node: Option<&DocumentNode>,
    entries: &[VocabularyEntry],
    config: &RenderConfig,
) -> String {
    let references = ReferenceMap::from_entries(entries);
    let nodes = node.map(|node| {
        Renderer::new(&config.card).render(Some(node), RenderContext::new(&references))
    });
    HtmlGenerator::with_config(config.html.clone()).generate_document(nodes.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::{HoverEvent, HoverState};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> DocumentNode {
        serde_json::from_value(value).unwrap()
    }

    fn vocabulary() -> Vec<VocabularyEntry> {
        serde_json::from_value(json!([
            {"ref": {"table": "Words", "key": 1},
             "data": {"Word": "猫", "Furigana": "ねこ", "Meaning": "cat", "part_of_speech": "noun"}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Hello"), "Hello");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"Say "hi""#), "Say &quot;hi&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_paragraph_html() {
        let html = render_document_html(
            Some(&doc(json!({
                "type": "doc",
                "content": [{"type": "paragraph", "attrs": {"textAlign": "right"},
                             "content": [{"type": "text", "text": "a < b"}]}]
            }))),
            &[],
            &RenderConfig::default(),
        );
        assert_eq!(
            html,
            "<div class=\"lesson-content\"><div class=\"paragraph text-right\" role=\"paragraph\">a &lt; b</div></div>"
        );
    }

    #[test]
    fn test_absent_document() {
        let mut config = RenderConfig::default();
        assert_eq!(render_document_html(None, &[], &config), "");

        config.html.empty_placeholder = Some("Nothing yet".to_string());
        assert_eq!(
            render_document_html(None, &[], &config),
            "<p class=\"lesson-placeholder\">Nothing yet</p>"
        );
    }

    #[test]
    fn test_empty_doc_keeps_container() {
        let html = render_document_html(
            Some(&doc(json!({"type": "doc"}))),
            &[],
            &RenderConfig::default(),
        );
        assert_eq!(html, "<div class=\"lesson-content\"></div>");
    }

    #[test]
    fn test_underline_and_ruby_html() {
        let nodes = doc(json!({
            "type": "paragraph",
            "content": [
                {"type": "ruby", "attrs": {"rt": "にち"}, "content": [{"type": "text", "text": "日"}]},
                {"type": "text", "text": "hi", "marks": [{"type": "underline"}]}
            ]
        }));
        let references = ReferenceMap::new();
        let config = RenderConfig::default();
        let rendered =
            Renderer::new(&config.card).render(Some(&nodes), RenderContext::new(&references));
        let html = HtmlGenerator::new().generate(&rendered);

        assert!(html.contains("<ruby><span class=\"ruby-base\">日</span><rt>にち</rt></ruby>"));
        assert!(html.contains("<span class=\"mark-underline\">hi</span>"));
    }

    #[test]
    fn test_closed_card_html() {
        let html = render_document_html(
            Some(&doc(json!({
                "type": "reference",
                "attrs": {"table_name": "Words", "record_key": "1", "value": "neko"}
            }))),
            &vocabulary(),
            &RenderConfig::default(),
        );

        assert!(html.contains("class=\"reference-card\" data-state=\"closed\""));
        assert!(html.contains("<span class=\"reference-trigger\" tabindex=\"0\">neko</span>"));
        assert!(html.contains("id=\"root-card\" role=\"tooltip\" class=\"reference-popover\" hidden>"));
        assert!(html.contains("<span class=\"card-heading\">猫</span>"));
        assert!(html.contains("<span class=\"card-reading\">ねこ</span>"));
        assert!(html.contains("<span class=\"card-meaning\">cat</span>"));
        assert!(html.contains("<span class=\"card-field-name\">part of speech:</span>"));
        assert!(html.contains("<span class=\"card-source\">Source: Words</span>"));
        assert!(!html.contains("aria-describedby"));
    }

    #[test]
    fn test_open_card_html() {
        let card = ReferenceCard {
            key: "k".to_string(),
            label: vec![PresentationNode::text("猫")],
            content: CardContent::default(),
            inline: true,
            state: HoverState::Closed.transition(HoverEvent::PointerEnter),
        };
        let html = HtmlGenerator::new().generate(&[PresentationNode::ReferenceCard(card)]);

        assert!(html.contains("class=\"reference-card inline\" data-state=\"open\""));
        assert!(html.contains("aria-describedby=\"k-card\""));
        assert!(!html.contains(" hidden"));
    }

    #[test]
    fn test_unresolved_reference_html() {
        let html = render_document_html(
            Some(&doc(json!({
                "type": "reference",
                "attrs": {"table_name": "Words", "record_key": 99, "value": "neko"}
            }))),
            &vocabulary(),
            &RenderConfig::default(),
        );
        assert_eq!(
            html,
            "<div class=\"lesson-content\"><span class=\"reference-label\">neko</span></div>"
        );
    }

    #[test]
    fn test_generate_page() {
        let page = generate_page("Lesson <1>", "<p>x</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Lesson &lt;1&gt;</title>"));
        assert!(page.contains(".reference-popover"));
        assert!(page.contains("<p>x</p>"));
    }
}
