//! Normalizer for raw RSS/XML feed text.
//!
//! The cloud-vendor and Golang Weekly endpoints return the upstream feed XML
//! verbatim; this module turns it into a uniform sequence of [`FeedItem`]s
//! that the render layer can consume without null checks.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::ApiError;
use crate::models::{FeedItem, HtmlFragment};

pub const NO_TITLE: &str = "No Title";
pub const NO_LINK: &str = "#";
pub const NO_DATE: &str = "No Date";
pub const NO_DESCRIPTION: &str = "No Description";

/// Parse an RSS document from raw XML bytes.
///
/// Per `<item>`, the four expected children (`title`, `link`, `pubDate`,
/// `description`) are collected; any child absent in the source is
/// substituted with its fixed placeholder, so every produced item is fully
/// populated. Document order is preserved, nothing is deduplicated or
/// sorted, and a document with zero `<item>` elements parses to an empty
/// vector rather than an error.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedItem>, ApiError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<FeedItemBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();

                if name == "item" {
                    current_item = Some(FeedItemBuilder::default());
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" {
                    if let Some(builder) = current_item.take() {
                        items.push(builder.build());
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if !text.is_empty() {
                        item.push(&current_element, &text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                // CDATA carries the description's HTML; keep it verbatim,
                // without entity escaping.
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                    if !text.is_empty() {
                        item.push(&current_element, &text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ApiError::Xml(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

#[derive(Default)]
struct FeedItemBuilder {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    description: Option<String>,
}

impl FeedItemBuilder {
    /// Append text to the slot for the named child element. A description
    /// may arrive as several text/CDATA chunks; they are concatenated.
    fn push(&mut self, element: &str, text: &str) {
        let slot = match element {
            "title" => &mut self.title,
            "link" => &mut self.link,
            "pubDate" => &mut self.pub_date,
            "description" => &mut self.description,
            _ => return,
        };
        match slot {
            Some(existing) => existing.push_str(text),
            None => *slot = Some(text.to_string()),
        }
    }

    fn build(self) -> FeedItem {
        FeedItem {
            title: self.title.unwrap_or_else(|| NO_TITLE.to_string()),
            link: self.link.unwrap_or_else(|| NO_LINK.to_string()),
            pub_date: self.pub_date.unwrap_or_else(|| NO_DATE.to_string()),
            description: HtmlFragment::new(
                self.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_item() {
        let xml = r#"<rss><channel>
            <item>
                <title>Foo</title>
                <link>http://x</link>
                <pubDate>D</pubDate>
                <description><![CDATA[<b>hi</b>]]></description>
            </item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Foo");
        assert_eq!(items[0].link, "http://x");
        assert_eq!(items[0].pub_date, "D");
        assert_eq!(items[0].description.as_raw(), "<b>hi</b>");
    }

    #[test]
    fn substitutes_placeholders_for_missing_children() {
        let xml = r#"<rss><channel>
            <item><title>Only a title</title></item>
            <item><link>http://only-a-link</link></item>
            <item></item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].title, "Only a title");
        assert_eq!(items[0].link, NO_LINK);
        assert_eq!(items[0].pub_date, NO_DATE);
        assert_eq!(items[0].description.as_raw(), NO_DESCRIPTION);

        assert_eq!(items[1].title, NO_TITLE);
        assert_eq!(items[1].link, "http://only-a-link");

        assert_eq!(items[2].title, NO_TITLE);
        assert_eq!(items[2].link, NO_LINK);
        assert_eq!(items[2].pub_date, NO_DATE);
        assert_eq!(items[2].description.as_raw(), NO_DESCRIPTION);
    }

    #[test]
    fn zero_items_yields_empty_sequence() {
        let xml = r#"<rss><channel><title>Empty feed</title></channel></rss>"#;
        let items = parse_feed(xml.as_bytes()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn preserves_document_order_without_dedup() {
        let xml = r#"<rss><channel>
            <item><title>first</title></item>
            <item><title>second</title></item>
            <item><title>first</title></item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "first"]);
    }

    #[test]
    fn unescapes_entity_encoded_text() {
        let xml = r#"<rss><channel>
            <item><title>Tom &amp; Jerry</title></item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(items[0].title, "Tom & Jerry");
    }

    #[test]
    fn cdata_description_keeps_html_unescaped() {
        let xml = r#"<rss><channel>
            <item>
                <description><![CDATA[<p>A &amp; B</p>]]></description>
            </item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        // CDATA content is raw text, entities inside it are not decoded.
        assert_eq!(items[0].description.as_raw(), "<p>A &amp; B</p>");
    }

    #[test]
    fn ignores_channel_level_elements() {
        let xml = r#"<rss><channel>
            <title>Channel title</title>
            <link>http://channel</link>
            <item><title>Item title</title></item>
        </channel></rss>"#;

        let items = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Item title");
        // The channel link is not attributed to the item.
        assert_eq!(items[0].link, NO_LINK);
    }

    #[test]
    fn malformed_document_is_an_error() {
        // Mismatched end tag.
        let xml = r#"<rss><channel><item><title>broken</wrong></item></channel></rss>"#;
        assert!(parse_feed(xml.as_bytes()).is_err());
    }
}
