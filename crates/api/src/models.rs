use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language. Locale-aware endpoints have one backend path per
/// variant; the client picks the path, there is no server-side negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ja,
    En,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Locale::Ja => Locale::En,
            Locale::En => Locale::Ja,
        }
    }

    /// Path suffix selecting the localized endpoint variant.
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Locale::Ja => "-ja",
            Locale::En => "",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ja => write!(f, "ja"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Locale::Ja),
            "en" => Ok(Locale::En),
            other => Err(format!("unknown locale {:?} (expected \"ja\" or \"en\")", other)),
        }
    }
}

/// A scraped trending repository row. Every field is an opaque display
/// string produced by the backend's scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub stars: String,
    #[serde(default)]
    pub url: String,
}

/// A feed entry pre-parsed to JSON by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub link: String,
}

/// JSON feed wrapper returned by the InfoQ endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<RssItem>,
}

/// An AI-generated summary. May contain markdown; the render layer decides
/// whether to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Raw HTML as delivered by an upstream feed description.
///
/// The backend passes feed HTML through unsanitized and so does this client;
/// the render layer is the only consumer and decides how much of it to trust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The raw HTML, tags included.
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    /// Tag-stripped text for terminal display, with the common entities
    /// decoded.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_tag = false;
        for c in self.0.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        decode_entities(out.trim())
    }
}

/// Replace the entities feed descriptions actually use; anything unknown is
/// left as written.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];
        let end = rest
            .char_indices()
            .take(8)
            .find(|&(_, c)| c == ';')
            .map(|(j, _)| j);
        let Some(end) = end else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let (entity, tail) = rest.split_at(end + 1);
        match entity {
            "&amp;" => out.push('&'),
            "&lt;" => out.push('<'),
            "&gt;" => out.push('>'),
            "&quot;" => out.push('"'),
            "&apos;" | "&#39;" => out.push('\''),
            "&nbsp;" => out.push(' '),
            other => out.push_str(other),
        }
        rest = tail;
    }
    out.push_str(rest);
    out
}

/// A normalized XML feed item.
///
/// Fields are never empty: children missing in the source document are
/// substituted with fixed placeholders by [`crate::parsers::parse_feed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: HtmlFragment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_round_trips_through_str() {
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(Locale::Ja.to_string(), "ja");
        assert_eq!(Locale::En.to_string(), "en");
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn locale_toggles_between_the_two_variants() {
        assert_eq!(Locale::Ja.toggled(), Locale::En);
        assert_eq!(Locale::En.toggled(), Locale::Ja);
    }

    #[test]
    fn trending_item_tolerates_missing_fields() {
        let item: TrendingItem = serde_json::from_str(r#"{"name": "rust"}"#).unwrap();
        assert_eq!(item.name, "rust");
        assert_eq!(item.description, "");
        assert_eq!(item.stars, "");
    }

    #[test]
    fn rss_feed_tolerates_missing_items() {
        let feed: RssFeed = serde_json::from_str(r#"{"title": "InfoQ"}"#).unwrap();
        assert!(feed.items.is_empty());
    }

    #[test]
    fn html_fragment_strips_tags_for_plain_text() {
        let fragment = HtmlFragment::new("<p>Hello <b>world</b></p>");
        assert_eq!(fragment.to_plain_text(), "Hello world");
        assert_eq!(fragment.as_raw(), "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn html_fragment_passes_plain_text_through() {
        let fragment = HtmlFragment::new("no markup here");
        assert_eq!(fragment.to_plain_text(), "no markup here");
    }

    #[test]
    fn html_fragment_decodes_common_entities() {
        let fragment = HtmlFragment::new("<p>Tom &amp; Jerry &lt;3&gt; &quot;go&quot;&nbsp;&#39;on&#39;</p>");
        assert_eq!(fragment.to_plain_text(), "Tom & Jerry <3> \"go\" 'on'");
    }

    #[test]
    fn html_fragment_leaves_unknown_entities_and_bare_ampersands() {
        let fragment = HtmlFragment::new("AT&T &euro;5");
        assert_eq!(fragment.to_plain_text(), "AT&T &euro;5");
    }
}
