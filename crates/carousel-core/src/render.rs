//! Carousel items, item rendering and the tripled track

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::window::TRACK_COPIES;

/// Titles longer than this many characters are clipped by the default renderer
pub const TITLE_CLIP: usize = 40;

/// Descriptions longer than this many characters are clipped by the default renderer
pub const DESCRIPTION_CLIP: usize = 100;

/// Placeholder shown when a slide image fails to load
const IMAGE_FALLBACK: &str = "data:image/svg+xml;charset=UTF-8,%3Csvg xmlns=\\'http://www.w3.org/2000/svg\\' width=\\'300\\' height=\\'200\\' viewBox=\\'0 0 300 200\\'%3E%3Crect fill=\\'%23ddd\\' width=\\'300\\' height=\\'200\\'/%3E%3Ctext fill=\\'%23555\\' font-family=\\'sans-serif\\' font-size=\\'16\\' text-anchor=\\'middle\\' x=\\'150\\' y=\\'100\\'%3EImage not found%3C/text%3E%3C/svg%3E";

/// Item identifier as supplied by the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Numeric id
    Number(i64),
    /// String id
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// One display item
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    /// Optional stable id
    #[serde(default)]
    pub id: Option<ItemId>,
    /// Title text
    #[serde(default)]
    pub title: String,
    /// Description text
    #[serde(default)]
    pub description: String,
    /// Image URL
    #[serde(default)]
    pub photo: String,
}

impl CarouselItem {
    /// Item with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Read an item from arbitrary JSON, ignoring fields of the wrong type
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let id = match value.get("id") {
            Some(Value::Number(n)) => n.as_i64().map(ItemId::Number),
            Some(Value::String(s)) if !s.is_empty() => Some(ItemId::Text(s.clone())),
            _ => None,
        };
        Self {
            id,
            title: text("title"),
            description: text("description"),
            photo: text("photo"),
        }
    }
}

/// Produces the markup of one slide
///
/// `index` is the item's ring index; the track repeats the output three
/// times. The markup must have a single root element.
pub trait ItemRenderer {
    /// Render item `index`
    fn render(&self, index: usize, item: &CarouselItem) -> String;
}

impl<F> ItemRenderer for F
where
    F: Fn(usize, &CarouselItem) -> String,
{
    fn render(&self, index: usize, item: &CarouselItem) -> String {
        self(index, item)
    }
}

/// Image, clipped title and clipped description in a dimmed box
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl ItemRenderer for DefaultRenderer {
    fn render(&self, index: usize, item: &CarouselItem) -> String {
        let id = item
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| index.to_string());
        format!(
            concat!(
                r#"<div class="box blurr" role="tabpanel" id="slide-{id}" aria-labelledby="tab-{index}">"#,
                r#"<img class="slide" src="{photo}" alt="{alt}" onerror="this.onerror=null;this.src='{fallback}';" />"#,
                r#"<div class="slide-content">"#,
                r#"<h3 class="slide-title">{title}</h3>"#,
                r#"<p class="slide-description">{description}</p>"#,
                r#"</div></div>"#
            ),
            id = escape_html(&id),
            index = index,
            photo = escape_html(&item.photo),
            alt = escape_html(&item.title),
            fallback = IMAGE_FALLBACK,
            title = escape_html(&clip_text(&item.title, TITLE_CLIP)),
            description = escape_html(&clip_text(&item.description, DESCRIPTION_CLIP)),
        )
    }
}

/// Truncate to `max_chars` characters and append `...` if anything was cut
pub fn clip_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Rendered slides: the first `ring_size` items, three times back to back
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    ring_size: usize,
    slides: Vec<String>,
}

impl Track {
    /// Render the first `ring_size` items and repeat them
    ///
    /// Each item is rendered once; the copies share its markup.
    pub fn build<R: ItemRenderer + ?Sized>(
        items: &[CarouselItem],
        ring_size: usize,
        renderer: &R,
    ) -> Self {
        let ring: Vec<String> = items
            .iter()
            .take(ring_size)
            .enumerate()
            .map(|(index, item)| renderer.render(index, item))
            .collect();
        let slides = ring
            .iter()
            .cycle()
            .take(ring.len() * TRACK_COPIES)
            .cloned()
            .collect();
        Self {
            ring_size: ring.len(),
            slides,
        }
    }

    /// Number of distinct items
    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    /// All slides (`3 * ring_size`)
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Total number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if the track has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_long_title() {
        let title = "Getting to Yes: Negotiating Agreement Without Giving In";
        let clipped = clip_text(title, TITLE_CLIP);
        assert_eq!(clipped, "Getting to Yes: Negotiating Agreement Wi...");
        assert_eq!(clipped.chars().count(), TITLE_CLIP + 3);
    }

    #[test]
    fn test_clip_short_text_is_borrowed() {
        assert!(matches!(clip_text("Foster", TITLE_CLIP), Cow::Borrowed("Foster")));
        let exact = "a".repeat(TITLE_CLIP);
        assert_eq!(clip_text(&exact, TITLE_CLIP), exact.as_str());
    }

    #[test]
    fn test_clip_counts_characters() {
        assert_eq!(clip_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_html("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_default_renderer() {
        let item = CarouselItem {
            id: Some(ItemId::Number(3)),
            title: "Getting to Yes: Negotiating Agreement Without Giving In".to_string(),
            description: "Short".to_string(),
            photo: "book3.jpg".to_string(),
        };
        let html = DefaultRenderer.render(2, &item);

        assert!(html.starts_with(r#"<div class="box blurr" role="tabpanel" id="slide-3" aria-labelledby="tab-2">"#));
        assert!(html.contains(r#"src="book3.jpg""#));
        assert!(html.contains("<h3 class=\"slide-title\">Getting to Yes: Negotiating Agreement Wi...</h3>"));
        assert!(html.contains("<p class=\"slide-description\">Short</p>"));
    }

    #[test]
    fn test_default_renderer_without_id_uses_index() {
        let html = DefaultRenderer.render(4, &CarouselItem::titled("Foster"));
        assert!(html.contains(r#"id="slide-4""#));
    }

    #[test]
    fn test_item_from_value() {
        let value = serde_json::json!({
            "id": 7,
            "title": "So Late in the Day",
            "description": 12,
            "photo": "book7.jpg"
        });
        let item = CarouselItem::from_value(&value);
        assert_eq!(item.id, Some(ItemId::Number(7)));
        assert_eq!(item.title, "So Late in the Day");
        assert_eq!(item.description, "");
        assert_eq!(item.photo, "book7.jpg");
    }

    #[test]
    fn test_track_triples_items() {
        let items: Vec<CarouselItem> = (0..9).map(|i| CarouselItem::titled(format!("{i}"))).collect();
        let track = Track::build(&items, 7, &DefaultRenderer);

        assert_eq!(track.ring_size(), 7);
        assert_eq!(track.len(), 21);
        assert_eq!(track.slides()[0], track.slides()[7]);
        assert_eq!(track.slides()[6], track.slides()[20]);
        assert_ne!(track.slides()[0], track.slides()[1]);
    }

    #[test]
    fn test_track_with_closure_renderer() {
        let items = vec![CarouselItem::titled("a"), CarouselItem::titled("b")];
        let renderer = |index: usize, item: &CarouselItem| format!("<i>{index}{}</i>", item.title);
        let track = Track::build(&items, 2, &renderer);

        assert_eq!(track.slides(), ["<i>0a</i>", "<i>1b</i>", "<i>0a</i>", "<i>1b</i>", "<i>0a</i>", "<i>1b</i>"]);
    }
}
