//! Block types for the page builder.

use serde::{Deserialize, Serialize};

/// One typed, orderable content unit within a page.
///
/// Serializes as `{"id": ..., "type": ..., "content": {...}, "settings": {...}}`,
/// the shape the visual editor produces and the pages table stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique within a page, assigned by the editor, immutable.
    pub id: String,

    #[serde(flatten)]
    pub content: BlockContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BlockSettings>,
}

/// Block payloads, tagged by block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum BlockContent {
    Hero(HeroContent),
    Heading(HeadingContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Button(ButtonContent),
    Html(HtmlContent),
    Spacer(SpacerContent),
    Columns(ColumnsContent),
    Gallery(GalleryContent),
    Card(CardContent),
    Form(FormContent),
}

impl BlockContent {
    /// Machine name of the block type, as stored on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockContent::Hero(_) => "hero",
            BlockContent::Heading(_) => "heading",
            BlockContent::Text(_) => "text",
            BlockContent::Image(_) => "image",
            BlockContent::Video(_) => "video",
            BlockContent::Button(_) => "button",
            BlockContent::Html(_) => "html",
            BlockContent::Spacer(_) => "spacer",
            BlockContent::Columns(_) => "columns",
            BlockContent::Gallery(_) => "gallery",
            BlockContent::Card(_) => "card",
            BlockContent::Form(_) => "form",
        }
    }
}

/// Full-width banner with optional background image and call-to-action buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingContent {
    pub text: String,
    /// Heading level, 1 through 6.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    /// Text format hint from the editor ("plain" when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoContent {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonContent {
    pub text: String,
    pub link: String,
    #[serde(default)]
    pub variant: ButtonVariant,
    #[serde(default)]
    pub size: ButtonSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Outline,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// Raw HTML escape hatch; sanitized at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlContent {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerContent {
    /// Vertical space in pixels.
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsContent {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryContent {
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub required: bool,
}

fn default_input_type() -> String {
    "text".to_string()
}

/// Per-block layout and style overrides.
///
/// All fields are optional; absence means "inherit the theme default."
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Per-side spacing in pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<i32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn heading_block_wire_shape() {
        let json = serde_json::json!({
            "id": "b1",
            "type": "heading",
            "content": { "text": "Hi", "level": 1 }
        });

        let block: Block = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(block.id, "b1");
        assert_eq!(block.content.type_name(), "heading");
        match &block.content {
            BlockContent::Heading(h) => {
                assert_eq!(h.text, "Hi");
                assert_eq!(h.level, 1);
            }
            other => panic!("expected heading, got {}", other.type_name()),
        }

        // Settings are omitted when absent, so the round trip is exact.
        assert_eq!(serde_json::to_value(&block).unwrap(), json);
    }

    #[test]
    fn unknown_block_type_rejected() {
        let json = serde_json::json!({
            "id": "b1",
            "type": "carousel",
            "content": {}
        });
        assert!(serde_json::from_value::<Block>(json).is_err());
    }

    #[test]
    fn hero_camel_case_fields() {
        let json = serde_json::json!({
            "id": "h1",
            "type": "hero",
            "content": {
                "title": "Welcome",
                "subtitle": "CareOn",
                "backgroundImage": "/img/hero.jpg",
                "overlayOpacity": 0.4,
                "buttons": [
                    { "text": "Start", "link": "/start", "variant": "outline", "size": "lg" }
                ]
            }
        });

        let block: Block = serde_json::from_value(json.clone()).unwrap();
        let BlockContent::Hero(hero) = &block.content else {
            panic!("expected hero");
        };
        assert_eq!(hero.background_image.as_deref(), Some("/img/hero.jpg"));
        assert_eq!(hero.buttons[0].variant, ButtonVariant::Outline);
        assert_eq!(hero.buttons[0].size, ButtonSize::Lg);
        assert_eq!(serde_json::to_value(&block).unwrap(), json);
    }

    #[test]
    fn button_defaults_applied() {
        let json = serde_json::json!({
            "id": "b1",
            "type": "button",
            "content": { "text": "버튼", "link": "#" }
        });
        let block: Block = serde_json::from_value(json).unwrap();
        let BlockContent::Button(button) = &block.content else {
            panic!("expected button");
        };
        assert_eq!(button.variant, ButtonVariant::Default);
        assert_eq!(button.size, ButtonSize::Md);
    }

    #[test]
    fn video_loop_keyword_field() {
        let json = serde_json::json!({
            "id": "v1",
            "type": "video",
            "content": { "src": "/v.mp4", "loop": true, "muted": true }
        });
        let block: Block = serde_json::from_value(json.clone()).unwrap();
        let BlockContent::Video(video) = &block.content else {
            panic!("expected video");
        };
        assert_eq!(video.looped, Some(true));
        assert_eq!(serde_json::to_value(&block).unwrap(), json);
    }

    #[test]
    fn settings_round_trip() {
        let json = serde_json::json!({
            "id": "t1",
            "type": "text",
            "content": { "text": "hello" },
            "settings": {
                "margin": { "top": 8, "bottom": 8 },
                "backgroundColor": "#fff",
                "textAlign": "center",
                "borderRadius": 12,
                "shadow": true
            }
        });
        let block: Block = serde_json::from_value(json.clone()).unwrap();
        let settings = block.settings.as_ref().unwrap();
        assert_eq!(settings.text_align, Some(TextAlign::Center));
        assert_eq!(settings.border_radius, Some(12));
        assert_eq!(serde_json::to_value(&block).unwrap(), json);
    }

    #[test]
    fn block_order_preserved_in_sequence() {
        let json = serde_json::json!([
            { "id": "a", "type": "spacer", "content": { "height": 50 } },
            { "id": "b", "type": "text", "content": { "text": "one" } },
            { "id": "c", "type": "html", "content": { "html": "<p>two</p>" } }
        ]);
        let blocks: Vec<Block> = serde_json::from_value(json.clone()).unwrap();
        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(serde_json::to_value(&blocks).unwrap(), json);
    }
}
