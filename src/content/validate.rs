//! Server-side block validation and sanitization.

use std::collections::HashSet;

use super::block::{Block, BlockContent};

/// Validate a block array before it is persisted.
///
/// Returns a list of validation error messages. An empty list means the
/// blocks are valid. An empty block array is valid (the page renders empty).
pub fn validate_blocks(blocks: &[Block]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (index, block) in blocks.iter().enumerate() {
        if block.id.trim().is_empty() {
            errors.push(format!("block {index}: id must not be empty"));
        } else if !seen_ids.insert(block.id.as_str()) {
            errors.push(format!("block {index}: duplicate block id '{}'", block.id));
        }

        match &block.content {
            BlockContent::Heading(heading) => {
                if !(1..=6).contains(&heading.level) {
                    errors.push(format!(
                        "block {index}: heading level must be between 1 and 6, got {}",
                        heading.level
                    ));
                }
            }
            BlockContent::Image(image) => {
                if image.src.trim().is_empty() {
                    errors.push(format!("block {index}: image src must not be empty"));
                }
            }
            BlockContent::Video(video) => {
                if video.src.trim().is_empty() {
                    errors.push(format!("block {index}: video src must not be empty"));
                }
            }
            BlockContent::Gallery(gallery) => {
                for (i, img) in gallery.images.iter().enumerate() {
                    if img.src.trim().is_empty() {
                        errors.push(format!(
                            "block {index}: gallery image {i} src must not be empty"
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    errors
}

/// Sanitize all text-bearing block fields in place.
///
/// Applies `ammonia::clean()` to fields that end up in rendered HTML,
/// stripping scripts, event handlers, and other XSS vectors while keeping
/// safe formatting tags.
pub fn sanitize_blocks(blocks: &mut [Block]) {
    for block in blocks.iter_mut() {
        match &mut block.content {
            BlockContent::Hero(hero) => {
                hero.title = sanitize_html(&hero.title);
                if let Some(subtitle) = hero.subtitle.as_mut() {
                    *subtitle = sanitize_html(subtitle);
                }
            }
            BlockContent::Heading(heading) => {
                heading.text = sanitize_html(&heading.text);
            }
            BlockContent::Text(text) => {
                text.text = sanitize_html(&text.text);
            }
            BlockContent::Html(html) => {
                html.html = sanitize_html(&html.html);
            }
            BlockContent::Columns(columns) => {
                for column in &mut columns.columns {
                    column.content = sanitize_html(&column.content);
                }
            }
            BlockContent::Card(card) => {
                card.title = sanitize_html(&card.title);
                if let Some(description) = card.description.as_mut() {
                    *description = sanitize_html(description);
                }
            }
            BlockContent::Gallery(gallery) => {
                for image in &mut gallery.images {
                    if let Some(caption) = image.caption.as_mut() {
                        *caption = sanitize_html(caption);
                    }
                }
            }
            BlockContent::Image(_)
            | BlockContent::Video(_)
            | BlockContent::Button(_)
            | BlockContent::Spacer(_)
            | BlockContent::Form(_) => {}
        }
    }
}

/// Sanitize HTML input using ammonia with default settings.
pub fn sanitize_html(input: &str) -> String {
    ammonia::clean(input)
}
