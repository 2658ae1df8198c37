//! Page-builder content model.
//!
//! A page is an ordered sequence of typed blocks. Block payloads are a
//! tagged union so adding a block type is a compile-time-checked change,
//! while the wire shape stays the editor's `{id, type, content, settings}`.

pub mod block;
pub mod validate;

pub use block::{Block, BlockContent, BlockSettings};
pub use validate::{sanitize_blocks, validate_blocks};
