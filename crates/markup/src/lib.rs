//! Minimal markup parsing and normalization.
//!
//! Pipeline: [`segment`] → [`classify_all`] → [`build_tree`] → [`render`]. Every stage is a
//! pure function and none of them can fail; malformed input degrades into a smaller tree.
//!
//! This is deliberately not an HTML parser: comments, doctypes, entities, quoting variants and
//! raw-text elements receive no special treatment.
pub mod debug;
pub mod traverse;

mod classify;
mod render;
mod segmenter;
mod tree_builder;
mod types;

pub use crate::classify::{classify, classify_all, classify_tag};
pub use crate::render::{
    BLANK_LINE, HEADING_MARKER, LINE_BREAK, RenderRule, RenderRules, render,
};
pub use crate::segmenter::{RawSegment, segment};
pub use crate::tree_builder::{
    StructureIssue, TagMatching, TreeBuilderConfig, TreeBuilderResult, build_tree,
    build_tree_with_config,
};
pub use crate::types::{Attribute, Element, Segment, TagRole, TagSegment};

pub fn parse(input: &str) -> TreeBuilderResult {
    parse_with_config(input, TreeBuilderConfig::default())
}

pub fn parse_with_config(input: &str, config: TreeBuilderConfig) -> TreeBuilderResult {
    let segments = classify_all(&segment(input));
    build_tree_with_config(&segments, config)
}

/// Parses and renders `input` into its normalized text form.
pub fn normalize(input: &str) -> String {
    normalize_with_config(input, TreeBuilderConfig::default())
}

pub fn normalize_with_config(input: &str, config: TreeBuilderConfig) -> String {
    render(&parse_with_config(input, config).elements)
}
