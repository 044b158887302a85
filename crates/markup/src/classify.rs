//! Turns raw pieces into typed segments.
//!
//! Tag pieces are split on single spaces only. There is no quoting support: an attribute
//! value containing a space is cut in two, and the second half becomes its own attribute.
//! Attribute tokens never fail to parse; anything without `="` is a valueless attribute.
use crate::segmenter::RawSegment;
use crate::types::{Attribute, Segment, TagRole, TagSegment};

const VALUE_SEPARATOR: &str = "=\"";

fn tag_role(raw: &str) -> TagRole {
    if raw.starts_with('/') {
        TagRole::Closing
    } else if raw.ends_with('/') {
        TagRole::SelfClosing
    } else {
        TagRole::Opening
    }
}

// A trailing slash wins over a leading one; "/x/" keeps its leading slash in the body.
fn tag_body(raw: &str) -> &str {
    raw.strip_suffix('/')
        .or_else(|| raw.strip_prefix('/'))
        .unwrap_or(raw)
}

fn parse_attribute(token: &str) -> Attribute {
    let mut parts = token.split(VALUE_SEPARATOR);
    let name = parts.next().unwrap_or_default();
    match parts.next() {
        Some(raw_value) => {
            // Only the piece up to a second `="` counts; its last character is taken to be the
            // closing quote.
            let mut value = raw_value.to_string();
            value.pop();
            Attribute::with_value(name, value)
        }
        None => Attribute::boolean(token),
    }
}

pub fn classify_tag(raw: &str) -> TagSegment {
    let role = tag_role(raw);
    let mut tokens = tag_body(raw).split(' ');
    let name = tokens.next().unwrap_or_default().to_lowercase();
    let attributes = tokens.map(parse_attribute).collect();
    TagSegment {
        name,
        role,
        attributes,
    }
}

pub fn classify(raw: RawSegment<'_>) -> Segment {
    match raw {
        RawSegment::Text(text) => Segment::Text(text.to_string()),
        RawSegment::Tag(tag) => Segment::Tag(classify_tag(tag)),
    }
}

pub fn classify_all(raw: &[RawSegment<'_>]) -> Vec<Segment> {
    raw.iter().copied().map(classify).collect()
}
