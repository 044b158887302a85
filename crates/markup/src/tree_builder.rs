//! Rebuilds a nested element forest from a flat segment sequence.
//!
//! Contract (per range of segments, front to back):
//! - Text becomes a text leaf; a self-closing tag becomes a childless element.
//! - An opening tag is paired with a closing tag of the same name found by scanning forward
//!   inside the current range. Everything strictly between the two becomes its children and
//!   the scan resumes after the closing tag.
//! - An opening tag without a match is dropped (only the tag itself is consumed; what follows
//!   is processed at the same level). A closing tag reached at the front is an orphan and is
//!   skipped. Both are reported as [`StructureIssue`]s and never abort the build.
//!
//! With [`TagMatching::NearestForward`] (the default) matching is by name only, without a depth
//! count: `<div><div></div></div>` pairs the outer `<div>` with the first `</div>`, the inner
//! opening tag is dropped and the final `</div>` becomes an orphan.
//! [`TagMatching::Balanced`] counts same-name opening tags during the scan instead.
//!
//! The builder keeps its own frame stack rather than recursing, so nesting depth is bounded by
//! the heap rather than the thread stack.
use crate::types::{Element, Segment, TagRole, TagSegment};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagMatching {
    #[default]
    NearestForward,
    Balanced,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TreeBuilderConfig {
    pub matching: TagMatching,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureIssue {
    UnmatchedOpeningTag { name: String, index: usize },
    OrphanClosingTag { name: String, index: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeBuilderResult {
    pub elements: Vec<Element>,
    pub issues: Vec<StructureIssue>,
}

struct Frame<'a> {
    cursor: usize,
    end: usize,
    out: Vec<Element>,
    owner: Option<&'a TagSegment>,
}

impl<'a> Frame<'a> {
    fn new(cursor: usize, end: usize, owner: Option<&'a TagSegment>) -> Self {
        Self {
            cursor,
            end,
            out: Vec::new(),
            owner,
        }
    }
}

/// For every opening tag, the index of the closing tag it pairs with when nothing limits the
/// scan. A build range only accepts a pair whose closing index lies inside it.
fn closing_table(segments: &[Segment], matching: TagMatching) -> Vec<Option<usize>> {
    let mut table = vec![None; segments.len()];
    match matching {
        TagMatching::NearestForward => {
            let mut next_closing: HashMap<&str, usize> = HashMap::new();
            for (index, segment) in segments.iter().enumerate().rev() {
                let Segment::Tag(tag) = segment else { continue };
                match tag.role {
                    TagRole::Closing => {
                        next_closing.insert(tag.name.as_str(), index);
                    }
                    TagRole::Opening => table[index] = next_closing.get(tag.name.as_str()).copied(),
                    TagRole::SelfClosing => {}
                }
            }
        }
        TagMatching::Balanced => {
            let mut open: HashMap<&str, Vec<usize>> = HashMap::new();
            for (index, segment) in segments.iter().enumerate() {
                let Segment::Tag(tag) = segment else { continue };
                match tag.role {
                    TagRole::Opening => open.entry(tag.name.as_str()).or_default().push(index),
                    TagRole::Closing => {
                        if let Some(opener) = open.get_mut(tag.name.as_str()).and_then(Vec::pop) {
                            table[opener] = Some(index);
                        }
                    }
                    TagRole::SelfClosing => {}
                }
            }
        }
    }
    table
}

fn tag_element(tag: &TagSegment, children: Option<Vec<Element>>) -> Element {
    Element::Tag {
        name: tag.name.clone(),
        attributes: tag.attributes.clone(),
        children,
    }
}

fn report(issues: &mut Vec<StructureIssue>, issue: StructureIssue) {
    match &issue {
        StructureIssue::UnmatchedOpeningTag { name, index } => {
            log::warn!(target: "markup.tree", "no closing tag for <{name}> at segment {index}; subtree dropped");
        }
        StructureIssue::OrphanClosingTag { name, index } => {
            log::warn!(target: "markup.tree", "closing tag </{name}> at segment {index} has no opening tag");
        }
    }
    issues.push(issue);
}

pub fn build_tree(segments: &[Segment]) -> TreeBuilderResult {
    build_tree_with_config(segments, TreeBuilderConfig::default())
}

pub fn build_tree_with_config(
    segments: &[Segment],
    config: TreeBuilderConfig,
) -> TreeBuilderResult {
    let closing = closing_table(segments, config.matching);
    let mut issues = Vec::new();
    let mut stack = vec![Frame::new(0, segments.len(), None)];

    while let Some(mut frame) = stack.pop() {
        if frame.cursor == frame.end {
            let Some(owner) = frame.owner else {
                return TreeBuilderResult {
                    elements: frame.out,
                    issues,
                };
            };
            let Some(parent) = stack.last_mut() else {
                unreachable!("tag frames are always pushed above their parent");
            };
            parent.out.push(tag_element(owner, Some(frame.out)));
            continue;
        }

        let index = frame.cursor;
        frame.cursor += 1;
        match &segments[index] {
            Segment::Text(text) => frame.out.push(Element::Text(text.clone())),
            Segment::Tag(tag) => match tag.role {
                TagRole::SelfClosing => frame.out.push(tag_element(tag, None)),
                TagRole::Closing => report(
                    &mut issues,
                    StructureIssue::OrphanClosingTag {
                        name: tag.name.clone(),
                        index,
                    },
                ),
                TagRole::Opening => {
                    match closing[index].filter(|&close| close < frame.end) {
                        Some(close) => {
                            frame.cursor = close + 1;
                            stack.push(frame);
                            stack.push(Frame::new(index + 1, close, Some(tag)));
                            continue;
                        }
                        None => report(
                            &mut issues,
                            StructureIssue::UnmatchedOpeningTag {
                                name: tag.name.clone(),
                                index,
                            },
                        ),
                    }
                }
            },
        }
        stack.push(frame);
    }

    unreachable!("the root frame returns before the stack empties")
}
