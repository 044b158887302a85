//! Renders an element forest into the normalized, line-oriented text form.
//!
//! Lines are terminated with [`LINE_BREAK`] (a markdown hard break). Text leaves are copied
//! verbatim; tags contribute nothing of their own unless a rule for their name exists.
use crate::types::Element;
use std::collections::HashMap;

pub const LINE_BREAK: &str = " \r\n";
pub const BLANK_LINE: &str = " \r\n\r\n";
pub const HEADING_MARKER: &str = "# ";

/// Produces a tag's output from its children and their already rendered text. `children` is
/// empty for self-closing tags.
pub type RenderRule = fn(children: &[Element], inner: String) -> String;

#[derive(Clone)]
pub struct RenderRules {
    rules: HashMap<String, RenderRule>,
    fallback: RenderRule,
}

impl Default for RenderRules {
    fn default() -> Self {
        Self::passthrough()
            .with_rule("br", render_line_break)
            .with_rule("h1", render_heading)
    }
}

enum Step<'a> {
    Enter(&'a Element),
    Exit(&'a Element),
}

impl RenderRules {
    /// A table with no per-tag rules: every tag renders its children unchanged.
    pub fn passthrough() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: render_passthrough,
        }
    }

    pub fn with_rule(mut self, name: &str, rule: RenderRule) -> Self {
        self.rules.insert(name.to_string(), rule);
        self
    }

    pub fn rule_for(&self, name: &str) -> RenderRule {
        self.rules.get(name).copied().unwrap_or(self.fallback)
    }

    /// Renders a forest on an explicit work stack; nesting depth is bounded by the heap.
    pub fn render(&self, elements: &[Element]) -> String {
        // One buffer per open tag, plus the root buffer at the bottom.
        let mut buffers = vec![String::new()];
        let mut steps: Vec<Step<'_>> = elements.iter().rev().map(Step::Enter).collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(Element::Text(text)) => {
                    if let Some(out) = buffers.last_mut() {
                        out.push_str(text);
                    }
                }
                Step::Enter(element) => {
                    buffers.push(String::new());
                    steps.push(Step::Exit(element));
                    steps.extend(element.children().iter().rev().map(Step::Enter));
                }
                Step::Exit(element) => {
                    let inner = buffers.pop().unwrap_or_default();
                    let rendered = self.rule_for(element.name())(element.children(), inner);
                    if let Some(out) = buffers.last_mut() {
                        out.push_str(&rendered);
                    }
                }
            }
        }
        buffers.pop().unwrap_or_default()
    }
}

pub fn render(elements: &[Element]) -> String {
    RenderRules::default().render(elements)
}

fn render_passthrough(_: &[Element], inner: String) -> String {
    inner
}

fn render_line_break(_: &[Element], _: String) -> String {
    BLANK_LINE.to_string()
}

fn render_heading(children: &[Element], inner: String) -> String {
    if children.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = inner
        .split(LINE_BREAK)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{HEADING_MARKER}{line}"))
        .collect();
    format!("{LINE_BREAK}{}{LINE_BREAK}", lines.join(LINE_BREAK))
}
