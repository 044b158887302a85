#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagRole {
    Opening,
    Closing,
    SelfClosing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSegment {
    pub name: String,
    pub role: TagRole,
    pub attributes: Vec<Attribute>,
}

/// A classified piece of markup, before tree assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Tag(TagSegment),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Text(String),
    Tag {
        name: String,
        attributes: Vec<Attribute>,
        /// `None` for self-closing tags, `Some` (possibly empty) for matched pairs.
        children: Option<Vec<Element>>,
    },
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::Text(_) => "text",
            Element::Tag { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Tag {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }
}

// The derived drop would recurse once per nesting level. Detached child lists are drained
// through a flat work list instead.
impl Drop for Element {
    fn drop(&mut self) {
        let Element::Tag {
            children: Some(children),
            ..
        } = self
        else {
            return;
        };
        if children.iter().all(|child| child.children().is_empty()) {
            return;
        }
        let mut pending = std::mem::take(children);
        while let Some(mut element) = pending.pop() {
            if let Element::Tag {
                children: Some(children),
                ..
            } = &mut element
            {
                pending.append(children);
            }
        }
    }
}
