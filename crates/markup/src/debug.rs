use crate::types::Element;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn push_preview_escaped(out: &mut String, s: &str, max_chars: usize) {
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            out.push('…');
            break;
        }
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
}

/// One line per element, indented by depth, capped at `cap` lines.
///
/// Text is quoted with control characters escaped, so the outline is stable to compare in
/// fixtures. Self-closing tags are printed as `<name/>`.
pub fn outline(elements: &[Element], cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Vec<(&Element, usize)> = elements.iter().rev().map(|e| (e, 0)).collect();
    while let Some((element, depth)) = pending.pop() {
        if out.len() == cap {
            break;
        }
        let mut line = INDENT_STEP.repeat(depth);
        match element {
            Element::Text(text) => {
                line.push('"');
                push_preview_escaped(&mut line, text, PREVIEW_CHARS);
                line.push('"');
            }
            Element::Tag {
                name,
                attributes,
                children,
            } => {
                line.push('<');
                line.push_str(name);
                for attr in attributes {
                    line.push(' ');
                    line.push_str(&attr.name);
                    if let Some(value) = &attr.value {
                        line.push_str("=\"");
                        line.push_str(value);
                        line.push('"');
                    }
                }
                if children.is_none() {
                    line.push('/');
                }
                line.push('>');
                pending.extend(element.children().iter().rev().map(|c| (c, depth + 1)));
            }
        }
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attribute;

    #[test]
    fn outline_indents_children_and_marks_self_closing() {
        let tree = vec![Element::Tag {
            name: "p".to_string(),
            attributes: vec![Attribute::with_value("id", "x"), Attribute::boolean("hidden")],
            children: Some(vec![
                Element::Text("a\r\nb".to_string()),
                Element::Tag {
                    name: "br".to_string(),
                    attributes: Vec::new(),
                    children: None,
                },
            ]),
        }];
        assert_eq!(
            outline(&tree, usize::MAX),
            vec![
                "<p id=\"x\" hidden>".to_string(),
                "  \"a\\r\\nb\"".to_string(),
                "  <br/>".to_string(),
            ]
        );
        assert_eq!(outline(&tree, 1).len(), 1);
    }
}
