use crate::types::Element;

/// Pre-order walk over a forest. The callback receives each element with its depth.
pub fn walk(elements: &[Element], f: &mut impl FnMut(&Element, usize)) {
    let mut pending: Vec<(&Element, usize)> = elements.iter().rev().map(|e| (e, 0)).collect();
    while let Some((element, depth)) = pending.pop() {
        f(element, depth);
        pending.extend(element.children().iter().rev().map(|child| (child, depth + 1)));
    }
}

/// Text leaves plus self-closing tags. Matched pairs are never leaves, even when empty.
pub fn count_leaves(elements: &[Element]) -> usize {
    let mut leaves = 0;
    walk(elements, &mut |element, _| {
        if matches!(
            element,
            Element::Text(_) | Element::Tag { children: None, .. }
        ) {
            leaves += 1;
        }
    });
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_text_and_self_closing_leaves() {
        let tree = vec![
            Element::Tag {
                name: "p".to_string(),
                attributes: Vec::new(),
                children: Some(vec![
                    Element::Text("a".to_string()),
                    Element::Tag {
                        name: "br".to_string(),
                        attributes: Vec::new(),
                        children: None,
                    },
                ]),
            },
            Element::Tag {
                name: "div".to_string(),
                attributes: Vec::new(),
                children: Some(Vec::new()),
            },
        ];
        assert_eq!(count_leaves(&tree), 2);
    }

    #[test]
    fn walk_visits_in_document_order_with_depth() {
        let tree = vec![
            Element::Tag {
                name: "ul".to_string(),
                attributes: Vec::new(),
                children: Some(vec![
                    Element::Tag {
                        name: "li".to_string(),
                        attributes: Vec::new(),
                        children: Some(vec![Element::Text("one".to_string())]),
                    },
                    Element::Text("two".to_string()),
                ]),
            },
            Element::Text("after".to_string()),
        ];
        let mut seen = Vec::new();
        walk(&tree, &mut |element, depth| {
            seen.push((element.name().to_string(), depth))
        });
        assert_eq!(
            seen,
            vec![
                ("ul".to_string(), 0),
                ("li".to_string(), 1),
                ("text".to_string(), 2),
                ("text".to_string(), 1),
                ("text".to_string(), 0),
            ]
        );
    }
}
