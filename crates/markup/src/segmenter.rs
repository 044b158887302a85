//! Splits raw markup into tag and text pieces.
//!
//! The split is purely lexical: the input is cut on every `<`, then every resulting chunk
//! is cut on every `>`. Empty pieces are discarded at both levels. Inside a chunk the
//! first surviving piece is tag content and every later piece is text content.
//!
//! Known limitation: text before the first `<` occupies the first-piece position of the
//! first chunk and is reported as tag content.
use memchr::memchr_iter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawSegment<'a> {
    Tag(&'a str),
    Text(&'a str),
}

// Both delimiters are ASCII and cannot occur inside a UTF-8 continuation byte, so every
// cut lands on a char boundary.
fn split_nonempty(input: &str, delimiter: u8) -> impl Iterator<Item = &str> {
    let bytes = input.as_bytes();
    let mut start = 0;
    memchr_iter(delimiter, bytes)
        .chain(std::iter::once(bytes.len()))
        .filter_map(move |end| {
            debug_assert!(input.is_char_boundary(end));
            let piece = &input[start..end];
            start = end + 1;
            (!piece.is_empty()).then_some(piece)
        })
}

pub fn segment(input: &str) -> Vec<RawSegment<'_>> {
    let mut out = Vec::new();
    for chunk in split_nonempty(input, b'<') {
        for (i, piece) in split_nonempty(chunk, b'>').enumerate() {
            out.push(if i == 0 {
                RawSegment::Tag(piece)
            } else {
                RawSegment::Text(piece)
            });
        }
    }
    out
}
