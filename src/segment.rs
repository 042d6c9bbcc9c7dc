//! Text segmentation.
//!
//! Grammar rules never look at raw characters: they match whole segments.
//! A segment is a run of digits, a run of letters (with inner hyphens, so
//! double surnames stay in one piece), or a single punctuation character.
//! Whitespace separates segments and is dropped.
//!
//! ```text
//! "5.09.24 года, Римский-Корсаков"
//!  [5][.][09][.][24] [года][,] [Римский-Корсаков]
//! ```

/// Coarse class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Integer,
    Word,
    Punct,
}

/// One segment of the input: its class and byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split `input` into segments, left to right.
///
/// # Example
/// ```
/// use vestnik::{SegmentKind, segment};
///
/// let segs = segment("5 сентября");
/// assert_eq!(segs.len(), 2);
/// assert_eq!(segs[0].kind, SegmentKind::Integer);
/// assert_eq!(segs[1].text, "сентября");
/// ```
pub fn segment(input: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let kind = if c.is_ascii_digit() {
            SegmentKind::Integer
        } else if c.is_alphabetic() {
            SegmentKind::Word
        } else {
            let end = start + c.len_utf8();
            out.push(Segment { kind: SegmentKind::Punct, text: &input[start..end], start, end });
            continue;
        };

        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            let continues = match kind {
                SegmentKind::Integer => next.is_ascii_digit(),
                // A hyphen only joins two letter runs: "Римский-Корсаков", not "Иван-".
                _ => next.is_alphabetic() || (next == '-' && letter_follows(&input[idx + 1..])),
            };
            if !continues {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }

        out.push(Segment { kind, text: &input[start..end], start, end });
    }

    out
}

fn letter_follows(rest: &str) -> bool {
    rest.chars().next().is_some_and(char::is_alphabetic)
}

/// True when the first letter is uppercase and the rest are lowercase,
/// checked per hyphen-separated part.
pub(crate) fn is_capitalized(word: &str) -> bool {
    word.split('-').all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) => first.is_uppercase() && chars.all(|c| c.is_lowercase()),
            None => false,
        }
    })
}

/// Capitalize each hyphen-separated part and lowercase the rest.
///
/// ```
/// assert_eq!(vestnik::title_case("иВАНОВ"), "Иванов");
/// assert_eq!(vestnik::title_case("римский-корсаков"), "Римский-Корсаков");
/// ```
pub fn title_case(word: &str) -> String {
    word.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(SegmentKind, &str)> {
        segment(input).into_iter().map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn splits_numeric_date_into_parts() {
        assert_eq!(
            kinds("5.09.2024"),
            vec![
                (SegmentKind::Integer, "5"),
                (SegmentKind::Punct, "."),
                (SegmentKind::Integer, "09"),
                (SegmentKind::Punct, "."),
                (SegmentKind::Integer, "2024"),
            ]
        );
    }

    #[test]
    fn keeps_byte_offsets_for_cyrillic() {
        let segs = segment("в 10 часов");
        assert_eq!(segs[1].text, "10");
        assert_eq!(segs[1].start, "в ".len());
        assert_eq!(segs[2].start, "в 10 ".len());
        assert_eq!(segs[2].end, "в 10 часов".len());
    }

    #[test]
    fn hyphen_joins_only_letter_runs() {
        assert_eq!(kinds("Римский-Корсаков"), vec![(SegmentKind::Word, "Римский-Корсаков")]);
        assert_eq!(
            kinds("Иван- да"),
            vec![(SegmentKind::Word, "Иван"), (SegmentKind::Punct, "-"), (SegmentKind::Word, "да")]
        );
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(segment("").is_empty());
        assert!(segment(" \n\t ").is_empty());
    }

    #[test]
    fn capitalization_checks_every_part() {
        assert!(is_capitalized("Иванов"));
        assert!(is_capitalized("Римский-Корсаков"));
        assert!(!is_capitalized("иванов"));
        assert!(!is_capitalized("ИВАНОВ"));
    }
}
