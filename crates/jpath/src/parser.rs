//! A `nom`-based parser for dotted field paths.
use super::ast::FieldPath;
use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::char,
    multi::separated_list0,
};

// --- Main Public Parser ---

/// Parses a mapping string into a [`FieldPath`].
///
/// Parsing is total: every input, including the empty string, produces a
/// path. Blank segments are discarded, so a blank input yields an empty
/// path.
pub fn parse_path(input: &str) -> FieldPath {
    match raw_segments(input) {
        Ok((_, raw)) => FieldPath::new(raw.into_iter().map(str::trim)),
        // `take_till` accepts empty input, so the list parser cannot fail.
        Err(_) => FieldPath::default(),
    }
}

// --- Combinators ---

fn segment(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == '.').parse(input)
}

fn raw_segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char('.'), segment).parse(input)
}
