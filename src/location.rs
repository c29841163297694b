//! Decoding of feature location expressions such as `complement(join(1..5,9..20))`.
//!
//! The operators are removed textually in a fixed order (`order(`, `join(`,
//! `complement(`) rather than parsed as a grammar. Real files depend on the exact
//! behaviour, including the different treatment of `join(` with and without a
//! `complement(` wrapper, so the stripping is kept as is.
//!
//! Decoding happens in two steps because a location may span several lines:
//! [`strip_operators`] runs on the text found on the record line and
//! [`resolve`] runs once all continuation lines have been appended.

use crate::error::{PlotError, Result};
use crate::structures::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub start: i64,
    pub stop: i64,
    pub complement: bool,
    pub exons: Vec<Span>,
    pub introns: Vec<Span>,
}

/// Removes the `order(`, `join(` and `complement(` wrappers from the location text of
/// a record line. Returns the remaining text and the strand flag.
pub fn strip_operators(text: &str) -> Result<(String, bool)> {
    let mut location = text.to_string();
    let mut complement = false;

    if location.contains("order") {
        location = location.replace("order(", "");
    }
    if location.contains("join") {
        location = location.replace("join(", "");
        if location.contains("complement") {
            location = location.replace("))", ")");
        } else if !location.ends_with(',') {
            location.pop();
        }
    }
    if location.contains("complement") {
        let inner = location
            .split('(')
            .nth(1)
            .ok_or_else(|| PlotError::InvalidCoordinate { text: text.to_string() })?;
        location = inner.trim_matches(')').to_string();
        complement = true;
    }

    Ok((location, complement))
}

/// Turns operator-free location text into coordinates.
///
/// Start and stop are the first and last `..` tokens as written. Sub-ranges
/// listed in descending order therefore give a wrong overall span; they are
/// not reordered.
pub fn resolve(text: &str, complement: bool) -> Result<Location> {
    let cleaned = text.replace(['>', '<'], "");
    let mut location = cleaned.trim_matches(')').to_string();

    // A single position, e.g. a variation.
    if !location.contains("..") {
        location = format!("{location}..{location}");
    }

    let coords: Vec<&str> = location.split("..").collect();
    let start = parse_coordinate(coords[0])?;
    let stop = parse_coordinate(coords[coords.len() - 1])?;

    let mut exons = Vec::new();
    if coords.len() > 2 {
        for part in location.split(',') {
            let (begin, end) = part
                .split_once("..")
                .filter(|(_, end)| !end.contains(".."))
                .ok_or_else(|| PlotError::InvalidCoordinate { text: part.to_string() })?;
            exons.push(Span::new(parse_coordinate(begin)?, parse_coordinate(end)?));
        }
    }
    let introns = introns_between(&exons);

    Ok(Location { start, stop, complement, exons, introns })
}

/// Decodes a complete single-line location expression.
pub fn decode_location(text: &str) -> Result<Location> {
    let (location, complement) = strip_operators(text)?;
    resolve(&location, complement)
}

/// Gaps between consecutive exons; gaps without positive length are dropped.
pub fn introns_between(exons: &[Span]) -> Vec<Span> {
    exons
        .windows(2)
        .map(|pair| Span::new(pair[0].end, pair[1].begin))
        .filter(|intron| intron.len() > 0)
        .collect()
}

fn parse_coordinate(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| PlotError::InvalidCoordinate { text: text.to_string() })
}
