//! `Accept-Language` negotiation (nom)
//!
//! Entries are taken in the order the client listed them. Quality weights are
//! parsed past and ignored: the first entry that matches a supported locale,
//! exactly or by its primary subtag, wins.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::opt,
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

use super::Locale;

/// One comma-separated entry: the language range, then any `;` parameters.
fn entry(input: &str) -> IResult<&str, &str> {
    let (input, range) = take_till(|c: char| c == ';' || c == ',')(input)?;
    let (input, _params) = opt(preceded(char(';'), take_till(|c: char| c == ',')))(input)?;
    Ok((input, range))
}

fn ranges(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), entry)(input)
}

/// Normalized candidates (trimmed, lowercased) in header order.
pub fn candidates(header: &str) -> Vec<String> {
    let ranges = match ranges(header) {
        Ok((_, ranges)) => ranges,
        Err(_) => Vec::new(),
    };
    ranges
        .into_iter()
        .map(|r| r.trim().to_lowercase())
        .collect()
}

/// Resolve the locale for a request from its `Accept-Language` header.
///
/// Total: an absent, empty or entirely unsupported header yields
/// [`Locale::DEFAULT`].
pub fn negotiate(header: Option<&str>) -> Locale {
    let Some(header) = header else {
        return Locale::DEFAULT;
    };

    for candidate in candidates(header) {
        if let Some(locale) = Locale::parse(&candidate) {
            return locale;
        }
        let primary = candidate.split('-').next().unwrap_or_default();
        if let Some(locale) = Locale::parse(primary) {
            return locale;
        }
    }

    Locale::DEFAULT
}
