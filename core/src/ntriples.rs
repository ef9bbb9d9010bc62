/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Ambient: the N-Triples reader.
//!
//! Grounded on `System::load_triples` in the C++ original
//! (`original_source/src/d_turtle_parse.cpp`): whitespace-tokenize, require
//! a multiple of four tokens, require every fourth token to be a literal
//! `.`, and encode the first three of every group through the dictionary.

use nom::character::complete::multispace1;
use nom::multi::separated_list1;
use nom::IResult;

use crate::dictionary::{Dictionary, Resource};
use crate::error::{Result, StoreError};

/// One decoded `(subject, predicate, object)` triple, ready for
/// [`crate::index::TripleIndex::add`].
pub type ParsedTriple = (Resource, Resource, Resource);

/// Parses `text` as whitespace-separated `S P O .` groups, encoding each
/// resource through `dictionary` as it goes. Returns every triple in
/// source order; duplicates are left for the caller (the index itself is
/// idempotent on `add`).
pub fn parse_triples(text: &str, dictionary: &mut Dictionary) -> Result<Vec<ParsedTriple>> {
    let tokens = tokenize(text);

    if tokens.len() % 4 != 0 {
        return Err(StoreError::MalformedTriples {
            reason: format!(
                "expected a multiple of four whitespace-separated tokens, got {}",
                tokens.len()
            ),
        });
    }

    let mut triples = Vec::with_capacity(tokens.len() / 4);
    for group in tokens.chunks_exact(4) {
        let [s, p, o, dot] = group else {
            unreachable!("chunks_exact(4) always yields four-element slices");
        };
        if dot != "." {
            return Err(StoreError::MalformedTriples {
                reason: format!("triples must be terminated by a period, found {dot:?}"),
            });
        }
        let s = dictionary.encode(s)?;
        let p = dictionary.encode(p)?;
        let o = dictionary.encode(o)?;
        triples.push((s, p, o));
    }
    Ok(triples)
}

fn tokenize(input: &str) -> Vec<String> {
    fn words(input: &str) -> IResult<&str, Vec<&str>> {
        separated_list1(multispace1, nom::bytes::complete::take_till1(|c: char| c.is_whitespace()))(
            input.trim(),
        )
    }
    if input.trim().is_empty() {
        return Vec::new();
    }
    match words(input) {
        Ok((_, ws)) => ws.into_iter().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_triple() {
        let mut dict = Dictionary::new();
        let triples = parse_triples("<a> <p> <b> .", &mut dict).unwrap();
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn parses_multiple_triples_and_reuses_dictionary_ids() {
        let mut dict = Dictionary::new();
        let triples = parse_triples("<a> <p> <b> . <a> <p> <c> .", &mut dict).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].0, triples[1].0); // same subject, reused id
    }

    #[test]
    fn token_count_not_a_multiple_of_four_is_rejected() {
        let mut dict = Dictionary::new();
        let err = parse_triples("<a> <p> <b>", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTriples { .. }));
    }

    #[test]
    fn missing_period_terminator_is_rejected() {
        let mut dict = Dictionary::new();
        let err = parse_triples("<a> <p> <b> <c>", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTriples { .. }));
    }

    #[test]
    fn malformed_resource_token_propagates_dictionary_error() {
        let mut dict = Dictionary::new();
        let err = parse_triples("bare <p> <b> .", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedResource { .. }));
    }

    #[test]
    fn empty_input_yields_no_triples() {
        let mut dict = Dictionary::new();
        let triples = parse_triples("   ", &mut dict).unwrap();
        assert!(triples.is_empty());
    }
}
