/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C3/ambient: the BGP query-string parser.
//!
//! Grounded on `Query::parse`/`Query::_parse_variable`/`Query::_parse_term`
//! in the C++ original (`original_source/src/e_query_parse.cpp`). The
//! original tokenizes by inserting whitespace around the braces and then
//! splitting on ASCII whitespace; this port keeps that token-stream shape
//! but drives it with `nom` rather than hand-rolled index arithmetic, per
//! the parser style `shared::query` uses in the teacher crate.

use std::collections::HashSet;

use nom::character::complete::multispace1;
use nom::multi::separated_list1;
use nom::IResult;

use crate::dictionary::Dictionary;
use crate::error::{Result, StoreError};
use crate::term::{Term, TriplePattern, Variable};

/// A parsed BGP query: the variables to project, in order, and the set of
/// triple patterns making up the graph pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub projection: Vec<Variable>,
    pub patterns: HashSet<TriplePattern>,
}

impl Query {
    /// Parses `query_string` of the shape `V1 V2 ... Vn WHERE { T1 . T2 . ... Tk . }`,
    /// encoding every resource term through `dictionary` as it goes.
    pub fn parse(query_string: &str, dictionary: &mut Dictionary) -> Result<Query> {
        let spaced = space_out_braces(query_string)?;
        let words = tokenize(&spaced);

        let where_loc = words
            .iter()
            .position(|w| *w == "WHERE")
            .ok_or_else(|| malformed("query needs a WHERE clause"))?;

        if words.get(where_loc + 1).map(String::as_str) != Some("{") {
            return Err(malformed("misplaced opening brace"));
        }

        let end_loc = words.len();
        if end_loc == 0 || words[end_loc - 1] == ";" {
            return Err(malformed("no semicolon allowed after query"));
        }
        if words.get(end_loc.wrapping_sub(1)).map(String::as_str) != Some("}") {
            return Err(malformed("misplaced closing brace"));
        }

        let body_len = end_loc as isize - where_loc as isize - 3;
        if body_len % 4 != 0 {
            return Err(malformed("invalid sequence of patterns"));
        }
        if body_len == 0 {
            return Err(malformed("no patterns given"));
        }

        let projection = words[..where_loc]
            .iter()
            .map(|w| parse_variable(w))
            .collect::<Result<Vec<_>>>()?;

        let mut patterns = HashSet::new();
        let mut i = where_loc + 2;
        while i + 3 < end_loc {
            if words[i + 3] != "." {
                return Err(malformed("pattern doesn't end in ."));
            }
            let subject = parse_term(&words[i], dictionary)?;
            let predicate = parse_term(&words[i + 1], dictionary)?;
            let object = parse_term(&words[i + 2], dictionary)?;
            patterns.insert(TriplePattern::new(subject, predicate, object));
            i += 4;
        }

        let known: HashSet<&str> = patterns
            .iter()
            .flat_map(|p| p.variables())
            .collect();
        for var in &projection {
            if !known.contains(var.as_str()) {
                return Err(malformed(&format!(
                    "projected variable {var} does not appear in any pattern"
                )));
            }
        }

        Ok(Query {
            projection,
            patterns,
        })
    }
}

fn malformed(reason: &str) -> StoreError {
    StoreError::MalformedQuery {
        reason: reason.to_string(),
    }
}

/// Inserts a space after `{` and before `}` so whitespace tokenization
/// never glues a brace onto an adjacent term.
fn space_out_braces(query_string: &str) -> Result<String> {
    let open = query_string
        .find('{')
        .ok_or_else(|| malformed("no opening brace in query"))?;
    let mut spaced = String::with_capacity(query_string.len() + 2);
    spaced.push_str(&query_string[..=open]);
    spaced.push(' ');
    spaced.push_str(&query_string[open + 1..]);

    let close = spaced
        .find('}')
        .ok_or_else(|| malformed("no closing brace in query"))?;
    let mut final_string = String::with_capacity(spaced.len() + 1);
    final_string.push_str(&spaced[..close]);
    final_string.push(' ');
    final_string.push_str(&spaced[close..]);
    Ok(final_string)
}

fn tokenize(input: &str) -> Vec<String> {
    fn words(input: &str) -> IResult<&str, Vec<&str>> {
        separated_list1(multispace1, nom::bytes::complete::take_till1(|c: char| c.is_whitespace()))(
            input.trim(),
        )
    }
    match words(input) {
        Ok((_, ws)) => ws.into_iter().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

fn parse_variable(word: &str) -> Result<Variable> {
    if !word.starts_with('?') || word.len() < 2 {
        return Err(malformed(&format!("variable doesn't begin with ?: {word}")));
    }
    Ok(word.to_string())
}

fn parse_term(word: &str, dictionary: &mut Dictionary) -> Result<Term> {
    if word.starts_with('?') {
        Ok(Term::Variable(parse_variable(word)?))
    } else {
        Ok(Term::Resource(dictionary.encode(word)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_pattern_query() {
        let mut dict = Dictionary::new();
        let query = Query::parse("?x WHERE { ?x <p> <b> . }", &mut dict).unwrap();
        assert_eq!(query.projection, vec!["?x".to_string()]);
        assert_eq!(query.patterns.len(), 1);
    }

    #[test]
    fn parses_multiple_patterns_and_projected_variables() {
        let mut dict = Dictionary::new();
        let query = Query::parse(
            "?x ?z WHERE { ?x <p> ?y . ?y <q> ?z . }",
            &mut dict,
        )
        .unwrap();
        assert_eq!(query.projection, vec!["?x".to_string(), "?z".to_string()]);
        assert_eq!(query.patterns.len(), 2);
    }

    #[test]
    fn missing_where_is_malformed() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?x { ?x <p> <b> . }", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }

    #[test]
    fn trailing_semicolon_is_rejected() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?x WHERE { ?x <p> <b> . } ;", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }

    #[test]
    fn empty_pattern_body_is_rejected() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?x WHERE {  }", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }

    #[test]
    fn pattern_not_multiple_of_four_tokens_is_rejected() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?x WHERE { ?x <p> . }", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }

    #[test]
    fn pattern_missing_dot_terminator_is_rejected() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?x WHERE { ?x <p> <b> <c> }", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }

    #[test]
    fn projecting_an_unmentioned_variable_is_rejected() {
        let mut dict = Dictionary::new();
        let err = Query::parse("?y WHERE { ?x <p> <b> . }", &mut dict).unwrap_err();
        assert!(matches!(err, StoreError::MalformedQuery { .. }));
    }
}
