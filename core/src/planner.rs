/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C4: the greedy join-order planner.
//!
//! Grounded on `Query::plan`/`Query::_get_score` in the C++ original
//! (`original_source/src/c_query_plan.cpp`). Adopts the filter-first variant
//! explicitly called out in §4.4/§9 of the spec: a candidate is only scored
//! if picking it avoids an avoidable cross product, and the cross-product
//! fallback only kicks in once no such candidate exists.

use std::collections::HashSet;

use log::debug;

use crate::pattern::{classify_terms, score};
use crate::term::TriplePattern;

/// Greedily orders `patterns` for the nested-loop join, preferring at each
/// step the pattern with the lowest shape score among those that join with
/// already-bound variables, falling back to a cross product only when no
/// pattern shares a bound variable with what's been processed so far.
pub fn plan(patterns: &[TriplePattern]) -> Vec<TriplePattern> {
    let mut unprocessed: Vec<TriplePattern> = patterns.to_vec();
    let mut processed = Vec::with_capacity(patterns.len());
    let mut bound: HashSet<String> = HashSet::new();

    while !unprocessed.is_empty() {
        let candidate_indices = candidates(&unprocessed, &bound);

        let best = candidate_indices
            .iter()
            .copied()
            .min_by_key(|&i| effective_score(&unprocessed[i], &bound))
            .expect("candidate set is never empty while unprocessed is non-empty");

        let chosen = unprocessed.remove(best);
        debug!(
            "planner: picked {chosen:?} (score {}) with {} bound variable(s), {} pattern(s) left",
            effective_score(&chosen, &bound),
            bound.len(),
            unprocessed.len()
        );
        for var in chosen.variables() {
            bound.insert(var.to_string());
        }
        processed.push(chosen);
    }

    processed
}

/// Patterns that don't force an avoidable cross product: no variables at
/// all, nothing bound yet, or they share a variable with what's bound so
/// far. Falls back to every remaining pattern if none qualify.
fn candidates(unprocessed: &[TriplePattern], bound: &HashSet<String>) -> Vec<usize> {
    let joinable: Vec<usize> = unprocessed
        .iter()
        .enumerate()
        .filter(|(_, pattern)| {
            let vars = pattern.variables();
            vars.is_empty() || bound.is_empty() || vars.iter().any(|v| bound.contains(*v))
        })
        .map(|(i, _)| i)
        .collect();

    if joinable.is_empty() {
        (0..unprocessed.len()).collect()
    } else {
        joinable
    }
}

/// Scores a pattern by treating already-bound variables as if they were
/// resources, per the fixed shape table (§4.4).
fn effective_score(pattern: &TriplePattern, bound: &HashSet<String>) -> u8 {
    let effective = |term: &crate::term::Term| -> bool {
        // true means "still a variable" for scoring purposes.
        match term.as_variable() {
            Some(v) => !bound.contains(v),
            None => false,
        }
    };
    use crate::term::Term;
    let as_resource_like = |is_var: bool| -> Term {
        if is_var {
            Term::Variable(String::new())
        } else {
            Term::Resource(crate::dictionary::Resource(0))
        }
    };
    let a = as_resource_like(effective(&pattern.subject));
    let b = as_resource_like(effective(&pattern.predicate));
    let c = as_resource_like(effective(&pattern.object));
    score(classify_terms(&a, &b, &c))
}
