/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C5: the nested index-loop join.
//!
//! Grounded on `_nested_index_loop_join` in the C++ original
//! (`original_source/src/b_query_evaluate.cpp`): a recursive depth-first walk
//! over the planned pattern order, substituting already-bound variables into
//! each pattern before handing it to the index, and extending the current
//! partial solution one pattern at a time rather than materialising
//! intermediate relations.

use log::trace;

use crate::binding::{apply_map, VariableMap};
use crate::dictionary::Resource;
use crate::error::{Result, StoreError};
use crate::index::TripleIndex;
use crate::term::{Term, TriplePattern, Variable};

/// Runs `ordered_patterns` (already planned, see [`crate::planner::plan`])
/// against `index`, returning one row per solution projected onto
/// `projection`, in the order variables are listed there.
pub fn execute(
    index: &TripleIndex,
    ordered_patterns: &[TriplePattern],
    projection: &[Variable],
) -> Result<Vec<Vec<Resource>>> {
    let mut solutions = Vec::new();
    let empty = VariableMap::default();
    join(index, ordered_patterns, 0, &empty, &mut solutions);

    solutions
        .iter()
        .map(|bindings| project(bindings, projection))
        .collect()
}

/// Like [`execute`], but only reports how many solutions exist; still walks
/// the full join since BGP evaluation has no early-exit shortcut for COUNT.
pub fn count(index: &TripleIndex, ordered_patterns: &[TriplePattern]) -> usize {
    let mut solutions = Vec::new();
    let empty = VariableMap::default();
    join(index, ordered_patterns, 0, &empty, &mut solutions);
    solutions.len()
}

fn join(
    index: &TripleIndex,
    ordered_patterns: &[TriplePattern],
    depth: usize,
    bound: &VariableMap,
    out: &mut Vec<VariableMap>,
) {
    let Some(pattern) = ordered_patterns.get(depth) else {
        trace!("join: depth {depth} is a leaf, {} binding(s)", bound.len());
        out.push(bound.clone());
        return;
    };

    trace!("join: entering depth {depth} with {} bound variable(s)", bound.len());

    let s = apply_map(bound, &pattern.subject);
    let p = apply_map(bound, &pattern.predicate);
    let o = apply_map(bound, &pattern.object);

    for delta in index.evaluate(s, p, o) {
        let mut extended = bound.clone();
        extended.extend(delta);
        join(index, ordered_patterns, depth + 1, &extended, out);
    }

    trace!("join: leaving depth {depth}");
}

fn project(bindings: &VariableMap, projection: &[Variable]) -> Result<Vec<Resource>> {
    projection
        .iter()
        .map(|var| {
            bindings
                .get(var)
                .copied()
                .ok_or_else(|| StoreError::UnboundProjection {
                    variable: var.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;

    fn r(id: u32) -> Resource {
        Resource(id)
    }

    fn res(id: u32) -> Term {
        Term::Resource(r(id))
    }

    fn var(name: &str) -> Term {
        Term::Variable(name.to_string())
    }

    fn build_index() -> TripleIndex {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(10), r(100)); // alice knows bob
        idx.add(r(2), r(10), r(100)); // carol knows bob
        idx.add(r(1), r(11), r(200)); // alice age 30
        idx.add(r(2), r(11), r(201)); // carol age 40
        idx
    }

    #[test]
    fn single_pattern_spz_projects_objects() {
        let idx = build_index();
        let patterns = vec![TriplePattern::new(res(1), res(10), var("x"))];
        let ordered = plan(&patterns);
        let rows = execute(&idx, &ordered, &["x".to_string()]).unwrap();
        assert_eq!(rows, vec![vec![r(100)]]);
    }

    #[test]
    fn two_pattern_join_binds_shared_variable() {
        let idx = build_index();
        // ?p <knows> <bob> . ?p <age> ?a .
        let patterns = vec![
            TriplePattern::new(var("p"), res(10), res(100)),
            TriplePattern::new(var("p"), res(11), var("a")),
        ];
        let ordered = plan(&patterns);
        let mut rows = execute(&idx, &ordered, &["p".to_string(), "a".to_string()]).unwrap();
        rows.sort();
        assert_eq!(rows, vec![vec![r(1), r(200)], vec![r(2), r(201)]]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let idx = build_index();
        let patterns = vec![TriplePattern::new(res(9), res(9), var("x"))];
        let ordered = plan(&patterns);
        let rows = execute(&idx, &ordered, &["x".to_string()]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn count_matches_execute_row_count() {
        let idx = build_index();
        let patterns = vec![TriplePattern::new(var("p"), res(10), res(100))];
        let ordered = plan(&patterns);
        assert_eq!(count(&idx, &ordered), 2);
        assert_eq!(execute(&idx, &ordered, &["p".to_string()]).unwrap().len(), 2);
    }

    #[test]
    fn projection_referencing_unbound_variable_errors() {
        let idx = build_index();
        let patterns = vec![TriplePattern::new(res(1), res(10), var("x"))];
        let ordered = plan(&patterns);
        let err = execute(&idx, &ordered, &["never_bound".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::UnboundProjection { .. }));
    }
}
