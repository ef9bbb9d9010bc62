/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The partial-solution map threaded through evaluation and joining.

use rustc_hash::FxHashMap;

use crate::dictionary::Resource;
use crate::term::{Term, Variable};

/// A partial function from [`Variable`] to [`Resource`] representing a
/// (possibly incomplete) solution. Insertion order is irrelevant.
pub type VariableMap = FxHashMap<Variable, Resource>;

/// Substitutes already-bound variables in `term`: a variable present in
/// `map` becomes its bound resource, everything else is left unchanged.
///
/// Grounded on `utils::apply_map` in the C++ original
/// (`original_source/src/utils.cpp`).
pub fn apply_map(map: &VariableMap, term: &Term) -> Term {
    match term {
        Term::Resource(_) => term.clone(),
        Term::Variable(name) => match map.get(name) {
            Some(&resource) => Term::Resource(resource),
            None => term.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_map_substitutes_bound_variable() {
        let mut map = VariableMap::default();
        map.insert("x".to_string(), Resource(7));
        let term = Term::Variable("x".to_string());
        assert_eq!(apply_map(&map, &term), Term::Resource(Resource(7)));
    }

    #[test]
    fn apply_map_leaves_unbound_variable_untouched() {
        let map = VariableMap::default();
        let term = Term::Variable("y".to_string());
        assert_eq!(apply_map(&map, &term), Term::Variable("y".to_string()));
    }

    #[test]
    fn apply_map_leaves_resource_untouched() {
        let map = VariableMap::default();
        let term = Term::Resource(Resource(3));
        assert_eq!(apply_map(&map, &term), Term::Resource(Resource(3)));
    }
}
