/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C3: the pattern classifier.
//!
//! Grounded on `utils::get_pattern_type` in the C++ original
//! (`original_source/src/utils.cpp`), ported to a Rust enum instead of a
//! `PatternType` C-style enum matched positionally by variant index.

use crate::term::{Term, TriplePattern};

/// One of the eight shapes a triple pattern can take, derived purely from
/// which positions hold a variable (X/Y/Z) versus a bound resource (S/P/O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternShape {
    Xyz,
    Syz,
    Xpz,
    Xyo,
    Spz,
    Syo,
    Xpo,
    Spo,
}

/// Maps a pattern to its shape by checking which positions are variables.
/// Deterministic and total; no error cases.
pub fn classify(pattern: &TriplePattern) -> PatternShape {
    classify_terms(&pattern.subject, &pattern.predicate, &pattern.object)
}

pub(crate) fn classify_terms(a: &Term, b: &Term, c: &Term) -> PatternShape {
    use PatternShape::*;
    match (a.is_variable(), b.is_variable(), c.is_variable()) {
        (true, true, true) => Xyz,
        (true, false, true) => Xpz,
        (true, true, false) => Xyo,
        (true, false, false) => Xpo,
        (false, true, true) => Syz,
        (false, false, true) => Spz,
        (false, true, false) => Syo,
        (false, false, false) => Spo,
    }
}

/// The planner's fixed score table (§4.4): lower is better.
pub fn score(shape: PatternShape) -> u8 {
    use PatternShape::*;
    match shape {
        Spo => 1,
        Spz => 2,
        Xpo => 3,
        Syz => 4,
        Xpz => 5,
        Syo => 6,
        Xyo => 7,
        Xyz => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Resource;

    fn var(name: &str) -> Term {
        Term::Variable(name.to_string())
    }

    fn res(id: u32) -> Term {
        Term::Resource(Resource(id))
    }

    #[test]
    fn classifies_all_eight_shapes() {
        let cases = [
            (var("x"), var("y"), var("z"), PatternShape::Xyz),
            (res(1), var("y"), var("z"), PatternShape::Syz),
            (var("x"), res(1), var("z"), PatternShape::Xpz),
            (var("x"), var("y"), res(1), PatternShape::Xyo),
            (res(1), res(2), var("z"), PatternShape::Spz),
            (res(1), var("y"), res(2), PatternShape::Syo),
            (var("x"), res(1), res(2), PatternShape::Xpo),
            (res(1), res(2), res(3), PatternShape::Spo),
        ];
        for (a, b, c, expected) in cases {
            let pattern = TriplePattern::new(a, b, c);
            assert_eq!(classify(&pattern), expected);
        }
    }

    #[test]
    fn score_table_matches_spec_ordering() {
        use PatternShape::*;
        let ordered = [Spo, Spz, Xpo, Syz, Xpz, Syo, Xyo, Xyz];
        for window in ordered.windows(2) {
            assert!(score(window[0]) < score(window[1]));
        }
    }
}
