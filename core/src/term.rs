/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Tagged term and triple pattern types.
//!
//! Grounded on `shared::terms::Term` in the teacher crate, which uses the
//! same two-variant sum; here it carries a [`Resource`] rather than a bare
//! `u32` and equality is derived rather than hand-rolled.

use crate::dictionary::Resource;

/// A placeholder name in a triple pattern, e.g. the `x` in `?x`.
pub type Variable = String;

/// Either a named placeholder or a concrete, already-encoded resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Variable),
    Resource(Resource),
}

impl Term {
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Term::Variable(v) => Some(v.as_str()),
            Term::Resource(_) => None,
        }
    }

    pub fn as_resource(&self) -> Option<Resource> {
        match self {
            Term::Resource(r) => Some(*r),
            Term::Variable(_) => None,
        }
    }
}

/// An ordered (subject, predicate, object) triple pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The set of distinct variable names mentioned anywhere in this pattern.
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(3);
        for term in [&self.subject, &self.predicate, &self.object] {
            if let Some(v) = term.as_variable() {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        }
        out
    }
}
