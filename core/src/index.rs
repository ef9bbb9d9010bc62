/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C2: the six-way intrusive triple index.
//!
//! Grounded on `RDFIndex` in the C++ original (`original_source/include/RDFIndex.h`,
//! `original_source/src/a_index.cpp`): a triple table plus six derived maps
//! (`index_S`, `index_O`, `index_P`, `index_SP`, `index_OP`, `index_SPO`) built
//! from three interleaved intrusive linked lists (`next_SP`, `next_OP`,
//! `next_P`). The teacher crate's `shared::index_manager::UnifiedIndex`
//! confirms the six-permutation shape of the index (`spo`/`pos`/`osp`/`pso`/
//! `ops`/`sop`) but stores each permutation as nested hash maps of sets
//! rather than as an intrusive linked structure; this module follows the
//! C++ original's linked-list design instead, since that is what the spec's
//! invariants (§3) and shortest-chain traversal (SYO, §4.2) actually describe.
//!
//! Pointers become arena indices: rows live in a single append-only `Vec<Row>`
//! and links are `Option<RowId>` rather than raw pointers, so an iterator
//! borrowing the index can never dangle (see DESIGN.md O1/O2).

use log::trace;
use rustc_hash::FxHashMap;

use crate::binding::VariableMap;
use crate::dictionary::Resource;
use crate::pattern::{classify_terms, PatternShape};
use crate::term::{Term, Variable};

type RowId = u32;

#[derive(Debug, Clone, Copy)]
struct Row {
    s: Resource,
    p: Resource,
    o: Resource,
    next_sp: Option<RowId>,
    next_op: Option<RowId>,
    next_p: Option<RowId>,
}

/// The six-way intrusive triple index. Owns every inserted triple for the
/// lifetime of the index; iterators returned by [`TripleIndex::evaluate`]
/// borrow it immutably, so the borrow checker forbids calling `add` while an
/// iterator from this index is alive — the Rust encoding of the "no mutation
/// while iterating" contract the original leaves as a documented rule.
#[derive(Debug, Default)]
pub struct TripleIndex {
    table: Vec<Row>,
    index_s: FxHashMap<Resource, RowId>,
    index_o: FxHashMap<Resource, RowId>,
    index_p: FxHashMap<Resource, RowId>,
    index_sp: FxHashMap<(Resource, Resource), RowId>,
    index_op: FxHashMap<(Resource, Resource), RowId>,
    index_spo: FxHashMap<(Resource, Resource, Resource), RowId>,
    len_s: FxHashMap<Resource, usize>,
    len_o: FxHashMap<Resource, usize>,
}

impl TripleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Idempotent insertion: a triple already present is a no-op.
    pub fn add(&mut self, s: Resource, p: Resource, o: Resource) {
        if self.index_spo.contains_key(&(s, p, o)) {
            return;
        }

        let id: RowId = self.table.len() as RowId;
        let mut row = Row {
            s,
            p,
            o,
            next_sp: None,
            next_op: None,
            next_p: None,
        };

        // SP-chain: splice after the existing p-group head, else push a new
        // head onto the S-chain.
        if let Some(&head) = self.index_sp.get(&(s, p)) {
            row.next_sp = self.table[head as usize].next_sp;
            self.table[head as usize].next_sp = Some(id);
        } else {
            row.next_sp = self.index_s.get(&s).copied();
            self.index_s.insert(s, id);
            self.index_sp.insert((s, p), id);
        }
        *self.len_s.entry(s).or_insert(0) += 1;

        // OP-chain, symmetric to the SP-chain above, keyed by (o, p) / o.
        if let Some(&head) = self.index_op.get(&(o, p)) {
            row.next_op = self.table[head as usize].next_op;
            self.table[head as usize].next_op = Some(id);
        } else {
            row.next_op = self.index_o.get(&o).copied();
            self.index_o.insert(o, id);
            self.index_op.insert((o, p), id);
        }
        *self.len_o.entry(o).or_insert(0) += 1;

        // P-chain: always pushed at the head, order within is unspecified.
        row.next_p = self.index_p.get(&p).copied();
        self.index_p.insert(p, id);

        self.table.push(row);
        self.index_spo.insert((s, p, o), id);
        trace!("added row {id} ({s:?}, {p:?}, {o:?}), table now {} rows", self.table.len());
    }

    /// Produces a lazy, finite iterator of the partial bindings matching a
    /// single triple pattern, dispatching on pattern shape (§4.2).
    pub fn evaluate(&self, a: Term, b: Term, c: Term) -> PatternIter<'_> {
        let shape = classify_terms(&a, &b, &c);
        trace!("evaluate: pattern ({a:?}, {b:?}, {c:?}) dispatched as {shape:?}");
        match shape {
            PatternShape::Spo => {
                let key = (
                    a.as_resource().expect("SPO subject is bound"),
                    b.as_resource().expect("SPO predicate is bound"),
                    c.as_resource().expect("SPO object is bound"),
                );
                PatternIter::Spo {
                    hit: self.index_spo.contains_key(&key),
                    yielded: false,
                }
            }
            PatternShape::Spz => {
                let s = a.as_resource().expect("SPZ subject is bound");
                let p = b.as_resource().expect("SPZ predicate is bound");
                let z = c.as_variable().expect("SPZ object is a variable").to_string();
                PatternIter::Spz {
                    index: self,
                    cur: self.index_sp.get(&(s, p)).copied(),
                    p,
                    var_z: z,
                }
            }
            PatternShape::Xpo => {
                let x = a.as_variable().expect("XPO subject is a variable").to_string();
                let p = b.as_resource().expect("XPO predicate is bound");
                let o = c.as_resource().expect("XPO object is bound");
                PatternIter::Xpo {
                    index: self,
                    cur: self.index_op.get(&(o, p)).copied(),
                    p,
                    var_x: x,
                }
            }
            PatternShape::Syz => {
                let s = a.as_resource().expect("SYZ subject is bound");
                let y = b.as_variable().expect("SYZ predicate is a variable").to_string();
                let z = c.as_variable().expect("SYZ object is a variable").to_string();
                let same_yz = y == z;
                PatternIter::Syz {
                    index: self,
                    cur: self.index_s.get(&s).copied(),
                    var_y: y,
                    var_z: z,
                    same_yz,
                }
            }
            PatternShape::Xyo => {
                let x = a.as_variable().expect("XYO subject is a variable").to_string();
                let y = b.as_variable().expect("XYO predicate is a variable").to_string();
                let o = c.as_resource().expect("XYO object is bound");
                let same_xy = x == y;
                PatternIter::Xyo {
                    index: self,
                    cur: self.index_o.get(&o).copied(),
                    var_x: x,
                    var_y: y,
                    same_xy,
                }
            }
            PatternShape::Xpz => {
                let x = a.as_variable().expect("XPZ subject is a variable").to_string();
                let p = b.as_resource().expect("XPZ predicate is bound");
                let z = c.as_variable().expect("XPZ object is a variable").to_string();
                let same_xz = x == z;
                PatternIter::Xpz {
                    index: self,
                    cur: self.index_p.get(&p).copied(),
                    var_x: x,
                    var_z: z,
                    same_xz,
                }
            }
            PatternShape::Syo => {
                let s = a.as_resource().expect("SYO subject is bound");
                let y = b.as_variable().expect("SYO predicate is a variable").to_string();
                let o = c.as_resource().expect("SYO object is bound");
                let len_s = self.len_s.get(&s).copied().unwrap_or(0);
                let len_o = self.len_o.get(&o).copied().unwrap_or(0);
                if len_s <= len_o {
                    PatternIter::SyoFromS {
                        index: self,
                        cur: self.index_s.get(&s).copied(),
                        o,
                        var_y: y,
                    }
                } else {
                    PatternIter::SyoFromO {
                        index: self,
                        cur: self.index_o.get(&o).copied(),
                        s,
                        var_y: y,
                    }
                }
            }
            PatternShape::Xyz => {
                let x = a.as_variable().expect("XYZ subject is a variable").to_string();
                let y = b.as_variable().expect("XYZ predicate is a variable").to_string();
                let z = c.as_variable().expect("XYZ object is a variable").to_string();
                let constraint = XyzConstraint::classify(&x, &y, &z);
                PatternIter::Xyz {
                    index: self,
                    next_row: 0,
                    var_x: x,
                    var_y: y,
                    var_z: z,
                    constraint,
                }
            }
        }
    }

    fn row(&self, id: RowId) -> &Row {
        &self.table[id as usize]
    }
}

#[derive(Debug, Clone, Copy)]
enum XyzConstraint {
    None,
    XEqY,
    YEqZ,
    XEqZ,
    AllEq,
}

impl XyzConstraint {
    fn classify(x: &str, y: &str, z: &str) -> Self {
        if x == y && y == z {
            XyzConstraint::AllEq
        } else if x == y {
            XyzConstraint::XEqY
        } else if y == z {
            XyzConstraint::YEqZ
        } else if x == z {
            XyzConstraint::XEqZ
        } else {
            XyzConstraint::None
        }
    }

    fn matches(&self, row: &Row) -> bool {
        match self {
            XyzConstraint::None => true,
            XyzConstraint::XEqY => row.s == row.p,
            XyzConstraint::YEqZ => row.p == row.o,
            XyzConstraint::XEqZ => row.s == row.o,
            XyzConstraint::AllEq => row.s == row.p && row.p == row.o,
        }
    }
}

/// Lazy, per-shape iterator of [`VariableMap`] solutions produced by
/// [`TripleIndex::evaluate`]. One variant per pattern shape (§4.2), so the
/// iterator survives being stored across join-depth stack frames without
/// boxing or closures.
pub enum PatternIter<'a> {
    Spo {
        hit: bool,
        yielded: bool,
    },
    Spz {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        p: Resource,
        var_z: Variable,
    },
    Xpo {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        p: Resource,
        var_x: Variable,
    },
    Syz {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        var_y: Variable,
        var_z: Variable,
        same_yz: bool,
    },
    Xyo {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        var_x: Variable,
        var_y: Variable,
        same_xy: bool,
    },
    Xpz {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        var_x: Variable,
        var_z: Variable,
        same_xz: bool,
    },
    SyoFromS {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        o: Resource,
        var_y: Variable,
    },
    SyoFromO {
        index: &'a TripleIndex,
        cur: Option<RowId>,
        s: Resource,
        var_y: Variable,
    },
    Xyz {
        index: &'a TripleIndex,
        next_row: usize,
        var_x: Variable,
        var_y: Variable,
        var_z: Variable,
        constraint: XyzConstraint,
    },
}

impl<'a> Iterator for PatternIter<'a> {
    type Item = VariableMap;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            PatternIter::Spo { hit, yielded } => {
                if *hit && !*yielded {
                    *yielded = true;
                    Some(VariableMap::default())
                } else {
                    None
                }
            }
            PatternIter::Spz { index, cur, p, var_z } => loop {
                let id = (*cur)?;
                let row = index.row(id);
                if row.p != *p {
                    *cur = None;
                    return None;
                }
                *cur = row.next_sp;
                let mut map = VariableMap::default();
                map.insert(var_z.clone(), row.o);
                return Some(map);
            },
            PatternIter::Xpo { index, cur, p, var_x } => loop {
                let id = (*cur)?;
                let row = index.row(id);
                if row.p != *p {
                    *cur = None;
                    return None;
                }
                *cur = row.next_op;
                let mut map = VariableMap::default();
                map.insert(var_x.clone(), row.s);
                return Some(map);
            },
            PatternIter::Syz {
                index,
                cur,
                var_y,
                var_z,
                same_yz,
            } => loop {
                let id = (*cur)?;
                let row = *index.row(id);
                *cur = row.next_sp;
                if *same_yz && row.p != row.o {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_y.clone(), row.p);
                map.insert(var_z.clone(), row.o);
                return Some(map);
            },
            PatternIter::Xyo {
                index,
                cur,
                var_x,
                var_y,
                same_xy,
            } => loop {
                let id = (*cur)?;
                let row = *index.row(id);
                *cur = row.next_op;
                if *same_xy && row.s != row.p {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_x.clone(), row.s);
                map.insert(var_y.clone(), row.p);
                return Some(map);
            },
            PatternIter::Xpz {
                index,
                cur,
                var_x,
                var_z,
                same_xz,
            } => loop {
                let id = (*cur)?;
                let row = *index.row(id);
                *cur = row.next_p;
                if *same_xz && row.s != row.o {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_x.clone(), row.s);
                map.insert(var_z.clone(), row.o);
                return Some(map);
            },
            PatternIter::SyoFromS { index, cur, o, var_y } => loop {
                let id = (*cur)?;
                let row = *index.row(id);
                *cur = row.next_sp;
                if row.o != *o {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_y.clone(), row.p);
                return Some(map);
            },
            PatternIter::SyoFromO { index, cur, s, var_y } => loop {
                let id = (*cur)?;
                let row = *index.row(id);
                *cur = row.next_op;
                if row.s != *s {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_y.clone(), row.p);
                return Some(map);
            },
            PatternIter::Xyz {
                index,
                next_row,
                var_x,
                var_y,
                var_z,
                constraint,
            } => loop {
                if *next_row >= index.table.len() {
                    return None;
                }
                let row = index.table[*next_row];
                *next_row += 1;
                if !constraint.matches(&row) {
                    continue;
                }
                let mut map = VariableMap::default();
                map.insert(var_x.clone(), row.s);
                map.insert(var_y.clone(), row.p);
                map.insert(var_z.clone(), row.o);
                return Some(map);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn r(id: u32) -> Resource {
        Resource(id)
    }

    fn res(id: u32) -> Term {
        Term::Resource(r(id))
    }

    fn var(name: &str) -> Term {
        Term::Variable(name.to_string())
    }

    #[test]
    fn add_is_idempotent() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        idx.add(r(1), r(2), r(3));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn add_grows_by_distinct_triple_count() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        idx.add(r(1), r(2), r(4));
        idx.add(r(5), r(2), r(3));
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn spo_hit_and_miss() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        let hits: Vec<_> = idx.evaluate(res(1), res(2), res(3)).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_empty());

        let misses: Vec<_> = idx.evaluate(res(1), res(2), res(9)).collect();
        assert!(misses.is_empty());
    }

    #[test]
    fn spz_enumerates_objects_for_sp_group() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        idx.add(r(1), r(2), r(4));
        idx.add(r(1), r(9), r(5)); // different predicate, must not leak in
        let results: HashSet<_> = idx
            .evaluate(res(1), res(2), var("z"))
            .map(|m| m["z"])
            .collect();
        assert_eq!(results, HashSet::from([r(3), r(4)]));
    }

    #[test]
    fn xpo_enumerates_subjects_for_op_group() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(9));
        idx.add(r(3), r(2), r(9));
        idx.add(r(4), r(7), r(9)); // different predicate, must not leak in
        let results: HashSet<_> = idx
            .evaluate(var("x"), res(2), res(9))
            .map(|m| m["x"])
            .collect();
        assert_eq!(results, HashSet::from([r(1), r(3)]));
    }

    #[test]
    fn syz_same_variable_constraint_filters_rows() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(2)); // p == o, matches ?y == ?y
        idx.add(r(1), r(2), r(3)); // p != o, excluded
        let results: Vec<_> = idx
            .evaluate(res(1), var("y"), var("y"))
            .collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["y"], r(2));
    }

    #[test]
    fn xyz_all_three_equal_requires_diagonal() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(1), r(1));
        idx.add(r(1), r(2), r(3));
        let results: Vec<_> = idx
            .evaluate(var("x"), var("x"), var("x"))
            .collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["x"], r(1));
    }

    #[test]
    fn syo_picks_correct_predicates_either_direction() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        idx.add(r(1), r(4), r(3));
        idx.add(r(1), r(5), r(9)); // different object, excluded
        let results: HashSet<_> = idx
            .evaluate(res(1), var("y"), res(3))
            .map(|m| m["y"])
            .collect();
        assert_eq!(results, HashSet::from([r(2), r(4)]));
    }

    #[test]
    fn evaluate_borrows_index_immutably_across_multiple_patterns() {
        let mut idx = TripleIndex::new();
        idx.add(r(1), r(2), r(3));
        idx.add(r(4), r(2), r(3));
        // Two live iterators over the same (shared, immutable) index.
        let a: Vec<_> = idx.evaluate(var("x"), res(2), res(3)).collect();
        let b: Vec<_> = idx.evaluate(var("x"), res(2), res(3)).collect();
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }
}
