/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C6: the store facade.
//!
//! Grounded on `System::load_triples`/`System::evaluate_query` in the C++
//! original (`original_source/src/d_turtle_parse.cpp`,
//! `original_source/src/b_query_evaluate.cpp`): owns the dictionary and
//! index, parses input through them, and reports a summary line (row count
//! and elapsed time) the way the original prints to stdout. Here the
//! summary is returned as data and the printing itself lives in the outer
//! shell (`cli`), with `log::info!` taking over the original's unconditional
//! stdout write for the load path.

use std::time::Instant;

use log::info;

use crate::dictionary::{Dictionary, Resource};
use crate::error::Result;
use crate::executor;
use crate::index::TripleIndex;
use crate::ntriples;
use crate::planner;
use crate::query::Query;

/// The result of a `select`: one row of decoded resource strings per
/// projected variable, plus the summary the original always prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub projection: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub elapsed: std::time::Duration,
}

/// The result of a `count`: no rows, just how many there would have been.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResult {
    pub count: usize,
    pub elapsed: std::time::Duration,
}

/// The result of a `load`: how many triples were parsed and how long it
/// took, mirroring `QueryResult`/`CountResult` so every store operation
/// reports its own timing to the caller rather than only to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadResult {
    pub count: usize,
    pub elapsed: std::time::Duration,
}

/// The in-memory RDF store: a [`Dictionary`] for string/ID interning and a
/// [`TripleIndex`] for pattern evaluation, wired together behind `load`,
/// `select` and `count`.
#[derive(Debug, Default)]
pub struct Store {
    dictionary: Dictionary,
    index: TripleIndex,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triple_count(&self) -> usize {
        self.index.len()
    }

    pub fn resource_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Parses `text` as N-Triples and adds every triple to the index.
    /// Triples already present are silently deduplicated.
    pub fn load(&mut self, text: &str) -> Result<LoadResult> {
        let start = Instant::now();
        let triples = ntriples::parse_triples(text, &mut self.dictionary)?;
        for (s, p, o) in &triples {
            self.index.add(*s, *p, *o);
        }
        let elapsed = start.elapsed();
        info!("{} triples loaded in {:?}", triples.len(), elapsed);
        Ok(LoadResult {
            count: triples.len(),
            elapsed,
        })
    }

    /// Parses, plans and executes `query_string`, decoding every projected
    /// resource back into its original string form.
    pub fn select(&mut self, query_string: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let query = Query::parse(query_string, &mut self.dictionary)?;
        let ordered = planner::plan(&query.patterns.into_iter().collect::<Vec<_>>());
        let solutions = executor::execute(&self.index, &ordered, &query.projection)?;

        let rows = solutions
            .into_iter()
            .map(|row| self.decode_row(&row))
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryResult {
            projection: query.projection,
            rows,
            elapsed: start.elapsed(),
        })
    }

    /// Like [`Store::select`] but only counts solutions, matching the
    /// original's `count` command which skips per-row decoding.
    pub fn count(&mut self, query_string: &str) -> Result<CountResult> {
        let start = Instant::now();
        let query = Query::parse(query_string, &mut self.dictionary)?;
        let ordered = planner::plan(&query.patterns.into_iter().collect::<Vec<_>>());
        let count = executor::count(&self.index, &ordered);
        Ok(CountResult {
            count,
            elapsed: start.elapsed(),
        })
    }

    fn decode_row(&self, row: &[Resource]) -> Result<Vec<String>> {
        row.iter()
            .map(|&id| self.dictionary.decode(id).map(str::to_string))
            .collect()
    }
}
