/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! An in-memory RDF triple store answering Basic Graph Pattern queries.
//!
//! The pieces compose as: [`ntriples`] and [`query`] turn text into encoded
//! data via [`dictionary`], [`planner`] orders a query's patterns, and
//! [`executor`] walks them against [`index`] to produce solutions.
//! [`engine::Store`] is the facade tying all of it together.

pub mod binding;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod executor;
pub mod index;
pub mod ntriples;
pub mod pattern;
pub mod planner;
pub mod query;
pub mod term;

pub use dictionary::{Dictionary, Resource};
pub use engine::{CountResult, LoadResult, QueryResult, Store};
pub use error::{Result, StoreError};
pub use term::{Term, TriplePattern, Variable};
