/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! C1: the bijective resource dictionary.
//!
//! Grounded on `shared::dictionary::Dictionary` in the teacher crate, extended
//! with the `MalformedResource`/`UnknownResource` contract this spec requires
//! and a dense `Resource` newtype in place of a bare `u32`.

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::error::{Result, StoreError};

/// A dense, non-negative resource identifier. Assigned on first sight of a
/// resource string by [`Dictionary::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resource(pub u32);

/// Bidirectional map between opaque resource strings (`<iri>` or `"literal"`)
/// and the dense integer IDs the rest of the store operates on.
///
/// Inputs are treated as opaque byte strings: no IRI normalisation, no
/// language-tag handling.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    string_to_id: FxHashMap<String, Resource>,
    id_to_string: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            string_to_id: FxHashMap::default(),
            id_to_string: Vec::new(),
        }
    }

    /// Returns the existing ID for `name` if known, otherwise assigns and
    /// records the next integer in sequence. Fails if `name` is not of the
    /// form `<...>` or `"..."`.
    pub fn encode(&mut self, name: &str) -> Result<Resource> {
        if let Some(&id) = self.string_to_id.get(name) {
            trace!("encode: {name:?} already known as {id:?}");
            return Ok(id);
        }
        if !is_well_formed_resource(name) {
            return Err(StoreError::MalformedResource {
                name: name.to_string(),
            });
        }
        let id = Resource(self.id_to_string.len() as u32);
        self.id_to_string.push(name.to_string());
        self.string_to_id.insert(name.to_string(), id);
        debug!("dictionary grew to {} resources ({name:?} -> {id:?})", self.id_to_string.len());
        Ok(id)
    }

    /// Inverse lookup of `encode`. Fails if `id` was never issued.
    pub fn decode(&self, id: Resource) -> Result<&str> {
        self.id_to_string
            .get(id.0 as usize)
            .map(|s| s.as_str())
            .ok_or(StoreError::UnknownResource { id: id.0 })
    }

    pub fn len(&self) -> usize {
        self.id_to_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_string.is_empty()
    }
}

fn is_well_formed_resource(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    (first == b'<' && last == b'>') || (first == b'"' && last == b'"')
}
