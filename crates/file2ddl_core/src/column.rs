use std::fmt;

use serde::Serialize;

use crate::catalog::{Rank, TypeCatalog};

/// Running type state for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnState {
    index: usize,
    name: String,
    rank: Rank,
    /// Longest value seen with the bounded text rank.
    max_length: usize,
}

impl ColumnState {
    pub fn new(index: usize, name: impl Into<String>, initial: Rank) -> Self {
        ColumnState {
            index,
            name: name.into(),
            rank: initial,
            max_length: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Observe a field with the given rank.
    ///
    /// `bounded_length` should be the field's length when `field_rank` is the
    /// bounded text rank, and `None` otherwise.
    ///
    /// Returns the previous rank if the column was promoted.
    pub fn observe(&mut self, field_rank: Rank, bounded_length: Option<usize>) -> Option<Rank> {
        if let Some(len) = bounded_length {
            self.max_length = usize::max(self.max_length, len);
        }

        if field_rank > self.rank {
            let prev = self.rank;
            self.rank = field_rank;
            return Some(prev);
        }

        None
    }

    /// Resolve the final column type using the catalog this state was built
    /// with.
    pub fn finish(&self, catalog: &dyn TypeCatalog) -> ColumnType {
        let length = if catalog.bounded_rank() == Some(self.rank) {
            Some(self.max_length)
        } else {
            None
        };

        ColumnType {
            name: catalog.type_name(self.rank),
            length,
            rank: self.rank,
        }
    }
}

/// Inferred type for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnType {
    /// Type name as given by the catalog.
    #[serde(rename = "type")]
    pub name: &'static str,
    /// Max observed length, only set for bounded text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip)]
    pub rank: Rank,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(len) => write!(f, "{}({})", self.name, len),
            None => write!(f, "{}", self.name),
        }
    }
}
