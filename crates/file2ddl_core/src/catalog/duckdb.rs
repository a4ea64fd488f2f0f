use super::{CandidateSet, Rank, Recognizer, TypeCandidate, TypeCatalog};
use crate::error::Result;

// VARCHAR in duckdb has no length limit, so there's no bounded text type and
// the fallback takes its name.
const CANDIDATES: [TypeCandidate; 8] = [
    TypeCandidate::new("BOOLEAN", Rank::new(0), Recognizer::Boolean),
    TypeCandidate::new("SMALLINT", Rank::new(1), Recognizer::SmallInt),
    TypeCandidate::new("INTEGER", Rank::new(2), Recognizer::Integer),
    TypeCandidate::new("BIGINT", Rank::new(3), Recognizer::BigInt),
    TypeCandidate::new("DOUBLE", Rank::new(4), Recognizer::Numeric),
    TypeCandidate::new("TIMESTAMP", Rank::new(5), Recognizer::Timestamp),
    TypeCandidate::new("DATE", Rank::new(6), Recognizer::Date),
    TypeCandidate::new("VARCHAR", Rank::new(8), Recognizer::Any),
];

#[derive(Debug, Clone)]
pub struct DuckDbCatalog {
    candidates: CandidateSet,
}

impl DuckDbCatalog {
    pub const DIALECT: &'static str = "duckdb";

    pub fn try_new() -> Result<Self> {
        Ok(DuckDbCatalog {
            candidates: CandidateSet::try_new(Self::DIALECT, CANDIDATES)?,
        })
    }
}

impl TypeCatalog for DuckDbCatalog {
    fn dialect(&self) -> &str {
        Self::DIALECT
    }

    fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }
}
