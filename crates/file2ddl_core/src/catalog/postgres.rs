use super::{CandidateSet, Rank, Recognizer, TypeCandidate, TypeCatalog};
use crate::error::Result;

/// Upper bound on the length of values inferred as `varchar`.
pub const VARCHAR_MAX_LENGTH: usize = 64000;

pub const BOOLEAN: Rank = Rank::new(0);
pub const SMALLINT: Rank = Rank::new(1);
pub const INTEGER: Rank = Rank::new(2);
pub const BIGINT: Rank = Rank::new(3);
pub const NUMERIC: Rank = Rank::new(4);
pub const TIMESTAMP: Rank = Rank::new(5);
pub const DATE: Rank = Rank::new(6);
pub const VARCHAR: Rank = Rank::new(7);
pub const TEXT: Rank = Rank::new(8);

const CANDIDATES: [TypeCandidate; 9] = [
    TypeCandidate::new("boolean", BOOLEAN, Recognizer::Boolean),
    TypeCandidate::new("smallint", SMALLINT, Recognizer::SmallInt),
    TypeCandidate::new("integer", INTEGER, Recognizer::Integer),
    TypeCandidate::new("bigint", BIGINT, Recognizer::BigInt),
    TypeCandidate::new("numeric", NUMERIC, Recognizer::Numeric),
    TypeCandidate::new("timestamp", TIMESTAMP, Recognizer::Timestamp),
    TypeCandidate::new("date", DATE, Recognizer::Date),
    TypeCandidate::new(
        "varchar",
        VARCHAR,
        Recognizer::MaxLength(VARCHAR_MAX_LENGTH),
    ),
    TypeCandidate::new("text", TEXT, Recognizer::Any),
];

#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    candidates: CandidateSet,
}

impl PostgresCatalog {
    pub const DIALECT: &'static str = "postgresql";

    pub fn try_new() -> Result<Self> {
        Ok(PostgresCatalog {
            candidates: CandidateSet::try_new(Self::DIALECT, CANDIDATES)?,
        })
    }
}

impl TypeCatalog for PostgresCatalog {
    fn dialect(&self) -> &str {
        Self::DIALECT
    }

    fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }
}
