//! Candidate column types and the order in which they're tried.
//!
//! A catalog is an ordered set of [`TypeCandidate`]s. Each candidate has a
//! [`Rank`], lower ranks being more specific. Inferring the type of a single
//! value walks the candidates from most to least specific and picks the first
//! one whose recognizer accepts the value. The least specific candidate is a
//! fallback that accepts anything.
//!
//! Dialects provide their own catalogs, see [`registry::DialectRegistry`].

pub mod duckdb;
pub mod postgres;
pub mod recognize;
pub mod registry;

use std::fmt;

use crate::error::{AnalyzeError, Result};

/// Specificity of a candidate type. Lower is more specific.
///
/// Ranks are assigned by catalogs and are independent of where a candidate
/// is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const fn new(rank: u8) -> Self {
        Rank(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Predicate deciding if a value can be stored as some type.
#[derive(Clone, Copy)]
pub enum Recognizer {
    Boolean,
    SmallInt,
    /// Fits in 32 bits but not in a smallint.
    Integer,
    /// Fits in 64 bits but not in 32.
    BigInt,
    /// Any float that isn't a 64 bit integer.
    Numeric,
    Timestamp,
    Date,
    /// Any value with at most this many characters.
    MaxLength(usize),
    /// Matches everything.
    Any,
    Custom(fn(&str) -> bool),
}

impl Recognizer {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Boolean => recognize::is_boolean(value),
            Self::SmallInt => recognize::is_smallint(value),
            Self::Integer => recognize::is_int32(value) && !recognize::is_smallint(value),
            Self::BigInt => recognize::is_int64(value) && !recognize::is_int32(value),
            Self::Numeric => recognize::is_float(value) && !recognize::is_int64(value),
            Self::Timestamp => recognize::is_timestamp(value),
            Self::Date => recognize::parse_date(value).is_some(),
            Self::MaxLength(max) => recognize::char_len(value) <= *max,
            Self::Any => true,
            Self::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::SmallInt => write!(f, "SmallInt"),
            Self::Integer => write!(f, "Integer"),
            Self::BigInt => write!(f, "BigInt"),
            Self::Numeric => write!(f, "Numeric"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::Date => write!(f, "Date"),
            Self::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
            Self::Any => write!(f, "Any"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeCandidate {
    pub name: &'static str,
    pub rank: Rank,
    pub recognizer: Recognizer,
}

impl TypeCandidate {
    pub const fn new(name: &'static str, rank: Rank, recognizer: Recognizer) -> Self {
        TypeCandidate {
            name,
            rank,
            recognizer,
        }
    }

    /// If this is a variable length text type with an upper bound.
    pub fn is_bounded(&self) -> bool {
        matches!(self.recognizer, Recognizer::MaxLength(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.recognizer, Recognizer::Any)
    }
}

/// Validated list of candidates, sorted by rank.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    candidates: Vec<TypeCandidate>,
    /// Index of the bounded text candidate, if any.
    bounded: Option<usize>,
}

impl CandidateSet {
    /// Create a new candidate set.
    ///
    /// Candidates may be given in any order. Ranks must be unique, there must
    /// be exactly one fallback candidate and it must have the highest rank,
    /// and there may be at most one bounded text candidate.
    pub fn try_new(
        dialect: &str,
        candidates: impl IntoIterator<Item = TypeCandidate>,
    ) -> Result<Self> {
        let invalid = |reason: String| AnalyzeError::InvalidCatalog {
            dialect: dialect.to_string(),
            reason,
        };

        let mut candidates: Vec<_> = candidates.into_iter().collect();
        candidates.sort_by_key(|c| c.rank);

        for pair in candidates.windows(2) {
            if pair[0].rank == pair[1].rank {
                return Err(invalid(format!(
                    "'{}' and '{}' share rank {}",
                    pair[0].name, pair[1].name, pair[0].rank
                )));
            }
        }

        match candidates.iter().filter(|c| c.is_fallback()).count() {
            1 => (),
            n => {
                return Err(invalid(format!(
                    "expected exactly one fallback type, found {n}"
                )));
            }
        }
        // Exactly one fallback exists, so the list is non-empty.
        let last = &candidates[candidates.len() - 1];
        if !last.is_fallback() {
            return Err(invalid(format!(
                "fallback type must have the highest rank, found '{}'",
                last.name
            )));
        }

        let mut bounded = candidates.iter().enumerate().filter(|(_, c)| c.is_bounded());
        let bounded_idx = bounded.next().map(|(idx, _)| idx);
        if bounded.next().is_some() {
            return Err(invalid("more than one bounded text type".to_string()));
        }

        Ok(CandidateSet {
            candidates,
            bounded: bounded_idx,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Ordered candidate types for some dialect.
pub trait TypeCatalog: fmt::Debug + Sync + Send {
    /// Identifier of the dialect, matched case-insensitively.
    fn dialect(&self) -> &str;

    fn candidates(&self) -> &CandidateSet;

    /// Rank of the first candidate accepting `value`.
    fn infer_rank(&self, value: &str) -> Rank {
        self.candidates()
            .iter()
            .find(|c| c.recognizer.matches(value))
            .unwrap_or_else(|| self.fallback())
            .rank
    }

    fn candidate(&self, rank: Rank) -> Option<&TypeCandidate> {
        let candidates = &self.candidates().candidates;
        candidates
            .binary_search_by_key(&rank, |c| c.rank)
            .ok()
            .map(|idx| &candidates[idx])
    }

    /// Rank every column starts at.
    fn most_specific(&self) -> Rank {
        self.candidates().candidates[0].rank
    }

    fn fallback(&self) -> &TypeCandidate {
        let candidates = &self.candidates().candidates;
        &candidates[candidates.len() - 1]
    }

    /// Rank of the bounded text candidate, if the dialect has one.
    fn bounded_rank(&self) -> Option<Rank> {
        let set = self.candidates();
        set.bounded.map(|idx| set.candidates[idx].rank)
    }

    /// Name of the type for `rank`, falling back to the fallback type's name
    /// for ranks not in this catalog.
    fn type_name(&self, rank: Rank) -> &'static str {
        self.candidate(rank).unwrap_or_else(|| self.fallback()).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestCatalog(CandidateSet);

    impl TypeCatalog for TestCatalog {
        fn dialect(&self) -> &str {
            "test"
        }

        fn candidates(&self) -> &CandidateSet {
            &self.0
        }
    }

    fn is_yes(v: &str) -> bool {
        v == "yes"
    }

    #[test]
    fn candidates_sorted_by_rank() {
        let set = CandidateSet::try_new(
            "test",
            [
                TypeCandidate::new("text", Rank::new(20), Recognizer::Any),
                TypeCandidate::new("int", Rank::new(10), Recognizer::SmallInt),
                TypeCandidate::new("yes", Rank::new(5), Recognizer::Custom(is_yes)),
            ],
        )
        .unwrap();

        let names: Vec<_> = set.iter().map(|c| c.name).collect();
        assert_eq!(vec!["yes", "int", "text"], names);

        let catalog = TestCatalog(set);
        assert_eq!(Rank::new(5), catalog.most_specific());
        assert_eq!(Rank::new(5), catalog.infer_rank("yes"));
        assert_eq!(Rank::new(10), catalog.infer_rank("12"));
        assert_eq!(Rank::new(20), catalog.infer_rank("no"));
        assert_eq!(None, catalog.bounded_rank());
        assert_eq!("int", catalog.type_name(Rank::new(10)));
        assert_eq!("text", catalog.type_name(Rank::new(11)));
    }

    #[test]
    fn reject_duplicate_rank() {
        let err = CandidateSet::try_new(
            "test",
            [
                TypeCandidate::new("a", Rank::new(1), Recognizer::Boolean),
                TypeCandidate::new("b", Rank::new(1), Recognizer::SmallInt),
                TypeCandidate::new("text", Rank::new(2), Recognizer::Any),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("share rank 1"), "{err}");
    }

    #[test]
    fn reject_missing_fallback() {
        let err = CandidateSet::try_new(
            "test",
            [TypeCandidate::new("a", Rank::new(1), Recognizer::Boolean)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("found 0"), "{err}");

        let err = CandidateSet::try_new("test", Vec::<TypeCandidate>::new()).unwrap_err();
        assert!(err.to_string().contains("found 0"), "{err}");
    }

    #[test]
    fn reject_fallback_not_last() {
        let err = CandidateSet::try_new(
            "test",
            [
                TypeCandidate::new("text", Rank::new(1), Recognizer::Any),
                TypeCandidate::new("a", Rank::new(2), Recognizer::Boolean),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("highest rank"), "{err}");
    }

    #[test]
    fn reject_multiple_bounded() {
        let err = CandidateSet::try_new(
            "test",
            [
                TypeCandidate::new("short", Rank::new(1), Recognizer::MaxLength(4)),
                TypeCandidate::new("long", Rank::new(2), Recognizer::MaxLength(40)),
                TypeCandidate::new("text", Rank::new(3), Recognizer::Any),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("bounded"), "{err}");
    }

    #[test]
    fn integer_family_is_exclusive() {
        let cases = [
            ("32767", [true, false, false, false]),
            ("32768", [false, true, false, false]),
            ("-32769", [false, true, false, false]),
            ("2147483648", [false, false, true, false]),
            ("9223372036854775807", [false, false, true, false]),
            ("9223372036854775808", [false, false, false, true]),
            ("1.5", [false, false, false, true]),
        ];

        let recognizers = [
            Recognizer::SmallInt,
            Recognizer::Integer,
            Recognizer::BigInt,
            Recognizer::Numeric,
        ];
        for (value, expected) in cases {
            let got: Vec<_> = recognizers.iter().map(|r| r.matches(value)).collect();
            assert_eq!(expected.to_vec(), got, "value: {value}");
        }
    }
}
