/// Broad classification of an [`AnalyzeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied parameters disagree with the input.
    Configuration,
    /// A data row does not have the shape established by the header.
    Structural,
    /// Unknown dialect or a malformed type catalog.
    Dialect,
    /// The line source failed.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("header line has {found} fields, expected {expected}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("line {line} has {found} fields, expected {expected}")]
    RowArity {
        /// 1-based, the header is line 1.
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("scan aborted at line {line}, no further lines accepted")]
    ScanAborted { line: usize },

    #[error("unsupported database dialect: {name}. Supported dialects: {supported}")]
    UnsupportedDialect { name: String, supported: String },

    #[error("invalid type catalog '{dialect}': {reason}")]
    InvalidCatalog { dialect: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnCountMismatch { .. } => ErrorKind::Configuration,
            Self::RowArity { .. } | Self::ScanAborted { .. } => ErrorKind::Structural,
            Self::UnsupportedDialect { .. } | Self::InvalidCatalog { .. } => ErrorKind::Dialect,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T, E = AnalyzeError> = std::result::Result<T, E>;
