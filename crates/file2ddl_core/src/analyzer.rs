//! Column type inference over a sequence of lines.
//!
//! The first line is the header, it names the columns and fixes the number of
//! fields every following line must have. Every data field is ranked by the
//! catalog and the column is promoted to that rank if it's less specific than
//! what the column currently holds. Columns are never demoted.
//!
//! The scan stops at the first error, no partial results are returned.
use std::convert::Infallible;
use std::io::BufRead;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::catalog::TypeCatalog;
use crate::column::{ColumnState, ColumnType};
use crate::error::{AnalyzeError, Result};
use crate::tokenizer::{QuoteMode, Tokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub delimiter: char,
    pub quote: QuoteMode,
    /// Number of columns the header must have, if known ahead of time.
    pub expected_columns: Option<NonZeroUsize>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            delimiter: ',',
            quote: QuoteMode::None,
            expected_columns: None,
        }
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub column_names: Vec<String>,
    pub column_types: Vec<ColumnType>,
    /// Number of data rows scanned, excluding the header.
    pub num_rows: usize,
}

impl Analysis {
    /// Iterate over (name, type) pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnType)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.column_types.iter())
    }
}

impl From<Infallible> for AnalyzeError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    catalog: Arc<dyn TypeCatalog>,
    options: AnalyzeOptions,
}

impl Analyzer {
    pub fn new(catalog: Arc<dyn TypeCatalog>, options: AnalyzeOptions) -> Self {
        Analyzer { catalog, options }
    }

    pub fn catalog(&self) -> &dyn TypeCatalog {
        self.catalog.as_ref()
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze lines from an in-memory source.
    pub fn analyze<I, S>(&self, lines: I) -> Result<Analysis>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.analyze_fallible(lines.into_iter().map(Ok::<S, Infallible>))
    }

    /// Analyze lines read from a buffered reader.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped before tokenizing.
    pub fn analyze_reader<R: BufRead>(&self, reader: R) -> Result<Analysis> {
        self.analyze_fallible(reader.lines())
    }

    /// Analyze lines from a source that may fail while producing lines.
    pub fn analyze_fallible<I, S, E>(&self, lines: I) -> Result<Analysis>
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
        AnalyzeError: From<E>,
    {
        let mut lines = lines.into_iter();

        let header = match lines.next() {
            Some(header) => header?,
            None => return self.empty(),
        };

        let mut scan = self.start(header.as_ref())?;
        for line in lines {
            scan.push_line(line?.as_ref())?;
        }

        let analysis = scan.finish()?;
        info!(
            dialect = self.catalog.dialect(),
            columns = analysis.column_names.len(),
            rows = analysis.num_rows,
            "finished column analysis"
        );

        Ok(analysis)
    }

    /// Begin an incremental scan using `header` as the first line.
    pub fn start(&self, header: &str) -> Result<ColumnScan<'_>> {
        ColumnScan::try_new(self.catalog.as_ref(), &self.options, header)
    }

    fn empty(&self) -> Result<Analysis> {
        if let Some(expected) = self.options.expected_columns {
            return Err(AnalyzeError::ColumnCountMismatch {
                expected: expected.get(),
                found: 0,
            });
        }
        debug!("input has no header line");
        Ok(Analysis::default())
    }
}

/// Incremental scan state.
///
/// Holds one [`ColumnState`] per header column, memory use doesn't depend on
/// the number of rows pushed.
///
/// The first error is terminal. Later calls to [`ColumnScan::push_line`] and
/// [`ColumnScan::finish`] return [`AnalyzeError::ScanAborted`].
#[derive(Debug)]
pub struct ColumnScan<'a> {
    catalog: &'a dyn TypeCatalog,
    tokenizer: Tokenizer,
    columns: Vec<ColumnState>,
    /// Reusable field buffer.
    fields: Vec<String>,
    /// Line number of the last line consumed, 1-based.
    line: usize,
    /// Line the scan failed on.
    failed_at: Option<usize>,
}

impl<'a> ColumnScan<'a> {
    pub fn try_new(
        catalog: &'a dyn TypeCatalog,
        options: &AnalyzeOptions,
        header: &str,
    ) -> Result<Self> {
        let tokenizer = Tokenizer::new(options.delimiter, options.quote);
        let names = tokenizer.tokenize(header);

        if let Some(expected) = options.expected_columns {
            if expected.get() != names.len() {
                return Err(AnalyzeError::ColumnCountMismatch {
                    expected: expected.get(),
                    found: names.len(),
                });
            }
        }

        let initial = catalog.most_specific();
        let columns: Vec<_> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| ColumnState::new(idx, name, initial))
            .collect();

        debug!(
            dialect = catalog.dialect(),
            ?tokenizer,
            columns = columns.len(),
            "read header"
        );

        Ok(ColumnScan {
            catalog,
            tokenizer,
            fields: Vec::with_capacity(columns.len()),
            columns,
            line: 1,
            failed_at: None,
        })
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnState] {
        &self.columns
    }

    /// Tokenize a data line and fold its fields into the column states.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        if let Some(line) = self.failed_at {
            return Err(AnalyzeError::ScanAborted { line });
        }

        self.line += 1;
        self.tokenizer.tokenize_into(line, &mut self.fields);

        if self.fields.len() != self.columns.len() {
            self.failed_at = Some(self.line);
            return Err(AnalyzeError::RowArity {
                line: self.line,
                expected: self.columns.len(),
                found: self.fields.len(),
            });
        }

        trace!(line = self.line, fields = self.fields.len(), "scanning row");

        let bounded = self.catalog.bounded_rank();
        for (col, field) in self.columns.iter_mut().zip(self.fields.iter()) {
            let field_rank = self.catalog.infer_rank(field);
            let bounded_length = if bounded == Some(field_rank) {
                Some(field.chars().count())
            } else {
                None
            };

            if let Some(prev) = col.observe(field_rank, bounded_length) {
                debug!(
                    column = col.name(),
                    line = self.line,
                    from = self.catalog.type_name(prev),
                    to = self.catalog.type_name(field_rank),
                    "promoted column"
                );
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Result<Analysis> {
        if let Some(line) = self.failed_at {
            return Err(AnalyzeError::ScanAborted { line });
        }

        let column_types = self
            .columns
            .iter()
            .map(|col| col.finish(self.catalog))
            .collect();
        let column_names = self
            .columns
            .into_iter()
            .map(|col| col.name().to_string())
            .collect();

        Ok(Analysis {
            column_names,
            column_types,
            num_rows: self.line - 1,
        })
    }
}
