//! Infer storage types for the columns of delimited text files.
//!
//! ```
//! use std::sync::Arc;
//!
//! use file2ddl_core::analyzer::{AnalyzeOptions, Analyzer};
//! use file2ddl_core::catalog::registry::DialectRegistry;
//!
//! let registry = DialectRegistry::with_builtins().unwrap();
//! let analyzer = Analyzer::new(registry.get("postgresql").unwrap(), AnalyzeOptions::default());
//!
//! let analysis = analyzer.analyze(["id,name", "1,ab", "2,abcde"]).unwrap();
//! let rendered: Vec<_> = analysis
//!     .columns()
//!     .map(|(name, ty)| format!("{name}: {ty}"))
//!     .collect();
//! assert_eq!(vec!["id: smallint", "name: varchar(5)"], rendered);
//! ```

pub mod analyzer;
pub mod catalog;
pub mod column;
pub mod error;
pub mod tokenizer;
