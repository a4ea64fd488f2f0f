use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use file2ddl_core::analyzer::Analysis;
use file2ddl_core::catalog::TypeCatalog;
use file2ddl_core::column::ColumnType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputMode {
    /// One `name: type` line per column.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    dialect: &'a str,
    rows: usize,
    columns: Vec<JsonColumn<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonColumn<'a> {
    name: &'a str,
    #[serde(flatten)]
    ty: &'a ColumnType,
}

pub fn write_analysis(
    out: &mut impl Write,
    mode: OutputMode,
    catalog: &dyn TypeCatalog,
    analysis: &Analysis,
) -> Result<()> {
    match mode {
        OutputMode::Text => {
            writeln!(out, "Column Analysis:")?;
            for (name, ty) in analysis.columns() {
                writeln!(out, "{name}: {ty}")?;
            }
        }
        OutputMode::Json => {
            let report = JsonReport {
                dialect: catalog.dialect(),
                rows: analysis.num_rows,
                columns: analysis
                    .columns()
                    .map(|(name, ty)| JsonColumn { name, ty })
                    .collect(),
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use file2ddl_core::analyzer::{AnalyzeOptions, Analyzer};
    use file2ddl_core::catalog::postgres::PostgresCatalog;

    use super::*;

    fn render(mode: OutputMode) -> String {
        let analyzer = Analyzer::new(
            Arc::new(PostgresCatalog::try_new().unwrap()),
            AnalyzeOptions::default(),
        );
        let analysis = analyzer
            .analyze(["id,name", "1,ab", "2,abcde"])
            .unwrap();

        let mut buf = Vec::new();
        write_analysis(&mut buf, mode, analyzer.catalog(), &analysis).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_output() {
        let expected = r#"
Column Analysis:
id: smallint
name: varchar(5)
"#
        .trim_start();
        assert_eq!(expected, render(OutputMode::Text));
    }

    #[test]
    fn json_output() {
        let expected = r#"
{"dialect":"postgresql","rows":2,"columns":[{"name":"id","type":"smallint"},{"name":"name","type":"varchar","length":5}]}
"#
        .trim_start();
        assert_eq!(expected, render(OutputMode::Json));
    }
}
