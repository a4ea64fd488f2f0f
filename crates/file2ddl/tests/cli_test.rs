
use std::io::Write;

use predicates::prelude::*;
use setup::*;

#[test]
fn test_sample_file() {
    let expected = r#"
Column Analysis:
id: smallint
name: varchar(14)
age: integer
is_active: boolean
salary: numeric
created_at: timestamp
birth_date: date
notes: varchar(16)
"#
    .trim_start();

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["--delim", ","])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_matching_ncols() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",", "--ncols", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes: varchar(16)"));
}

#[test]
fn test_mismatched_ncols() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",", "--ncols", "5"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "header line has 8 fields, expected 5",
        ));
}

#[test]
fn test_invalid_field_count() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("invalid_sample.csv"))
        .args(["-d", ","])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 3 has 2 fields, expected 3"));
}

#[test]
fn test_quoted_file() {
    let expected = r#"
Column Analysis:
id: smallint
name: varchar(13)
description: varchar(16)
address: varchar(22)
phone: varchar(8)
email: varchar(24)
created_at: timestamp
notes: varchar(16)
"#
    .trim_start();

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("quoted_sample.csv"))
        .args(["-d", ",", "--quotes", "double"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_quoted_file_without_quote_mode() {
    // Embedded commas split fields when quotes aren't honored.
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("quoted_sample.csv"))
        .args(["-d", ","])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2 has 10 fields, expected 8"));
}

#[test]
fn test_unsupported_flavor() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",", "--flavor", "mysql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "unsupported database dialect: mysql",
        ));
}

#[test]
fn test_flavor_case_insensitive() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",", "--flavor", "PostgreSQL"])
        .assert()
        .success();
}

#[test]
fn test_duckdb_flavor() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",", "--flavor", "duckdb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: VARCHAR\n"))
        .stdout(predicate::str::contains("salary: DOUBLE\n"));
}

#[test]
fn test_read_stdin() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .args(["-", "-d", "|"])
        .write_stdin("a|b\nab|1\nabcde|2\n")
        .assert()
        .success()
        .stdout("Column Analysis:\na: varchar(5)\nb: smallint\n");
}

#[test]
fn test_tab_delimited_tempfile() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "flag\tbig\twhen").unwrap();
    writeln!(file, "t\t9223372036854775807\t2024-01-01").unwrap();
    writeln!(file, "f\t9223372036854775808\t01/02/2024").unwrap();
    file.flush().unwrap();

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(file.path())
        .args(["-d", "\\t"])
        .assert()
        .success()
        .stdout("Column Analysis:\nflag: boolean\nbig: numeric\nwhen: date\n");
}

#[test]
fn test_json_mode() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .args(["-", "-d", ",", "--mode", "json"])
        .write_stdin("id,name\n1,ab\n")
        .assert()
        .success()
        .stdout(
            r#"{"dialect":"postgresql","rows":1,"columns":[{"name":"id","type":"smallint"},{"name":"name","type":"varchar","length":2}]}
"#,
        );
}

#[test]
fn test_multi_char_delimiter_rejected() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .args(["-d", ",,"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single character"));
}

#[test]
fn test_delimiter_required() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("sample.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--delim"));
}

#[test]
fn test_missing_file() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg(testdata("does_not_exist.csv"))
        .args(["-d", ","])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_debug_logging_to_stderr() {
    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .env_remove("RUST_LOG")
        .args(["-", "-d", ",", "-vvv"])
        .write_stdin("a\n1\nx\n")
        .assert()
        .success()
        .stdout("Column Analysis:\na: varchar(1)\n")
        .stderr(predicate::str::contains("promoted column"));
}
