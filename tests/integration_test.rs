//! End-to-end tests for bulk extraction, single validation and the
//! interchange files, driven through the public library API.

use anyhow::Result;
use numsift::interchange::{self, DelimitedConfig, HISTORY_HEADER, RESULTS_HEADER};
use numsift::{NumsiftError, OperatorTable, ResultFilter, Session};
use tempfile::TempDir;

mod common;
use common::*;

mod bulk_extraction {
    use super::*;

    #[test]
    fn test_reference_row() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let rows = TestSheetBuilder::new()
            .with_row("Иванов Иван 8(923)456-78-90 ivan@mail.ru")
            .rows();

        let records = session.run_bulk(&rows, &fixed_clock(), |_| {});
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_classified(record, "79234567890", "megafon", true);
        assert_eq!(record.display_phone(), "+7 (923) 456-78-90");
        assert_eq!(record.name(), Some("Иванов Иван"));
        assert_eq!(record.email(), Some("ivan@mail.ru"));
        assert_eq!(record.operator_name(), "MegaFon");
        assert_eq!(record.processed_at(), FIXED_TIMESTAMP);
    }

    #[test]
    fn test_mixed_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = mixed_contacts().build(&temp_dir.path().join("rows.csv"))?;

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let records = session.run_bulk_file(&input, &DelimitedConfig::csv(), &fixed_clock(), |_| {})?;

        assert_eq!(records.len(), 4);
        assert_classified(&records[0], "79234567890", "megafon", true);
        assert_classified(&records[1], "79161234567", "megafon", true);
        assert_classified(&records[2], "74957654321", "other", false);
        assert_classified(&records[3], "79051234567", "megafon", true);

        assert_eq!(records[1].name(), Some("Петрова Анна Сергеевна"));
        assert_eq!(
            records[1].original_text(),
            "Петрова Анна Сергеевна +7 916 123-45-67"
        );
        assert_eq!(records[2].name(), None);
        assert_eq!(records[2].email(), Some("sales@corp.ru"));
        assert_eq!(records[3].raw_phone_digits(), "89051234567");
        Ok(())
    }

    #[test]
    fn test_row_with_only_name_and_email_yields_nothing() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let rows = TestSheetBuilder::new()
            .with_row("Сидоров Олег oleg@yandex.ru")
            .rows();

        assert!(session.run_bulk(&rows, &fixed_clock(), |_| {}).is_empty());
    }

    #[test]
    fn test_header_row_never_extracted() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let rows = TestSheetBuilder::new()
            .with_header("8 (916) 123-45-67")
            .rows();

        assert!(session.run_bulk(&rows, &fixed_clock(), |_| {}).is_empty());
    }

    #[test]
    fn test_tab_delimited_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = TestSheetBuilder::new()
            .with_config(DelimitedConfig::tsv())
            .with_row_cells(&["Иванов Иван, 8 923 456 78 90", "ignored"])
            .build(&temp_dir.path().join("rows.tsv"))?;

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let records = session.run_bulk_file(&input, &DelimitedConfig::tsv(), &fixed_clock(), |_| {})?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("Иванов Иван"));
        Ok(())
    }

    #[test]
    fn test_classic_mac_line_endings() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = write_raw(
            temp_dir.path(),
            "mac.csv",
            "Contact\r8 916 123 45 67\r8 923 456 78 90\r".as_bytes(),
        )?;

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let records = session.run_bulk_file(&input, &DelimitedConfig::csv(), &fixed_clock(), |_| {})?;

        assert_eq!(records.len(), 2);
        assert_classified(&records[0], "79161234567", "megafon", true);
        assert_classified(&records[1], "79234567890", "megafon", true);
        Ok(())
    }

    #[test]
    fn test_decode_failure_keeps_previous_results() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let good = mixed_contacts().build(&temp_dir.path().join("good.csv"))?;
        let bad = write_raw(temp_dir.path(), "bad.csv", b"Contact\n\"8 916 123 45 67\n")?;

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        session.run_bulk_file(&good, &DelimitedConfig::csv(), &fixed_clock(), |_| {})?;

        let err = session
            .run_bulk_file(&bad, &DelimitedConfig::csv(), &fixed_clock(), |_| {})
            .unwrap_err();
        assert!(matches!(err, NumsiftError::Decode { line: 2, .. }));
        assert_eq!(session.results().len(), 4);
        Ok(())
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let err = session
            .run_bulk_file(
                std::path::Path::new("/nonexistent/rows.csv"),
                &DelimitedConfig::csv(),
                &fixed_clock(),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, NumsiftError::Io { .. }));
    }

    #[test]
    fn test_filter_over_session_results() -> Result<()> {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        session.run_bulk(&mixed_contacts().rows(), &fixed_clock(), |_| {});

        let megafon = session.filtered(&ResultFilter::new().with_operator("megafon"));
        assert_eq!(megafon.len(), 3);

        let by_name = session.filtered(&ResultFilter::new().with_search("петрова"));
        assert_eq!(by_name.len(), 1);

        // Sentinel text is searchable like any other value.
        let missing = session.filtered(&ResultFilter::new().with_search("not provided"));
        assert_eq!(missing.len(), 3);
        Ok(())
    }
}

mod single_validation {
    use super::*;

    #[test]
    fn test_rejecting_and_accepting_literals() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        let clock = fixed_clock();

        let rejected = session.validate("+7", "mts", "9876543210", &clock).unwrap();
        assert!(!rejected.is_valid());
        assert_eq!(rejected.raw_digits(), "9876543210");
        assert_eq!(session.history().len(), 1);

        let accepted = session.validate("+7", "mts", "981234567", &clock).unwrap();
        assert!(accepted.is_valid());
        assert_eq!(accepted.full_number(), "+7981234567");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_selected_operator_only() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);

        // A beeline number checked against tele2 is not reclassified.
        let record = session
            .validate("+7", "tele2", "901234567", &fixed_clock())
            .unwrap();
        assert!(!record.is_valid());
        assert_eq!(record.operator_name(), "Tele2");
    }

    #[test]
    fn test_empty_input_rejected() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        assert!(session.validate("+7", "mts", "", &fixed_clock()).is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_clear_history() {
        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        session.validate("+7", "mts", "981234567", &fixed_clock()).unwrap();
        session.clear_history();
        assert!(session.history().is_empty());
    }
}

mod interchange_files {
    use super::*;

    #[test]
    fn test_results_export_columns() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = temp_dir.path().join("out.csv");

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        session.run_bulk(&mixed_contacts().rows(), &fixed_clock(), |_| {});
        let written = session.export_results(&output, &DelimitedConfig::csv())?;
        assert_eq!(written, 4);

        let text = read_export(&output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], RESULTS_HEADER.join(","));
        assert_eq!(
            lines[1],
            format!(
                "+7 (923) 456-78-90,Иванов Иван,ivan@mail.ru,MegaFon,Valid,\"{}\"",
                FIXED_TIMESTAMP
            )
        );
        assert!(lines[3].contains("Not provided"));
        assert!(lines[3].contains("Invalid"));
        Ok(())
    }

    #[test]
    fn test_empty_export_refused() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let output = temp_dir.path().join("out.csv");

        let table = OperatorTable::builtin();
        let session = Session::new(&table);
        let err = session
            .export_results(&output, &DelimitedConfig::csv())
            .unwrap_err();
        assert!(matches!(err, NumsiftError::EmptyExport { .. }));
        assert!(!output.exists());

        let err = session
            .export_history(&output, &DelimitedConfig::csv())
            .unwrap_err();
        assert!(matches!(err, NumsiftError::EmptyExport { .. }));
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_history_export_then_import_replaces_history() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("history.csv");
        let table = OperatorTable::builtin();
        let clock = fixed_clock();

        let mut first = Session::new(&table);
        first.validate("+7", "mts", "9876543210", &clock)?;
        first.validate("+7", "mts", "981234567", &clock)?;
        first.export_history(&path, &DelimitedConfig::csv())?;

        let text = read_export(&path);
        assert!(text.starts_with(&HISTORY_HEADER.join(",")));

        let mut second = Session::new(&table);
        second.validate("+7", "beeline", "961234567", &clock)?;
        let loaded = second.import_history(&path, &DelimitedConfig::csv())?;

        assert_eq!(loaded, 2);
        assert_eq!(second.history(), first.history());
        Ok(())
    }

    #[test]
    fn test_import_does_not_check_shape() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = write_raw(
            temp_dir.path(),
            "foreign.csv",
            "Number,Comment\n12345,hello\n".as_bytes(),
        )?;

        let records = interchange::import_history(&path, &DelimitedConfig::csv())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_digits(), "12345");
        assert_eq!(records[0].operator_name(), "");
        assert!(!records[0].is_valid());
        Ok(())
    }

    #[test]
    fn test_failed_import_keeps_history() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = write_raw(temp_dir.path(), "broken.csv", b"Number\n\xff\n")?;

        let table = OperatorTable::builtin();
        let mut session = Session::new(&table);
        session.validate("+7", "mts", "981234567", &fixed_clock())?;

        assert!(session.import_history(&path, &DelimitedConfig::csv()).is_err());
        assert_eq!(session.history().len(), 1);
        Ok(())
    }
}

mod custom_rules {
    use super::*;

    #[test]
    fn test_rules_file_drives_classification() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let rules = write_raw(
            temp_dir.path(),
            "rules.json",
            br#"{ "operators": [
                { "id": "moscow", "name": "Moscow landline", "patterns": ["^495[0-9]{7}$"] },
                { "id": "other", "name": "Other operator", "catch_all": true }
            ] }"#,
        )?;

        let table = OperatorTable::from_path(&rules)?;
        let mut session = Session::new(&table);
        session.run_bulk(&mixed_contacts().rows(), &fixed_clock(), |_| {});

        let ids: Vec<&str> = session.results().iter().map(|r| r.operator_id()).collect();
        assert_eq!(ids, ["other", "other", "moscow", "other"]);
        Ok(())
    }

    #[test]
    fn test_rules_file_without_catch_all_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let rules = write_raw(
            temp_dir.path(),
            "rules.json",
            br#"{ "operators": [ { "id": "mts", "name": "MTS", "patterns": ["^91"] } ] }"#,
        )?;

        let err = OperatorTable::from_path(&rules).unwrap_err();
        assert!(matches!(err, NumsiftError::InvalidRuleTable(_)));
        Ok(())
    }

    #[test]
    fn test_malformed_rules_file_names_path() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let rules = write_raw(temp_dir.path(), "rules.json", b"{ not json")?;

        let err = OperatorTable::from_path(&rules).unwrap_err();
        match err {
            NumsiftError::Config { path, .. } => assert_eq!(path, rules),
            other => panic!("expected config error, got {other:?}"),
        }
        Ok(())
    }
}
