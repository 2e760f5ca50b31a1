//! Load, classify and save round trips for the code table.

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sdn_codes::{
    CodeTable, CodeTableError, ExampleSample, ID_COUNTRY, ID_TYPE, ReviewFlag, StateTable,
    TableOptions,
};
use tempfile::TempDir;

const HEADER: &str = "REVIEWED,RAW_TYPE,RAW_CODE,RAW_MODIFIER,SENZING_ATTR,SENZING_DEFAULT,\
RECORD_COUNT,UNIQUE_COUNT,UNIQUE_PERCENT,TOP1,TOP2,TOP3,TOP4,TOP5,TOP6,TOP7,TOP8,TOP9,TOP10";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn options() -> TableOptions {
    TableOptions {
        example_cap: 100,
        sample_seed: 11,
    }
}

fn load(path: &Path) -> CodeTable {
    CodeTable::load(path, options()).expect("load table")
}

#[test]
fn reviewed_decisions_survive_a_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "codes.csv",
        "REVIEWED,RAW_TYPE,RAW_CODE,RAW_MODIFIER,SENZING_ATTR,SENZING_DEFAULT\n\
         Y,idType,Passport,,PASSPORT_NUMBER,\n\
         Y,idCountry,Russia,,,RU\n\
         N,idType,Gender,,,\n",
    );
    let mut table = load(&path);
    assert_eq!(table.len(), 3);
    assert_eq!(table.unreviewed_count(), 1);
    table.classify(ID_TYPE, "Passport", Some("123"));
    table.save(&path).expect("save table");

    let reloaded = load(&path);
    let before: Vec<_> = table.entries().map(|e| (e.raw_code.clone(), e.decision())).collect();
    let after: Vec<_> = reloaded.entries().map(|e| (e.raw_code.clone(), e.decision())).collect();
    assert_eq!(before, after);
    // Usage statistics are run-scoped.
    assert!(reloaded.entries().all(|e| e.count == 0 && e.examples.is_empty()));
    assert!(!dir.path().join("codes.csv.tmp").exists());
}

#[test]
fn saved_table_is_sorted_with_statistics() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "codes.csv",
        "REVIEWED,RAW_TYPE,RAW_CODE,SENZING_ATTR,SENZING_DEFAULT\n\
         Y,idType,Passport,PASSPORT_NUMBER,\n\
         Y,idCountry,Iran,,IR\n",
    );
    let mut table = load(&path);
    for value in ["123", "123", "456"] {
        table.classify(ID_TYPE, "Passport", Some(value));
    }
    table.classify(ID_TYPE, "Gender", Some("Male"));
    table.save(&path).expect("save table");

    let saved = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = saved.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], format!("Y,idCountry,Iran,,,IR,0,0,0{}", ",".repeat(10)));
    assert_eq!(
        lines[2],
        format!("N,idType,Gender,,,,1,1,100.00,Male (1){}", ",".repeat(9))
    );
    assert_eq!(
        lines[3],
        format!(
            "Y,idType,Passport,,PASSPORT_NUMBER,,3,2,66.67,123 (2),456 (1){}",
            ",".repeat(8)
        )
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn duplicate_rows_keep_the_last_one() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "codes.csv",
        "REVIEWED,RAW_TYPE,RAW_CODE,SENZING_ATTR,SENZING_DEFAULT\n\
         N,idCountry,Burma,,MM\n\
         Y,idCountry,Burma,,BU\n",
    );
    let table = load(&path);
    assert_eq!(table.len(), 1);
    assert_eq!(table.duplicate_rows(), 1);
    let entry = table.get(ID_COUNTRY, "Burma").unwrap();
    assert_eq!(entry.default_value, "BU");
    assert_eq!(entry.reviewed, ReviewFlag::Reviewed);
}

#[test]
fn missing_required_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "codes.csv", "REVIEWED,RAW_TYPE,RAW_CODE,SENZING_ATTR\n");
    let err = CodeTable::load(&path, options()).unwrap_err();
    assert!(matches!(
        err,
        CodeTableError::MissingColumn {
            column: "SENZING_DEFAULT",
            ..
        }
    ));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = CodeTable::load(&dir.path().join("absent.csv"), options()).unwrap_err();
    assert!(matches!(err, CodeTableError::Io { .. }));
}

#[test]
fn same_seed_and_input_produce_identical_tables() {
    let opts = TableOptions {
        example_cap: 2,
        sample_seed: 99,
    };
    let render = || {
        let mut table = CodeTable::new(opts);
        for n in 0..50 {
            let value = format!("A{}", n % 7);
            table.classify(ID_TYPE, "Passport", Some(&value));
        }
        let mut out = Vec::new();
        table.write_to(&mut out, Path::new("memory")).unwrap();
        out
    };
    assert_eq!(render(), render());
}

#[test]
fn state_codes_extend_from_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "states.csv", "NAME,CODE\nBaja California,BC\n,XX\n");
    let mut states = StateTable::builtin();
    assert_eq!(states.extend_from_csv(&path).unwrap(), 1);
    assert_eq!(states.lookup("baja california"), Some("BC"));
    assert_eq!(states.lookup("Texas"), Some("TX"));
}

proptest! {
    #[test]
    fn example_sample_never_exceeds_cap(
        cap in 1usize..8,
        values in proptest::collection::vec("[a-j]{1,2}", 0..200),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sample = ExampleSample::new(cap).with_protected(2);
        let mut distinct = std::collections::BTreeSet::new();
        for value in &values {
            sample.observe(value, &mut rng);
            distinct.insert(value.as_str());
            prop_assert!(sample.len() <= cap);
            prop_assert_eq!(sample.len(), distinct.len().min(cap));
            prop_assert!(sample.count_of(value).is_some());
        }
    }
}
