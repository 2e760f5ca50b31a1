//! Identifier classification scenarios.

use sdn_codes::{CodeEntry, CodeTable, ID_COUNTRY, ID_TYPE, ReviewFlag, StateTable, TableOptions};
use sdn_map::{ClassificationEngine, EngineOptions, IdentifierOutcome, MappedIdentifier};
use sdn_model::{RecordType, SourceIdentifier};

fn table() -> CodeTable {
    let mut table = CodeTable::new(TableOptions {
        example_cap: 10,
        sample_seed: 5,
    });
    let reviewed = |raw_type: &str, raw_code: &str, attribute: &str, default: &str| {
        CodeEntry::new(raw_type, raw_code, 10)
            .with_mapping(attribute, default)
            .with_review(ReviewFlag::Reviewed)
    };
    table.insert(reviewed(ID_TYPE, "Passport", "PASSPORT_NUMBER", ""));
    table.insert(reviewed(ID_TYPE, "Vessel Registration Identification", "IMO_NUMBER", ""));
    table.insert(reviewed(ID_TYPE, "Cedula No.", "NATIONAL_ID_NUMBER", ""));
    table.insert(reviewed(ID_TYPE, "Driver's License No.", "DRIVERS_LICENSE_NUMBER", ""));
    table.insert(reviewed(ID_TYPE, "Other Vessel Call Sign", "CALL_SIGN", ""));
    table.insert(reviewed(ID_COUNTRY, "Russia", "", "RU"));
    table.insert(reviewed(ID_COUNTRY, "Colombia", "", "CO"));
    table
}

fn id(raw_type: &str, number: &str, country: Option<&str>) -> SourceIdentifier {
    SourceIdentifier::new(raw_type, Some(number.to_string()), country.map(str::to_string))
}

fn mapped(outcome: IdentifierOutcome) -> MappedIdentifier {
    match outcome {
        IdentifierOutcome::Mapped(mapped) => mapped,
        other => panic!("expected a mapped identifier, got {other:?}"),
    }
}

fn fields(mapped: &MappedIdentifier) -> Vec<(&str, &str)> {
    mapped.fields.iter().collect()
}

#[test]
fn passport_carries_resolved_country() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Passport", "AB123", Some("Russia")),
        RecordType::Person,
    ));
    assert_eq!(
        fields(&result),
        vec![("PASSPORT_NUMBER", "AB123"), ("PASSPORT_COUNTRY", "RU")]
    );
    assert!(!result.country_unresolved);
    assert_eq!(table.get(ID_TYPE, "Passport").unwrap().count, 1);
    let country = table.get(ID_COUNTRY, "Russia").unwrap();
    assert_eq!(country.examples.count_of("Passport"), Some(1));
}

#[test]
fn unmapped_type_becomes_passthrough_and_pending_entry() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let outcome = engine.classify_identifier(&id("Gender", "Male", None), RecordType::Person);
    assert_eq!(
        outcome,
        IdentifierOutcome::Passthrough {
            key: "Gender".to_string(),
            value: "Gender: Male".to_string(),
        }
    );
    let entry = table.get(ID_TYPE, "Gender").unwrap();
    assert_eq!(entry.reviewed, ReviewFlag::Pending);
    assert_eq!(entry.count, 1);
    assert!(entry.attribute.is_empty());
}

#[test]
fn imo_prefix_is_stripped() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Vessel Registration Identification", "IMO 1234567", None),
        RecordType::Vessel,
    ));
    assert_eq!(fields(&result), vec![("IMO_NUMBER", "1234567")]);
}

#[test]
fn national_id_carries_raw_type() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Cedula No.", "1234", Some("Colombia")),
        RecordType::Person,
    ));
    assert_eq!(
        fields(&result),
        vec![
            ("NATIONAL_ID_NUMBER", "1234"),
            ("NATIONAL_ID_TYPE", "Cedula No."),
            ("NATIONAL_ID_COUNTRY", "CO"),
        ]
    );
}

#[test]
fn drivers_license_falls_back_to_state_codes() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Driver's License No.", "D123", Some("Florida")),
        RecordType::Person,
    ));
    assert_eq!(
        fields(&result),
        vec![("DRIVERS_LICENSE_NUMBER", "D123"), ("DRIVERS_LICENSE_STATE", "FL")]
    );
    // The state name is still queued for curation in the country namespace.
    assert_eq!(table.get(ID_COUNTRY, "Florida").unwrap().reviewed, ReviewFlag::Pending);
}

#[test]
fn unresolved_country_is_left_out() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Passport", "X9", Some("Atlantis")),
        RecordType::Person,
    ));
    assert_eq!(fields(&result), vec![("PASSPORT_NUMBER", "X9")]);
    assert!(result.country_unresolved);
}

#[test]
fn plain_attributes_get_no_companions() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let result = mapped(engine.classify_identifier(
        &id("Other Vessel Call Sign", "9HXY", Some("Russia")),
        RecordType::Vessel,
    ));
    assert_eq!(fields(&result), vec![("CALL_SIGN", "9HXY")]);
}

#[test]
fn empty_values_are_dropped_before_classification() {
    let mut table = table();
    let states = StateTable::builtin();
    let before = table.len();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let outcome = engine.classify_identifier(
        &SourceIdentifier::new("Website", None, None),
        RecordType::Organization,
    );
    assert_eq!(outcome, IdentifierOutcome::Dropped);
    assert_eq!(table.len(), before);
}

#[test]
fn suggestions_prefill_new_types_only_when_enabled() {
    let mut table = table();
    let states = StateTable::builtin();
    let options = EngineOptions {
        suggest_new_codes: true,
    };
    let mut engine = ClassificationEngine::new(&mut table, &states, options);
    let result = mapped(engine.classify_identifier(
        &id("SSN", "123-45-6789", Some("United States")),
        RecordType::Person,
    ));
    assert_eq!(fields(&result), vec![("SSN_NUMBER", "123-45-6789")]);
    let entry = table.get(ID_TYPE, "SSN").unwrap();
    assert_eq!(entry.attribute, "SSN_NUMBER");
    assert_eq!(entry.reviewed, ReviewFlag::Pending);
}

#[test]
fn repeated_classification_is_stable() {
    let mut table = table();
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(&mut table, &states, EngineOptions::default());
    let first = mapped(
        engine.classify_identifier(&id("Passport", "A1", Some("Russia")), RecordType::Person),
    );
    let second = mapped(
        engine.classify_identifier(&id("Passport", "Z9", Some("Russia")), RecordType::Person),
    );

    // Same raw type and country: same attribute and companions, own value.
    assert_eq!(first.attribute, second.attribute);
    assert_eq!(first.country_unresolved, second.country_unresolved);
    let keys = |m: &MappedIdentifier| {
        m.fields
            .iter()
            .map(|(k, _)| k.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    let companions = |m: &MappedIdentifier| {
        m.fields
            .iter()
            .skip(1)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
    };
    assert_eq!(companions(&first), companions(&second));
    assert_eq!(first.fields.get(&first.attribute), Some("A1"));
    assert_eq!(second.fields.get(&second.attribute), Some("Z9"));
    let passport = table.get(ID_TYPE, "Passport").unwrap();
    assert_eq!(passport.count, 2);
    assert_eq!(passport.examples.count_of("A1"), Some(1));
    assert_eq!(passport.examples.count_of("Z9"), Some(1));
}
