//! Record assembly scenarios.

use sdn_codes::{CodeEntry, CodeTable, ID_COUNTRY, ID_TYPE, ReviewFlag, StateTable, TableOptions};
use sdn_map::{ClassificationEngine, EngineOptions};
use sdn_model::{
    Alias, EntityKind, NormalizedRecord, RecordType, SourceAddress, SourceEntity,
    SourceIdentifier, VesselInfo,
};
use sdn_transform::{AssemblerOptions, AssemblyOutcome, RecordAssembler};

const PUBLISH_DATE: &str = "03/01/2024";

fn table() -> CodeTable {
    let mut table = CodeTable::new(TableOptions {
        example_cap: 10,
        sample_seed: 1,
    });
    table.insert(
        CodeEntry::new(ID_TYPE, "Passport", 10)
            .with_mapping("PASSPORT_NUMBER", "")
            .with_review(ReviewFlag::Reviewed),
    );
    table.insert(
        CodeEntry::new(ID_COUNTRY, "Russia", 10)
            .with_mapping("", "RU")
            .with_review(ReviewFlag::Reviewed),
    );
    table
}

fn individual() -> SourceEntity {
    let mut entity = SourceEntity::new(EntityKind::Individual);
    entity.uid = Some("36".to_string());
    entity.last_name = Some("SMITH".to_string());
    entity.first_name = Some("John".to_string());
    entity.programs = vec!["SDGT".to_string()];
    entity.aliases = vec![
        Alias {
            alias_type: Some("a.k.a.".to_string()),
            last_name: Some("SMYTHE".to_string()),
            first_name: Some("Jon".to_string()),
        },
        Alias {
            alias_type: Some("f.k.a.".to_string()),
            last_name: None,
            first_name: None,
        },
    ];
    entity.dates_of_birth = vec!["1970-01-05".to_string()];
    entity.nationalities = vec!["Russia".to_string()];
    entity.identifiers = vec![
        SourceIdentifier::new("Passport", Some("AB123".into()), Some("Russia".into())),
        SourceIdentifier::new("Gender", Some("Male".into()), None),
        SourceIdentifier::new("Website", None, None),
    ];
    entity
}

fn assemble(
    assembler: &RecordAssembler,
    entity: &SourceEntity,
    table: &mut CodeTable,
) -> AssemblyOutcome {
    let states = StateTable::builtin();
    let mut engine = ClassificationEngine::new(table, &states, EngineOptions::default());
    assembler.assemble(entity, PUBLISH_DATE, &mut engine)
}

fn emitted(outcome: AssemblyOutcome) -> NormalizedRecord {
    match outcome {
        AssemblyOutcome::Emitted(assembled) => assembled.record,
        other => panic!("expected an emitted record, got {other:?}"),
    }
}

#[test]
fn individual_with_alias_and_identifiers() {
    let mut table = table();
    let record = emitted(assemble(&RecordAssembler::default(), &individual(), &mut table));
    let line = record.to_json_line().unwrap();
    insta::assert_snapshot!(line, @r#"{"DATA_SOURCE":"OFAC","RECORD_TYPE":"PERSON","RECORD_ID":"36","OFAC_ID":"36","PUBLISH_DATE":"03/01/2024","SDN_PROGRAM":"SDGT","NAME_LIST":[{"NAME_TYPE":"PRIMARY","NAME_LAST":"SMITH","NAME_FIRST":"John"},{"NAME_TYPE":"AKA","NAME_LAST":"SMYTHE","NAME_FIRST":"Jon"}],"ATTR_LIST":[{"DATE_OF_BIRTH":"1970-01-05"},{"NATIONALITY":"Russia"}],"Gender":"Gender: Male","ID_LIST":[{"PASSPORT_NUMBER":"AB123","PASSPORT_COUNTRY":"RU"}]}"#);

    let gender = table.get(ID_TYPE, "Gender").unwrap();
    assert_eq!(gender.reviewed, ReviewFlag::Pending);
    assert_eq!(gender.count, 1);
    assert!(table.get(ID_TYPE, "Website").is_none());
}

#[test]
fn identical_input_serializes_identically() {
    let assembler = RecordAssembler::default();
    let mut first_table = table();
    let mut second_table = table();
    let first = emitted(assemble(&assembler, &individual(), &mut first_table));
    let second = emitted(assemble(&assembler, &individual(), &mut second_table));
    assert_eq!(first.to_json_line().unwrap(), second.to_json_line().unwrap());
}

#[test]
fn assembled_record_notes_identifier_categories() {
    let mut table = table();
    let outcome = assemble(&RecordAssembler::default(), &individual(), &mut table);
    let AssemblyOutcome::Emitted(assembled) = outcome else {
        panic!("expected an emitted record");
    };
    let notes: Vec<(&str, &str)> = assembled
        .identifiers
        .iter()
        .map(|n| (n.category.as_str(), n.raw_type.as_str()))
        .collect();
    assert_eq!(notes, vec![("PASSPORT_NUMBER", "Passport"), ("UNKNOWN", "Gender")]);
}

#[test]
fn organization_names_use_name_org() {
    let mut entity = SourceEntity::new(EntityKind::Entity);
    entity.uid = Some("7".to_string());
    entity.last_name = Some("ACME TRADING LLC".to_string());
    entity.aliases = vec![Alias {
        alias_type: None,
        last_name: Some("ACME".to_string()),
        first_name: None,
    }];
    entity.addresses = vec![
        SourceAddress {
            address1: Some("Address Unknown".to_string()),
            country: Some("Iran".to_string()),
            ..SourceAddress::default()
        },
        SourceAddress {
            address1: Some("Address Unknown".to_string()),
            ..SourceAddress::default()
        },
    ];
    let mut table = table();
    let record = emitted(assemble(&RecordAssembler::default(), &entity, &mut table));
    let value: serde_json::Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
    assert_eq!(value["RECORD_TYPE"], "ORGANIZATION");
    assert_eq!(
        value["NAME_LIST"],
        serde_json::json!([
            {"NAME_TYPE": "PRIMARY", "NAME_ORG": "ACME TRADING LLC"},
            {"NAME_TYPE": "AKA", "NAME_ORG": "ACME"}
        ])
    );
    assert_eq!(value["ADDR_LIST"], serde_json::json!([{"ADDR_COUNTRY": "Iran"}]));
}

#[test]
fn vessel_fields_are_copied() {
    let mut entity = SourceEntity::new(EntityKind::Vessel);
    entity.uid = Some("77".to_string());
    entity.last_name = Some("SEA STAR".to_string());
    entity.vessel = Some(VesselInfo {
        call_sign: Some("9HXY".to_string()),
        flag: Some("Malta".to_string()),
        ..VesselInfo::default()
    });
    let mut table = table();
    let record = emitted(assemble(&RecordAssembler::default(), &entity, &mut table));
    assert_eq!(record.record_type, RecordType::Vessel);
    let value: serde_json::Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
    assert_eq!(value["CALL_SIGN"], "9HXY");
    assert_eq!(value["VESSEL_FLAG"], "Malta");
    assert!(value.get("VESSEL_TYPE").is_none());
}

#[test]
fn core_only_filters_vessels_without_touching_the_table() {
    let mut entity = SourceEntity::new(EntityKind::Vessel);
    entity.uid = Some("77".to_string());
    entity.identifiers = vec![SourceIdentifier::new("MMSI", Some("123".into()), None)];
    let assembler = RecordAssembler::new(AssemblerOptions {
        core_only: true,
        ..AssemblerOptions::default()
    });
    let mut table = table();
    let outcome = assemble(&assembler, &entity, &mut table);
    assert_eq!(outcome, AssemblyOutcome::Filtered(RecordType::Vessel));
    assert!(table.get(ID_TYPE, "MMSI").is_none());
}

#[test]
fn unknown_kind_and_missing_uid_are_skipped() {
    let mut table = table();
    let assembler = RecordAssembler::default();

    let mut ship = SourceEntity::new(EntityKind::parse("Ship"));
    ship.uid = Some("1".to_string());
    assert_eq!(
        assemble(&assembler, &ship, &mut table),
        AssemblyOutcome::UnknownKind("Ship".to_string())
    );

    let anonymous = SourceEntity::new(EntityKind::Individual);
    assert_eq!(assemble(&assembler, &anonymous, &mut table), AssemblyOutcome::MissingUid);
}

#[test]
fn configured_data_source_is_used() {
    let assembler = RecordAssembler::new(AssemblerOptions {
        data_source: "OFAC_SDN".to_string(),
        core_only: false,
    });
    let mut table = table();
    let record = emitted(assemble(&assembler, &individual(), &mut table));
    assert_eq!(record.data_source, "OFAC_SDN");
}
