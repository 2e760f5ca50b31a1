//! Document loading and entity extraction against a small SDN list.

use std::fs;

use sdn_ingest::{IngestError, SdnDocument, extract_entity};
use sdn_model::{EntityKind, SourceIdentifier};
use tempfile::TempDir;

const SAMPLE: &str = r#"<?xml version="1.0" standalone="yes"?>
<sdnList xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns="http://tempuri.org/sdnList.xsd">
  <publshInformation>
    <Publish_Date>03/01/2024</Publish_Date>
    <Record_Count>2</Record_Count>
  </publshInformation>
  <sdnEntry>
    <uid>36</uid>
    <lastName>SMITH</lastName>
    <firstName> John </firstName>
    <title>Director</title>
    <sdnType>Individual</sdnType>
    <programList>
      <program>SDGT</program>
      <program>IRGC</program>
    </programList>
    <akaList>
      <aka><uid>1</uid><type>a.k.a.</type><category>strong</category><lastName>SMYTHE</lastName><firstName>Jon</firstName></aka>
      <aka><uid>2</uid><type>f.k.a.</type><category>weak</category></aka>
    </akaList>
    <idList>
      <id><uid>10</uid><idType>Passport</idType><idNumber>AB123</idNumber><idCountry>Russia</idCountry></id>
      <id><uid>11</uid><idType>Gender</idType><idNumber>Male</idNumber></id>
      <id><uid>12</uid><idType>Website</idType><idNumber>  </idNumber></id>
    </idList>
    <addressList>
      <address><uid>20</uid><address1>Address Unknown</address1><city>Moscow</city><country>Russia</country></address>
    </addressList>
    <dateOfBirthList>
      <dateOfBirthItem><uid>30</uid><dateOfBirth>05 Jan 1970</dateOfBirth><mainEntry>true</mainEntry></dateOfBirthItem>
      <dateOfBirthItem><uid>31</uid><dateOfBirth>circa 1968</dateOfBirth></dateOfBirthItem>
    </dateOfBirthList>
    <placeOfBirthList>
      <placeOfBirthItem><uid>40</uid><placeOfBirth>Moscow, Russia</placeOfBirth></placeOfBirthItem>
    </placeOfBirthList>
    <nationalityList>
      <nationality><uid>50</uid><country>Russia</country></nationality>
    </nationalityList>
  </sdnEntry>
  <sdnEntry>
    <uid>77</uid>
    <lastName>SEA STAR</lastName>
    <sdnType>Vessel</sdnType>
    <vesselInfo>
      <callSign>9HXY</callSign>
      <vesselType>Crude Oil Tanker</vesselType>
      <vesselFlag>Malta</vesselFlag>
      <tonnage></tonnage>
    </vesselInfo>
  </sdnEntry>
</sdnList>
"#;

#[test]
fn loads_publish_date_and_entries_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sdn.xml");
    fs::write(&path, SAMPLE).unwrap();

    let document = SdnDocument::load(&path).expect("load document");
    assert_eq!(document.publish_date(), "03/01/2024");
    let uids: Vec<&str> = document.entries().map(|e| e.value("uid")).collect();
    assert_eq!(uids, vec!["36", "77"]);
}

#[test]
fn extracts_individual_entry() {
    let document = SdnDocument::parse_str(SAMPLE, "sdn.xml".as_ref()).unwrap();
    let entry = document.entries().next().unwrap();
    let entity = extract_entity(entry);

    assert_eq!(entity.uid.as_deref(), Some("36"));
    assert_eq!(entity.kind, EntityKind::Individual);
    assert_eq!(entity.first_name.as_deref(), Some("John"));
    assert_eq!(entity.programs, vec!["SDGT", "IRGC"]);
    assert_eq!(entity.aliases.len(), 2);
    assert!(entity.aliases[0].has_name());
    assert!(!entity.aliases[1].has_name());
    assert_eq!(entity.dates_of_birth, vec!["1970-01-05", "circa 1968"]);
    assert_eq!(entity.places_of_birth, vec!["Moscow, Russia"]);
    assert_eq!(entity.nationalities, vec!["Russia"]);
    assert!(entity.citizenships.is_empty());
    assert_eq!(
        entity.identifiers,
        vec![
            SourceIdentifier::new("Passport", Some("AB123".into()), Some("Russia".into())),
            SourceIdentifier::new("Gender", Some("Male".into()), None),
            SourceIdentifier::new("Website", None, None),
        ]
    );
    let address = &entity.addresses[0];
    assert_eq!(address.address1.as_deref(), Some("Address Unknown"));
    assert_eq!(address.city.as_deref(), Some("Moscow"));
    assert_eq!(address.postal_code, None);
    assert!(entity.vessel.is_none());
}

#[test]
fn extracts_vessel_info() {
    let document = SdnDocument::parse_str(SAMPLE, "sdn.xml".as_ref()).unwrap();
    let entity = extract_entity(document.entries().nth(1).unwrap());
    assert_eq!(entity.kind, EntityKind::Vessel);
    let vessel = entity.vessel.expect("vessel info");
    assert_eq!(vessel.call_sign.as_deref(), Some("9HXY"));
    assert_eq!(vessel.flag.as_deref(), Some("Malta"));
    assert_eq!(vessel.tonnage, None);
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = SdnDocument::load(&dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn mismatched_tags_are_rejected() {
    let err = SdnDocument::parse_str("<sdnList><sdnEntry></sdnList>", "bad.xml".as_ref())
        .unwrap_err();
    assert!(matches!(err, IngestError::Xml { .. }));
}
