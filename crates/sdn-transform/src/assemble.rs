//! Record assembly.
//!
//! Combines an extracted [`SourceEntity`] with identifier classifications into
//! a [`NormalizedRecord`]. Every field is only set when it has a value.

use sdn_map::{ClassificationEngine, IdentifierOutcome};
use sdn_model::{
    Address, Attribute, NameEntry, NormalizedRecord, RecordType, SourceAddress, SourceEntity,
    VesselFields,
};
use tracing::{debug, warn};

/// `DATA_SOURCE` written unless configured otherwise.
pub const DEFAULT_DATA_SOURCE: &str = "OFAC";

/// Name type for aliases whose type is missing.
pub const DEFAULT_ALIAS_TYPE: &str = "AKA";

/// Placeholder the publisher uses for an unknown street address.
const UNKNOWN_ADDRESS: &str = "Address Unknown";

/// Category recorded for identifiers without a mapped attribute.
pub const UNMAPPED_ID_CATEGORY: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOptions {
    pub data_source: String,
    /// Emit only person and organization records.
    pub core_only: bool,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            core_only: false,
        }
    }
}

/// How one identifier of an emitted record was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierNote {
    /// Normalized attribute, or [`UNMAPPED_ID_CATEGORY`].
    pub category: String,
    pub raw_type: String,
}

/// A record ready to serialize, with the notes gathered while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledRecord {
    pub record: NormalizedRecord,
    pub identifiers: Vec<IdentifierNote>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutcome {
    Emitted(Box<AssembledRecord>),
    /// A known kind excluded by the core-only filter.
    Filtered(RecordType),
    /// `sdnType` was not one of the known kinds.
    UnknownKind(String),
    /// The entry had no `uid`.
    MissingUid,
}

#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    options: AssemblerOptions,
}

impl RecordAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Builds the output record for `entity`. Identifiers are classified, and
    /// the code table touched, only for records that are emitted.
    pub fn assemble(
        &self,
        entity: &SourceEntity,
        publish_date: &str,
        engine: &mut ClassificationEngine<'_>,
    ) -> AssemblyOutcome {
        let Some(record_type) = entity.kind.record_type() else {
            debug!(kind = %entity.kind, uid = ?entity.uid, "unknown sdnType");
            return AssemblyOutcome::UnknownKind(entity.kind.as_str().to_string());
        };
        if self.options.core_only && !record_type.is_core() {
            return AssemblyOutcome::Filtered(record_type);
        }
        let Some(uid) = entity.uid.as_deref() else {
            warn!(kind = %entity.kind, "sdnEntry without uid skipped");
            return AssemblyOutcome::MissingUid;
        };

        let mut record =
            NormalizedRecord::new(&self.options.data_source, record_type, uid, publish_date);
        record.title = entity.title.clone();
        record.remarks = entity.remarks.clone();
        if !entity.programs.is_empty() {
            record.program = Some(entity.programs.join(", "));
        }
        record.name_list = names(entity);
        record.attr_list = attributes(entity);
        record.addr_list = entity.addresses.iter().filter_map(address).collect();

        let mut identifiers = Vec::new();
        for identifier in &entity.identifiers {
            match engine.classify_identifier(identifier, record_type) {
                IdentifierOutcome::Dropped => {}
                IdentifierOutcome::Mapped(mapped) => {
                    identifiers.push(IdentifierNote {
                        category: mapped.attribute,
                        raw_type: identifier.id_type.clone(),
                    });
                    record.id_list.push(mapped.fields);
                }
                IdentifierOutcome::Passthrough { key, value } => {
                    identifiers.push(IdentifierNote {
                        category: UNMAPPED_ID_CATEGORY.to_string(),
                        raw_type: identifier.id_type.clone(),
                    });
                    record.add_passthrough(&key, value);
                }
            }
        }

        if record_type == RecordType::Vessel {
            record.vessel = entity.vessel.as_ref().map(|info| VesselFields {
                call_sign: info.call_sign.clone(),
                vessel_type: info.vessel_type.clone(),
                flag: info.flag.clone(),
                owner: info.owner.clone(),
                tonnage: info.tonnage.clone(),
                gross_registered_tonnage: info.gross_registered_tonnage.clone(),
            });
        }

        AssemblyOutcome::Emitted(Box::new(AssembledRecord {
            record,
            identifiers,
        }))
    }
}

fn names(entity: &SourceEntity) -> Vec<NameEntry> {
    let mut names = Vec::new();
    let build = |name_type: String, last: &Option<String>, first: &Option<String>| {
        if entity.kind.is_individual() {
            NameEntry::person(name_type, last.clone(), first.clone())
        } else {
            NameEntry::organization(name_type, last.clone().or_else(|| first.clone()))
        }
    };
    if entity.has_primary_name() {
        names.push(build(
            NameEntry::PRIMARY.to_string(),
            &entity.last_name,
            &entity.first_name,
        ));
    }
    for alias in entity.aliases.iter().filter(|a| a.has_name()) {
        names.push(build(
            alias_name_type(alias.alias_type.as_deref()),
            &alias.last_name,
            &alias.first_name,
        ));
    }
    names
}

/// `a.k.a.` → `AKA`, `f.k.a.` → `FKA`.
pub fn alias_name_type(raw: Option<&str>) -> String {
    let name_type = raw.unwrap_or_default().replace('.', "").trim().to_uppercase();
    if name_type.is_empty() {
        DEFAULT_ALIAS_TYPE.to_string()
    } else {
        name_type
    }
}

fn attributes(entity: &SourceEntity) -> Vec<Attribute> {
    let dates = entity.dates_of_birth.iter().cloned().map(Attribute::DateOfBirth);
    let places = entity.places_of_birth.iter().cloned().map(Attribute::PlaceOfBirth);
    let nationalities = entity.nationalities.iter().cloned().map(Attribute::Nationality);
    let citizenships = entity.citizenships.iter().cloned().map(Attribute::Citizenship);
    dates
        .chain(places)
        .chain(nationalities)
        .chain(citizenships)
        .filter(|attr| !attr.value().trim().is_empty())
        .collect()
}

fn address(source: &SourceAddress) -> Option<Address> {
    let line1 = source
        .address1
        .clone()
        .filter(|line| !line.eq_ignore_ascii_case(UNKNOWN_ADDRESS));
    let address = Address {
        addr_line1: line1,
        addr_line2: source.address2.clone(),
        addr_line3: source.address3.clone(),
        addr_city: source.city.clone(),
        addr_state: source.state_or_province.clone(),
        addr_postal_code: source.postal_code.clone(),
        addr_country: source.country.clone(),
    };
    (!address.is_empty()).then_some(address)
}
