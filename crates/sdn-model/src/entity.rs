//! Source-side value objects produced by the record extractor.
//!
//! Every optional scalar is `None` when the source node was absent or held
//! only whitespace; values are already trimmed.

use crate::kind::EntityKind;

/// One sanctioned party as read from an `sdnEntry` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntity {
    pub uid: Option<String>,
    pub kind: EntityKind,
    pub title: Option<String>,
    pub remarks: Option<String>,
    /// Program memberships in document order; duplicates are kept.
    pub programs: Vec<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub aliases: Vec<Alias>,
    /// Dates of birth, already passed through best-effort date formatting.
    pub dates_of_birth: Vec<String>,
    pub places_of_birth: Vec<String>,
    pub nationalities: Vec<String>,
    pub citizenships: Vec<String>,
    pub addresses: Vec<SourceAddress>,
    pub identifiers: Vec<SourceIdentifier>,
    pub vessel: Option<VesselInfo>,
}

impl SourceEntity {
    /// Creates an entity with only the kind set.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            uid: None,
            kind,
            title: None,
            remarks: None,
            programs: Vec::new(),
            last_name: None,
            first_name: None,
            aliases: Vec::new(),
            dates_of_birth: Vec::new(),
            places_of_birth: Vec::new(),
            nationalities: Vec::new(),
            citizenships: Vec::new(),
            addresses: Vec::new(),
            identifiers: Vec::new(),
            vessel: None,
        }
    }

    /// True when a primary last or first name is present.
    pub fn has_primary_name(&self) -> bool {
        self.last_name.is_some() || self.first_name.is_some()
    }
}

/// An `akaList/aka` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Raw alias type such as `a.k.a.` or `f.k.a.`.
    pub alias_type: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
}

impl Alias {
    pub fn has_name(&self) -> bool {
        self.last_name.is_some() || self.first_name.is_some()
    }
}

/// An `addressList/address` item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state_or_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// An `idList/id` item with its raw, unclassified vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentifier {
    /// Raw `idType`; empty when the source omitted it.
    pub id_type: String,
    pub number: Option<String>,
    pub country: Option<String>,
}

impl SourceIdentifier {
    pub fn new(
        id_type: impl Into<String>,
        number: Option<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            id_type: id_type.into(),
            number,
            country,
        }
    }
}

/// Entity-level vessel attributes from `vesselInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VesselInfo {
    pub call_sign: Option<String>,
    pub vessel_type: Option<String>,
    pub flag: Option<String>,
    pub owner: Option<String>,
    pub tonnage: Option<String>,
    pub gross_registered_tonnage: Option<String>,
}

impl VesselInfo {
    pub fn is_empty(&self) -> bool {
        self.call_sign.is_none()
            && self.vessel_type.is_none()
            && self.flag.is_none()
            && self.owner.is_none()
            && self.tonnage.is_none()
            && self.gross_registered_tonnage.is_none()
    }
}
