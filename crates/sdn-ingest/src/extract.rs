//! `sdnEntry` → [`SourceEntity`].
//!
//! Values are trimmed and empty text counts as absent. Nothing is classified
//! here; the only interpretation is the `sdnType` kind and date formatting.

use sdn_model::{Alias, EntityKind, SourceAddress, SourceEntity, SourceIdentifier, VesselInfo};

use crate::date::format_date;
use crate::xml::XmlNode;

/// Builds the source entity for one `sdnEntry` node.
pub fn extract_entity(entry: &XmlNode) -> SourceEntity {
    let mut entity = SourceEntity::new(EntityKind::parse(entry.value("sdnType")));
    entity.uid = opt_value(entry, "uid");
    entity.title = opt_value(entry, "title");
    entity.remarks = opt_value(entry, "remarks");
    entity.programs = values(entry, "programList/program");
    entity.last_name = opt_value(entry, "lastName");
    entity.first_name = opt_value(entry, "firstName");

    entity.aliases = entry
        .children("akaList/aka")
        .into_iter()
        .map(|aka| Alias {
            alias_type: opt_value(aka, "type"),
            last_name: opt_value(aka, "lastName"),
            first_name: opt_value(aka, "firstName"),
        })
        .collect();

    entity.dates_of_birth = values(entry, "dateOfBirthList/dateOfBirthItem/dateOfBirth")
        .iter()
        .map(|raw| format_date(raw))
        .collect();
    entity.places_of_birth = values(entry, "placeOfBirthList/placeOfBirthItem/placeOfBirth");
    entity.nationalities = values(entry, "nationalityList/nationality/country");
    entity.citizenships = values(entry, "citizenshipList/citizenship/country");

    entity.addresses = entry
        .children("addressList/address")
        .into_iter()
        .map(extract_address)
        .collect();

    entity.identifiers = entry
        .children("idList/id")
        .into_iter()
        .map(|id| {
            SourceIdentifier::new(
                id.value("idType"),
                opt_value(id, "idNumber"),
                opt_value(id, "idCountry"),
            )
        })
        .collect();

    entity.vessel = entry
        .child("vesselInfo")
        .map(extract_vessel)
        .filter(|vessel| !vessel.is_empty());
    entity
}

fn extract_address(address: &XmlNode) -> SourceAddress {
    SourceAddress {
        address1: opt_value(address, "address1"),
        address2: opt_value(address, "address2"),
        address3: opt_value(address, "address3"),
        city: opt_value(address, "city"),
        state_or_province: opt_value(address, "stateOrProvince"),
        postal_code: opt_value(address, "postalCode"),
        country: opt_value(address, "country"),
    }
}

fn extract_vessel(vessel: &XmlNode) -> VesselInfo {
    VesselInfo {
        call_sign: opt_value(vessel, "callSign"),
        vessel_type: opt_value(vessel, "vesselType"),
        flag: opt_value(vessel, "vesselFlag"),
        owner: opt_value(vessel, "vesselOwner"),
        tonnage: opt_value(vessel, "tonnage"),
        gross_registered_tonnage: opt_value(vessel, "grossRegisteredTonnage"),
    }
}

fn opt_value(node: &XmlNode, path: &str) -> Option<String> {
    let value = node.value(path);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Non-empty values of every node matching `path`, in document order.
fn values(node: &XmlNode, path: &str) -> Vec<String> {
    node.children(path)
        .into_iter()
        .map(XmlNode::text)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}
