//! Ordered rule lists for identifier classification.
//!
//! Both lists are evaluated first-match-wins. [`ATTRIBUTE_RULES`] decides how a
//! mapped attribute is emitted; [`SUGGESTION_RULES`] proposes an attribute for
//! an id type the code table has never seen.

use sdn_model::RecordType;

/// Suffix shared by identifier-number attributes.
pub const NUMBER_SUFFIX: &str = "_NUMBER";

/// Field emitted next to a normalized identifier number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Companion {
    /// `<BASE>_TYPE` carrying the raw id type.
    RawType,
    /// `<BASE>_COUNTRY` carrying the resolved country.
    Country,
    /// `DRIVERS_LICENSE_STATE` carrying the resolved country or state code.
    DriversLicenseState,
}

impl Companion {
    /// Output key for this companion of `attribute`.
    pub fn key(self, attribute: &str) -> String {
        let base = attribute.strip_suffix(NUMBER_SUFFIX).unwrap_or(attribute);
        match self {
            Self::RawType => format!("{base}_TYPE"),
            Self::Country => format!("{base}_COUNTRY"),
            Self::DriversLicenseState => "DRIVERS_LICENSE_STATE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMatch {
    Exact(&'static str),
    Suffix(&'static str),
    Any,
}

impl AttributeMatch {
    fn matches(self, attribute: &str) -> bool {
        match self {
            Self::Exact(name) => attribute == name,
            Self::Suffix(suffix) => attribute.ends_with(suffix),
            Self::Any => true,
        }
    }
}

/// How identifiers classified to a matching attribute are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    pub id: &'static str,
    pub matcher: AttributeMatch,
    /// Literal prefix removed from the value wherever it occurs.
    pub strip: Option<&'static str>,
    /// Companion fields in emission order.
    pub companions: &'static [Companion],
    /// Whether the attribute resolves unmapped countries through the state table.
    pub state_fallback: bool,
}

impl AttributeRule {
    /// Applies the value transform of this rule.
    pub fn transform_value(&self, value: &str) -> String {
        match self.strip {
            Some(pattern) => value.replace(pattern, "").trim().to_string(),
            None => value.to_string(),
        }
    }
}

pub const ATTRIBUTE_RULES: &[AttributeRule] = &[
    AttributeRule {
        id: "imo",
        matcher: AttributeMatch::Exact("IMO_NUMBER"),
        strip: Some("IMO "),
        companions: &[Companion::Country],
        state_fallback: false,
    },
    AttributeRule {
        id: "typed-id",
        matcher: AttributeMatch::Exact("NATIONAL_ID_NUMBER"),
        strip: None,
        companions: &[Companion::RawType, Companion::Country],
        state_fallback: false,
    },
    AttributeRule {
        id: "typed-id",
        matcher: AttributeMatch::Exact("OTHER_ID_NUMBER"),
        strip: None,
        companions: &[Companion::RawType, Companion::Country],
        state_fallback: false,
    },
    AttributeRule {
        id: "drivers-license",
        matcher: AttributeMatch::Exact("DRIVERS_LICENSE_NUMBER"),
        strip: None,
        companions: &[Companion::DriversLicenseState],
        state_fallback: true,
    },
    AttributeRule {
        id: "number",
        matcher: AttributeMatch::Suffix(NUMBER_SUFFIX),
        strip: None,
        companions: &[Companion::Country],
        state_fallback: false,
    },
    AttributeRule {
        id: "plain",
        matcher: AttributeMatch::Any,
        strip: None,
        companions: &[],
        state_fallback: false,
    },
];

/// First rule matching `attribute`. The last rule matches everything.
pub fn attribute_rule(attribute: &str) -> &'static AttributeRule {
    ATTRIBUTE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(attribute))
        .unwrap_or(&ATTRIBUTE_RULES[ATTRIBUTE_RULES.len() - 1])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionMatch {
    /// Raw type contains the text, ignoring case.
    Contains(&'static str),
    /// Raw type equals the text exactly.
    Exact(&'static str),
    /// Any country-issued id on a person or organization.
    CountryIssuedOnCoreRecord,
}

/// Facts a suggestion rule may test besides the raw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionContext {
    pub record_type: RecordType,
    pub has_country: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionRule {
    pub matcher: SuggestionMatch,
    pub attribute: &'static str,
}

impl SuggestionRule {
    fn matches(&self, raw_type: &str, ctx: SuggestionContext) -> bool {
        match self.matcher {
            SuggestionMatch::Contains(needle) => raw_type.to_uppercase().contains(needle),
            SuggestionMatch::Exact(name) => raw_type == name,
            SuggestionMatch::CountryIssuedOnCoreRecord => {
                ctx.has_country && ctx.record_type.is_core()
            }
        }
    }
}

pub const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        matcher: SuggestionMatch::Contains("SSN"),
        attribute: "SSN_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Contains("DRIVER"),
        attribute: "DRIVERS_LICENSE_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Contains("PASSPORT"),
        attribute: "PASSPORT_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::CountryIssuedOnCoreRecord,
        attribute: "NATIONAL_ID_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact("Vessel Registration Identification"),
        attribute: "IMO_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact("MMSI"),
        attribute: "MMSI_NUMBER",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact("Other Vessel Call Sign"),
        attribute: "CALL_SIGN",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact(
            "Aircraft Construction Number (also called L/N or S/N or F/N)",
        ),
        attribute: "AIRCRAFT_CONSTRUCTION_NUM",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact("Aircraft Manufacturer's Serial Number (MSN)"),
        attribute: "AIRCRAFT_MFG_SERIAL_NUM",
    },
    SuggestionRule {
        matcher: SuggestionMatch::Exact("Aircraft Tail Number"),
        attribute: "AIRCRAFT_TAIL_NUM",
    },
];

/// Attribute proposed for a raw id type, if any rule matches.
pub fn suggest_attribute(raw_type: &str, ctx: SuggestionContext) -> Option<&'static str> {
    SUGGESTION_RULES
        .iter()
        .find(|rule| rule.matches(raw_type, ctx))
        .map(|rule| rule.attribute)
}
