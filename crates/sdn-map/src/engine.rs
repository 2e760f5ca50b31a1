//! Identifier classification.

use sdn_codes::{CodeTable, ID_COUNTRY, ID_TYPE, StateTable};
use sdn_model::{FieldMap, RecordType, SourceIdentifier};
use tracing::trace;

use crate::rules::{Companion, SuggestionContext, attribute_rule, suggest_attribute};

/// Passthrough key used when an identifier has a value but no type.
pub const UNTYPED_ID_KEY: &str = "UNKNOWN_ID_TYPE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Pre-fill the attribute of newly discovered id types from
    /// [`SUGGESTION_RULES`](crate::rules::SUGGESTION_RULES).
    pub suggest_new_codes: bool,
}

/// An identifier that resolved to a normalized attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedIdentifier {
    pub attribute: String,
    /// The attribute followed by its non-empty companions, in emission order.
    pub fields: FieldMap,
    /// A raw country was present but resolved to nothing.
    pub country_unresolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierOutcome {
    /// The identifier had no value and was neither classified nor counted.
    Dropped,
    Mapped(MappedIdentifier),
    /// No attribute is mapped for the raw type; keep the value verbatim.
    Passthrough { key: String, value: String },
}

/// Classifies identifiers against a code table owned by the caller.
pub struct ClassificationEngine<'a> {
    table: &'a mut CodeTable,
    states: &'a StateTable,
    options: EngineOptions,
}

impl<'a> ClassificationEngine<'a> {
    pub fn new(table: &'a mut CodeTable, states: &'a StateTable, options: EngineOptions) -> Self {
        Self {
            table,
            states,
            options,
        }
    }

    pub fn table(&self) -> &CodeTable {
        self.table
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Classifies one identifier of a record of `record_type`, updating the
    /// table's counts and examples.
    pub fn classify_identifier(
        &mut self,
        identifier: &SourceIdentifier,
        record_type: RecordType,
    ) -> IdentifierOutcome {
        let Some(number) = identifier.number.as_deref().filter(|n| !n.trim().is_empty()) else {
            return IdentifierOutcome::Dropped;
        };
        let raw_type = identifier.id_type.trim();
        let raw_country = identifier
            .country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let suggestion = if self.options.suggest_new_codes {
            suggest_attribute(
                raw_type,
                SuggestionContext {
                    record_type,
                    has_country: raw_country.is_some(),
                },
            )
        } else {
            None
        };
        let id_class = self
            .table
            .classify_with_suggestion(ID_TYPE, raw_type, Some(number), suggestion);
        let country_class =
            raw_country.map(|country| self.table.classify(ID_COUNTRY, country, Some(raw_type)));

        let Some(attribute) = id_class.attribute else {
            trace!(raw_type, "identifier type not mapped");
            return IdentifierOutcome::Passthrough {
                key: passthrough_key(raw_type),
                value: passthrough_value(raw_type, number, raw_country),
            };
        };

        let rule = attribute_rule(&attribute);
        let mut country = country_class.and_then(|c| c.default_value);
        if country.is_none() && rule.state_fallback {
            country = raw_country
                .and_then(|raw| self.states.lookup(raw))
                .map(str::to_string);
        }

        let mut fields = FieldMap::new();
        fields.insert(attribute.clone(), rule.transform_value(number));
        for companion in rule.companions {
            let value = match companion {
                Companion::RawType => Some(raw_type.to_string()),
                Companion::Country | Companion::DriversLicenseState => country.clone(),
            };
            if let Some(value) = value {
                fields.insert(companion.key(&attribute), value);
            }
        }
        trace!(raw_type, attribute = %attribute, rule = rule.id, "identifier mapped");
        IdentifierOutcome::Mapped(MappedIdentifier {
            attribute,
            fields,
            country_unresolved: raw_country.is_some() && country.is_none(),
        })
    }
}

fn passthrough_key(raw_type: &str) -> String {
    if raw_type.is_empty() {
        UNTYPED_ID_KEY.to_string()
    } else {
        raw_type.to_string()
    }
}

/// `"<raw type>: <value> (<country>)"`, the country part only when present.
pub fn passthrough_value(raw_type: &str, number: &str, raw_country: Option<&str>) -> String {
    let mut value = if raw_type.is_empty() {
        number.to_string()
    } else {
        format!("{raw_type}: {number}")
    };
    if let Some(country) = raw_country {
        value.push_str(&format!(" ({country})"));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_value_omits_missing_country() {
        assert_eq!(passthrough_value("Gender", "Male", None), "Gender: Male");
        assert_eq!(
            passthrough_value("Tax ID No.", "123", Some("Iran")),
            "Tax ID No.: 123 (Iran)"
        );
        assert_eq!(passthrough_value("", "X1", None), "X1");
    }
}
