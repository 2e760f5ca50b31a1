#![deny(unsafe_code)]
//! Classification of raw identifiers into normalized attributes.
//!
//! The [`ClassificationEngine`] looks every identifier type and issuing
//! country up in the code table, then applies the first matching
//! [`AttributeRule`] to decide the emitted value and companion fields.

pub mod engine;
pub mod rules;

pub use engine::{
    ClassificationEngine, EngineOptions, IdentifierOutcome, MappedIdentifier, UNTYPED_ID_KEY,
    passthrough_value,
};
pub use rules::{
    ATTRIBUTE_RULES, AttributeMatch, AttributeRule, Companion, SUGGESTION_RULES,
    SuggestionContext, SuggestionMatch, SuggestionRule, attribute_rule, suggest_attribute,
};
