#![forbid(unsafe_code)]

use crate::error::ConsoleError;
use serde_json::{Map, Value};
use tm_core::facets::*;
use tm_core::upload::{FileCandidate, FileMetadata};
use tm_core::vocab::{EnvParameter, Location, Rank, Taxon, TimePeriod};

pub(crate) const FACET_NAMES: &[&str] = &[
    "otolith_type",
    "taxonomy_type",
    "simulation_type",
    "ecology_type",
    "species_type",
    "graph_type",
    "data_source",
    "location",
    "time_period",
    "class",
    "order",
    "family",
    "parameter1",
    "parameter2",
    "temperature",
    "salinity",
    "ph",
    "oxygen",
    "free_text_query",
    "otolith-image",
    "edna-sequence",
];

fn object(params: Option<&Value>) -> Result<&Map<String, Value>, ConsoleError> {
    params
        .and_then(Value::as_object)
        .ok_or_else(|| ConsoleError::invalid_params("params must be an object"))
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ConsoleError> {
    obj.get(key)
        .ok_or_else(|| ConsoleError::invalid_params(format!("{key} is required")))
}

/// `null` clears; any other non-string is rejected.
fn optional_str<'a>(key: &str, value: &'a Value) -> Result<Option<&'a str>, ConsoleError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        _ => Err(ConsoleError::invalid_params(format!(
            "{key} must be a string or null"
        ))),
    }
}

fn choice<T>(
    key: &str,
    value: &Value,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConsoleError> {
    match optional_str(key, value)? {
        None => Ok(None),
        Some(raw) => parse(raw)
            .map(Some)
            .ok_or_else(|| ConsoleError::invalid_params(format!("unknown {key}: {raw}"))),
    }
}

fn vocab<T, E>(
    key: &str,
    value: &Value,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<Option<T>, ConsoleError>
where
    ConsoleError: From<E>,
{
    match optional_str(key, value)? {
        None => Ok(None),
        Some(raw) => Ok(Some(parse(raw)?)),
    }
}

fn number(key: &str, value: &Value) -> Result<f64, ConsoleError> {
    value
        .as_f64()
        .ok_or_else(|| ConsoleError::invalid_params(format!("{key} must be a number")))
}

fn flag(key: &str, value: &Value) -> Result<bool, ConsoleError> {
    value
        .as_bool()
        .ok_or_else(|| ConsoleError::invalid_params(format!("{key} must be a boolean")))
}

pub(crate) fn parse_mode(params: Option<&Value>) -> Result<Mode, ConsoleError> {
    let obj = object(params)?;
    let raw = field(obj, "mode")?
        .as_str()
        .ok_or_else(|| ConsoleError::invalid_params("mode must be a string"))?;
    Mode::parse(raw).ok_or_else(|| {
        ConsoleError::invalid_params(format!(
            "unknown mode: {raw} (expected search|visualization)"
        ))
    })
}

/// A top-level type for the current mode, or a known type of the other family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TopLevelRequest {
    Set(Option<TopLevel>),
    InactiveFamily(TopLevel),
}

pub(crate) fn parse_top_level(
    mode: Mode,
    params: Option<&Value>,
) -> Result<TopLevelRequest, ConsoleError> {
    let obj = object(params)?;
    let Some(raw) = optional_str("type", field(obj, "type")?)? else {
        return Ok(TopLevelRequest::Set(None));
    };
    if let Some(top) = TopLevel::parse_for(mode, raw) {
        return Ok(TopLevelRequest::Set(Some(top)));
    }
    let other = match mode {
        Mode::Search => Mode::Visualization,
        Mode::Visualization => Mode::Search,
    };
    TopLevel::parse_for(other, raw)
        .map(TopLevelRequest::InactiveFamily)
        .ok_or_else(|| ConsoleError::invalid_params(format!("unknown type: {raw}")))
}

/// Decodes `{ "facet": <name>, "value": <value> }` into a leaf assignment.
pub(crate) fn parse_sub_facet(params: Option<&Value>) -> Result<SubFacet, ConsoleError> {
    let obj = object(params)?;
    let name = field(obj, "facet")?
        .as_str()
        .ok_or_else(|| ConsoleError::invalid_params("facet must be a string"))?;
    let null = Value::Null;
    let value = obj.get("value").unwrap_or(&null);

    let facet = match name {
        "otolith_type" => SubFacet::OtolithType(choice(name, value, OtolithType::parse)?),
        "taxonomy_type" => SubFacet::TaxonomyType(choice(name, value, TaxonomyType::parse)?),
        "simulation_type" => SubFacet::SimulationType(choice(name, value, SimulationType::parse)?),
        "ecology_type" => SubFacet::EcologyType(choice(name, value, EcologyType::parse)?),
        "species_type" => SubFacet::SpeciesType(choice(name, value, SpeciesScope::parse)?),
        "graph_type" => SubFacet::GraphType(choice(name, value, GraphType::parse)?),
        "data_source" => {
            let source = choice(name, value, DataSource::parse)?;
            SubFacet::DataSource(source.unwrap_or_default())
        }
        "location" => SubFacet::Location(vocab(name, value, Location::try_new)?),
        "time_period" => SubFacet::TimePeriod(vocab(name, value, TimePeriod::try_new)?),
        "class" => SubFacet::Taxon(Rank::Class, vocab(name, value, Taxon::class)?),
        "order" => SubFacet::Taxon(Rank::Order, vocab(name, value, Taxon::order)?),
        "family" => SubFacet::Taxon(Rank::Family, vocab(name, value, Taxon::family)?),
        "parameter1" => SubFacet::Parameter1(vocab(name, value, EnvParameter::try_new)?),
        "parameter2" => SubFacet::Parameter2(vocab(name, value, EnvParameter::try_new)?),
        "free_text_query" => match value {
            Value::Null => SubFacet::FreeText(String::new()),
            Value::String(s) => SubFacet::FreeText(s.clone()),
            _ => return Err(ConsoleError::invalid_params("free_text_query must be a string")),
        },
        other => {
            if let Some(slider) = Slider::parse(other) {
                SubFacet::Slider(slider, number(other, value)?)
            } else if let Some(slot) = UploadSlot::parse(other) {
                SubFacet::Upload(slot, flag(other, value)?)
            } else {
                return Err(ConsoleError::invalid_params(format!(
                    "unknown facet: {other} (expected one of: {})",
                    FACET_NAMES.join(", ")
                )));
            }
        }
    };
    Ok(facet)
}

pub(crate) fn parse_files(params: Option<&Value>) -> Result<Vec<FileCandidate>, ConsoleError> {
    let obj = object(params)?;
    serde_json::from_value(field(obj, "files")?.clone())
        .map_err(|e| ConsoleError::invalid_params(format!("files: {e}")))
}

pub(crate) fn parse_metadata(params: Option<&Value>) -> Result<Vec<FileMetadata>, ConsoleError> {
    let obj = object(params)?;
    serde_json::from_value(field(obj, "metadata")?.clone())
        .map_err(|e| ConsoleError::invalid_params(format!("metadata: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facet(name: &str, value: Value) -> Result<SubFacet, ConsoleError> {
        parse_sub_facet(Some(&json!({ "facet": name, "value": value })))
    }

    #[test]
    fn vocabulary_facets_are_validated_at_the_boundary() {
        let location = facet("location", json!("Bay-of-Bengal ")).expect("location");
        assert_eq!(
            location,
            SubFacet::Location(Some(Location::try_new("bay-of-bengal").expect("location")))
        );
        assert_eq!(facet("location", Value::Null).expect("clear"), SubFacet::Location(None));
        assert!(matches!(
            facet("location", json!("atlantis")),
            Err(ConsoleError::Vocabulary(_))
        ));
        assert!(matches!(
            facet("family", json!("salmonidae")),
            Err(ConsoleError::Vocabulary(_))
        ));
    }

    #[test]
    fn sliders_uploads_and_text_take_typed_values() {
        assert_eq!(
            facet("temperature", json!(40)).expect("slider"),
            SubFacet::Slider(Slider::Temperature, 40.0)
        );
        assert!(matches!(
            facet("ph", json!("high")),
            Err(ConsoleError::InvalidParams(_))
        ));
        assert_eq!(
            facet("otolith-image", json!(true)).expect("upload"),
            SubFacet::Upload(UploadSlot::OtolithImage, true)
        );
        assert_eq!(
            facet("free_text_query", json!("  Hilsa")).expect("text"),
            SubFacet::FreeText("  Hilsa".to_string())
        );
    }

    #[test]
    fn unknown_facets_and_choices_are_invalid_params() {
        assert!(matches!(facet("depth", json!(3)), Err(ConsoleError::InvalidParams(_))));
        assert!(matches!(
            facet("graph_type", json!("radar")),
            Err(ConsoleError::InvalidParams(_))
        ));
        assert!(matches!(
            parse_sub_facet(Some(&json!(["location"]))),
            Err(ConsoleError::InvalidParams(_))
        ));
    }

    #[test]
    fn top_level_from_the_other_family_is_recognized() {
        assert_eq!(
            parse_top_level(Mode::Search, Some(&json!({ "type": "ecology" }))).expect("parse"),
            TopLevelRequest::InactiveFamily(TopLevel::Visualization(VisualizationType::Ecology))
        );
        assert_eq!(
            parse_top_level(Mode::Search, Some(&json!({ "type": null }))).expect("parse"),
            TopLevelRequest::Set(None)
        );
        assert!(parse_top_level(Mode::Search, Some(&json!({ "type": "plankton" }))).is_err());
    }
}
