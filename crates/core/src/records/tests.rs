use super::*;
use crate::vocab::VocabError;

fn hilsa() -> Record {
    Record::Species(SpeciesRecord {
        name: "Hilsa Fish".to_string(),
        scientific: "Tenualosa ilisha".to_string(),
        count: 45,
        location: Some("bay-of-bengal".to_string()),
        time_period: None,
        class: Some("actinopterygii".to_string()),
        order: Some("clupeiformes".to_string()),
        family: Some("clupeidae".to_string()),
    })
}

#[test]
fn tags_are_exposed_per_record_shape() {
    let record = hilsa();
    assert_eq!(record.tag(FacetKind::Family), Some("clupeidae"));
    assert_eq!(record.tag(FacetKind::TimePeriod), None);
    assert_eq!(record.tag(FacetKind::Parameter1), None);

    let density = Record::Density(DensityRecord {
        location: "goa-coast".to_string(),
        density: 12.0,
        time_period: None,
    });
    assert_eq!(density.tag(FacetKind::Location), Some("goa-coast"));
}

#[test]
fn search_fields_cover_name_scientific_location_and_category() {
    let entry = Record::SearchEntry(SearchEntry {
        name: "Indian Mackerel".to_string(),
        scientific: "Rastrelliger kanagurta".to_string(),
        location: Some("arabian-sea".to_string()),
        category: "otolith".to_string(),
    });
    assert_eq!(
        entry.search_fields(),
        vec!["Indian Mackerel", "Rastrelliger kanagurta", "arabian-sea", "otolith"]
    );

    let trend = Record::Trend(TrendRecord {
        year: 2024,
        value: 850.0,
        location: None,
        time_period: None,
    });
    assert!(trend.search_fields().is_empty());
}

#[test]
fn validate_tags_requires_known_canonical_terms() {
    assert_eq!(hilsa().validate_tags(), Ok(()));

    let bad = Record::Comparison(ComparisonRecord {
        parameter1: "temperature".to_string(),
        parameter2: "pressure".to_string(),
        x: 1.0,
        y: 2.0,
        location: None,
    });
    assert!(matches!(
        bad.validate_tags(),
        Err(VocabError::Unknown { .. })
    ));
}

#[test]
fn match_records_fit_either_match_dataset() {
    let row = Record::Match(MatchRecord {
        id: "OTO001".to_string(),
        name: "Hilsa Fish (Tenualosa ilisha)".to_string(),
        confidence: 94.2,
    });
    assert!(row.belongs_to(DatasetName::OtolithMatches));
    assert!(row.belongs_to(DatasetName::EdnaMatches));
    assert!(!row.belongs_to(DatasetName::Species));
}

#[test]
fn registry_rejects_records_of_the_wrong_shape() {
    let mut registry = MemoryRegistry::new();
    assert_eq!(
        registry.insert(DatasetName::Trends, vec![hilsa()]),
        Err(RegistryError::RecordMismatch {
            dataset: "trends",
            index: 0
        })
    );
    registry
        .insert(DatasetName::Species, vec![hilsa()])
        .expect("species insert");
    assert_eq!(registry.dataset(DatasetName::Species).len(), 1);
    assert!(registry.dataset(DatasetName::Biomass).is_empty());
    assert_eq!(registry.record_count(), 1);
}

#[test]
fn schemas_declare_filterable_facets() {
    assert!(DatasetName::Species.schema().filters_on(FacetKind::Family));
    assert!(!DatasetName::Biomass.schema().filters_on(FacetKind::Family));
    assert!(DatasetName::OtolithMatches.schema().filterable.is_empty());
    assert_eq!(
        DatasetName::parse("location-density"),
        Some(DatasetName::LocationDensity)
    );
}

#[test]
fn records_deserialize_from_tagged_json() {
    let record: Record = serde_json::from_str(
        r#"{"record":"density","location":"lakshadweep","density":80.0}"#,
    )
    .expect("parse record");
    assert_eq!(
        record,
        Record::Density(DensityRecord {
            location: "lakshadweep".to_string(),
            density: 80.0,
            time_period: None,
        })
    );
}
