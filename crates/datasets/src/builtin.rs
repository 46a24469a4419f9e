#![forbid(unsafe_code)]

use tm_core::records::{
    BiomassRecord, ComparisonRecord, DensityRecord, MatchRecord, SearchEntry, SpeciesRecord,
    TrendRecord,
};
use tm_core::{DatasetName, MemoryRegistry, Record};

use crate::DatasetError;

fn species(
    name: &str,
    scientific: &str,
    count: u64,
    location: &str,
    taxonomy: (&str, Option<&str>, Option<&str>),
) -> Record {
    let (class, order, family) = taxonomy;
    Record::Species(SpeciesRecord {
        name: name.to_string(),
        scientific: scientific.to_string(),
        count,
        location: Some(location.to_string()),
        time_period: Some("last-year".to_string()),
        class: Some(class.to_string()),
        order: order.map(str::to_string),
        family: family.map(str::to_string),
    })
}

fn species_records() -> Vec<Record> {
    let bony = "actinopterygii";
    vec![
        species(
            "Hilsa Fish",
            "Tenualosa ilisha",
            45,
            "bay-of-bengal",
            (bony, Some("clupeiformes"), Some("clupeidae")),
        ),
        species(
            "Indian Mackerel",
            "Rastrelliger kanagurta",
            38,
            "arabian-sea",
            (bony, Some("perciformes"), Some("scombridae")),
        ),
        species(
            "Silver Pomfret",
            "Pampus argenteus",
            29,
            "gujarat-coast",
            (bony, Some("perciformes"), Some("stromateidae")),
        ),
        species(
            "King Fish",
            "Scomberomorus commerson",
            22,
            "kerala-coast",
            (bony, Some("perciformes"), Some("scombridae")),
        ),
        species(
            "Oil Sardine",
            "Sardinella longiceps",
            51,
            "kerala-coast",
            (bony, Some("clupeiformes"), Some("clupeidae")),
        ),
        species(
            "Spadenose Shark",
            "Scoliodon laticaudus",
            9,
            "maharashtra-coast",
            ("chondrichthyes", None, None),
        ),
        species(
            "Indo-Pacific Humpback Dolphin",
            "Sousa chinensis",
            4,
            "goa-coast",
            ("mammalia", None, None),
        ),
    ]
}

fn biomass_records() -> Vec<Record> {
    [("Jan", 1000.0), ("Feb", 1100.0), ("Mar", 950.0), ("Apr", 1150.0)]
        .into_iter()
        .map(|(month, biomass)| {
            Record::Biomass(BiomassRecord {
                month: month.to_string(),
                biomass,
                location: Some("bay-of-bengal".to_string()),
                time_period: Some("last-6-months".to_string()),
            })
        })
        .collect()
}

fn trend_records() -> Vec<Record> {
    [(2021, 500.0), (2022, 650.0), (2023, 700.0), (2024, 850.0)]
        .into_iter()
        .map(|(year, value)| {
            Record::Trend(TrendRecord {
                year,
                value,
                location: Some("arabian-sea".to_string()),
                time_period: Some("last-5-years".to_string()),
            })
        })
        .collect()
}

fn density_records() -> Vec<Record> {
    [
        ("bay-of-bengal", 40.0),
        ("arabian-sea", 60.0),
        ("kerala-coast", 30.0),
        ("goa-coast", 80.0),
    ]
    .into_iter()
    .map(|(location, density)| {
        Record::Density(DensityRecord {
            location: location.to_string(),
            density,
            time_period: Some("last-year".to_string()),
        })
    })
    .collect()
}

fn comparison_records() -> Vec<Record> {
    let point = |parameter1: &str, parameter2: &str, x, y, location: &str| {
        Record::Comparison(ComparisonRecord {
            parameter1: parameter1.to_string(),
            parameter2: parameter2.to_string(),
            x,
            y,
            location: Some(location.to_string()),
        })
    };
    vec![
        point("temperature", "salinity", 26.5, 33.8, "bay-of-bengal"),
        point("temperature", "salinity", 28.1, 34.6, "arabian-sea"),
        point("temperature", "salinity", 29.4, 35.2, "kerala-coast"),
        point("temperature", "oxygen", 26.5, 6.9, "bay-of-bengal"),
        point("temperature", "oxygen", 28.1, 6.1, "arabian-sea"),
        point("depth", "turbidity", 20.0, 4.2, "goa-coast"),
        point("depth", "turbidity", 60.0, 2.7, "goa-coast"),
    ]
}

fn search_entries() -> Vec<Record> {
    let entry = |name: &str, scientific: &str, location: &str, category: &str| {
        Record::SearchEntry(SearchEntry {
            name: name.to_string(),
            scientific: scientific.to_string(),
            location: Some(location.to_string()),
            category: category.to_string(),
        })
    };
    vec![
        entry("Hilsa Fish", "Tenualosa ilisha", "bay-of-bengal", "species"),
        entry("Mackerel", "Rastrelliger kanagurta", "arabian-sea", "species"),
        entry("Silver Pomfret", "Pampus argenteus", "gujarat-coast", "species"),
        entry("Sea Surface Temperature", "", "indian-ocean", "parameter"),
        entry("Otolith Reference Set", "", "kerala-coast", "collection"),
        entry("Coastal eDNA Survey", "", "andaman-nicobar", "collection"),
    ]
}

fn matches(rows: [(&str, &str, f64); 3]) -> Vec<Record> {
    rows.into_iter()
        .map(|(id, name, confidence)| {
            Record::Match(MatchRecord {
                id: id.to_string(),
                name: name.to_string(),
                confidence,
            })
        })
        .collect()
}

/// The bundled demo datasets, validated like any loaded file.
pub fn builtin() -> Result<MemoryRegistry, DatasetError> {
    let mut registry = MemoryRegistry::new();
    let datasets = [
        (DatasetName::Species, species_records()),
        (DatasetName::Biomass, biomass_records()),
        (DatasetName::Trends, trend_records()),
        (DatasetName::LocationDensity, density_records()),
        (DatasetName::Comparison, comparison_records()),
        (DatasetName::SearchIndex, search_entries()),
        (
            DatasetName::OtolithMatches,
            matches([
                ("OTO001", "Hilsa Fish", 94.2),
                ("OTO002", "Indian Mackerel", 87.8),
                ("OTO003", "Oil Sardine", 82.1),
            ]),
        ),
        (
            DatasetName::EdnaMatches,
            matches([
                ("DNA001", "Hilsa Fish", 96.8),
                ("DNA002", "King Fish", 91.4),
                ("DNA003", "Silver Pomfret", 85.7),
            ]),
        ),
    ];
    for (name, records) in datasets {
        crate::install(&mut registry, name, records)?;
    }
    Ok(registry)
}
