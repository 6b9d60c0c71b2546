use std::collections::HashSet;

use country_data::{COUNTRIES, country, lookup};

#[test]
fn every_record_is_complete() {
    for record in COUNTRIES {
        assert!(!record.name.is_empty(), "{} has no name", record.id);
        assert!(!record.capital.is_empty(), "{} has no capital", record.id);
        assert!(record.population > 0, "{} has no population", record.id);
    }
}

#[test]
fn identifiers_are_unique_snake_case() {
    let mut seen = HashSet::new();
    for record in COUNTRIES {
        assert!(seen.insert(record.id), "duplicate id {}", record.id);
        assert!(
            record
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'),
            "{} is not snake_case",
            record.id
        );
    }
    assert_eq!(country::len(), 46);
}

#[test]
fn every_identifier_resolves_to_itself() {
    for record in country::iter() {
        assert_eq!(lookup(record.id), Some(record));
    }
}

#[test]
fn known_records_match_exactly() {
    let france = lookup("france").unwrap();
    assert_eq!(
        (france.name, france.capital, france.population),
        ("France", "Paris", 65273511)
    );

    let vatican = lookup("vatican_city").unwrap();
    assert_eq!(
        (vatican.name, vatican.capital, vatican.population),
        ("Vatican City", "Vatican City", 801)
    );

    let bosnia = lookup("bosnia_and_herzegovina").unwrap();
    assert_eq!(bosnia.capital, "Sarajevo");
    assert_eq!(lookup("russia").unwrap().population, 146599183);
}

#[test]
fn unknown_identifiers_are_absent() {
    assert!(lookup("globe").is_none());
    assert!(lookup("France").is_none());
    assert!(lookup("atlantis").is_none());
}

#[test]
fn records_serialise_for_the_frontend() {
    let json = serde_json::to_value(lookup("malta").unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "malta",
            "name": "Malta",
            "capital": "Valletta",
            "population": 514564
        })
    );
}
