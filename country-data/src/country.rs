use serde::Serialize;

/// Display information for one country mesh on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub capital: &'static str,
    pub population: u64,
}

impl CountryRecord {
    /// First tooltip line.
    pub fn name_line(&self) -> String {
        format!("Name: {}", self.name)
    }

    /// Second tooltip line.
    pub fn capital_line(&self) -> String {
        format!("Capital: {}", self.capital)
    }

    /// Third tooltip line. Population is printed as a plain integer.
    pub fn population_line(&self) -> String {
        format!("Population: {}", self.population)
    }
}

/// Every country the globe model carries a named mesh for, sorted by identifier.
pub const COUNTRIES: &[CountryRecord] = &[
    CountryRecord {
        id: "albania",
        name: "Albania",
        capital: "Tirana",
        population: 2877797,
    },
    CountryRecord {
        id: "andorra",
        name: "Andorra",
        capital: "Andorra la Vella",
        population: 77281,
    },
    CountryRecord {
        id: "austria",
        name: "Austria",
        capital: "Vienna",
        population: 9006398,
    },
    CountryRecord {
        id: "belarus",
        name: "Belarus",
        capital: "Minsk",
        population: 9449323,
    },
    CountryRecord {
        id: "belgium",
        name: "Belgium",
        capital: "Brussels",
        population: 11589623,
    },
    CountryRecord {
        id: "bosnia_and_herzegovina",
        name: "Bosnia and Herzegovina",
        capital: "Sarajevo",
        population: 3280815,
    },
    CountryRecord {
        id: "bulgaria",
        name: "Bulgaria",
        capital: "Sofia",
        population: 6948445,
    },
    CountryRecord {
        id: "croatia",
        name: "Croatia",
        capital: "Zagreb",
        population: 4105267,
    },
    CountryRecord {
        id: "cyprus",
        name: "Cyprus",
        capital: "Nicosia",
        population: 1207359,
    },
    CountryRecord {
        id: "czech_republic",
        name: "Czech Republic",
        capital: "Prague",
        population: 10724555,
    },
    CountryRecord {
        id: "denmark",
        name: "Denmark",
        capital: "Copenhagen",
        population: 5831405,
    },
    CountryRecord {
        id: "estonia",
        name: "Estonia",
        capital: "Tallinn",
        population: 1326535,
    },
    CountryRecord {
        id: "finland",
        name: "Finland",
        capital: "Helsinki",
        population: 5540720,
    },
    CountryRecord {
        id: "france",
        name: "France",
        capital: "Paris",
        population: 65273511,
    },
    CountryRecord {
        id: "germany",
        name: "Germany",
        capital: "Berlin",
        population: 83122889,
    },
    CountryRecord {
        id: "greece",
        name: "Greece",
        capital: "Athens",
        population: 10423054,
    },
    CountryRecord {
        id: "hungary",
        name: "Hungary",
        capital: "Budapest",
        population: 9660351,
    },
    CountryRecord {
        id: "iceland",
        name: "Iceland",
        capital: "Reykjavik",
        population: 343599,
    },
    CountryRecord {
        id: "ireland",
        name: "Ireland",
        capital: "Dublin",
        population: 4982900,
    },
    CountryRecord {
        id: "italy",
        name: "Italy",
        capital: "Rome",
        population: 60360000,
    },
    CountryRecord {
        id: "kosovo",
        name: "Kosovo",
        capital: "Pristina",
        population: 1775378,
    },
    CountryRecord {
        id: "latvia",
        name: "Latvia",
        capital: "Riga",
        population: 1886198,
    },
    CountryRecord {
        id: "liechtenstein",
        name: "Liechtenstein",
        capital: "Vaduz",
        population: 38749,
    },
    CountryRecord {
        id: "lithuania",
        name: "Lithuania",
        capital: "Vilnius",
        population: 2722289,
    },
    CountryRecord {
        id: "luxembourg",
        name: "Luxembourg",
        capital: "Luxembourg City",
        population: 634730,
    },
    CountryRecord {
        id: "malta",
        name: "Malta",
        capital: "Valletta",
        population: 514564,
    },
    CountryRecord {
        id: "moldova",
        name: "Moldova",
        capital: "Chisinau",
        population: 2657637,
    },
    CountryRecord {
        id: "monaco",
        name: "Monaco",
        capital: "Monaco",
        population: 39242,
    },
    CountryRecord {
        id: "montenegro",
        name: "Montenegro",
        capital: "Podgorica",
        population: 622359,
    },
    CountryRecord {
        id: "netherlands",
        name: "Netherlands",
        capital: "Amsterdam",
        population: 17134872,
    },
    CountryRecord {
        id: "north_macedonia",
        name: "North Macedonia",
        capital: "Skopje",
        population: 2077132,
    },
    CountryRecord {
        id: "norway",
        name: "Norway",
        capital: "Oslo",
        population: 5437664,
    },
    CountryRecord {
        id: "poland",
        name: "Poland",
        capital: "Warsaw",
        population: 38433600,
    },
    CountryRecord {
        id: "portugal",
        name: "Portugal",
        capital: "Lisbon",
        population: 10295909,
    },
    CountryRecord {
        id: "romania",
        name: "Romania",
        capital: "Bucharest",
        population: 19237691,
    },
    CountryRecord {
        id: "russia",
        name: "Russia",
        capital: "Moscow",
        population: 146599183,
    },
    CountryRecord {
        id: "san_marino",
        name: "San Marino",
        capital: "San Marino",
        population: 33931,
    },
    CountryRecord {
        id: "serbia",
        name: "Serbia",
        capital: "Belgrade",
        population: 6982084,
    },
    CountryRecord {
        id: "slovakia",
        name: "Slovakia",
        capital: "Bratislava",
        population: 5450987,
    },
    CountryRecord {
        id: "slovenia",
        name: "Slovenia",
        capital: "Ljubljana",
        population: 2078654,
    },
    CountryRecord {
        id: "spain",
        name: "Spain",
        capital: "Madrid",
        population: 47329981,
    },
    CountryRecord {
        id: "sweden",
        name: "Sweden",
        capital: "Stockholm",
        population: 10099265,
    },
    CountryRecord {
        id: "switzerland",
        name: "Switzerland",
        capital: "Bern",
        population: 8654622,
    },
    CountryRecord {
        id: "ukraine",
        name: "Ukraine",
        capital: "Kyiv",
        population: 41902416,
    },
    CountryRecord {
        id: "united_kingdom",
        name: "United Kingdom",
        capital: "London",
        population: 66460344,
    },
    CountryRecord {
        id: "vatican_city",
        name: "Vatican City",
        capital: "Vatican City",
        population: 801,
    },
];

/// Exact identifier lookup.
pub fn lookup(id: &str) -> Option<&'static CountryRecord> {
    COUNTRIES.iter().find(|country| country.id == id)
}

/// Lookup for scene node names as they come out of a glTF export.
///
/// Tries the name verbatim first, then a normalised form: anything after the
/// first `.` dropped (exporter suffixes such as `france.001`), trimmed,
/// lowercased, with spaces and hyphens turned into underscores.
pub fn lookup_node_name(name: &str) -> Option<&'static CountryRecord> {
    lookup(name).or_else(|| lookup(&normalise_node_name(name)))
}

fn normalise_node_name(name: &str) -> String {
    let stem = name.split('.').next().unwrap_or(name);
    stem.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Number of countries in the table.
pub fn len() -> usize {
    COUNTRIES.len()
}

/// Iterate all records in identifier order.
pub fn iter() -> impl Iterator<Item = &'static CountryRecord> {
    COUNTRIES.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_exporter_names() {
        assert_eq!(normalise_node_name("United Kingdom"), "united_kingdom");
        assert_eq!(normalise_node_name("Bosnia-and-Herzegovina"), "bosnia_and_herzegovina");
        assert_eq!(normalise_node_name("france.001"), "france");
        assert_eq!(normalise_node_name("  Spain "), "spain");
    }

    #[test]
    fn node_name_lookup_falls_back_to_normalised_form() {
        assert_eq!(lookup_node_name("France").map(|c| c.id), Some("france"));
        assert_eq!(lookup_node_name("san_marino.002").map(|c| c.id), Some("san_marino"));
        assert!(lookup_node_name("globe").is_none());
        assert!(lookup_node_name("").is_none());
    }

    #[test]
    fn tooltip_lines() {
        let france = lookup("france").unwrap();
        assert_eq!(france.name_line(), "Name: France");
        assert_eq!(france.capital_line(), "Capital: Paris");
        assert_eq!(france.population_line(), "Population: 65273511");
    }

    #[test]
    fn table_is_sorted_by_identifier() {
        assert!(COUNTRIES.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
