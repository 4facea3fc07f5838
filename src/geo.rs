use isocountry::CountryCode;

/// Resolves a country's display name to its ISO 3166-1 alpha-3 code.
pub trait CountryResolver {
    fn alpha3(&self, name: &str) -> Option<&'static str>;
}

/// ISO 3166-1 lookup backed by `isocountry`.
///
/// Matching is case-insensitive. Common names that differ from the ISO
/// short name ("UK", "South Korea", "Russia") are tried first, then the
/// alpha-2 / alpha-3 codes, then the ISO name itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoCountries;

// common name -> alpha-3
const ALIASES: &[(&str, &str)] = &[
    ("uk", "GBR"),
    ("united kingdom", "GBR"),
    ("great britain", "GBR"),
    ("england", "GBR"),
    ("scotland", "GBR"),
    ("wales", "GBR"),
    ("northern ireland", "GBR"),
    ("usa", "USA"),
    ("united states", "USA"),
    ("south korea", "KOR"),
    ("korea", "KOR"),
    ("republic of korea", "KOR"),
    ("korea, republic of", "KOR"),
    ("north korea", "PRK"),
    ("russia", "RUS"),
    ("iran", "IRN"),
    ("syria", "SYR"),
    ("taiwan", "TWN"),
    ("vietnam", "VNM"),
    ("czech republic", "CZE"),
    ("czechia", "CZE"),
    ("holland", "NLD"),
    ("the netherlands", "NLD"),
    ("turkey", "TUR"),
    ("türkiye", "TUR"),
    ("bolivia", "BOL"),
    ("venezuela", "VEN"),
    ("tanzania", "TZA"),
    ("moldova", "MDA"),
    ("macau", "MAC"),
    ("laos", "LAO"),
    ("ivory coast", "CIV"),
    ("people's republic of china", "CHN"),
];

impl CountryResolver for IsoCountries {
    fn alpha3(&self, name: &str) -> Option<&'static str> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some((_, code)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
            return CountryCode::for_alpha3(code).ok().map(|c| c.alpha3());
        }

        let upper = key.to_uppercase();
        let by_code = match upper.len() {
            2 => CountryCode::for_alpha2(&upper).ok(),
            3 => CountryCode::for_alpha3(&upper).ok(),
            _ => None,
        };
        if let Some(code) = by_code {
            return Some(code.alpha3());
        }
        CountryCode::iter()
            .find(|c| c.name().to_lowercase() == key)
            .map(|c| c.alpha3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_aliases_and_codes() {
        let geo = IsoCountries;
        assert_eq!(geo.alpha3("Japan"), Some("JPN"));
        assert_eq!(geo.alpha3("United States"), Some("USA"));
        assert_eq!(geo.alpha3(" united kingdom "), Some("GBR"));
        assert_eq!(geo.alpha3("England"), Some("GBR"));
        assert_eq!(geo.alpha3("Korea, Republic of"), Some("KOR"));
        assert_eq!(geo.alpha3("FR"), Some("FRA"));
        assert_eq!(geo.alpha3("deu"), Some("DEU"));
    }

    #[test]
    fn resolves_countries_outside_the_usual_studio_hubs() {
        let geo = IsoCountries;
        let names = [
            ("Luxembourg", "LUX"),
            ("Cyprus", "CYP"),
            ("Malta", "MLT"),
            ("United Arab Emirates", "ARE"),
            ("Saudi Arabia", "SAU"),
            ("Pakistan", "PAK"),
            ("Nigeria", "NGA"),
            ("Georgia", "GEO"),
            ("Bosnia and Herzegovina", "BIH"),
            ("Costa Rica", "CRI"),
            ("Macao", "MAC"),
            ("Kenya", "KEN"),
        ];
        for (name, code) in names {
            assert_eq!(geo.alpha3(name), Some(code), "{name}");
        }
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let geo = IsoCountries;
        assert_eq!(geo.alpha3("Atlantis"), None);
        assert_eq!(geo.alpha3("ZZ"), None);
        assert_eq!(geo.alpha3(""), None);
    }
}
