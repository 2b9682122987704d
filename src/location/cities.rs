//! Locality keyword table for the city-only fallback.

/// A known locality: canonical name plus lower-case aliases searched for in
/// the hotel name. The lower-cased canonical name is always the first alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityKeyword {
    pub name: String,
    pub aliases: Vec<String>,
}

impl CityKeyword {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        let mut all = vec![name.to_lowercase()];
        for alias in aliases {
            let alias = alias.to_lowercase();
            if !all.contains(&alias) {
                all.push(alias);
            }
        }
        Self {
            name: name.to_string(),
            aliases: all,
        }
    }
}

struct BuiltinCity {
    name: &'static str,
    aliases: &'static [&'static str],
}

const fn city(name: &'static str, aliases: &'static [&'static str]) -> BuiltinCity {
    BuiltinCity { name, aliases }
}

const ITALIAN_CITIES: &[BuiltinCity] = &[
    city("Roma", &["rome"]),
    city("Milano", &["milan"]),
    city("Napoli", &["naples"]),
    city("Torino", &["turin"]),
    city("Palermo", &[]),
    city("Genova", &["genoa"]),
    city("Bologna", &[]),
    city("Firenze", &["florence"]),
    city("Bari", &[]),
    city("Catania", &[]),
    city("Venezia", &["venice"]),
    city("Verona", &[]),
    city("Messina", &[]),
    city("Padova", &["padua"]),
    city("Trieste", &[]),
    city("Brescia", &[]),
    city("Parma", &[]),
    city("Taranto", &[]),
    city("Prato", &[]),
    city("Modena", &[]),
    city("Reggio Calabria", &[]),
    city("Reggio Emilia", &[]),
    city("Perugia", &[]),
    city("Ravenna", &[]),
    city("Livorno", &["leghorn"]),
    city("Cagliari", &[]),
    city("Rimini", &[]),
    city("Salerno", &[]),
    city("Ferrara", &[]),
    city("Sassari", &[]),
    city("Siracusa", &["syracuse"]),
    city("Pescara", &[]),
    city("Bergamo", &[]),
    city("Trento", &[]),
    city("Vicenza", &[]),
    city("Bolzano", &["bozen"]),
    city("Ancona", &[]),
    city("Lecce", &[]),
    city("Pisa", &[]),
    city("Siena", &[]),
    city("Lucca", &[]),
    city("Assisi", &[]),
    city("Amalfi", &[]),
    city("Positano", &[]),
    city("Sorrento", &[]),
    city("Capri", &[]),
    city("Taormina", &[]),
    city("Como", &[]),
    city("Bellagio", &[]),
    city("Cortina d'Ampezzo", &["cortina"]),
    city("San Gimignano", &[]),
    city("Matera", &[]),
    city("Alghero", &[]),
    city("Orvieto", &[]),
    city("Urbino", &[]),
];

/// Swappable keyword table scanned when no venue matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTable {
    cities: Vec<CityKeyword>,
}

impl CityTable {
    pub fn new(cities: Vec<CityKeyword>) -> Self {
        Self { cities }
    }

    /// The built-in table of Italian tourist localities.
    pub fn italian() -> Self {
        Self::new(
            ITALIAN_CITIES
                .iter()
                .map(|c| CityKeyword::new(c.name, c.aliases))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Canonical name of the city mentioned in `text`, case-insensitive.
    ///
    /// The longest matching alias wins; on equal length, table order decides.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        let mut best: Option<(&CityKeyword, usize)> = None;
        for city in &self.cities {
            for alias in &city.aliases {
                if alias.is_empty() || !haystack.contains(alias.as_str()) {
                    continue;
                }
                let len = alias.chars().count();
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((city, len));
                }
            }
        }
        best.map(|(city, _)| city.name.as_str())
    }
}

impl Default for CityTable {
    fn default() -> Self {
        Self::italian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_size() {
        let table = CityTable::italian();
        assert!(table.len() >= 50);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_find_case_insensitive() {
        let table = CityTable::italian();
        assert_eq!(table.find_in("Pensione XYZ Assisi"), Some("Assisi"));
        assert_eq!(table.find_in("HOTEL CENTRALE SIENA"), Some("Siena"));
    }

    #[test]
    fn test_alias_maps_to_canonical_name() {
        let table = CityTable::italian();
        assert_eq!(table.find_in("Florence Boutique Rooms"), Some("Firenze"));
        assert_eq!(table.find_in("Rome Central Suites"), Some("Roma"));
    }

    #[test]
    fn test_longest_alias_wins() {
        let table = CityTable::italian();
        assert_eq!(table.find_in("Hotel Reggio Emilia Centro"), Some("Reggio Emilia"));
        assert_eq!(table.find_in("Locanda San Gimignano"), Some("San Gimignano"));
    }

    #[test]
    fn test_no_match() {
        let table = CityTable::italian();
        assert_eq!(table.find_in("Pensione XYZ"), None);
    }

    #[test]
    fn test_custom_table() {
        let table = CityTable::new(vec![CityKeyword::new("Zermatt", &["matterhorn"])]);
        assert_eq!(table.find_in("Matterhorn Lodge"), Some("Zermatt"));
        assert_eq!(table.find_in("Hotel Roma"), None);
    }
}
