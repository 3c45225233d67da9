//! Administrative regions: states (provinces) and the cities within them.

use serde::{Deserialize, Serialize};

/// A top-level administrative region.
///
/// `code` is an opaque token issued by the upstream site; it is passed back
/// verbatim when asking for the state's cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: u32,
    pub code: String,
    pub name: String,
}

/// A city or regency within a [`State`].
///
/// Carries its own copy of the owning state so cached city lists are
/// self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// 1-based position in the state's scraped city list.
    pub id: u32,
    pub code: String,
    pub name: String,
    pub state: State,
}

impl City {
    /// Build a city list from scraped `(code, name)` options.
    ///
    /// Ids are derived from list position, so the same document always
    /// produces the same ids.
    pub fn from_options<I>(state: &State, options: I) -> Vec<City>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        (1u32..)
            .zip(options)
            .map(|(id, (code, name))| City {
                id,
                code,
                name,
                state: state.clone(),
            })
            .collect()
    }
}

/// Whether `name` matches a user search term.
///
/// An absent or empty term matches everything. Otherwise the term is
/// uppercased and matched as a substring of the (uppercase) name.
pub fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search {
        Some(term) if !term.is_empty() => name.to_uppercase().contains(&term.to_uppercase()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jateng() -> State {
        State {
            id: 15,
            code: "X".to_string(),
            name: "JAWA TENGAH".to_string(),
        }
    }

    #[test]
    fn city_ids_follow_document_order() {
        let cities = City::from_options(
            &jateng(),
            vec![
                ("a".to_string(), "KAB. BANJARNEGARA".to_string()),
                ("b".to_string(), "KAB. BANYUMAS".to_string()),
                ("c".to_string(), "KOTA SEMARANG".to_string()),
            ],
        );

        let ids: Vec<u32> = cities.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cities[2].name, "KOTA SEMARANG");
        assert!(cities.iter().all(|c| c.state == jateng()));
    }

    #[test]
    fn empty_options_give_empty_list() {
        let cities = City::from_options(&jateng(), Vec::new());
        assert!(cities.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search("JAWA TENGAH", Some("tengah")));
        assert!(matches_search("JAWA TENGAH", Some("Jawa")));
        assert!(!matches_search("PUSAT", Some("jawa")));
    }

    #[test]
    fn empty_search_matches_everything() {
        assert!(matches_search("PUSAT", None));
        assert!(matches_search("PUSAT", Some("")));
    }

    proptest! {
        #[test]
        fn any_substring_of_name_matches(name in "[A-Z. ]{1,30}", start in 0usize..30, len in 0usize..30) {
            let start = start.min(name.len());
            let end = (start + len).min(name.len());
            let term = name[start..end].to_lowercase();
            prop_assert!(matches_search(&name, Some(&term)));
        }
    }
}
