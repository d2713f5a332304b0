use std::collections::HashMap;

/// TMDB movie genre names and their numeric ids, per the TMDB docs
const TMDB_GENRES: [(&str, i32); 19] = [
    ("Action", 28),
    ("Adventure", 12),
    ("Animation", 16),
    ("Comedy", 35),
    ("Crime", 80),
    ("Documentary", 99),
    ("Drama", 18),
    ("Family", 10751),
    ("Fantasy", 14),
    ("History", 36),
    ("Horror", 27),
    ("Music", 10402),
    ("Mystery", 9648),
    ("Romance", 10749),
    ("Science Fiction", 878),
    ("TV Movie", 10770),
    ("Thriller", 53),
    ("War", 10752),
    ("Western", 37),
];

/// Closed mapping from genre names to TMDB genre ids
///
/// Built once at startup and injected into the catalog client. The table is
/// never mutated afterwards, so it can be shared across requests freely.
#[derive(Debug, Clone)]
pub struct GenreVocabulary {
    ids_by_name: HashMap<String, i32>,
}

impl GenreVocabulary {
    /// The standard TMDB vocabulary
    pub fn standard() -> Self {
        Self::from_entries(TMDB_GENRES.iter().map(|(name, id)| (name.to_string(), *id)))
    }

    /// Builds a vocabulary from arbitrary entries; used by tests to substitute
    /// a smaller table
    pub fn from_entries(entries: impl IntoIterator<Item = (String, i32)>) -> Self {
        Self {
            ids_by_name: entries.into_iter().collect(),
        }
    }

    /// Translates genre names to ids, preserving input order
    ///
    /// Lookup is exact-match: casing and punctuation must match the table.
    /// Unknown names are dropped silently, so the result may be shorter than
    /// the input or empty.
    pub fn translate(&self, names: &[String]) -> Vec<i32> {
        names
            .iter()
            .filter_map(|name| self.ids_by_name.get(name.as_str()).copied())
            .collect()
    }
}
