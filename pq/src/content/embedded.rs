//! Embedded topics
//!
//! These are compiled into the binary from .yml files at build time.

use tracing::debug;

/// States population
pub const STATES: &str = include_str!("../../content/states.yml");

/// Rio 2016 gold medals
pub const OLYMPICS: &str = include_str!("../../content/olympics.yml");

/// Early COVID-19 case counts
pub const CORONAVIRUS: &str = include_str!("../../content/coronavirus.yml");

/// Fertility rate in Poland
pub const FERTILITY: &str = include_str!("../../content/fertility.yml");

/// Desktop browser share
pub const BROWSERS: &str = include_str!("../../content/browsers.yml");

/// Built-in topics in tab order
pub const BUILTIN_TOPICS: &[(&str, &str)] = &[
    ("states", STATES),
    ("olympics", OLYMPICS),
    ("coronavirus", CORONAVIRUS),
    ("fertility", FERTILITY),
    ("browsers", BROWSERS),
];

/// Get the embedded topic source by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    let found = BUILTIN_TOPICS.iter().find(|(id, _)| *id == name).map(|(_, src)| *src);
    if found.is_none() {
        debug!("get_embedded: no match found");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_states() {
        let states = get_embedded("states").unwrap();
        assert!(states.contains("id: states"));
        assert!(states.contains("California"));
    }

    #[test]
    fn test_every_builtin_names_its_own_id() {
        for (id, src) in BUILTIN_TOPICS {
            assert!(src.contains(&format!("id: {}", id)), "{} source has wrong id", id);
        }
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-topic").is_none());
    }
}
