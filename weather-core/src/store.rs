//! In-memory stores owned by a single session.

use tracing::debug;

use crate::model::{Location, WeatherVariable};

#[derive(Debug, Default)]
pub struct LocationStore {
    locations: Vec<Location>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: Location) {
        debug!(name = %location.name, "adding location");
        self.locations.push(location);
    }

    /// Remove every location whose name matches exactly. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.locations.len();
        self.locations.retain(|loc| loc.name != name);
        let removed = before - self.locations.len();
        debug!(name, removed, "removed locations");
        removed
    }

    /// Locations in insertion order.
    pub fn list(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Append-only for the lifetime of the session.
#[derive(Debug, Default)]
pub struct VariableStore {
    variables: Vec<WeatherVariable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, variable: WeatherVariable) {
        debug!(name = %variable.name, value = variable.value, "adding weather variable");
        self.variables.push(variable);
    }

    pub fn list(&self) -> &[WeatherVariable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = LocationStore::new();
        let added = [
            Location::new("Paris", 48.8566, 2.3522),
            Location::new("Lima", -12.0464, -77.0428),
            Location::new("Tromso", 69.6492, 18.9553),
        ];
        for loc in added.iter().cloned() {
            store.add(loc);
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.list(), &added);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = LocationStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn remove_drops_all_exact_matches_only() {
        let mut store = LocationStore::new();
        store.add(Location::new("Paris", 1.0, 1.0));
        store.add(Location::new("paris", 2.0, 2.0));
        store.add(Location::new("Berlin", 3.0, 3.0));
        store.add(Location::new("Paris", 4.0, 4.0));

        assert_eq!(store.remove("Paris"), 2);

        let names: Vec<&str> = store.list().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["paris", "Berlin"]);
    }

    #[test]
    fn remove_unknown_name_is_noop() {
        let mut store = LocationStore::new();
        store.add(Location::new("Paris", 1.0, 1.0));

        assert_eq!(store.remove("Rome"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn variables_are_listed_after_add() {
        let mut store = VariableStore::new();
        assert!(store.is_empty());

        store.add(WeatherVariable::new("humidity", 0.62));
        store.add(WeatherVariable::new("humidity", 0.70));

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], WeatherVariable::new("humidity", 0.62));
        assert_eq!(store.list()[1].value, 0.70);
    }
}
