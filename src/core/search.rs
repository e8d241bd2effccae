//! Live unit search.
//!
//! The filter hides every rendered unit marker whose resolved name does not
//! contain the query, ignoring case. It is stateless apart from the query,
//! so it can be re-applied whenever the marker set is rebuilt.

use crate::core::layers::UnitLayer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.query.is_empty() || name.to_lowercase().contains(&self.query)
    }

    /// Update marker visibility in place and return how many stay visible
    pub fn apply(&self, layers: &mut [UnitLayer]) -> usize {
        let mut visible = 0;
        for marker in layers.iter_mut().flat_map(|layer| layer.markers.iter_mut()) {
            marker.hidden = !self.matches(&marker.properties.name);
            if !marker.hidden {
                visible += 1;
            }
        }
        log::debug!("Search '{}' leaves {visible} unit markers visible", self.query);
        visible
    }
}
