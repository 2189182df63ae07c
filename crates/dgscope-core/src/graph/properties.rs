//! Named per-vertex numeric arrays.
//!
//! # Registry
//!
//! Every readable property name must be registered first. The built-in
//! properties ([`VertexProp`]) are always registered; callers may add their
//! own (typically loaded from a file). Each name carries a display header and
//! an "integer-valued" flag that only affects output precision.
//!
//! # Validity
//!
//! Values produced by the engine are stamped with the graph generation they
//! were computed at and become stale when the graph changes. Values loaded
//! from outside are valid as long as they cover exactly `|V|` vertices.

use std::collections::{BTreeMap, HashMap};

use crate::error::{GraphError, Result};

// ---------------------------------------------------------------------------
// Built-in properties
// ---------------------------------------------------------------------------

/// Vertex properties computed by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexProp {
    InDegree,
    OutDegree,
    ReciprocalDegree,
    ReciprocityJaccard,
    ReciprocityRatio,
    UndirLocalClust,
}

impl VertexProp {
    pub const ALL: [Self; 6] = [
        Self::InDegree,
        Self::OutDegree,
        Self::ReciprocalDegree,
        Self::ReciprocityJaccard,
        Self::ReciprocityRatio,
        Self::UndirLocalClust,
    ];

    /// Registry name, as accepted by [`crate::DirectedGraph::vertex_property`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InDegree => "in-degree",
            Self::OutDegree => "out-degree",
            Self::ReciprocalDegree => "reciprocal_degree",
            Self::ReciprocityJaccard => "reciprocity_jaccard",
            Self::ReciprocityRatio => "reciprocity_ratio",
            Self::UndirLocalClust => "undir_local_clust",
        }
    }

    /// Column header used in vertex tables.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::InDegree => "InDeg",
            Self::OutDegree => "OutDeg",
            Self::ReciprocalDegree => "RecDeg",
            Self::ReciprocityJaccard => "ReciproJacc",
            Self::ReciprocityRatio => "ReciproRatio",
            Self::UndirLocalClust => "UnLocalClust",
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::InDegree | Self::OutDegree | Self::ReciprocalDegree
        )
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

// ---------------------------------------------------------------------------
// PropertyStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct PropertyMeta {
    header: String,
    integer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provenance {
    Computed { generation: u64 },
    Loaded,
}

#[derive(Debug, Clone)]
struct PropertyValues {
    values: Vec<f64>,
    provenance: Provenance,
}

/// Registry plus value arrays for every vertex property.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    registry: BTreeMap<String, PropertyMeta>,
    values: HashMap<String, PropertyValues>,
}

impl Default for PropertyStore {
    fn default() -> Self {
        let registry = VertexProp::ALL
            .into_iter()
            .map(|p| {
                (
                    p.name().to_owned(),
                    PropertyMeta {
                        header: p.header().to_owned(),
                        integer: p.is_integer(),
                    },
                )
            })
            .collect();
        Self {
            registry,
            values: HashMap::new(),
        }
    }
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Registered names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    /// # Errors
    ///
    /// [`GraphError::UnknownProperty`] if `name` is not registered.
    pub fn header(&self, name: &str) -> Result<&str> {
        self.meta(name).map(|m| m.header.as_str())
    }

    /// # Errors
    ///
    /// [`GraphError::UnknownProperty`] if `name` is not registered.
    pub fn is_integer(&self, name: &str) -> Result<bool> {
        self.meta(name).map(|m| m.integer)
    }

    /// Register a new property. An empty header defaults to the name.
    ///
    /// # Errors
    ///
    /// [`GraphError::PropertyExists`] if `name` is already registered.
    pub fn register(&mut self, name: &str, header: &str, integer: bool) -> Result<()> {
        if self.registry.contains_key(name) {
            return Err(GraphError::PropertyExists {
                name: name.to_owned(),
            });
        }
        let header = if header.is_empty() { name } else { header };
        self.registry.insert(
            name.to_owned(),
            PropertyMeta {
                header: header.to_owned(),
                integer,
            },
        );
        Ok(())
    }

    pub(crate) fn store_computed(&mut self, prop: VertexProp, values: Vec<f64>, generation: u64) {
        self.values.insert(
            prop.name().to_owned(),
            PropertyValues {
                values,
                provenance: Provenance::Computed { generation },
            },
        );
    }

    pub(crate) fn store_loaded(&mut self, name: &str, values: Vec<f64>) {
        self.values.insert(
            name.to_owned(),
            PropertyValues {
                values,
                provenance: Provenance::Loaded,
            },
        );
    }

    /// Values of `name`, checked against the current graph shape.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownProperty`] if `name` is not registered.
    /// - [`GraphError::PropertyNotComputed`] if no values exist or their
    ///   length differs from `vertex_count`.
    /// - [`GraphError::PropertyStale`] if the values were computed at an
    ///   older `generation`.
    pub fn get(&self, name: &str, vertex_count: usize, generation: u64) -> Result<&[f64]> {
        self.meta(name)?;
        let Some(entry) = self.values.get(name) else {
            return Err(GraphError::PropertyNotComputed {
                name: name.to_owned(),
                expected: vertex_count,
                found: 0,
            });
        };
        if entry.values.len() != vertex_count {
            return Err(GraphError::PropertyNotComputed {
                name: name.to_owned(),
                expected: vertex_count,
                found: entry.values.len(),
            });
        }
        if let Provenance::Computed { generation: at } = entry.provenance {
            if at != generation {
                return Err(GraphError::PropertyStale {
                    name: name.to_owned(),
                });
            }
        }
        Ok(&entry.values)
    }

    fn meta(&self, name: &str) -> Result<&PropertyMeta> {
        self.registry
            .get(name)
            .ok_or_else(|| GraphError::UnknownProperty {
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered_with_headers() {
        let store = PropertyStore::new();
        assert_eq!(store.header("in-degree").expect("registered"), "InDeg");
        assert_eq!(
            store.header("undir_local_clust").expect("registered"),
            "UnLocalClust"
        );
        assert!(store.is_integer("out-degree").expect("registered"));
        assert!(!store.is_integer("reciprocity_ratio").expect("registered"));
        assert_eq!(store.names().count(), VertexProp::ALL.len());
    }

    #[test]
    fn from_name_round_trips_builtins() {
        for prop in VertexProp::ALL {
            assert_eq!(VertexProp::from_name(prop.name()), Some(prop));
        }
        assert_eq!(VertexProp::from_name("pagerank"), None);
    }

    #[test]
    fn unknown_property_is_an_error() {
        let store = PropertyStore::new();
        let err = store.get("nope", 0, 0).expect_err("unregistered");
        assert!(matches!(err, GraphError::UnknownProperty { .. }));
    }

    #[test]
    fn registered_but_never_computed_is_an_error() {
        let store = PropertyStore::new();
        let err = store.get("in-degree", 3, 0).expect_err("not computed");
        assert!(matches!(
            err,
            GraphError::PropertyNotComputed {
                expected: 3,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn computed_values_go_stale_with_generation() {
        let mut store = PropertyStore::new();
        store.store_computed(VertexProp::InDegree, vec![1.0, 0.0], 4);
        assert_eq!(store.get("in-degree", 2, 4).expect("current"), &[1.0, 0.0]);
        let err = store.get("in-degree", 2, 5).expect_err("stale");
        assert!(matches!(err, GraphError::PropertyStale { .. }));
    }

    #[test]
    fn loaded_values_only_check_length() {
        let mut store = PropertyStore::new();
        store.register("weight", "", false).expect("new name");
        store.store_loaded("weight", vec![0.5, 1.5]);
        assert_eq!(store.get("weight", 2, 99).expect("length matches"), &[0.5, 1.5]);
        assert!(store.get("weight", 3, 99).is_err());
        assert_eq!(store.header("weight").expect("registered"), "weight");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut store = PropertyStore::new();
        let err = store.register("in-degree", "X", true).expect_err("exists");
        assert!(matches!(err, GraphError::PropertyExists { .. }));
    }
}
