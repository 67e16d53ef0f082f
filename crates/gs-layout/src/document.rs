//! Layout document (JSON) and its conversion into a [`Layout`].
//!
//! ```json
//! {
//!   "name": "Sample",
//!   "nodes": { "G1": { "type": "gate", "x": 0, "y": 0, "size_class": "medium" } },
//!   "edges": { "E1": { "type": "taxiway", "start": "G1", "end": "H1", "length": 120 } }
//! }
//! ```
//!
//! `nodes` and `edges` are JSON objects keyed by id.  A repeated key inside
//! either object is reported as `DuplicateId` instead of being silently
//! overwritten, which is why they deserialize into [`Entries`] rather than a map.

use std::fmt;
use std::io::Read;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use gs_core::{Point2, SizeClass};

use crate::model::{AllowedFlow, EdgeKind, NodeKind};
use crate::network::{EdgeSpec, Layout, LayoutBuilder, NodeSpec};
use crate::{LayoutError, LayoutResult};

// ── Entries ───────────────────────────────────────────────────────────────────

/// Key/value pairs of a JSON object in document order, duplicates retained.
#[derive(Clone, Debug)]
pub struct Entries<T>(pub Vec<(String, T)>);

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Entries(Vec::new())
    }
}

impl<T: Serialize> Serialize for Entries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((k, v)) = map.next_entry::<String, T>()? {
                    out.push((k, v));
                }
                Ok(Entries(out))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

// ── Document types ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(rename = "type")]
    pub kind:       NodeKind,
    pub x:          f64,
    pub y:          f64,
    #[serde(default)]
    pub name:       Option<String>,
    #[serde(default)]
    pub apron:      Option<String>,
    #[serde(default)]
    pub size_class: Option<SizeClass>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeDocument {
    #[serde(rename = "type")]
    pub kind:           EdgeKind,
    pub start:          String,
    pub end:            String,
    #[serde(default)]
    pub length:         Option<f64>,
    #[serde(default)]
    pub allowed_flow:   AllowedFlow,
    #[serde(default)]
    pub one_way:        bool,
    #[serde(default)]
    pub speed_hint:     Option<f64>,
    #[serde(default)]
    pub capacity_hint:  Option<u32>,
    #[serde(default)]
    pub max_size_class: Option<SizeClass>,
    #[serde(default)]
    pub polyline:       Vec<[f64; 2]>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default)]
    pub name:    Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub nodes:   Entries<NodeDocument>,
    #[serde(default)]
    pub edges:   Entries<EdgeDocument>,
}

impl LayoutDocument {
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| LayoutError::Malformed(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> LayoutResult<Self> {
        serde_json::from_reader(reader).map_err(|e| LayoutError::Malformed(e.to_string()))
    }

    /// Validate and build the graph.
    pub fn into_layout(self) -> LayoutResult<Layout> {
        let mut b = LayoutBuilder::new();
        if let Some(name) = self.name {
            b.name(name);
        }
        for (key, n) in self.nodes.0 {
            let mut spec = NodeSpec::new(key, n.kind, n.x, n.y);
            if let Some(name) = n.name {
                spec.name = name;
            }
            spec.apron = n.apron;
            spec.max_size = n.size_class;
            b.add_node(spec);
        }
        for (key, e) in self.edges.0 {
            let mut spec = EdgeSpec::new(key, e.kind, e.start, e.end).flow(e.allowed_flow);
            spec.length = e.length;
            spec.one_way = e.one_way;
            spec.speed_hint = e.speed_hint;
            spec.capacity_hint = e.capacity_hint;
            spec.max_size = e.max_size_class;
            spec.polyline = e.polyline.into_iter().map(|[x, y]| Point2::new(x, y)).collect();
            b.add_edge(spec);
        }
        b.build()
    }
}

impl Layout {
    /// Parse and validate a layout document.
    pub fn from_json(json: &str) -> LayoutResult<Layout> {
        LayoutDocument::from_json(json)?.into_layout()
    }
}
