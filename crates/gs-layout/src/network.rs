//! `Layout` and its builder.
//!
//! # Data layout
//!
//! Traversable legs are stored in **Compressed Sparse Row (CSR)** format.
//! Given a `NodeId n`, the legs leaving it occupy the slice:
//!
//! ```text
//! out_legs[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! A two-way edge contributes one leg at each endpoint; a one-way edge only
//! at its `from` node.  Within a node the legs are sorted by edge id, which
//! is what makes routing tie-breaks deterministic.
//!
//! # Id assignment
//!
//! Dense `NodeId`/`EdgeId` values follow ascending document key order, so
//! "lowest id" tie-breaks are stable across reloads of the same document no
//! matter how the author ordered the entries.

use std::collections::HashMap;

use tracing::{debug, warn};

use gs_core::{EdgeId, NodeId, Point2, SizeClass, polyline_length};

use crate::model::{AllowedFlow, Edge, EdgeKind, Leg, Node, NodeKind};
use crate::{LayoutError, LayoutResult};

// ── Layout ────────────────────────────────────────────────────────────────────

/// The immutable airport surface graph.
///
/// Do not construct directly; use [`LayoutBuilder`] or [`Layout::from_json`].
#[derive(Debug)]
pub struct Layout {
    /// Display name from the document, if any.
    pub name: Option<String>,

    /// Indexed by `NodeId`.
    pub nodes: Vec<Node>,

    /// Indexed by `EdgeId`.
    pub edges: Vec<Edge>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Legs grouped by source node, then ascending edge id.
    pub out_legs: Vec<Leg>,

    node_index: HashMap<String, NodeId>,
    edge_index: HashMap<String, EdgeId>,
}

impl Layout {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.node_index.get(key).copied()
    }

    pub fn edge_by_key(&self, key: &str) -> Option<EdgeId> {
        self.edge_index.get(key).copied()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Legs leaving `node`, ascending edge id.  Empty for unknown nodes.
    #[inline]
    pub fn legs_from(&self, node: NodeId) -> &[Leg] {
        let n = node.index();
        if n + 1 >= self.node_out_start.len() {
            return &[];
        }
        let start = self.node_out_start[n] as usize;
        let end = self.node_out_start[n + 1] as usize;
        &self.out_legs[start..end]
    }

    /// Edges that can be left through from `node`.
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.legs_from(node).iter().map(|leg| &self.edges[leg.edge.index()])
    }

    /// Edges with `node` as either endpoint, regardless of direction.
    pub fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.from == node || e.to == node)
    }

    /// Length of the edge a leg traverses (0.0 for an unknown edge).
    #[inline]
    pub fn leg_length(&self, leg: Leg) -> f64 {
        self.edge(leg.edge).map_or(0.0, |e| e.length)
    }

    // ── Kind queries ──────────────────────────────────────────────────────

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn gates(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_of_kind(NodeKind::Gate)
    }

    pub fn hold_points(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_of_kind(NodeKind::HoldPoint)
    }

    pub fn runway_ends(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_of_kind(NodeKind::RunwayEnd)
    }

    pub fn runway_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.is_runway())
    }
}

// ── Specs ─────────────────────────────────────────────────────────────────────

/// A node as authored, before ids are assigned.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub key:      String,
    pub kind:     NodeKind,
    pub pos:      Point2,
    pub name:     String,
    pub apron:    Option<String>,
    pub max_size: Option<SizeClass>,
}

impl NodeSpec {
    pub fn new(key: impl Into<String>, kind: NodeKind, x: f64, y: f64) -> Self {
        let key = key.into();
        Self { name: key.clone(), key, kind, pos: Point2::new(x, y), apron: None, max_size: None }
    }

    pub fn apron(mut self, apron: impl Into<String>) -> Self {
        self.apron = Some(apron.into());
        self
    }

    pub fn max_size(mut self, size: SizeClass) -> Self {
        self.max_size = Some(size);
        self
    }
}

/// An edge as authored: endpoints are document keys, length may be absent.
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pub key:           String,
    pub kind:          EdgeKind,
    pub from:          String,
    pub to:            String,
    pub length:        Option<f64>,
    pub flow:          AllowedFlow,
    pub one_way:       bool,
    pub speed_hint:    Option<f64>,
    pub capacity_hint: Option<u32>,
    pub max_size:      Option<SizeClass>,
    pub polyline:      Vec<Point2>,
}

impl EdgeSpec {
    pub fn new(
        key: impl Into<String>,
        kind: EdgeKind,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            from: from.into(),
            to: to.into(),
            length: None,
            flow: AllowedFlow::Both,
            one_way: false,
            speed_hint: None,
            capacity_hint: None,
            max_size: None,
            polyline: Vec::new(),
        }
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    pub fn flow(mut self, flow: AllowedFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn speed_hint(mut self, speed: f64) -> Self {
        self.speed_hint = Some(speed);
        self
    }

    pub fn capacity_hint(mut self, capacity: u32) -> Self {
        self.capacity_hint = Some(capacity);
        self
    }

    pub fn max_size(mut self, size: SizeClass) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn polyline(mut self, points: Vec<Point2>) -> Self {
        self.polyline = points;
        self
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────────

/// Collect node and edge specs in any order, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gs_layout::{EdgeKind, EdgeSpec, LayoutBuilder, NodeKind, NodeSpec};
///
/// let mut b = LayoutBuilder::new();
/// b.add_node(NodeSpec::new("G1", NodeKind::Gate, 0.0, 0.0));
/// b.add_node(NodeSpec::new("R09", NodeKind::RunwayEnd, 1000.0, 0.0));
/// b.add_edge(EdgeSpec::new("RWY", EdgeKind::Runway, "G1", "R09"));
/// let layout = b.build().unwrap();
/// assert_eq!(layout.edges[0].length, 1000.0); // derived from positions
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    name:  Option<String>,
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_node(&mut self, spec: NodeSpec) -> &mut Self {
        self.nodes.push(spec);
        self
    }

    pub fn add_edge(&mut self, spec: EdgeSpec) -> &mut Self {
        self.edges.push(spec);
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Validate the specs and produce a [`Layout`].
    ///
    /// Fails with `DuplicateId` for a repeated node or edge key,
    /// `DanglingReference` for an edge endpoint naming no node, and
    /// `InvalidLength` for a negative or non-finite authored length or a
    /// derived length of zero.
    pub fn build(self) -> LayoutResult<Layout> {
        let mut node_specs = self.nodes;
        node_specs.sort_by(|a, b| a.key.cmp(&b.key));
        if let Some(dup) = first_duplicate(node_specs.iter().map(|n| n.key.as_str())) {
            return Err(LayoutError::DuplicateId { kind: "node", id: dup.to_owned() });
        }

        let mut edge_specs = self.edges;
        edge_specs.sort_by(|a, b| a.key.cmp(&b.key));
        if let Some(dup) = first_duplicate(edge_specs.iter().map(|e| e.key.as_str())) {
            return Err(LayoutError::DuplicateId { kind: "edge", id: dup.to_owned() });
        }

        let mut node_index = HashMap::with_capacity(node_specs.len());
        let nodes: Vec<Node> = node_specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = NodeId(i as u32);
                node_index.insert(spec.key.clone(), id);
                Node {
                    id,
                    key: spec.key,
                    kind: spec.kind,
                    pos: spec.pos,
                    name: spec.name,
                    apron: spec.apron,
                    max_size: spec.max_size,
                }
            })
            .collect();

        let mut edge_index = HashMap::with_capacity(edge_specs.len());
        let mut edges = Vec::with_capacity(edge_specs.len());
        for (i, spec) in edge_specs.into_iter().enumerate() {
            let id = EdgeId(i as u32);
            let resolve = |key: &str| {
                node_index.get(key).copied().ok_or_else(|| LayoutError::DanglingReference {
                    edge: spec.key.clone(),
                    node: key.to_owned(),
                })
            };
            let from = resolve(&spec.from)?;
            let to = resolve(&spec.to)?;
            let length = edge_length(&spec, nodes[from.index()].pos, nodes[to.index()].pos)?;

            edge_index.insert(spec.key.clone(), id);
            edges.push(Edge {
                id,
                key: spec.key,
                kind: spec.kind,
                from,
                to,
                length,
                flow: spec.flow,
                one_way: spec.one_way,
                speed_hint: spec.speed_hint.filter(|s| *s > 0.0),
                capacity_hint: spec.capacity_hint,
                max_size: spec.max_size,
                polyline: spec.polyline,
            });
        }

        // CSR over legs: collect every traversal, sort by (source, edge id).
        let mut legs: Vec<Leg> = Vec::with_capacity(edges.len() * 2);
        for e in &edges {
            legs.push(Leg { edge: e.id, from: e.from, to: e.to });
            if !e.one_way && e.from != e.to {
                legs.push(Leg { edge: e.id, from: e.to, to: e.from });
            }
        }
        legs.sort_unstable_by_key(|l| (l.from, l.edge));

        let mut node_out_start = vec![0u32; nodes.len() + 1];
        for leg in &legs {
            node_out_start[leg.from.index() + 1] += 1;
        }
        for i in 1..node_out_start.len() {
            node_out_start[i] += node_out_start[i - 1];
        }

        let layout = Layout {
            name: self.name,
            nodes,
            edges,
            node_out_start,
            out_legs: legs,
            node_index,
            edge_index,
        };

        if layout.gates().next().is_none() {
            warn!("layout has no gate nodes; no aircraft can spawn");
        }
        if layout.runway_ends().next().is_none() {
            warn!("layout has no runway_end nodes; no runway can be selected");
        }
        debug!(
            nodes = layout.node_count(),
            edges = layout.edge_count(),
            legs = layout.out_legs.len(),
            "layout built"
        );
        Ok(layout)
    }
}

/// First repeated key in an already sorted sequence.
fn first_duplicate<'a>(sorted: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut prev: Option<&str> = None;
    for key in sorted {
        if prev == Some(key) {
            return Some(key);
        }
        prev = Some(key);
    }
    None
}

/// Authored length when positive; otherwise the polyline length, otherwise
/// the straight distance between the endpoints.
fn edge_length(spec: &EdgeSpec, from: Point2, to: Point2) -> LayoutResult<f64> {
    if let Some(len) = spec.length {
        if !len.is_finite() || len < 0.0 {
            return Err(LayoutError::InvalidLength { edge: spec.key.clone(), length: len });
        }
        if len > 0.0 {
            return Ok(len);
        }
    }
    let derived = if spec.polyline.len() >= 2 {
        polyline_length(&spec.polyline)
    } else {
        from.distance(to)
    };
    if derived > 0.0 && derived.is_finite() {
        Ok(derived)
    } else {
        Err(LayoutError::InvalidLength { edge: spec.key.clone(), length: derived })
    }
}
