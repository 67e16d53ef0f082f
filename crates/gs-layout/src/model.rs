//! Layout elements.
//!
//! Nodes and edges carry their document key (`key`) next to the dense id the
//! builder assigned, so logs and results can name them the way the layout
//! author did.

use serde::{Deserialize, Serialize};

use gs_core::{Area, EdgeId, MovementType, NodeId, Point2, SizeClass};

// ── Node ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Intersection,
    RunwayEnd,
    RunwayEntry,
    RunwayExit,
    HoldPoint,
    Gate,
    ApronCenter,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id:       NodeId,
    pub key:      String,
    pub kind:     NodeKind,
    pub pos:      Point2,
    pub name:     String,
    /// Apron group this node belongs to (gates only, optional).
    pub apron:    Option<String>,
    /// Largest size class the node accepts (gates only, optional).
    pub max_size: Option<SizeClass>,
}

impl Node {
    #[inline]
    pub fn is_gate(&self) -> bool {
        self.kind == NodeKind::Gate
    }

    /// `true` if an aircraft of `size` may occupy this node.
    #[inline]
    pub fn admits(&self, size: SizeClass) -> bool {
        self.max_size.is_none_or(|limit| size.fits(limit))
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Runway,
    Taxiway,
    ApronLink,
    RapidExit,
}

impl EdgeKind {
    /// Operational area used for speed and separation lookup.
    pub fn area(self) -> Area {
        match self {
            EdgeKind::Runway => Area::Runway,
            EdgeKind::ApronLink => Area::Apron,
            EdgeKind::Taxiway | EdgeKind::RapidExit => Area::Taxiway,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedFlow {
    #[default]
    Both,
    Arrival,
    Departure,
}

impl AllowedFlow {
    #[inline]
    pub fn permits(self, movement: MovementType) -> bool {
        match self {
            AllowedFlow::Both => true,
            AllowedFlow::Arrival => movement == MovementType::Arrival,
            AllowedFlow::Departure => movement == MovementType::Departure,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub id:            EdgeId,
    pub key:           String,
    pub kind:          EdgeKind,
    pub from:          NodeId,
    pub to:            NodeId,
    /// Always positive and finite after build.
    pub length:        f64,
    pub flow:          AllowedFlow,
    pub one_way:       bool,
    pub speed_hint:    Option<f64>,
    /// Maximum simultaneous occupants the edge is meant to carry.
    pub capacity_hint: Option<u32>,
    pub max_size:      Option<SizeClass>,
    /// Intermediate geometry from `from` to `to`, endpoints included when authored.
    pub polyline:      Vec<Point2>,
}

impl Edge {
    #[inline]
    pub fn is_runway(&self) -> bool {
        self.kind == EdgeKind::Runway
    }

    /// The endpoint opposite `node`, if `node` is an endpoint of this edge.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// The leg leaving `node` along this edge, honoring the one-way flag.
    pub fn leg_from(&self, node: NodeId) -> Option<Leg> {
        if node == self.from {
            Some(Leg { edge: self.id, from: self.from, to: self.to })
        } else if node == self.to && !self.one_way {
            Some(Leg { edge: self.id, from: self.to, to: self.from })
        } else {
            None
        }
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One directed traversal of an edge.  Routes are sequences of legs, so a
/// two-way taxiway can appear in routes in either direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to:   NodeId,
}

impl Leg {
    /// `true` if this leg runs in the edge's authored direction.
    #[inline]
    pub fn is_forward(&self, edge: &Edge) -> bool {
        self.from == edge.from && self.to == edge.to
    }

    /// `true` if this leg is a traversal of `edge` in either direction.
    #[inline]
    pub fn traverses(&self, edge: &Edge) -> bool {
        self.edge == edge.id
            && ((self.from == edge.from && self.to == edge.to)
                || (self.from == edge.to && self.to == edge.from))
    }
}
