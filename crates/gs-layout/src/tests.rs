//! Unit tests for gs-layout.
//!
//! All tests use small hand-written layouts.

#[cfg(test)]
pub(crate) mod helpers {
    /// Gate apron, one taxiway through a hold point, one runway.
    ///
    /// ```text
    ///   G1 ──apron── TX ──taxi── H1 ──taxi── RE_W ══runway══ RE_E
    /// ```
    pub const SMALL_AIRPORT: &str = r#"{
        "name": "Small",
        "nodes": {
            "G1":   { "type": "gate", "x": 0, "y": -200, "apron": "north", "size_class": "medium" },
            "TX":   { "type": "intersection", "x": 0, "y": -100 },
            "H1":   { "type": "hold_point", "x": 0, "y": -50 },
            "RE_W": { "type": "runway_end", "x": 0, "y": 0 },
            "RE_E": { "type": "runway_end", "x": 1000, "y": 0 }
        },
        "edges": {
            "A1":  { "type": "apron_link", "start": "G1", "end": "TX", "length": 100 },
            "T1":  { "type": "taxiway", "start": "TX", "end": "H1" },
            "T2":  { "type": "taxiway", "start": "H1", "end": "RE_W", "length": 50, "one_way": true },
            "RWY": { "type": "runway", "start": "RE_W", "end": "RE_E", "length": 1000 }
        }
    }"#;
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use gs_core::{EdgeId, NodeId, Point2, SizeClass};

    use crate::{EdgeKind, EdgeSpec, LayoutBuilder, LayoutError, NodeKind, NodeSpec};

    #[test]
    fn empty_build() {
        let layout = LayoutBuilder::new().build().unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.edge_count(), 0);
        assert!(layout.legs_from(NodeId(0)).is_empty());
    }

    #[test]
    fn ids_follow_key_order() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("Z", NodeKind::Intersection, 0.0, 0.0));
        b.add_node(NodeSpec::new("A", NodeKind::Intersection, 10.0, 0.0));
        b.add_edge(EdgeSpec::new("e2", EdgeKind::Taxiway, "A", "Z"));
        b.add_edge(EdgeSpec::new("e1", EdgeKind::Taxiway, "Z", "A"));
        let layout = b.build().unwrap();
        assert_eq!(layout.node_by_key("A"), Some(NodeId(0)));
        assert_eq!(layout.node_by_key("Z"), Some(NodeId(1)));
        assert_eq!(layout.edge_by_key("e1"), Some(EdgeId(0)));
        assert_eq!(layout.edges[0].from, NodeId(1));
    }

    #[test]
    fn length_derived_from_geometry() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("a", NodeKind::Intersection, 0.0, 0.0));
        b.add_node(NodeSpec::new("b", NodeKind::Intersection, 30.0, 40.0));
        b.add_edge(EdgeSpec::new("straight", EdgeKind::Taxiway, "a", "b").length(0.0));
        b.add_edge(
            EdgeSpec::new("bent", EdgeKind::Taxiway, "a", "b").polyline(vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 40.0),
                Point2::new(30.0, 40.0),
            ]),
        );
        let layout = b.build().unwrap();
        let straight = layout.edge_by_key("straight").unwrap();
        let bent = layout.edge_by_key("bent").unwrap();
        assert_eq!(layout.edge(straight).unwrap().length, 50.0);
        assert_eq!(layout.edge(bent).unwrap().length, 70.0);
    }

    #[test]
    fn negative_length_rejected() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("a", NodeKind::Intersection, 0.0, 0.0));
        b.add_node(NodeSpec::new("b", NodeKind::Intersection, 1.0, 0.0));
        b.add_edge(EdgeSpec::new("e", EdgeKind::Taxiway, "a", "b").length(-5.0));
        assert!(matches!(b.build(), Err(LayoutError::InvalidLength { .. })));
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("a", NodeKind::Gate, 0.0, 0.0));
        b.add_node(NodeSpec::new("a", NodeKind::Gate, 5.0, 0.0));
        assert_eq!(
            b.build().unwrap_err(),
            LayoutError::DuplicateId { kind: "node", id: "a".into() }
        );
    }

    #[test]
    fn dangling_endpoint_rejected() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("a", NodeKind::Gate, 0.0, 0.0));
        b.add_edge(EdgeSpec::new("e", EdgeKind::Taxiway, "a", "ghost").length(10.0));
        assert_eq!(
            b.build().unwrap_err(),
            LayoutError::DanglingReference { edge: "e".into(), node: "ghost".into() }
        );
    }

    #[test]
    fn gate_size_ceiling() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("g", NodeKind::Gate, 0.0, 0.0).max_size(SizeClass::Small));
        let layout = b.build().unwrap();
        let gate = &layout.nodes[0];
        assert!(gate.admits(SizeClass::Small));
        assert!(!gate.admits(SizeClass::Large));
    }
}

// ── CSR adjacency ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod adjacency {
    use crate::{Layout, NodeKind};

    #[test]
    fn two_way_edges_leave_both_ends() {
        let layout = Layout::from_json(super::helpers::SMALL_AIRPORT).unwrap();
        let tx = layout.node_by_key("TX").unwrap();
        let keys: Vec<&str> = layout.edges_from(tx).map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["A1", "T1"]);
        for leg in layout.legs_from(tx) {
            assert_eq!(leg.from, tx);
        }
    }

    #[test]
    fn one_way_edge_only_leaves_its_start() {
        let layout = Layout::from_json(super::helpers::SMALL_AIRPORT).unwrap();
        let re_w = layout.node_by_key("RE_W").unwrap();
        let t2 = layout.edge_by_key("T2").unwrap();
        assert!(layout.legs_from(re_w).iter().all(|l| l.edge != t2));
        let h1 = layout.node_by_key("H1").unwrap();
        assert!(layout.legs_from(h1).iter().any(|l| l.edge == t2 && l.to == re_w));
    }

    #[test]
    fn legs_sorted_by_edge_within_node() {
        let layout = Layout::from_json(super::helpers::SMALL_AIRPORT).unwrap();
        for n in &layout.nodes {
            let legs = layout.legs_from(n.id);
            assert!(legs.windows(2).all(|w| w[0].edge < w[1].edge));
        }
        assert_eq!(*layout.node_out_start.last().unwrap() as usize, layout.out_legs.len());
    }

    #[test]
    fn kind_queries() {
        let layout = Layout::from_json(super::helpers::SMALL_AIRPORT).unwrap();
        assert_eq!(layout.gates().count(), 1);
        assert_eq!(layout.hold_points().count(), 1);
        assert_eq!(layout.runway_ends().count(), 2);
        assert_eq!(layout.runway_edges().count(), 1);
        assert_eq!(layout.nodes_of_kind(NodeKind::ApronCenter).count(), 0);
        let re_e = layout.node_by_key("RE_E").unwrap();
        assert_eq!(layout.incident_edges(re_e).count(), 1);
    }
}

// ── Document ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod document {
    use gs_core::{Area, MovementType, SizeClass};

    use crate::{AllowedFlow, EdgeKind, Layout, LayoutDocument, LayoutError};

    #[test]
    fn loads_sample() {
        let layout = Layout::from_json(super::helpers::SMALL_AIRPORT).unwrap();
        assert_eq!(layout.name.as_deref(), Some("Small"));
        assert_eq!(layout.node_count(), 5);
        let gate = &layout.nodes[layout.node_by_key("G1").unwrap().index()];
        assert_eq!(gate.apron.as_deref(), Some("north"));
        assert_eq!(gate.max_size, Some(SizeClass::Medium));
        assert_eq!(gate.name, "G1");
        let t1 = layout.edge(layout.edge_by_key("T1").unwrap()).unwrap();
        assert_eq!(t1.length, 50.0);
    }

    #[test]
    fn duplicate_key_inside_json_object() {
        let json = r#"{
            "nodes": {
                "A": { "type": "gate", "x": 0, "y": 0 },
                "A": { "type": "gate", "x": 9, "y": 9 }
            },
            "edges": {}
        }"#;
        assert_eq!(
            Layout::from_json(json).unwrap_err(),
            LayoutError::DuplicateId { kind: "node", id: "A".into() }
        );
    }

    #[test]
    fn unknown_node_type_is_malformed() {
        let json = r#"{ "nodes": { "A": { "type": "hangar", "x": 0, "y": 0 } } }"#;
        assert!(matches!(Layout::from_json(json), Err(LayoutError::Malformed(_))));
    }

    #[test]
    fn edge_flags_round_trip_through_document() {
        let json = r#"{
            "nodes": {
                "a": { "type": "runway_exit", "x": 0, "y": 0 },
                "b": { "type": "intersection", "x": 0, "y": 80 }
            },
            "edges": {
                "X": { "type": "rapid_exit", "start": "a", "end": "b",
                       "allowed_flow": "arrival", "speed_hint": 4.5,
                       "capacity_hint": 2, "max_size_class": "medium" }
            }
        }"#;
        let doc = LayoutDocument::from_json(json).unwrap();
        let text = serde_json::to_string(&doc).unwrap();
        let layout = Layout::from_json(&text).unwrap();
        let e = &layout.edges[0];
        assert_eq!(e.kind, EdgeKind::RapidExit);
        assert_eq!(e.kind.area(), Area::Taxiway);
        assert_eq!(e.flow, AllowedFlow::Arrival);
        assert!(e.flow.permits(MovementType::Arrival));
        assert!(!e.flow.permits(MovementType::Departure));
        assert_eq!(e.speed_hint, Some(4.5));
        assert_eq!(e.capacity_hint, Some(2));
        assert_eq!(e.max_size, Some(SizeClass::Medium));
        assert_eq!(e.length, 80.0);
    }
}
