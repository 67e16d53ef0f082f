//! Unit tests for gs-capacity.

#[cfg(test)]
pub(crate) mod helpers {
    use gs_core::{AircraftId, MovementType, SizeClass, Tick};
    use gs_layout::{EdgeKind, EdgeSpec, Layout, LayoutBuilder, NodeKind, NodeSpec};
    use gs_rules::Contender;

    /// Three gates (one small, two in apron "east"), one hold point, two runways.
    pub fn layout() -> Layout {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("G1", NodeKind::Gate, 0.0, 0.0).max_size(SizeClass::Small));
        b.add_node(NodeSpec::new("G2", NodeKind::Gate, 10.0, 0.0).apron("east"));
        b.add_node(NodeSpec::new("G3", NodeKind::Gate, 20.0, 0.0).apron("east"));
        b.add_node(NodeSpec::new("H", NodeKind::HoldPoint, 0.0, 50.0));
        b.add_node(NodeSpec::new("R1", NodeKind::RunwayEnd, 0.0, 100.0));
        b.add_node(NodeSpec::new("R2", NodeKind::RunwayEnd, 1000.0, 100.0));
        b.add_node(NodeSpec::new("R3", NodeKind::RunwayEnd, 0.0, 900.0));
        b.add_edge(EdgeSpec::new("RWY_A", EdgeKind::Runway, "R1", "R2"));
        b.add_edge(EdgeSpec::new("RWY_B", EdgeKind::Runway, "R1", "R3"));
        b.add_edge(EdgeSpec::new("T", EdgeKind::Taxiway, "H", "R1"));
        b.build().unwrap()
    }

    pub fn contender(id: u32, queued_at: u64) -> Contender {
        Contender {
            id: AircraftId(id),
            movement: MovementType::Departure,
            size: SizeClass::Medium,
            queued_at: Tick(queued_at),
        }
    }
}

#[cfg(test)]
mod gates {
    use gs_core::{AircraftId, SizeClass};
    use gs_layout::{LayoutBuilder, NodeKind, NodeSpec};
    use gs_params::Parameters;

    use super::helpers::layout;
    use crate::{CapacityError, CapacityManager, Resource};

    #[test]
    fn small_gate_refuses_large_aircraft() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let g1 = l.node_by_key("G1").unwrap();
        let err = cap.acquire_specific_gate(g1, SizeClass::Large, AircraftId(0)).unwrap_err();
        assert_eq!(err, CapacityError::CapacityExhausted { resource: Resource::Gate(g1) });
        assert_eq!(cap.gates.occupant(g1), None);
    }

    #[test]
    fn occupied_gate_is_busy() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let g2 = l.node_by_key("G2").unwrap();
        cap.acquire_specific_gate(g2, SizeClass::Large, AircraftId(0)).unwrap();
        let err = cap.acquire_specific_gate(g2, SizeClass::Small, AircraftId(1)).unwrap_err();
        assert_eq!(err, CapacityError::AcquisitionFailure { resource: Resource::Gate(g2) });
        assert_eq!(cap.release_gate(g2), Some(AircraftId(0)));
        assert!(cap.acquire_specific_gate(g2, SizeClass::Small, AircraftId(1)).is_ok());
    }

    #[test]
    fn any_gate_scans_ascending_and_respects_size() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let (g1, g2, g3) = (
            l.node_by_key("G1").unwrap(),
            l.node_by_key("G2").unwrap(),
            l.node_by_key("G3").unwrap(),
        );
        assert_eq!(cap.acquire_gate(SizeClass::Large, None, AircraftId(0)), Ok(g2));
        assert_eq!(cap.acquire_gate(SizeClass::Small, None, AircraftId(1)), Ok(g1));
        assert_eq!(cap.acquire_gate(SizeClass::Large, None, AircraftId(2)), Ok(g3));
        assert_eq!(
            cap.acquire_gate(SizeClass::Medium, None, AircraftId(3)),
            Err(CapacityError::AcquisitionFailure { resource: Resource::AnyGate(SizeClass::Medium) })
        );
        assert_eq!(cap.gates.occupied_count(), 3);
    }

    #[test]
    fn preference_then_fallback() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let g2 = l.node_by_key("G2").unwrap();
        let g1 = l.node_by_key("G1").unwrap();
        assert_eq!(cap.acquire_gate(SizeClass::Small, Some("east"), AircraftId(0)), Ok(g2));
        assert_eq!(cap.acquire_gate(SizeClass::Small, Some("west"), AircraftId(1)), Ok(g1));
    }

    #[test]
    fn apron_limit_caps_occupancy() {
        let l = layout();
        let mut p = Parameters::default();
        p.capacity.apron_limits.insert("east".into(), 1);
        let mut cap = CapacityManager::from_layout(&l, &p);
        let g3 = l.node_by_key("G3").unwrap();
        cap.acquire_gate(SizeClass::Large, None, AircraftId(0)).unwrap();
        assert!(matches!(
            cap.acquire_specific_gate(g3, SizeClass::Large, AircraftId(1)),
            Err(CapacityError::AcquisitionFailure { .. })
        ));
        p.capacity.apron_limits.clear();
        cap.apply_parameters(&p);
        assert!(cap.acquire_specific_gate(g3, SizeClass::Large, AircraftId(1)).is_ok());
    }

    #[test]
    fn no_fitting_gate_is_exhausted() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("G1", NodeKind::Gate, 0.0, 0.0).max_size(SizeClass::Small));
        let l = b.build().unwrap();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        assert_eq!(
            cap.acquire_gate(SizeClass::Large, None, AircraftId(0)),
            Err(CapacityError::CapacityExhausted { resource: Resource::AnyGate(SizeClass::Large) })
        );

        let mut relaxed = Parameters::default();
        relaxed.access.enforce_size_limits = false;
        cap.apply_parameters(&relaxed);
        assert!(cap.acquire_gate(SizeClass::Large, None, AircraftId(0)).is_ok());
    }
}

#[cfg(test)]
mod holds {
    use gs_core::{AircraftId, MovementType, NodeId, SizeClass, Tick};
    use gs_params::{Parameters, PriorityMode};
    use gs_rules::Arbiter;

    use super::helpers::{contender, layout};
    use crate::{CapacityError, CapacityManager, Resource};

    #[test]
    fn fifo_releases_in_enqueue_order() {
        let l = layout();
        let p = Parameters::default();
        let mut cap = CapacityManager::from_layout(&l, &p);
        let h = l.node_by_key("H").unwrap();
        let arbiter = Arbiter::hold_release(&p);
        // A and B at tick 3 (A first), C at tick 4.
        let (a, b, c) = (contender(10, 3), contender(11, 3), contender(12, 4));
        cap.enqueue(h, c).unwrap();
        cap.enqueue(h, b).unwrap();
        cap.enqueue(h, a).unwrap();

        let mut released = Vec::new();
        while let Some(w) = cap.peek_winner(h, &arbiter, Tick(5)) {
            assert!(cap.release_hold(h, w));
            released.push(w);
        }
        assert_eq!(released, vec![AircraftId(10), AircraftId(11), AircraftId(12)]);
        assert_eq!(cap.holds.len(h), 0);
    }

    #[test]
    fn ordered_view_follows_mode() {
        let l = layout();
        let mut p = Parameters::default();
        p.priority.hold_release = PriorityMode::ArriveFirst;
        let mut cap = CapacityManager::from_layout(&l, &p);
        let h = l.node_by_key("H").unwrap();
        let mut arr = contender(5, 9);
        arr.movement = MovementType::Arrival;
        arr.size = SizeClass::Small;
        cap.enqueue(h, contender(1, 1)).unwrap();
        cap.enqueue(h, arr).unwrap();
        let order = cap.holds.ordered(h, &Arbiter::hold_release(&p), Tick(10));
        assert_eq!(order, vec![AircraftId(5), AircraftId(1)]);
    }

    #[test]
    fn queue_limit_and_idempotent_enqueue() {
        let l = layout();
        let mut p = Parameters::default();
        p.capacity.hold_queue_limit = 2;
        let mut cap = CapacityManager::from_layout(&l, &p);
        let h = l.node_by_key("H").unwrap();
        cap.enqueue(h, contender(1, 0)).unwrap();
        cap.enqueue(h, contender(1, 0)).unwrap();
        cap.enqueue(h, contender(2, 0)).unwrap();
        assert_eq!(
            cap.enqueue(h, contender(3, 0)),
            Err(CapacityError::CapacityExhausted { resource: Resource::Hold(h) })
        );
        assert_eq!(cap.holds.total_len(), 2);
        assert!(cap.holds.contains(h, AircraftId(2)));
        assert!(!cap.release_hold(h, AircraftId(3)));
    }

    #[test]
    fn unknown_hold_rejected() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let g1 = l.node_by_key("G1").unwrap();
        assert_eq!(
            cap.enqueue(g1, contender(1, 0)),
            Err(CapacityError::Unknown(Resource::Hold(g1)))
        );
        assert!(cap.peek_winner(NodeId(999), &Arbiter::hold_release(&Parameters::default()), Tick(0)).is_none());
    }
}

#[cfg(test)]
mod runways {
    use gs_core::AircraftId;
    use gs_params::Parameters;

    use super::helpers::layout;
    use crate::CapacityManager;

    #[test]
    fn one_holder_per_runway() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let a = l.edge_by_key("RWY_A").unwrap();
        let b = l.edge_by_key("RWY_B").unwrap();
        assert!(cap.try_acquire_runway(a, AircraftId(1)));
        assert!(cap.try_acquire_runway(a, AircraftId(1)), "re-entrant for the holder");
        assert!(!cap.try_acquire_runway(a, AircraftId(2)));
        assert!(cap.try_acquire_runway(b, AircraftId(2)));
        assert_eq!(cap.runways.occupied_count(), 2);
        assert_eq!(cap.release_runway(a), Some(AircraftId(1)));
        assert!(cap.try_acquire_runway(a, AircraftId(2)));
        assert_eq!(cap.runways.holder(a), Some(AircraftId(2)));
    }

    #[test]
    fn taxiways_are_not_lockable() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let t = l.edge_by_key("T").unwrap();
        assert!(!cap.runways.is_runway(t));
        assert!(!cap.try_acquire_runway(t, AircraftId(1)));
    }
}

#[cfg(test)]
mod releases {
    use gs_core::{AircraftId, SizeClass, Tick};
    use gs_params::Parameters;

    use super::helpers::layout;
    use crate::{CapacityManager, ReleaseQueue};

    #[test]
    fn drain_due_includes_overdue() {
        let mut q = ReleaseQueue::new();
        q.push(Tick(5), gs_core::NodeId(1));
        q.push(Tick(3), gs_core::NodeId(2));
        q.push(Tick(9), gs_core::NodeId(3));
        assert_eq!(q.next_tick(), Some(Tick(3)));
        assert_eq!(q.drain_due(Tick(5)), vec![gs_core::NodeId(2), gs_core::NodeId(1)]);
        assert_eq!(q.len(), 1);
        assert!(q.drain_due(Tick(8)).is_empty());
        assert_eq!(q.drain_due(Tick(9)).len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn housekeeping_frees_gates_when_due() {
        let l = layout();
        let mut cap = CapacityManager::from_layout(&l, &Parameters::default());
        let g2 = l.node_by_key("G2").unwrap();
        cap.acquire_specific_gate(g2, SizeClass::Medium, AircraftId(4)).unwrap();
        cap.schedule_gate_release(g2, Tick(600));
        assert!(cap.housekeeping(Tick(599)).is_empty());
        assert_eq!(cap.gates.occupant(g2), Some(AircraftId(4)));
        assert_eq!(cap.housekeeping(Tick(600)), vec![g2]);
        assert_eq!(cap.gates.occupant(g2), None);
    }
}
