use gs_core::{MovementType, SizeClass};
use gs_layout::{EdgeKind, Leg};

use crate::Rules;

impl Rules<'_> {
    /// May an aircraft of this movement type and size traverse `leg`?
    ///
    /// Rejects unknown edges, legs that do not match their edge's endpoints,
    /// reverse traversal of one-way edges, flow restrictions, departures on
    /// rapid exits, closed edges, and (when size limits are enforced) edges or
    /// destination gates whose ceiling is below `size`.
    pub fn is_admissible(&self, leg: Leg, movement: MovementType, size: SizeClass) -> bool {
        let Some(edge) = self.layout.edge(leg.edge) else {
            return false;
        };
        if !leg.traverses(edge) {
            return false;
        }
        if edge.one_way && !leg.is_forward(edge) {
            return false;
        }
        if !edge.flow.permits(movement) {
            return false;
        }
        if edge.kind == EdgeKind::RapidExit && movement != MovementType::Arrival {
            return false;
        }
        if self.params.is_edge_closed(&edge.key) {
            return false;
        }
        if self.params.access.enforce_size_limits {
            if edge.max_size.is_some_and(|limit| !size.fits(limit)) {
                return false;
            }
            let gate_too_small =
                self.layout.node(leg.to).is_some_and(|n| n.is_gate() && !n.admits(size));
            if gate_too_small {
                return false;
            }
        }
        true
    }
}
