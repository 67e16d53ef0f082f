//! Wind-based runway end selection.
//!
//! Aircraft take off and land into the wind.  For a runway end `E`:
//!
//! - as an **arrival** end, the relevant heading is the landing roll: from
//!   `E` along its runway edge toward the far end;
//! - as a **departure** end, the relevant heading is the take-off roll: along
//!   the runway edge toward `E`.
//!
//! The heading is compared with the direction the wind blows FROM.  Ends
//! whose best difference exceeds the tolerance are skipped; the smallest
//! difference wins and ties go to the lowest node id.

use gs_core::{MovementType, NodeId, heading_difference};
use gs_layout::{Edge, Layout};

/// The runway end arrivals (or departures) should currently use.
pub fn active_runway_end(
    layout: &Layout,
    wind_from_deg: f64,
    tolerance_deg: f64,
    movement: MovementType,
) -> Option<NodeId> {
    let mut best: Option<(f64, NodeId)> = None;
    for end in layout.runway_ends() {
        let Some(diff) = best_difference(layout, end.id, wind_from_deg, movement) else {
            continue;
        };
        if diff > tolerance_deg {
            continue;
        }
        if best.is_none_or(|(d, _)| diff < d) {
            best = Some((diff, end.id));
        }
    }
    best.map(|(_, id)| id)
}

fn best_difference(layout: &Layout, end: NodeId, wind_from: f64, movement: MovementType) -> Option<f64> {
    layout
        .incident_edges(end)
        .filter(|e| e.is_runway())
        .filter_map(|e| roll_heading(layout, e, end, movement))
        .map(|h| heading_difference(h, wind_from))
        .min_by(f64::total_cmp)
}

/// Heading of the roll along `edge` for `movement` at `end`, if the edge may
/// be traversed in that direction.
fn roll_heading(layout: &Layout, edge: &Edge, end: NodeId, movement: MovementType) -> Option<f64> {
    let far = edge.other_end(end)?;
    let (from, to) = match movement {
        MovementType::Arrival => (end, far),
        MovementType::Departure => (far, end),
    };
    edge.leg_from(from).filter(|l| l.to == to)?;
    let a = layout.node(from)?.pos;
    let b = layout.node(to)?.pos;
    Some(a.bearing_to(b))
}
