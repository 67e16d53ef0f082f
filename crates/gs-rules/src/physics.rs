use gs_core::{Area, SizeClass, Weather};
use gs_layout::Edge;

use crate::Rules;

impl Rules<'_> {
    /// Target speed on `edge` in units per second:
    /// base speed × area multiplier × weather multiplier, capped by the
    /// edge's speed hint.
    pub fn speed(&self, size: SizeClass, edge: &Edge, weather: Weather) -> f64 {
        let m = &self.params.movement;
        let speed = m.base_speed.get(size) * m.section.get(edge.kind.area()) * m.weather.get(weather);
        match edge.speed_hint {
            Some(hint) => speed.min(hint),
            None => speed,
        }
    }

    /// Minimum gap between consecutive aircraft on an edge of `area`.
    pub fn separation(&self, area: Area, weather: Weather) -> f64 {
        let s = &self.params.separation;
        s.base.get(area) * s.weather.get(weather)
    }
}
