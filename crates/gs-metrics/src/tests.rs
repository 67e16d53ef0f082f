//! Unit tests for gs-metrics.

#[cfg(test)]
pub(crate) mod helpers {
    use gs_core::{AircraftId, MovementType, NodeId, SizeClass, Tick};
    use gs_layout::{EdgeKind, EdgeSpec, Layout, LayoutBuilder, NodeKind, NodeSpec};
    use gs_movement::{FlightRecord, TickObservables};
    use gs_params::RunControl;

    use crate::MetricsCollector;

    pub fn layout() -> Layout {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeSpec::new("G1", NodeKind::Gate, 0.0, 0.0));
        b.add_node(NodeSpec::new("R1", NodeKind::RunwayEnd, 0.0, 100.0));
        b.add_node(NodeSpec::new("R2", NodeKind::RunwayEnd, 1000.0, 100.0));
        b.add_edge(EdgeSpec::new("T", EdgeKind::Taxiway, "G1", "R1"));
        b.add_edge(EdgeSpec::new("RWY", EdgeKind::Runway, "R1", "R2"));
        b.build().unwrap()
    }

    pub fn collector(window_secs: f64) -> MetricsCollector {
        let run = RunControl { throughput_window_secs: window_secs, ..RunControl::default() };
        MetricsCollector::new(&layout(), &run)
    }

    pub fn flight(id: u32, movement: MovementType, spawn: u64, done: u64, wait: f64) -> FlightRecord {
        FlightRecord {
            id: AircraftId(id),
            movement,
            size: SizeClass::Medium,
            gate: NodeId(0),
            spawn_tick: Tick(spawn),
            completion_tick: Tick(done),
            duration_secs: (done - spawn + 1) as f64,
            wait_secs: wait,
            distance: 1100.0,
            reroutes: 0,
        }
    }

    /// An observation with the given live counts and a single hold queue.
    pub fn tick(t: u64, departures: usize, arrivals: usize, queued: usize) -> TickObservables {
        let mut obs = TickObservables::new(Tick(t), t as f64);
        obs.live_departures = departures;
        obs.live_arrivals = arrivals;
        obs.hold_queues = vec![(NodeId(1), queued)];
        obs
    }
}

#[cfg(test)]
mod summary {
    use gs_core::{AircraftId, EdgeId, MovementType, Tick};
    use gs_movement::{RunwayEvent, RunwayEventKind};

    use super::helpers::{collector, flight, tick};

    #[test]
    fn empty_run_is_all_zero() {
        let doc = collector(300.0).summarize(3600.0);
        assert_eq!(doc.summary.total_flights, 0);
        assert_eq!(doc.summary.avg_taxi_time, 0.0);
        assert_eq!(doc.summary.throughput_per_hour, 0.0);
        assert!(doc.plots.is_empty());
        assert!(doc.flights.is_empty());
    }

    #[test]
    fn totals_and_averages() {
        let mut m = collector(300.0);
        let mut first = tick(0, 1, 1, 2);
        first.spawned = 2;
        first.deferred_spawns = 3;
        first.routing_failures = 1;
        first.runway_events.push(RunwayEvent {
            tick: Tick(0),
            aircraft: AircraftId(0),
            edge: EdgeId(1),
            kind: RunwayEventKind::Entered,
        });
        first.runway_events.push(RunwayEvent {
            tick: Tick(0),
            aircraft: AircraftId(1),
            edge: EdgeId(1),
            kind: RunwayEventKind::Exited,
        });
        m.record(&first);

        let mut second = tick(1, 0, 0, 1);
        // durations 200 and 100; waits 50 and 0
        second.completed.push(flight(0, MovementType::Departure, 0, 199, 50.0));
        second.completed.push(flight(1, MovementType::Arrival, 100, 199, 0.0));
        m.record(&second);

        let s = m.summarize(1800.0).summary;
        assert_eq!(s.total_flights, 2);
        assert_eq!(s.total_departures, 1);
        assert_eq!(s.total_arrivals, 1);
        assert_eq!(s.total_spawned, 2);
        assert_eq!(s.deferred_spawns, 3);
        assert_eq!(s.routing_failures, 1);
        assert_eq!(s.runway_entries, 1);
        assert_eq!(s.avg_duration, 150.0);
        assert_eq!(s.min_duration, 100.0);
        assert_eq!(s.max_duration, 200.0);
        assert_eq!(s.avg_taxi_time, 125.0);
        assert_eq!(s.avg_taxi_time_departure, 150.0);
        assert_eq!(s.avg_taxi_time_arrival, 100.0);
        assert_eq!(s.avg_wait_time, 25.0);
        assert_eq!(s.max_wait_time, 50.0);
        assert_eq!(s.throughput_per_hour, 4.0);
        assert_eq!(s.avg_queue_length, 1.5);
        assert_eq!(s.max_queue_length, 2);
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        let mut m = collector(300.0);
        let mut obs = tick(0, 0, 0, 0);
        obs.completed.push(flight(0, MovementType::Departure, 0, 0, 1.0 / 3.0));
        m.record(&obs);
        let s = m.summarize(3600.0).summary;
        assert_eq!(s.avg_wait_time, 0.33);
        assert_eq!(s.avg_taxi_time, 0.67);
    }
}

#[cfg(test)]
mod plots {
    use gs_core::MovementType;

    use super::helpers::{collector, flight, tick};
    use crate::{MetricsCollector, PlotKind};
    use crate::collector::MAX_PLOT_POINTS;

    fn with_flights(waits_and_durations: &[(f64, u64)]) -> MetricsCollector {
        let mut m = collector(300.0);
        let mut obs = tick(0, 0, 0, 0);
        for (i, &(wait, ticks)) in waits_and_durations.iter().enumerate() {
            obs.completed.push(flight(i as u32, MovementType::Departure, 0, ticks - 1, wait));
        }
        m.record(&obs);
        m
    }

    #[test]
    fn line_plots_track_live_counts() {
        let mut m = collector(300.0);
        m.record(&tick(0, 2, 1, 0));
        m.record(&tick(1, 1, 1, 1));
        let doc = m.summarize(2.0);

        let total = doc.plot("aircraft_count").unwrap();
        assert_eq!(total.kind, PlotKind::Line);
        assert_eq!(total.x, vec![0.0, 1.0]);
        assert_eq!(total.y, vec![3.0, 2.0]);
        assert_eq!(doc.plot("departures_on_ground").unwrap().y, vec![2.0, 1.0]);
        assert_eq!(doc.plot("arrivals_on_ground").unwrap().y, vec![1.0, 1.0]);
        assert_eq!(doc.plot("queue_length").unwrap().y, vec![0.0, 1.0]);
        assert!(doc.plot("runways_occupied").is_some());
    }

    #[test]
    fn long_series_are_downsampled() {
        let mut m = collector(300.0);
        for t in 0..1201 {
            m.record(&tick(t, 1, 0, 0));
        }
        let line = m.summarize(1201.0).plot("aircraft_count").cloned().unwrap();
        // step = ceil(1201 / 500) = 3
        assert!(line.x.len() <= MAX_PLOT_POINTS);
        assert_eq!(line.x.len(), 401);
        assert_eq!(&line.x[..3], &[0.0, 3.0, 6.0]);
    }

    #[test]
    fn taxi_histogram_includes_maximum_in_last_bin() {
        // taxi times 10, 20, 30
        let m = with_flights(&[(0.0, 10), (0.0, 20), (0.0, 30)]);
        let hist = m.summarize(3600.0).plot("taxi_time_dist").cloned().unwrap();
        assert_eq!(hist.kind, PlotKind::Histogram);
        assert_eq!(hist.x.len(), 3);
        assert_eq!(hist.y, vec![1.0, 1.0, 1.0]);
        assert_eq!(hist.y.iter().sum::<f64>(), 3.0);
    }

    #[test]
    fn taxi_histogram_single_bin_when_all_equal() {
        let m = with_flights(&[(0.0, 40), (10.0, 50), (20.0, 60)]);
        let hist = m.summarize(3600.0).plot("taxi_time_dist").cloned().unwrap();
        assert_eq!(hist.x, vec![40.0]);
        assert_eq!(hist.y, vec![3.0]);
    }

    #[test]
    fn taxi_histogram_caps_bin_count() {
        let flights: Vec<(f64, u64)> = (1..=50).map(|d| (0.0, d)).collect();
        let m = with_flights(&flights);
        let hist = m.summarize(3600.0).plot("taxi_time_dist").cloned().unwrap();
        assert_eq!(hist.x.len(), 20);
        assert_eq!(hist.y.iter().sum::<f64>(), 50.0);
    }

    #[test]
    fn throughput_windows_include_empty_ones() {
        let mut m = collector(100.0);
        let mut obs = tick(0, 0, 0, 0);
        obs.completed.push(flight(0, MovementType::Departure, 0, 50, 0.0));
        obs.completed.push(flight(1, MovementType::Arrival, 0, 99, 0.0));
        obs.completed.push(flight(2, MovementType::Arrival, 0, 250, 0.0));
        m.record(&obs);
        let hist = m.summarize(300.0).plot("throughput").cloned().unwrap();
        assert_eq!(hist.x, vec![0.0, 100.0, 200.0]);
        assert_eq!(hist.y, vec![2.0, 0.0, 1.0]);
    }
}

#[cfg(test)]
mod document {
    use gs_core::MovementType;

    use super::helpers::{collector, flight, tick};
    use crate::ResultsDocument;

    #[test]
    fn flights_are_capped_and_named() {
        let mut m = collector(300.0);
        let mut obs = tick(0, 0, 0, 0);
        for i in 0..120 {
            obs.completed.push(flight(i, MovementType::Arrival, 0, 9, 0.0));
        }
        m.record(&obs);
        let doc = m.summarize(3600.0);
        assert_eq!(doc.flights.len(), ResultsDocument::MAX_FLIGHTS);
        assert_eq!(doc.summary.total_flights, 120);
        let row = &doc.flights[0];
        assert_eq!(row.gate, "G1");
        assert_eq!(row.movement, "arrival");
        assert_eq!(row.size, "medium");
        assert_eq!(row.completion_time, 10.0);
    }

    #[test]
    fn json_uses_document_field_names() {
        let mut m = collector(300.0);
        let mut obs = tick(0, 1, 0, 0);
        obs.completed.push(flight(0, MovementType::Departure, 0, 9, 0.0));
        m.record(&obs);
        let doc = m.summarize(10.0);
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"type\": \"line\""));
        assert!(json.contains("\"type\": \"histogram\""));
        assert!(json.contains("\"class\": \"medium\""));
        assert_eq!(ResultsDocument::from_json(&json).unwrap(), doc);
    }
}

#[cfg(test)]
mod export {
    use gs_core::MovementType;

    use super::helpers::{collector, flight, tick};

    #[test]
    fn flights_csv_has_header_and_every_flight() {
        let mut m = collector(300.0);
        let mut obs = tick(0, 0, 0, 0);
        obs.completed.push(flight(3, MovementType::Departure, 0, 199, 12.5));
        m.record(&obs);

        let mut buf = Vec::new();
        m.write_flights_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,type,class,gate,"));
        assert_eq!(lines[1], "3,departure,medium,G1,0,200,200,187.5,12.5,1100,0");
    }

    #[test]
    fn time_series_csv_has_one_row_per_tick() {
        let mut m = collector(300.0);
        m.record(&tick(0, 1, 2, 3));
        m.record(&tick(1, 0, 0, 0));

        let mut buf = Vec::new();
        m.write_time_series_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "time_secs,aircraft,departures,arrivals,queued,runways_occupied",
            "0,3,1,2,3,0",
            "1,0,0,0,0,0",
        ]);
    }
}
