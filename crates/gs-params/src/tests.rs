//! Unit tests for gs-params.

#[cfg(test)]
mod defaults {
    use gs_core::{Area, SizeClass, Weather};

    use crate::{Parameters, PriorityMode, TrafficMode};

    #[test]
    fn documented_defaults() {
        let p = Parameters::default();
        assert_eq!(p.version, 0);
        assert_eq!(p.traffic.mode, TrafficMode::Mixed);
        assert_eq!(p.movement.base_speed.get(SizeClass::Medium), 6.0);
        assert_eq!(p.movement.section.get(Area::Apron), 0.5);
        assert_eq!(p.movement.weather.get(Weather::Bad), 0.7);
        assert_eq!(p.movement.acceleration, 2.0);
        assert_eq!(p.separation.base.get(Area::Runway), 100.0);
        assert_eq!(p.priority.hold_release, PriorityMode::Fifo);
        assert_eq!(p.run.time_step_secs, 1.0);
        assert_eq!(p.run.duration_secs, 3600.0);
        assert_eq!(p.run.seed, 42);
        assert_eq!(p.total_ticks(), 3600);
        assert!(p.validate().is_ok());
    }
}

#[cfg(test)]
mod document {
    use serde_json::json;

    use gs_core::Weather;

    use crate::{NumericParam, Parameters, ParamsError, PriorityMode, TrafficMode, WeatherParam};

    #[test]
    fn flat_keys_apply() {
        let p = Parameters::from_document(&json!({
            "traffic.mode": "departures_only",
            "traffic.departure_rate": 120,
            "environment.weather": "bad",
            "priority.hold_release": "size_priority",
            "access.closed_edges": ["T1", "T2"],
            "run.seed": 7,
            "run.duration": 201
        }))
        .unwrap();
        assert_eq!(p.traffic.mode, TrafficMode::DeparturesOnly);
        assert_eq!(p.traffic.departure_rate, NumericParam::fixed(120.0));
        assert_eq!(p.environment.weather, WeatherParam::Fixed { value: Weather::Bad });
        assert_eq!(p.priority.hold_release, PriorityMode::SizePriority);
        assert!(p.is_edge_closed("T2"));
        assert_eq!(p.run.seed, 7);
        assert_eq!(p.total_ticks(), 201);
    }

    #[test]
    fn nested_categories_flatten() {
        let p = Parameters::from_document(&json!({
            "traffic": {
                "arrival_mix": { "small": 1, "medium": 0, "large": 0 },
                "arrival_rate": { "mode": "random", "min": 10, "max": 20 }
            },
            "capacity": { "apron": { "north": 2 } }
        }))
        .unwrap();
        assert_eq!(p.traffic.arrival_mix.small, 1.0);
        assert_eq!(p.traffic.arrival_mix.large, 0.0);
        assert_eq!(p.traffic.arrival_rate, NumericParam::Uniform { min: 10.0, max: 20.0 });
        assert_eq!(p.capacity.apron_limits.get("north"), Some(&2));
    }

    #[test]
    fn unknown_keys_ignored_missing_keep_defaults() {
        let p = Parameters::from_document(&json!({ "traffic.colour": "blue" })).unwrap();
        assert_eq!(p, Parameters::default());
    }

    #[test]
    fn out_of_range_values_clamped() {
        let p = Parameters::from_document(&json!({
            "run.time_step": 0.0,
            "movement.noise": 1e9,
            "movement.acceleration": 0,
            "traffic.departure_rate": { "mode": "random", "min": -5, "max": 99999 }
        }))
        .unwrap();
        assert_eq!(p.run.time_step_secs, 0.01);
        assert_eq!(p.movement.noise, 50.0);
        assert_eq!(p.movement.acceleration, 0.01);
        assert_eq!(p.traffic.departure_rate, NumericParam::Uniform { min: 0.0, max: 3600.0 });
    }

    #[test]
    fn wrong_types_rejected() {
        let err = Parameters::from_document(&json!({ "run.duration": "long" })).unwrap_err();
        assert!(matches!(err, ParamsError::Invalid { ref key, .. } if key == "run.duration"));
        let err = Parameters::from_document(&json!({ "priority.runway": "loudest" })).unwrap_err();
        assert!(matches!(err, ParamsError::Invalid { .. }));
        let err = Parameters::from_document(&json!({ "access.closed_edges": "T1" })).unwrap_err();
        assert!(matches!(err, ParamsError::Invalid { .. }));
        assert!(matches!(Parameters::from_json("[1, 2]"), Err(ParamsError::Malformed(_))));
    }

    #[test]
    fn inconsistent_separation_weather_rejected() {
        let err = Parameters::from_document(&json!({
            "separation.weather.good": 1.5,
            "separation.weather.bad": 1.5
        }))
        .unwrap_err();
        assert!(matches!(err, ParamsError::Inconsistent(_)));
    }

    #[test]
    fn zero_mix_rejected() {
        let err = Parameters::from_document(&json!({
            "traffic.departure_mix": { "small": 0, "medium": 0, "large": 0 }
        }))
        .unwrap_err();
        assert!(matches!(err, ParamsError::Inconsistent(_)));
    }

    #[test]
    fn update_bumps_version_and_keeps_rest() {
        let base = Parameters::from_document(&json!({ "run.seed": 9 })).unwrap();
        let next = base.updated(&json!({ "environment.weather": "mild" })).unwrap();
        assert_eq!(next.version, 1);
        assert_eq!(next.run.seed, 9);
        assert!(!next.touches_access(&base));
        let closed = next.updated(&json!({ "access.closed_edges": ["T1"] })).unwrap();
        assert_eq!(closed.version, 2);
        assert!(closed.touches_access(&next));
    }

    #[test]
    fn apron_limit_null_removes() {
        let base = Parameters::from_document(&json!({ "capacity.apron.south": 3 })).unwrap();
        let next = base.updated(&json!({ "capacity.apron.south": null })).unwrap();
        assert!(next.capacity.apron_limits.is_empty());
    }
}

#[cfg(test)]
mod sampling {
    use gs_core::{SimRng, Weather};

    use crate::value::{WeatherWeights, triangular};
    use crate::{NumericParam, Parameters, Sample, TrafficMode, WeatherParam};

    #[test]
    fn fixed_is_constant() {
        let mut rng = SimRng::new(1);
        assert_eq!(NumericParam::fixed(3.5).sample(&mut rng), 3.5);
    }

    #[test]
    fn uniform_within_bounds() {
        let mut rng = SimRng::new(2);
        let p = NumericParam::Uniform { min: 10.0, max: 20.0 };
        for _ in 0..500 {
            let x = p.sample(&mut rng);
            assert!((10.0..=20.0).contains(&x));
        }
    }

    #[test]
    fn triangular_inverse_cdf() {
        assert_eq!(triangular(0.0, 5.0, 10.0, 0.0), 0.0);
        assert!((triangular(0.0, 5.0, 10.0, 0.5) - 5.0).abs() < 1e-9);
        assert!((triangular(0.0, 5.0, 10.0, 1.0) - 10.0).abs() < 1e-9);
        assert_eq!(triangular(4.0, 4.0, 4.0, 0.3), 4.0);
    }

    #[test]
    fn realistic_within_bounds() {
        let mut rng = SimRng::new(3);
        let p = NumericParam::Realistic { min: 100.0, peak: 180.0, max: 260.0 };
        for _ in 0..500 {
            let x = p.sample(&mut rng);
            assert!((100.0..=260.0).contains(&x));
        }
    }

    #[test]
    fn weighted_weather_honors_zero_weights() {
        let mut rng = SimRng::new(4);
        let p = WeatherParam::Weighted { weights: WeatherWeights { good: 0.0, mild: 0.0, bad: 1.0 } };
        for _ in 0..100 {
            assert_eq!(p.sample(&mut rng), Weather::Bad);
        }
        let c = WeatherParam::Choice { choices: vec![Weather::Mild] };
        assert_eq!(c.sample(&mut rng), Weather::Mild);
    }

    #[test]
    fn environment_respects_traffic_mode() {
        let mut p = Parameters::default();
        p.traffic.mode = TrafficMode::ArrivalsOnly;
        let env = p.sample_environment(&mut SimRng::new(5));
        assert_eq!(env.departure_rate_per_hour, 0.0);
        assert_eq!(env.arrival_rate_per_hour, 18.0);
        assert_eq!(env.wind_direction_deg, 180.0);
    }

    #[test]
    fn environment_stream_is_reproducible() {
        let mut p = Parameters::default();
        p.environment.wind_direction = NumericParam::Uniform { min: 0.0, max: 360.0 };
        let a: Vec<f64> = {
            let mut rng = SimRng::new(11);
            (0..20).map(|_| p.sample_environment(&mut rng).wind_direction_deg).collect()
        };
        let b: Vec<f64> = {
            let mut rng = SimRng::new(11);
            (0..20).map(|_| p.sample_environment(&mut rng).wind_direction_deg).collect()
        };
        assert_eq!(a, b);
    }
}
