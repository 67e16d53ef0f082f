//! Unit tests for gs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AircraftId, EdgeId, NodeId};

    #[test]
    fn index_matches_inner_value() {
        assert_eq!(AircraftId(42).index(), 42);
        assert_eq!(NodeId(0).index(), 0);
    }

    #[test]
    fn ordering() {
        assert!(AircraftId(0) < AircraftId(1));
        assert!(NodeId(100) > NodeId(99));
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AircraftId(7).to_string(), "AC7");
        assert_eq!(NodeId(3).to_string(), "N3");
        assert_eq!(EdgeId(12).to_string(), "E12");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Point2, heading_difference, polyline_length};

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point2::new(0.0, 0.0).distance(Point2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn bearings_follow_compass() {
        let o = Point2::new(0.0, 0.0);
        assert!((o.bearing_to(Point2::new(0.0, 10.0)) - 0.0).abs() < 1e-9);
        assert!((o.bearing_to(Point2::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_to(Point2::new(0.0, -10.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_to(Point2::new(-10.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn heading_difference_wraps() {
        assert_eq!(heading_difference(350.0, 10.0), 20.0);
        assert_eq!(heading_difference(10.0, 350.0), 20.0);
        assert_eq!(heading_difference(90.0, 270.0), 180.0);
        assert_eq!(heading_difference(45.0, 45.0), 0.0);
    }

    #[test]
    fn polyline_sums_segments() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(3.0, 4.0), Point2::new(3.0, 10.0)];
        assert_eq!(polyline_length(&pts), 11.0);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }
}

#[cfg(test)]
mod kinds {
    use crate::{CoreError, MovementType, SizeClass, Weather};

    #[test]
    fn size_order_and_fit() {
        assert!(SizeClass::Small < SizeClass::Medium);
        assert!(SizeClass::Medium < SizeClass::Large);
        assert!(SizeClass::Small.fits(SizeClass::Small));
        assert!(!SizeClass::Large.fits(SizeClass::Medium));
        assert_eq!(SizeClass::Large.rank(), 2);
    }

    #[test]
    fn parse_and_print() {
        assert_eq!("bad".parse::<Weather>().unwrap(), Weather::Bad);
        assert_eq!(MovementType::Departure.to_string(), "departure");
        assert!(matches!(
            "huge".parse::<SizeClass>(),
            Err(CoreError::UnknownName { kind: "size class", .. })
        ));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(5)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 1.5);
        assert_eq!(clock.ticks_for_secs(600.0), 1200);
        assert_eq!(clock.ticks_for_secs(0.2), 1);
        assert_eq!(clock.ticks_for_secs(0.0), 0);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(61.0);
        clock.advance();
        assert_eq!(clock.to_string(), "T1 (00:01:01)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{AircraftId, AircraftRng, SimRng};

    #[test]
    fn aircraft_rng_deterministic() {
        let mut a = AircraftRng::new(42, AircraftId(3));
        let mut b = AircraftRng::new(42, AircraftId(3));
        for _ in 0..16 {
            assert_eq!(a.symmetric(1.0), b.symmetric(1.0));
        }
    }

    #[test]
    fn symmetric_is_bounded_and_zero_without_amplitude() {
        let mut r = AircraftRng::new(7, AircraftId(0));
        for _ in 0..1000 {
            let v = r.symmetric(0.5);
            assert!((-0.5..=0.5).contains(&v));
        }
        assert_eq!(r.symmetric(0.0), 0.0);
    }

    #[test]
    fn streams_are_independent_of_each_other() {
        let mut a = SimRng::stream(42, 1);
        let mut b = SimRng::stream(42, 1);
        let mut c = SimRng::stream(42, 2);
        let x: u64 = a.random();
        assert_eq!(x, b.random::<u64>());
        assert_ne!(x, c.random::<u64>());
    }

    #[test]
    fn choose_weighted_respects_zero_weights() {
        let mut r = SimRng::new(1);
        for _ in 0..200 {
            assert_eq!(r.choose_weighted(&[0.0, 1.0, 0.0]), Some(1));
        }
        assert_eq!(r.choose_weighted(&[0.0, 0.0]), None);
        assert_eq!(r.choose_weighted(&[]), None);
    }
}
