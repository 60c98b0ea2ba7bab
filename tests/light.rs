mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_disc_composer::color::Color;
    use myrtio_disc_composer::light::{
        Glow, LightKind, LightSlot, LightSource, MotionProfile, Orb, SpeedPhase, orb_distance,
    };
    use myrtio_disc_composer::ring::{Disc, LED_COUNT, PolarCoord, polar_to_index};

    #[test]
    fn test_orb_distance_uses_mean_radius() {
        let a = PolarCoord::from_degrees(0.0, 2.0);
        let b = PolarCoord::from_degrees(90.0, 2.0);
        let expected = core::f32::consts::FRAC_PI_2 * 2.0;
        assert!((orb_distance(a, b) - expected).abs() < 1e-4);
        assert!((orb_distance(a, b) - orb_distance(b, a)).abs() < 1e-6);
        assert_eq!(orb_distance(a, a), 0.0);
    }

    #[test]
    fn test_orb_contribution_peaks_at_origin() {
        let origin = PolarCoord::from_degrees(45.0, 3.0);
        let orb = Orb::new(origin, Color::new(200, 100, 0), Instant::from_millis(0));
        assert_eq!(orb.contribution(origin), Color::new(200, 100, 0));

        let near = orb.contribution(PolarCoord::from_degrees(60.0, 3.0));
        let far = orb.contribution(PolarCoord::from_degrees(225.0, 3.0));
        assert!(near.r < 200 && near.r > far.r);
    }

    #[test]
    fn test_orb_render_is_additive() {
        let origin = PolarCoord::from_degrees(0.0, 2.0);
        let orb = Orb::new(origin, Color::new(160, 0, 0), Instant::from_millis(0));
        let mut disc = Disc::new();
        orb.render(&mut disc);
        orb.render(&mut disc);

        let address = polar_to_index(origin).unwrap();
        assert_eq!(disc.get(address), Some(Color::new(255, 0, 0)));
    }

    #[test]
    fn test_orb_skips_close_updates() {
        let start = Instant::from_millis(0);
        let mut orb = Orb::new(PolarCoord::from_degrees(0.0, 3.0), Color::WHITE, start)
            .with_motion(MotionProfile::SPIN);
        orb.update(Instant::from_micros(1_500));
        assert_eq!(orb.origin().theta, 0.0);

        orb.update(Instant::from_millis(100));
        assert!(orb.origin().theta > 0.0);
    }

    #[test]
    fn test_orb_speed_cycle_flips_direction() {
        let start = Instant::from_millis(0);
        let mut orb = Orb::new(PolarCoord::from_degrees(0.0, 3.0), Color::WHITE, start)
            .with_motion(MotionProfile::DRIFT);
        assert_eq!(orb.direction(), 1.0);

        orb.update(Instant::from_millis(2_500));
        assert_eq!(orb.phase(), SpeedPhase::Accelerate);
        assert!(orb.speed() > MotionProfile::DRIFT.min_speed);

        orb.update(Instant::from_millis(4_000));
        assert_eq!(orb.phase(), SpeedPhase::HoldFast);
        assert_eq!(orb.speed(), MotionProfile::DRIFT.max_speed);

        orb.update(Instant::from_millis(6_500));
        assert_eq!(orb.phase(), SpeedPhase::HoldSlow);
        assert_eq!(orb.direction(), -1.0);
        assert_eq!(orb.speed(), MotionProfile::DRIFT.min_speed);
    }

    #[test]
    fn test_orb_radius_stays_on_disc() {
        let start = Instant::from_millis(0);
        let mut orb = Orb::new(PolarCoord::from_degrees(0.0, 4.0), Color::WHITE, start)
            .with_motion(MotionProfile::DRIFT);
        for step in 1..200 {
            orb.update(Instant::from_millis(step * 50));
            assert!((0.0..=4.0).contains(&orb.origin().r));
        }
    }

    #[test]
    fn test_orb_color_fade() {
        let start = Instant::from_millis(0);
        let mut orb = Orb::new(PolarCoord::CENTER, Color::BLACK, start);
        orb.set_color(Color::new(100, 0, 0), Duration::from_millis(100), start);
        orb.update(Instant::from_millis(50));
        let midway = orb.color();
        assert!(midway.r > 0 && midway.r < 100);
        orb.update(Instant::from_millis(100));
        assert_eq!(orb.color(), Color::new(100, 0, 0));
    }

    #[test]
    fn test_glow_wave_travels_out_and_back() {
        let start = Instant::from_millis(0);
        let mut glow = Glow::new(Color::WHITE, Duration::from_millis(4_000), start);

        glow.update(start);
        assert_eq!(glow.wave_position(), 0.0);
        assert_eq!(glow.ring_level(0), 1.0);
        assert_eq!(glow.ring_level(2), 0.0);

        glow.update(Instant::from_millis(2_000));
        assert!((glow.wave_position() - 4.0).abs() < 1e-4);
        assert!((glow.ring_level(4) - 0.5).abs() < 1e-3);
        assert_eq!(glow.ring_level(1), 1.0);

        glow.update(Instant::from_millis(4_000));
        assert!(glow.wave_position() < 1e-3);
    }

    #[test]
    fn test_glow_wave_is_smooth_after_days_of_uptime() {
        const TEN_DAYS_MS: u64 = 10 * 24 * 60 * 60 * 1_000;
        let start = Instant::from_millis(0);
        let mut fresh = Glow::new(Color::WHITE, Duration::from_millis(1_000), start);
        let mut aged = Glow::new(Color::WHITE, Duration::from_millis(1_000), start);

        let mut previous = None;
        for frame in 0..10 {
            fresh.update(Instant::from_millis(frame * 16));
            aged.update(Instant::from_millis(TEN_DAYS_MS + frame * 16));
            let position = aged.wave_position();
            assert!((position - fresh.wave_position()).abs() < 1e-4);
            if let Some(previous) = previous {
                assert!(position > previous);
            }
            previous = Some(position);
        }
    }

    #[test]
    fn test_glow_floor_and_center() {
        let start = Instant::from_millis(0);
        let mut glow = Glow::new(Color::new(0, 0, 200), Duration::from_millis(1_000), start)
            .with_floor(0.25);
        glow.update(start);
        assert_eq!(glow.ring_level(3), 0.25);

        let mut disc = Disc::new();
        glow.render(&mut disc);
        let mut output = [Color::BLACK; LED_COUNT];
        disc.composite_to_output(&mut output);
        assert_eq!(output[LED_COUNT - 1], Color::new(0, 0, 200));
    }

    #[test]
    fn test_light_slot_accessors() {
        let start = Instant::from_millis(0);
        let orb: LightSlot = Orb::new(PolarCoord::CENTER, Color::WHITE, start).into();
        let glow: LightSlot = Glow::new(Color::WHITE, Duration::from_millis(1_000), start).into();

        assert_eq!(orb.kind(), LightKind::Orb);
        assert_eq!(glow.kind(), LightKind::Glow);
        assert!(orb.as_orb().is_some());
        assert!(orb.as_glow().is_none());
        assert!(glow.as_glow().is_some());
        assert_eq!(glow.origin(), PolarCoord::CENTER);
    }
}
