mod tests {
    use std::collections::HashSet;

    use myrtio_disc_composer::color::Color;
    use myrtio_disc_composer::ring::{
        Disc, LED_COUNT, LedAddress, Lut, PolarCoord, RING_BRIGHTNESS, RING_COUNT, RING_SIZES,
        polar_to_index, ring_bounds,
    };

    #[test]
    fn test_led_count() {
        assert_eq!(LED_COUNT, 61);
        assert_eq!(RING_SIZES.iter().sum::<usize>(), LED_COUNT);
    }

    #[test]
    fn test_ring_slices_partition_output() {
        let mut seen = HashSet::new();
        for ring in 0..RING_COUNT {
            let bounds = ring_bounds(ring);
            assert_eq!(bounds.len(), RING_SIZES[ring]);
            for index in bounds {
                assert!(index < LED_COUNT);
                assert!(seen.insert(index), "index {index} owned twice");
            }
        }
        assert_eq!(seen.len(), LED_COUNT);
    }

    #[test]
    fn test_outer_ring_is_wired_first() {
        assert_eq!(ring_bounds(4), 0..24);
        assert_eq!(ring_bounds(3), 24..40);
        assert_eq!(ring_bounds(2), 40..52);
        assert_eq!(ring_bounds(1), 52..60);
        assert_eq!(ring_bounds(0), 60..61);
        assert_eq!(ring_bounds(5), 0..0);
    }

    #[test]
    fn test_polar_to_index_center() {
        let center = Some(LedAddress { ring: 0, slot: 0 });
        assert_eq!(polar_to_index(PolarCoord::new(1.3, 0.0)), center);
        assert_eq!(polar_to_index(PolarCoord::new(4.0, 0.49)), center);
        assert_eq!(polar_to_index(PolarCoord::new(0.0, -0.2)), center);
    }

    #[test]
    fn test_polar_to_index_rejects_outside() {
        assert_eq!(polar_to_index(PolarCoord::new(0.0, 4.01)), None);
        assert_eq!(polar_to_index(PolarCoord::new(0.0, -5.0)), None);
        assert_eq!(polar_to_index(PolarCoord::new(0.0, f32::NAN)), None);
        assert_eq!(polar_to_index(PolarCoord::new(f32::INFINITY, 2.0)), None);
    }

    #[test]
    fn test_polar_to_index_rounds_angle() {
        // Ring 2 has 12 LEDs, 30 degrees apart
        assert_eq!(
            polar_to_index(PolarCoord::from_degrees(44.0, 2.0)),
            Some(LedAddress { ring: 2, slot: 1 })
        );
        assert_eq!(
            polar_to_index(PolarCoord::from_degrees(355.0, 2.2)),
            Some(LedAddress { ring: 2, slot: 0 })
        );
    }

    #[test]
    fn test_lut_roundtrip_is_injective() {
        let lut = Lut::new();
        let mut seen = HashSet::new();
        for index in 0..LED_COUNT {
            let coord = lut.coord(index).unwrap();
            let address = polar_to_index(coord).unwrap();
            assert_eq!(address, lut.address(index).unwrap());
            assert_eq!(address.physical_index(), index);
            assert_eq!(polar_to_index(coord), Some(address));
            assert!(seen.insert(address));
        }
        assert_eq!(lut.coord(LED_COUNT), None);
    }

    #[test]
    fn test_led_address_bounds() {
        assert!(LedAddress::new(0, 0).is_some());
        assert!(LedAddress::new(0, 1).is_none());
        assert!(LedAddress::new(4, 23).is_some());
        assert!(LedAddress::new(5, 0).is_none());
        assert_eq!(LedAddress { ring: 9, slot: 0 }.physical_index(), usize::MAX);
    }

    #[test]
    fn test_clear_all_black_gives_zero_frame() {
        let mut disc = Disc::new();
        disc.clear_all(Color::new(40, 50, 60));
        disc.clear_all(Color::BLACK);
        let mut output = [Color::WHITE; LED_COUNT];
        disc.composite_to_output(&mut output);
        assert!(output.iter().all(|color| *color == Color::BLACK));
    }

    #[test]
    fn test_set_led_adds_and_black_overwrites() {
        let mut disc = Disc::new();
        let coord = PolarCoord::from_degrees(90.0, 1.0);
        let address = polar_to_index(coord).unwrap();

        disc.set_led(coord, Color::new(200, 10, 0));
        disc.set_led(coord, Color::new(100, 10, 0));
        assert_eq!(disc.get(address), Some(Color::new(255, 20, 0)));

        disc.set_led(coord, Color::BLACK);
        assert_eq!(disc.get(address), Some(Color::BLACK));
    }

    #[test]
    fn test_set_led_outside_is_dropped() {
        let mut disc = Disc::new();
        disc.set_led(PolarCoord::new(0.0, 7.0), Color::WHITE);
        disc.set_led(PolarCoord::new(f32::NAN, 1.0), Color::WHITE);
        let mut output = [Color::BLACK; LED_COUNT];
        disc.composite_to_output(&mut output);
        assert!(output.iter().all(|color| !color.is_lit()));
    }

    #[test]
    fn test_composite_applies_ring_correction() {
        let mut disc = Disc::new();
        disc.clear_all(Color::new(100, 100, 100));
        let mut output = [Color::BLACK; LED_COUNT];
        disc.composite_to_output(&mut output);

        for ring in 0..RING_COUNT {
            let expected = Color::new(100, 100, 100) * RING_BRIGHTNESS[ring];
            for index in ring_bounds(ring) {
                assert_eq!(output[index], expected);
            }
        }
        // Outer ring dimmed, ring 3 boosted
        assert_eq!(output[0], Color::new(37, 37, 37));
        assert!(output[24].r > 160);
    }

    #[test]
    fn test_clear_ring() {
        let mut disc = Disc::new();
        disc.clear_ring(2, Color::new(1, 2, 3));
        disc.clear_ring(7, Color::WHITE);
        assert!(disc.ring(2).unwrap().leds().iter().all(|c| *c == Color::new(1, 2, 3)));
        assert!(disc.ring(1).unwrap().leds().iter().all(|c| !c.is_lit()));
    }
}
