mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_disc_composer::color::{Color, Hsv, Palette};
    use myrtio_disc_composer::light::LightSlot;
    use myrtio_disc_composer::ring::{Disc, LED_COUNT, LedAddress, PolarCoord, polar_to_index};
    use myrtio_disc_composer::scene::{
        BootScene, ConnectingScene, LightScene, OperatingState, PlaceholderScene, Scene,
        SceneSlot, SceneStore,
    };

    fn lit_count(disc: &Disc) -> usize {
        let mut output = [Color::BLACK; LED_COUNT];
        disc.composite_to_output(&mut output);
        output.iter().filter(|c| c.is_lit()).count()
    }

    #[test]
    fn test_state_ids_roundtrip() {
        for (id, state) in OperatingState::ALL.iter().enumerate() {
            assert_eq!(state.as_raw() as usize, id);
            assert_eq!(OperatingState::from_raw(state.as_raw()), Some(*state));
            assert_eq!(OperatingState::parse_from_str(state.as_str()), Some(*state));
        }
        assert_eq!(OperatingState::from_raw(9), None);
        assert_eq!(OperatingState::from_raw(u8::MAX), None);
        assert_eq!(OperatingState::parse_from_str("unknown"), None);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(OperatingState::RespondToUser.as_str(), "respond_to_user");
        assert_eq!(
            OperatingState::parse_from_str("placeholder_transition"),
            Some(OperatingState::PlaceholderTransition)
        );
        assert_eq!(OperatingState::default(), OperatingState::Dormant);
    }

    #[test]
    fn test_store_creates_scenes_lazily() {
        let mut store = SceneStore::new();
        let now = Instant::from_millis(0);
        assert!(!store.contains(OperatingState::Error));

        store.get_or_create(OperatingState::Error, now);
        assert!(store.contains(OperatingState::Error));
        assert!(!store.contains(OperatingState::Dormant));
        assert!(store.get(OperatingState::Connecting).is_none());
        assert!(matches!(
            store.get_or_create(OperatingState::Connecting, now),
            SceneSlot::Connecting(_)
        ));
    }

    #[test]
    fn test_every_state_renders_something() {
        let mut store = SceneStore::new();
        let start = Instant::from_millis(0);
        let later = Instant::from_millis(3_000);
        for state in OperatingState::ALL {
            let mut disc = Disc::new();
            store.get_or_create(state, start).render(start, &mut disc);
            disc.clear_all(Color::BLACK);
            store.get_or_create(state, start).render(later, &mut disc);
            assert!(lit_count(&disc) > 0, "{} is dark", state.as_str());
        }
    }

    #[test]
    fn test_palette_aware_scene_fades_to_palette() {
        let start = Instant::from_millis(0);
        let mut scene = LightScene::respond_to_user(start);
        assert!(scene.is_palette_aware());

        let palette = Palette::uniform(Hsv {
            hue: 85,
            sat: 255,
            val: 255,
        });
        scene.apply_palette(&palette, Duration::from_millis(1200), start);
        scene.render(Instant::from_millis(1300), &mut Disc::new());

        for light in scene.lights() {
            if let LightSlot::Orb(orb) = light {
                assert_eq!(orb.color(), palette.color(0));
            }
        }
    }

    #[test]
    fn test_glow_scene_ignores_palette() {
        let start = Instant::from_millis(0);
        let mut scene = LightScene::error(start);
        let before = scene.palette();
        scene.apply_palette(
            &Palette::from_colors([Color::new(0, 0, 255); 3]),
            Duration::from_ticks(0),
            start,
        );
        assert_eq!(scene.palette(), before);
    }

    #[test]
    fn test_connecting_builds_up_then_holds() {
        let start = Instant::from_millis(0);
        let scene = ConnectingScene::new(start);
        assert_eq!(scene.elements_shown(start), 1);
        assert_eq!(scene.elements_shown(Instant::from_millis(599)), 1);
        assert_eq!(scene.elements_shown(Instant::from_millis(600)), 2);
        assert_eq!(scene.elements_shown(Instant::from_millis(1800)), 4);
        assert_eq!(scene.elements_shown(Instant::from_millis(60_000)), 4);
        assert_eq!(scene.element_level(1, Instant::from_millis(300)), 0.0);
        assert_eq!(scene.element_level(0, Instant::from_millis(600)), 1.0);
    }

    #[test]
    fn test_connecting_points_up() {
        let start = Instant::from_millis(0);
        let mut scene = ConnectingScene::new(start);
        let mut disc = Disc::new();
        scene.render(Instant::from_millis(5_000), &mut disc);

        let top = polar_to_index(PolarCoord::from_degrees(270.0, 4.0)).unwrap();
        let bottom = polar_to_index(PolarCoord::from_degrees(90.0, 4.0)).unwrap();
        assert!(disc.get(top).unwrap().is_lit());
        assert!(!disc.get(bottom).unwrap().is_lit());
        assert!(disc.get(LedAddress { ring: 0, slot: 0 }).unwrap().is_lit());
        assert!(!disc.ring(1).unwrap().leds().iter().any(|c| c.is_lit()));
    }

    #[test]
    fn test_connecting_direction() {
        let start = Instant::from_millis(0);
        let mut scene = ConnectingScene::new(start);
        scene.set_direction(0.0);
        let mut disc = Disc::new();
        scene.render(Instant::from_millis(5_000), &mut disc);

        let right = polar_to_index(PolarCoord::from_degrees(0.0, 3.0)).unwrap();
        let left = polar_to_index(PolarCoord::from_degrees(180.0, 3.0)).unwrap();
        assert!(disc.get(right).unwrap().is_lit());
        assert!(!disc.get(left).unwrap().is_lit());
    }

    #[test]
    fn test_boot_lights_rings_outward() {
        let start = Instant::from_millis(0);
        let scene = BootScene::new(start);
        let at = Instant::from_millis(600);
        assert_eq!(scene.ring_level(0, at), 1.0);
        assert_eq!(scene.ring_level(1, at), 1.0);
        assert!(scene.ring_level(2, at) > 0.0 && scene.ring_level(2, at) < 1.0);
        assert_eq!(scene.ring_level(3, at), 0.0);
        assert!(!scene.is_complete(at));
        assert!(scene.is_complete(Instant::from_millis(1250)));
    }

    #[test]
    fn test_placeholder_recolors_through_fusion() {
        let start = Instant::from_millis(0);
        let tint = Color::new(255, 0, 0);
        let mut scene = PlaceholderScene::new(tint, start)
            .with_recolor_duration(Duration::from_millis(1000));
        scene.render(start, &mut Disc::new());

        let target = Color::new(0, 0, 255);
        scene.set_parameter(target, Instant::from_millis(100));
        assert!(scene.is_recoloring());
        assert_eq!(scene.tint(), target);

        let mut disc = Disc::new();
        scene.render(Instant::from_millis(300), &mut disc);
        assert!(scene.is_recoloring());
        assert!(lit_count(&disc) > 0);

        scene.render(Instant::from_millis(1100), &mut Disc::new());
        assert!(!scene.is_recoloring());
        for orb in scene.orbs() {
            assert_eq!(orb.color(), target);
            assert_eq!(orb.intensity(), 1.0);
        }
    }

    #[test]
    fn test_placeholder_same_tint_is_noop() {
        let start = Instant::from_millis(0);
        let mut scene = PlaceholderScene::new(Color::new(20, 245, 255), start);
        scene.set_parameter(Color::new(20, 245, 255), start);
        assert!(!scene.is_recoloring());
    }

    #[test]
    fn test_store_forwards_parameter() {
        let mut store = SceneStore::new();
        let now = Instant::from_millis(0);
        let tint = Color::new(255, 100, 0);
        store.set_parameter(tint, now);
        assert_eq!(store.tint(), tint);

        match store.get_or_create(OperatingState::PlaceholderTransition, now) {
            SceneSlot::Placeholder(scene) => assert_eq!(scene.tint(), tint),
            _ => panic!("wrong scene kind"),
        }
    }
}
