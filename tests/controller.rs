mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration as StdDuration;

    use myrtio_disc_composer::color::Color;
    use myrtio_disc_composer::controller::{ControllerConfig, LedController};
    use myrtio_disc_composer::error::Error;
    use myrtio_disc_composer::protocol::decode_frame;
    use myrtio_disc_composer::scene::OperatingState;
    use myrtio_disc_composer::{Transport, WS2812_SPEED_HZ};

    struct BrokenTransport;

    impl Transport for BrokenTransport {
        type Error = &'static str;

        fn open(&mut self, _speed_hz: u32) -> Result<(), Self::Error> {
            Err("no such device")
        }

        fn transfer(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct SharedTransport {
        opened_at: Arc<Mutex<Option<u32>>>,
        frames: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl Transport for SharedTransport {
        type Error = &'static str;

        fn open(&mut self, speed_hz: u32) -> Result<(), Self::Error> {
            *self.opened_at.lock().unwrap() = Some(speed_hz);
            Ok(())
        }

        fn transfer(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.frames.lock().unwrap().push(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_open_failure_is_reported() {
        let result = LedController::start(BrokenTransport, &ControllerConfig::default());
        match result {
            Err(Error::TransportOpen { speed_hz, reason }) => {
                assert_eq!(speed_hz, WS2812_SPEED_HZ);
                assert_eq!(reason, "no such device");
            }
            _ => panic!("expected transport open error"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.speed_hz, 2_500_000);
        assert_eq!(config.renderer.initial_state, OperatingState::Dormant);
    }

    #[test]
    fn test_renders_until_shutdown_then_blanks() {
        let transport = SharedTransport::default();
        let mut controller =
            LedController::start(transport.clone(), &ControllerConfig::default()).unwrap();
        assert_eq!(*transport.opened_at.lock().unwrap(), Some(WS2812_SPEED_HZ));
        assert!(controller.is_running());

        let handle = controller.handle();
        handle.request_state(OperatingState::Error, None);
        controller.set_parameter(Color::new(255, 0, 0));
        std::thread::sleep(StdDuration::from_millis(100));

        controller.shutdown();
        assert!(!controller.is_running());

        let frames = transport.frames.lock().unwrap();
        assert!(frames.len() >= 2);
        let last = decode_frame(frames.last().unwrap()).unwrap();
        assert!(last.iter().all(|c| *c == Color::BLACK));
    }
}
