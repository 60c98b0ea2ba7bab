mod tests {
    use myrtio_disc_composer::color::Color;
    use myrtio_disc_composer::protocol::{
        BIT_HIGH, BIT_LOW, BYTES_PER_PIXEL, FRAME_BYTES, FrameEncoder, decode_color, decode_frame,
        encode_color,
    };
    use myrtio_disc_composer::ring::LED_COUNT;

    #[test]
    fn test_frame_size() {
        assert_eq!(BYTES_PER_PIXEL, 24);
        assert_eq!(FRAME_BYTES, 61 * 24);
    }

    #[test]
    fn test_encode_color_grb_msb_first() {
        let mut out = [0u8; BYTES_PER_PIXEL];
        encode_color(Color::new(0x00, 0x80, 0x01), &mut out);

        // Green 0x80: only the first bit set
        assert_eq!(out[0], BIT_HIGH);
        assert!(out[1..8].iter().all(|&b| b == BIT_LOW));
        // Red 0x00
        assert!(out[8..16].iter().all(|&b| b == BIT_LOW));
        // Blue 0x01: only the last bit set
        assert!(out[16..23].iter().all(|&b| b == BIT_LOW));
        assert_eq!(out[23], BIT_HIGH);
    }

    #[test]
    fn test_encode_white_and_black() {
        let mut out = [0u8; BYTES_PER_PIXEL];
        encode_color(Color::WHITE, &mut out);
        assert!(out.iter().all(|&b| b == 0b1110_0000));
        encode_color(Color::BLACK, &mut out);
        assert!(out.iter().all(|&b| b == 0b1000_0000));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let samples = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(18, 52, 86),
            Color::new(200, 1, 128),
        ];
        for color in samples {
            let mut out = [0u8; BYTES_PER_PIXEL];
            encode_color(color, &mut out);
            assert_eq!(decode_color(&out), Some(color));
        }
    }

    #[test]
    fn test_decode_rejects_unknown_pattern() {
        let mut out = [0u8; BYTES_PER_PIXEL];
        encode_color(Color::new(1, 2, 3), &mut out);
        out[5] = 0xFF;
        assert_eq!(decode_color(&out), None);
    }

    #[test]
    fn test_frame_encoder() {
        let mut frame = [Color::BLACK; LED_COUNT];
        frame[0] = Color::new(255, 0, 0);
        frame[60] = Color::new(0, 0, 255);

        let mut encoder = FrameEncoder::new();
        let payload = encoder.encode(&frame).to_vec();
        assert_eq!(payload.len(), FRAME_BYTES);

        let decoded = decode_frame(&payload).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(decode_frame(&payload[..FRAME_BYTES - 1]), None);
    }
}
