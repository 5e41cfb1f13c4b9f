use icon_synth::{
    png::{self, crc32, encode, read_chunks, Chunk, DEFAULT_LEVEL, PNG_SIGNATURE},
    raster::synthesize,
    IconError,
};
use image::Rgba;
use miniz_oxide::inflate::decompress_to_vec_zlib;

/// Straight bitwise CRC-32 used as an independent reference.
fn reference_crc(bytes: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &b in bytes {
        crc ^= b as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

fn checkerboard(width: u32, height: u32) -> Vec<u8> {
    synthesize(width, height, |x, y| {
        let v = if (x + y) % 2 == 0 { 255 } else { 0 };
        Rgba([v, (x * 7) as u8, (y * 13) as u8, 128 + (x as u8 % 2) * 127])
    })
    .expect("valid dimensions")
    .into_bytes()
}

/// Walk the raw file by hand so lengths and CRCs are checked independently of `read_chunks`.
fn raw_chunks(bytes: &[u8]) -> Vec<(u32, [u8; 4], Vec<u8>, u32)> {
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    let mut pos = 8;
    let mut out = Vec::new();
    while pos < bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap());
        let mut kind = [0u8; 4];
        kind.copy_from_slice(&bytes[pos + 4..pos + 8]);
        let data = bytes[pos + 8..pos + 8 + len as usize].to_vec();
        let crc_at = pos + 8 + len as usize;
        let crc = u32::from_be_bytes(bytes[crc_at..crc_at + 4].try_into().unwrap());
        out.push((len, kind, data, crc));
        pos = crc_at + 4;
    }
    out
}

#[test]
fn crc_matches_known_values() {
    // The IEND CRC is the same in every PNG file.
    assert_eq!(crc32(b"IEND", b""), 0xAE42_6082);
    // Standard check value for "123456789".
    assert_eq!(crc32(b"1234", b"56789"), 0xCBF4_3926);

    let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
    let mut tagged = b"IDAT".to_vec();
    tagged.extend_from_slice(&data);
    assert_eq!(crc32(b"IDAT", &data), reference_crc(&tagged));
}

#[test]
fn file_layout_is_signature_ihdr_idat_iend() {
    let (width, height) = (7, 5);
    let bytes = encode(width, height, &checkerboard(width, height), DEFAULT_LEVEL).unwrap();

    let chunks = raw_chunks(&bytes);
    let kinds: Vec<&[u8; 4]> = chunks.iter().map(|c| &c.1).collect();
    assert_eq!(kinds, [b"IHDR", b"IDAT", b"IEND"]);

    for (len, kind, data, crc) in &chunks {
        assert_eq!(*len as usize, data.len(), "length field of {kind:?}");
        let mut tagged = kind.to_vec();
        tagged.extend_from_slice(data);
        assert_eq!(*crc, reference_crc(&tagged), "CRC of {kind:?}");
    }

    let ihdr = &chunks[0].2;
    assert_eq!(ihdr.len(), 13);
    assert_eq!(&ihdr[0..4], &width.to_be_bytes());
    assert_eq!(&ihdr[4..8], &height.to_be_bytes());
    assert_eq!(&ihdr[8..], &[8, 6, 0, 0, 0]);
    assert!(chunks[2].2.is_empty());
}

#[test]
fn idat_inflates_to_the_raster() {
    let raster = checkerboard(9, 4);
    let bytes = encode(9, 4, &raster, DEFAULT_LEVEL).unwrap();
    let chunks = read_chunks(&bytes).unwrap();
    let inflated = decompress_to_vec_zlib(&chunks[1].data).expect("valid zlib stream");
    assert_eq!(inflated, raster);
}

#[test]
fn single_pixel_image() {
    let raster = synthesize(1, 1, |_, _| Rgba([10, 20, 30, 40])).unwrap();
    let bytes = png::encode_raster(&raster, DEFAULT_LEVEL).unwrap();

    let chunks = read_chunks(&bytes).unwrap();
    let idats: Vec<&Chunk> = chunks.iter().filter(|c| &c.kind == b"IDAT").collect();
    assert_eq!(idats.len(), 1);
    let inflated = decompress_to_vec_zlib(&idats[0].data).unwrap();
    assert_eq!(inflated, vec![0, 10, 20, 30, 40]);

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.get_pixel(0, 0), &Rgba([10, 20, 30, 40]));
}

#[test]
fn circular_pattern_decodes_exactly() {
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    let raster = synthesize(4, 4, |x, y| {
        let dx = x as f32 - 2.0;
        let dy = y as f32 - 2.0;
        if (dx * dx + dy * dy).sqrt() < 2.0 {
            RED
        } else {
            CLEAR
        }
    })
    .unwrap();
    let bytes = png::encode_raster(&raster, DEFAULT_LEVEL).unwrap();

    #[rustfmt::skip]
    let inside = [
        [false, false, false, false],
        [false, true,  true,  true ],
        [false, true,  true,  true ],
        [false, true,  true,  true ],
    ];
    let expected: Vec<u8> = inside
        .iter()
        .flatten()
        .flat_map(|&hit| if hit { RED.0 } else { CLEAR.0 })
        .collect();

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), &expected);
}

#[test]
fn compression_level_only_changes_size() {
    let raster = checkerboard(32, 32);
    let stored = encode(32, 32, &raster, 0).unwrap();
    let best = encode(32, 32, &raster, 10).unwrap();
    assert!(best.len() < stored.len());

    let a = image::load_from_memory(&stored).unwrap().to_rgba8();
    let b = image::load_from_memory(&best).unwrap().to_rgba8();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn levels_past_ten_are_rejected() {
    let raster = checkerboard(4, 4);
    assert!(matches!(encode(4, 4, &raster, 11), Err(IconError::InvalidLevel(11))));
    assert!(matches!(encode(4, 4, &raster, u8::MAX), Err(IconError::InvalidLevel(255))));
}

#[test]
fn encoding_is_deterministic() {
    let raster = checkerboard(16, 3);
    assert_eq!(
        encode(16, 3, &raster, DEFAULT_LEVEL).unwrap(),
        encode(16, 3, &raster, DEFAULT_LEVEL).unwrap()
    );
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(matches!(
        encode(0, 4, &[], DEFAULT_LEVEL),
        Err(IconError::InvalidDimensions { width: 0, height: 4 })
    ));
    assert!(matches!(
        synthesize(3, 0, |_, _| Rgba([0, 0, 0, 0])),
        Err(IconError::InvalidDimensions { width: 3, height: 0 })
    ));
}

#[test]
#[should_panic(expected = "raster for a 2x2 image must be 18 bytes")]
fn short_raster_is_a_programming_error() {
    let _ = encode(2, 2, &[0u8; 17], DEFAULT_LEVEL);
}

#[test]
fn reader_rejects_corruption() {
    let mut bytes = encode(2, 2, &checkerboard(2, 2), DEFAULT_LEVEL).unwrap();

    let mut bad_signature = bytes.clone();
    bad_signature[1] = b'Q';
    assert!(matches!(read_chunks(&bad_signature), Err(IconError::MalformedPng(_))));

    let truncated = &bytes[..bytes.len() - 6];
    assert!(matches!(read_chunks(truncated), Err(IconError::MalformedPng(_))));

    // Flip a bit inside the IHDR width field.
    bytes[8 + 8 + 3] ^= 0x01;
    let err = read_chunks(&bytes).unwrap_err();
    assert!(err.to_string().contains("CRC mismatch in IHDR"), "{err}");
}
