// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Round-trip integration tests for in-memory encode/decode.

use dctsteg_core::raster::dct;
use dctsteg_core::stego::frame;
use dctsteg_core::{decode, decode_message, encode, encode_message, capacity, LumaImage, StegoConfig, StegoError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Random cover with samples in 30..220.
fn noise_cover(width: usize, height: usize, seed: u64) -> LumaImage {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let samples = (0..width * height).map(|_| rng.gen_range(30.0..220.0f64).round()).collect();
    LumaImage::from_samples(width, height, samples).unwrap()
}

#[test]
fn hi_in_64x64_at_default_strength() {
    let cover = noise_cover(64, 64, 1);
    assert_eq!(capacity(&cover).bits, 64);

    let config = StegoConfig::with_strength(0.1).unwrap();
    let stego = encode(&cover, b"hi", &config).unwrap();
    assert_eq!(decode(&stego, &config, None).unwrap(), b"hi".to_vec());
}

#[test]
fn message_needing_520_bits_fails_on_64_blocks() {
    let cover = noise_cover(64, 64, 2);
    let message = vec![b'a'; 64];
    assert_eq!(frame::framed_bit_len(message.len()), 520);

    match encode(&cover, &message, &StegoConfig::default()) {
        Err(StegoError::InsufficientCapacity { needed_bits, available_bits }) => {
            assert_eq!(needed_bits, 520);
            assert_eq!(available_bits, 64);
        }
        other => panic!("expected InsufficientCapacity, got {other:?}"),
    }
}

#[test]
fn capacity_boundary() {
    // 64x64 → 64 blocks. 7 bytes + terminator = 64 bits fits exactly.
    let cover = noise_cover(64, 64, 3);
    let config = StegoConfig::default();
    let exact = b"exactly";
    assert_eq!(frame::framed_bit_len(exact.len()), 64);
    let stego = encode(&cover, exact, &config).unwrap();
    assert_eq!(decode(&stego, &config, None).unwrap(), exact.to_vec());

    // Same 64-bit stream against 63 blocks.
    let narrow = noise_cover(63 * 8, 8, 4);
    assert_eq!(capacity(&narrow).bits, 63);
    assert!(matches!(
        encode(&narrow, exact, &config),
        Err(StegoError::InsufficientCapacity { needed_bits: 64, available_bits: 63 })
    ));
}

#[test]
fn empty_message() {
    // 3x3 blocks: room for the 8 terminator bits.
    let cover = noise_cover(24, 24, 5);
    let config = StegoConfig::default();
    assert_eq!(frame::frame(b""), vec![0u8; 8]);
    let stego = encode(&cover, b"", &config).unwrap();
    assert_eq!(decode(&stego, &config, None).unwrap(), Vec::<u8>::new());
}

#[test]
fn roundtrip_across_strengths() {
    let cover = noise_cover(128, 128, 6);
    let message = "Hidden in the mid frequencies.";
    // 31 framed bytes against 16x16 blocks.
    assert!(frame::framed_bit_len(message.len()) <= capacity(&cover).bits);
    for alpha in [0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0] {
        let config = StegoConfig::with_strength(alpha).unwrap();
        let stego = encode_message(&cover, message, &config).unwrap();
        assert_eq!(
            decode_message(&stego, &config, None).unwrap(),
            message,
            "failed at strength {alpha}"
        );
    }
}

#[test]
fn roundtrip_arbitrary_bytes() {
    let cover = noise_cover(256, 256, 7);
    let config = StegoConfig::with_strength(1.0).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    for len in [1usize, 13, 100, 127] {
        // Non-zero bytes only: a zero byte would end the unbounded decode.
        let message: Vec<u8> = (0..len).map(|_| rng.gen_range(1..=255u8)).collect();
        let stego = encode(&cover, &message, &config).unwrap();
        assert_eq!(decode(&stego, &config, None).unwrap(), message, "length {len}");
    }
}

#[test]
fn decode_strength_does_not_change_bits() {
    let cover = noise_cover(64, 64, 9);
    let stego = encode(&cover, b"abc", &StegoConfig::with_strength(3.0).unwrap()).unwrap();
    let other = StegoConfig::with_strength(0.01).unwrap();
    assert_eq!(decode(&stego, &other, None).unwrap(), b"abc".to_vec());
}

#[test]
fn encoding_is_deterministic() {
    let cover = noise_cover(96, 64, 10);
    let config = StegoConfig::with_strength(0.3).unwrap();
    let a = encode(&cover, b"same input", &config).unwrap();
    let b = encode(&cover, b"same input", &config).unwrap();
    let bits_a: Vec<u64> = a.samples().iter().map(|s| s.to_bits()).collect();
    let bits_b: Vec<u64> = b.samples().iter().map(|s| s.to_bits()).collect();
    assert_eq!(bits_a, bits_b);
}

#[test]
fn only_carrying_blocks_change() {
    let cover = noise_cover(64, 64, 11);
    let config = StegoConfig::default();
    let stego = encode(&cover, b"hi", &config).unwrap();
    // 24 bits → blocks 0..24 → the first three block rows.
    for y in 0..64 {
        for x in 0..64 {
            if y >= 24 {
                assert_eq!(stego.get(x, y), cover.get(x, y), "pixel ({x},{y}) changed");
            }
        }
    }
    assert_ne!(stego, cover);
}

#[test]
fn transform_roundtrip_on_random_blocks() {
    let mut rng = ChaCha20Rng::seed_from_u64(12);
    for _ in 0..100 {
        let mut block = [0.0f64; dct::BLOCK_LEN];
        for v in block.iter_mut() {
            *v = rng.gen_range(0.0..255.0);
        }
        let recovered = dct::inverse(&dct::forward(&block));
        for i in 0..dct::BLOCK_LEN {
            assert!((block[i] - recovered[i]).abs() < 1e-9, "sample {i}");
        }
    }
}

#[test]
fn non_aligned_image_uses_full_blocks_only() {
    let cover = noise_cover(67, 45, 13); // 8x5 = 40 blocks
    assert_eq!(capacity(&cover).bits, 40);
    let config = StegoConfig::default();
    let stego = encode(&cover, b"four", &config).unwrap();
    assert_eq!(decode(&stego, &config, None).unwrap(), b"four".to_vec());
    for y in 0..45 {
        for x in 64..67 {
            assert_eq!(stego.get(x, y), cover.get(x, y));
        }
    }
    for y in 40..45 {
        for x in 0..67 {
            assert_eq!(stego.get(x, y), cover.get(x, y));
        }
    }
}

/// Walks the blocks by hand and must match `encode` bit for bit, whether
/// the crate runs its serial or its `parallel` block pipeline.
#[test]
fn matches_manual_block_walk() {
    use dctsteg_core::stego::polarity::PolarityRule;

    let cover = noise_cover(120, 80, 14);
    let config = StegoConfig::with_strength(0.7).unwrap();
    let message = b"block order"; // 96 bits of 150

    let rule = PolarityRule::new(config.strength);
    let mut expected = cover.clone();
    let bits = frame::frame(message);
    for (coord, &bit) in cover.layout().iter().zip(&bits) {
        let coeffs = dct::forward(&cover.read_block(coord));
        expected.write_block(coord, &dct::inverse(&rule.embed(&coeffs, bit)));
    }

    let actual = encode(&cover, message, &config).unwrap();
    let to_bits = |img: &LumaImage| img.samples().iter().map(|s| s.to_bits()).collect::<Vec<u64>>();
    assert_eq!(to_bits(&actual), to_bits(&expected));
}
