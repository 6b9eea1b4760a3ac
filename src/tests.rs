use voxell_rng::rng::XorShift128;

use crate::compressor::Compressor;

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the static Huffman coder. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &[u8] = b"AAAAA";
const SKEWED_DATA: &[u8] = b"AABBBCCCC";
const ALL_BYTES: &[u8] = &const {
    let mut arr = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        arr[i] = i as u8;
        i += 1;
    }
    arr
};
const RNG_DATA: &[u8] = &const {
    let mut arr = [0u8; 1000];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut i = 0;
    while i < 1000 {
        let data = rng.peek_next_u64();
        arr[i] = (data & 0xFF) as u8;
        rng = XorShift128::new(data);
        i += 1;
    }
    arr
};

// The empty input is deliberately absent: compressing it is an error by
// contract, covered by a dedicated unit test instead of the round-trip corpus.
const TEST_CASES: &[(&[u8], &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (SINGLE_SYMBOL_DATA, "single-symbol data"),
    (SKEWED_DATA, "skewed frequencies"),
    (ALL_BYTES, "all 256 byte values"),
    (RNG_DATA, "rng data"),
];

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    for &(test_case, test_name) in TEST_CASES {
        match compressor.test_roundtrip(test_case) {
            Ok(eq) => {
                let ratio = compression_ratio(eq.get_original(), eq.get_compressed());

                eprintln!("Compression ratio for {}: {:.2}%", test_name, ratio * 100.0);

                assert!(
                    eq.is_successful(),
                    "Roundtrip test failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!("Fatal error while trying to compress/decompress {}: {}", test_name, e);
            }
        }
    }
}

pub fn compression_ratio(original: &[u8], compressed: &[u8]) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    compressed.len() as f64 / original.len() as f64
}
