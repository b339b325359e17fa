//! Arbitrary update schedules must not change any variant's output.

#![no_main]

use arbitrary::Arbitrary;
use blake2_engine::{AnyHasher, Variant};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  key: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
  out_len: u8,
}

fuzz_target!(|input: Input| {
  for variant in Variant::ALL {
    let out_len = usize::from(input.out_len).min(variant.max_out_len()).max(1);
    let key = &input.key[..input.key.len().min(variant.max_key_len())];

    let mut whole = AnyHasher::new_keyed(variant, key, out_len).unwrap();
    whole.update(&input.data).unwrap();
    let mut expected = vec![0u8; out_len];
    whole.finalize_into(&mut expected).unwrap();

    let mut h = AnyHasher::new_keyed(variant, key, out_len).unwrap();
    let mut offset = 0;
    let mut chunk_idx = 0;
    while offset < input.data.len() {
      let chunk_size = if input.chunk_sizes.is_empty() {
        1
      } else {
        (input.chunk_sizes[chunk_idx % input.chunk_sizes.len()] % 1024).max(1)
      };
      let end = (offset + chunk_size).min(input.data.len());
      h.update(&input.data[offset..end]).unwrap();
      offset = end;
      chunk_idx += 1;
    }
    let mut actual = vec![0u8; out_len];
    h.finalize_into(&mut actual).unwrap();
    assert_eq!(actual, expected, "{variant} streaming mismatch");

    h.reset();
    h.update(&input.data).unwrap();
    h.finalize_into(&mut actual).unwrap();
    assert_eq!(actual, expected, "{variant} mismatch after reset");
  }
});
