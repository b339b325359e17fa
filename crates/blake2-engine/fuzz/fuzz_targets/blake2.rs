#![no_main]

use blake2_engine::{blake2b, blake2s, blake2bp, blake2sp};
use libfuzzer_sys::fuzz_target;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

fuzz_target!(|input: &[u8]| {
  let split = split_point(input);
  let (a, b) = input.split_at(split);
  let out_len = input.first().map_or(32, |&x| usize::from(x % 32) + 1);

  {
    let ours = blake2s::digest(out_len, input).unwrap();
    let mut h = blake2s::Blake2s::new(out_len).unwrap();
    h.update(a).unwrap();
    h.update(b).unwrap();
    assert_eq!(ours, h.finalize().unwrap());

    let expected = blake2s_simd::Params::new().hash_length(out_len).hash(input);
    assert_eq!(ours.as_bytes(), expected.as_bytes());
  }

  {
    let ours = blake2b::sum512(input);
    let mut h = blake2b::Blake2b::new(64).unwrap();
    h.update(a).unwrap();
    h.update(b).unwrap();
    assert_eq!(h.finalize().unwrap().as_bytes(), &ours);

    use blake2::Digest as _;
    let ref_out = blake2::Blake2b512::digest(input);
    assert_eq!(&ours[..], &ref_out[..]);
  }

  {
    let expected = blake2b_simd::blake2bp::Params::new().hash_length(out_len).hash(input);
    let ours = blake2bp::digest(out_len, input).unwrap();
    assert_eq!(ours.as_bytes(), expected.as_bytes());

    let expected = blake2s_simd::blake2sp::blake2sp(input);
    assert_eq!(&blake2sp::sum256(input)[..], expected.as_bytes());
  }
});
