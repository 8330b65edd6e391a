//! Value synthesis: bounded random primitives.
//!
//! Every function here is a plain function of the options and a random
//! source. Bounds are validated up front by [`GenerateOptions::validate`],
//! so nothing in this module can fail.
pub mod temporal;

use rand::Rng;

use crate::options::GenerateOptions;

pub use temporal::TemporalKind;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Inclusive value range of a fixed-width integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    pub min: i128,
    pub max: i128,
}

impl Width {
    pub const I8: Width = Width::of(i8::MIN as i128, i8::MAX as i128);
    pub const I16: Width = Width::of(i16::MIN as i128, i16::MAX as i128);
    pub const I32: Width = Width::of(i32::MIN as i128, i32::MAX as i128);
    pub const I64: Width = Width::of(i64::MIN as i128, i64::MAX as i128);
    pub const U8: Width = Width::of(0, u8::MAX as i128);
    pub const U16: Width = Width::of(0, u16::MAX as i128);
    pub const U32: Width = Width::of(0, u32::MAX as i128);
    pub const U64: Width = Width::of(0, u64::MAX as i128);

    const fn of(min: i128, max: i128) -> Self { Self { min, max } }
}

pub fn string<R: Rng>(rng: &mut R, options: &GenerateOptions) -> String {
    let bounds = options.string_length;
    let len = rng.gen_range(bounds.min..=bounds.max);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn character<R: Rng>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}

/// Uniform in the numeric range intersected with `width`.
///
/// When the two do not overlap, the width bound nearest to the configured
/// range is returned so the value still fits the declared type.
pub fn integer<R: Rng>(rng: &mut R, options: &GenerateOptions, width: Width) -> i64 {
    let range = options.numeric_range;
    let lo = (range.min as i128).max(width.min);
    let hi = (range.max as i128).min(width.max);
    let picked = if lo <= hi {
        rng.gen_range(lo..=hi)
    } else if (range.max as i128) < width.min {
        width.min
    } else {
        width.max
    };
    picked.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

pub fn float<R: Rng>(rng: &mut R, options: &GenerateOptions) -> f64 {
    let range = options.numeric_range;
    rng.gen_range(range.min as f64..=range.max as f64)
}

pub fn boolean<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn rng() -> Xoshiro256StarStar { Xoshiro256StarStar::seed_from_u64(7) }

    #[test]
    fn strings_respect_length_bounds() {
        let mut rng = rng();
        let options = GenerateOptions::default().with_string_length(3, 9);
        for _ in 0..200 {
            let s = string(&mut rng, &options);
            assert!((3..=9).contains(&s.len()), "{s}");
            assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn exact_length_when_bounds_meet() {
        let mut rng = rng();
        let options = GenerateOptions::default().with_string_length(5, 5);
        assert!((0..50).all(|_| string(&mut rng, &options).len() == 5));
        let options = GenerateOptions::default().with_string_length(0, 0);
        assert_eq!(string(&mut rng, &options), "");
    }

    #[test]
    fn numbers_respect_numeric_range() {
        let mut rng = rng();
        let options = GenerateOptions::default().with_numeric_range(-3, 3);
        for _ in 0..200 {
            let i = integer(&mut rng, &options, Width::I64);
            assert!((-3..=3).contains(&i));
            let f = float(&mut rng, &options);
            assert!((-3.0..=3.0).contains(&f));
        }
    }

    #[test]
    fn integers_fit_declared_width() {
        let mut rng = rng();
        let options = GenerateOptions::default();
        for _ in 0..200 {
            let i = integer(&mut rng, &options, Width::U8);
            assert!((5..=255).contains(&i));
        }
        let negative = GenerateOptions::default().with_numeric_range(-50, -10);
        assert_eq!(integer(&mut rng, &negative, Width::U32), 0);
        let huge = GenerateOptions::default().with_numeric_range(1_000, 5_000);
        assert_eq!(integer(&mut rng, &huge, Width::I8), 127);
    }
}
