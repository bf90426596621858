//! The djb2 string hash: start from 5381 and fold every byte in as
//! `hash * 33 + byte`, wrapping on overflow.

use core::ffi::CStr;
use core::hash::BuildHasherDefault;
use core::hash::Hasher;

const SEED: u64 = 5381;

#[inline(always)]
const fn step(hash: u64, byte: u8) -> u64 {
    return (hash << 5).wrapping_add(hash).wrapping_add(byte as u64);
}

/// Hashes `bytes` up to the first NUL byte, or the whole slice if it holds
/// none. This lets a C string be hashed with or without its terminator.
pub const fn hash_str(bytes: &[u8]) -> u64 {
    let mut hash = SEED;
    let mut i = 0;
    while i < bytes.len() && bytes[i] != 0 {
        hash = step(hash, bytes[i]);
        i += 1;
    }
    return hash;
}

#[inline]
pub const fn hash_c_str(s: &CStr) -> u64 {
    return hash_str(s.to_bytes());
}

/// A `Hasher` running the djb2 recurrence over everything written to it.
///
/// Unlike [`hash_str`] NUL bytes are hashed like any other byte, and the
/// `u8` writes that `str`'s `Hash` impl appends as a terminator are folded
/// in too, so `hash_str(s)` and hashing `s` through this hasher differ.
#[derive(Debug, Copy, Clone)]
pub struct StrHasher(u64);

impl Default for StrHasher {
    fn default() -> Self {
        return Self(SEED);
    }
}

impl Hasher for StrHasher {
    #[inline]
    fn finish(&self) -> u64 {
        return self.0;
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = step(self.0, b);
        }
    }
}

pub type BuildStrHasher = BuildHasherDefault<StrHasher>;

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(hash_str(b""), 5381);
        // 5381 * 33 + 'a'
        assert_eq!(hash_str(b"a"), 177_670);
        assert_eq!(hash_str(b"abc"), 193_485_963);
    }

    #[test]
    fn stops_at_nul() {
        assert_eq!(hash_str(b"abc\0"), hash_str(b"abc"));
        assert_eq!(hash_str(b"abc\0def"), hash_str(b"abc"));
        assert_eq!(hash_str(b"\0abc"), 5381);
        assert_eq!(hash_c_str(c"abc"), hash_str(b"abc"));
    }

    #[test]
    fn high_bytes_are_unsigned() {
        assert_eq!(hash_str(&[0xff]), 5381 * 33 + 0xff);
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let long = [b'z'; 64];
        let mut expect = 5381u64;
        for _ in 0..64 {
            expect = expect.wrapping_mul(33).wrapping_add(u64::from(b'z'));
        }
        assert_eq!(hash_str(&long), expect);
    }

    #[test]
    fn hasher_matches_free_function() {
        let mut h = StrHasher::default();
        h.write(b"hello");
        assert_eq!(h.finish(), hash_str(b"hello"));

        // Split writes fold the same as one write.
        let mut split = BuildStrHasher::default().build_hasher();
        split.write(b"hel");
        split.write(b"lo");
        assert_eq!(split.finish(), h.finish());
    }
}
