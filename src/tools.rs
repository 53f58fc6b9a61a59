//! Some helper functions

use std::hash::Hasher;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// 64-bit FNV-1a hasher.
///
/// Structural hashes of expressions are built by seeding the hasher with a domain string
/// (the kind of node) and then folding the hashes of the children.
///
/// ```
/// use logicka::tools::Fnv1a;
/// use std::hash::Hasher;
///
/// let mut h1 = Fnv1a::with_domain("variable");
/// h1.write(b"a");
/// let mut h2 = Fnv1a::with_domain("literal");
/// h2.write(b"a");
/// assert_ne!(h1.finish(), h2.finish());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a(u64);

impl Fnv1a {
    /// Create a hasher already fed with a domain separator.
    pub fn with_domain(domain: &str) -> Self {
        let mut h = Self::default();
        h.write(domain.as_bytes());
        h
    }

    /// Fold a previously computed hash, with a fixed byte order.
    pub fn fold(&mut self, hash: u64) {
        self.write(&hash.to_be_bytes());
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self(FNV_OFFSET_BASIS)
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 ^= *b as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tools::*;

    #[test]
    fn reference_vectors() {
        // Published FNV-1a 64 test vectors
        assert_eq!(Fnv1a::default().finish(), 0xcbf29ce484222325);

        let mut h = Fnv1a::default();
        h.write(b"a");
        assert_eq!(h.finish(), 0xaf63dc4c8601ec8c);

        let mut h = Fnv1a::default();
        h.write(b"foobar");
        assert_eq!(h.finish(), 0x85944171f73967e8);
    }

    #[test]
    fn fold_is_order_sensitive() {
        let mut h1 = Fnv1a::with_domain("binary");
        h1.fold(1);
        h1.fold(2);
        let mut h2 = Fnv1a::with_domain("binary");
        h2.fold(2);
        h2.fold(1);
        assert_ne!(h1.finish(), h2.finish());
    }
}
