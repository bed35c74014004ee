//! CRC-32 checksum (ISO/IEC 3309, as used by PKZIP).
//!
//! Reflected polynomial `0xEDB88320`, register seeded with `0xFFFFFFFF`,
//! output inverted. Computed bit by bit, without a lookup table.

/// Reflected CRC-32 polynomial.
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

const CRC32_INIT: u32 = 0xFFFF_FFFF;

/// Compute the CRC-32 of `bytes` in one call.
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finalize()
}

/// Incremental CRC-32 for payloads assembled in pieces.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    register: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            register: CRC32_INIT,
        }
    }

    /// Feed more bytes into the checksum.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut crc = self.register;
        for &byte in bytes {
            crc ^= u32::from(byte);
            for _ in 0..8 {
                if crc & 1 == 1 {
                    crc = (crc >> 1) ^ CRC32_POLYNOMIAL;
                } else {
                    crc >>= 1;
                }
            }
        }
        self.register = crc;
    }

    /// Final checksum value. Does not reset the hasher.
    #[must_use]
    pub const fn finalize(&self) -> u32 {
        self.register ^ CRC32_INIT
    }
}
