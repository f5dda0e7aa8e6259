//! # Compact binary codes for diagnostic identifiers.
//!
//! [`Code`] compresses an ASCII identifier of up to 20 characters into two
//! 64-bit words of 6-bit symbols. Equal identifiers produce bit-identical
//! codes, so codes compare, hash and order without being decoded.
//!
//! ## Packing
//! The symbol at logical position `i` occupies bits `[6*i, 6*i + 6)` of
//! word 0 for `i < 10`, and the same bit offset computed with `i - 10` in
//! word 1 otherwise. Unused trailing positions stay zero, which decodes to
//! the pad character `-`.
//!
//! ## Construction
//! Encoding is a `const fn`: a [`Code`] in a `const` or `static` initializer
//! is folded at compile time, and an invalid literal fails the build.
//!
//! ```
//! use diagvisor::Code;
//!
//! const DISK_FULL: Code = Code::literal("DISK_FULL");
//! assert_eq!(DISK_FULL.decode().trimmed(), "DISK_FULL");
//! ```

use std::fmt;
use std::str;

use crate::code::alphabet::{self, MAX_IDENTIFIER_LEN, SYMBOLS_PER_WORD, SYMBOL_BITS};
use crate::error::IdentifierError;

/// Compressed identifier of a diagnostic.
///
/// A plain value type: two words holding up to 20 six-bit symbols. The type
/// cannot represent an identifier longer than 20 characters or containing a
/// character outside the alphabet; [`Code::new`] rejects such input at
/// construction time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    words: [u64; 2],
}

impl Code {
    /// Encodes `text` into a code.
    ///
    /// Fails with [`IdentifierError::TooLong`] when `text` exceeds 20
    /// characters and [`IdentifierError::InvalidCharacter`] when a character
    /// falls outside the alphabet `-`, `0`–`9`, `A`–`Z`, `_`, `a`–`z`. The
    /// input is never truncated or substituted.
    ///
    /// This is a `const fn` with no allocation, usable in constant context.
    pub const fn new(text: &str) -> Result<Self, IdentifierError> {
        let bytes = text.as_bytes();
        if bytes.len() > MAX_IDENTIFIER_LEN {
            return Err(IdentifierError::TooLong {
                length: bytes.len(),
            });
        }

        let mut words = [0u64; 2];
        let mut position = 0;
        while position < bytes.len() {
            let symbol = alphabet::compress(bytes[position]);
            if symbol == alphabet::INVALID_SYMBOL {
                return Err(IdentifierError::InvalidCharacter {
                    character: bytes[position] as char,
                    position,
                });
            }
            words[position / SYMBOLS_PER_WORD] |=
                (symbol as u64) << ((position % SYMBOLS_PER_WORD) * SYMBOL_BITS);
            position += 1;
        }

        Ok(Self { words })
    }

    /// Encodes a literal identifier, panicking on invalid input.
    ///
    /// Intended for `const`/`static` initializers, where the panic becomes a
    /// compile-time error. Prefer [`Code::new`] for runtime-supplied text.
    pub const fn literal(text: &str) -> Self {
        match Self::new(text) {
            Ok(code) => code,
            Err(_) => panic!("invalid diagnostic identifier"),
        }
    }

    /// Returns the raw word at `index` (0 or 1).
    #[inline]
    pub const fn word(&self, index: usize) -> u64 {
        self.words[index]
    }

    /// Decompresses the code back to its textual form.
    ///
    /// Always succeeds, yielding the fixed 20-character form with pad
    /// symbols in unused trailing positions. The exact inverse of
    /// [`Code::new`] for any accepted input.
    pub fn decode(&self) -> DecodedCode {
        let mut bytes = [alphabet::PAD; MAX_IDENTIFIER_LEN];
        let mut position = 0;
        while position < MAX_IDENTIFIER_LEN {
            let word = self.words[position / SYMBOLS_PER_WORD];
            let offset = (position % SYMBOLS_PER_WORD) * SYMBOL_BITS;
            bytes[position] = alphabet::decompress(word >> offset);
            position += 1;
        }
        DecodedCode { bytes }
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Code").field(&self.decode().trimmed()).finish()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.decode().trimmed())
    }
}

/// The decompressed 20-character form of a [`Code`].
///
/// Holds the fixed-width text on the stack; no allocation. [`as_str`]
/// exposes the padded form, [`trimmed`] the identifier without the trailing
/// pad suffix.
///
/// [`as_str`]: DecodedCode::as_str
/// [`trimmed`]: DecodedCode::trimmed
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DecodedCode {
    bytes: [u8; MAX_IDENTIFIER_LEN],
}

impl DecodedCode {
    /// The full 20-character form, pad symbols included.
    pub fn as_str(&self) -> &str {
        // The alphabet is pure ASCII, so the buffer is always valid UTF-8.
        str::from_utf8(&self.bytes).expect("decoded identifiers are ASCII")
    }

    /// The identifier with the trailing pad suffix removed.
    ///
    /// An identifier that was explicitly encoded with trailing `-`
    /// characters loses them here; the pad character and `-` share symbol
    /// value 0, an ambiguity inherent to the encoding.
    pub fn trimmed(&self) -> &str {
        let end = self
            .bytes
            .iter()
            .rposition(|&byte| byte != alphabet::PAD)
            .map_or(0, |last| last + 1);
        &self.as_str()[..end]
    }
}

impl fmt::Debug for DecodedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecodedCode").field(&self.as_str()).finish()
    }
}

impl fmt::Display for DecodedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
