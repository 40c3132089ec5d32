// librtls/librtls/src/bitfield.rs

//! Fixed-width fields packed into a single machine word.
//!
//! Fields are allocated contiguously from bit 0 upward. Layouts are built
//! with `const fn`s so every descriptor used by the codecs is a compile-time
//! constant; a layout that does not fit its word fails to compile.
//!
//! ```
//! use librtls::bitfield::{self, BitField};
//!
//! const FIELDS: [BitField; 2] = bitfield::contiguous(8, [3, 5]);
//! let word = FIELDS[1].set(0, 0x11).unwrap();
//! assert_eq!(word, 0x88);
//! assert_eq!(FIELDS[1].get(word), 0x11);
//! ```

use crate::{Error, Result};

/// Widest word supported by the layout helpers.
pub const MAX_WORD_BITS: u32 = u32::BITS;

/// Allocation cursor over a word of `word_bits` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLayout {
    word_bits: u32,
    cursor: u32,
}

impl BitLayout {
    pub const fn new(word_bits: u32) -> Self {
        assert!(
            word_bits > 0 && word_bits <= MAX_WORD_BITS,
            "word size must be 1..=32 bits"
        );
        Self {
            word_bits,
            cursor: 0,
        }
    }

    /// Allocate the next `width` bits. Panics (at compile time when used in
    /// a `const`) if the field does not fit.
    pub const fn field(self, width: u32) -> (Self, BitField) {
        assert!(width > 0, "field width must be non-zero");
        assert!(
            width <= self.word_bits - self.cursor,
            "bit layout overflow"
        );
        let field = BitField {
            offset: self.cursor,
            width,
        };
        (
            Self {
                word_bits: self.word_bits,
                cursor: self.cursor + width,
            },
            field,
        )
    }

    /// Runtime variant of [`BitLayout::field`].
    pub fn try_field(self, width: u32) -> Result<(Self, BitField)> {
        if width == 0 || width > self.remaining() {
            return Err(Error::LayoutOverflow {
                word_bits: self.word_bits,
                requested: self.cursor.saturating_add(width),
            });
        }
        Ok(self.field(width))
    }

    pub const fn word_bits(&self) -> u32 {
        self.word_bits
    }

    pub const fn used_bits(&self) -> u32 {
        self.cursor
    }

    pub const fn remaining(&self) -> u32 {
        self.word_bits - self.cursor
    }
}

/// Allocate `N` contiguous fields with the given widths, first field at bit 0.
pub const fn contiguous<const N: usize>(word_bits: u32, widths: [u32; N]) -> [BitField; N] {
    let mut out = [BitField::UNUSED; N];
    let mut layout = BitLayout::new(word_bits);
    let mut i = 0;
    while i < N {
        let (next, field) = layout.field(widths[i]);
        out[i] = field;
        layout = next;
        i += 1;
    }
    out
}

/// A single field descriptor: `width` bits starting at bit `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    offset: u32,
    width: u32,
}

impl BitField {
    const UNUSED: Self = Self {
        offset: 0,
        width: 0,
    };

    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Largest value the field can hold.
    pub const fn max(&self) -> u32 {
        if self.width >= u32::BITS {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Mask of the field's bits within the word.
    pub const fn mask(&self) -> u32 {
        self.max() << self.offset
    }

    pub const fn get(&self, word: u32) -> u32 {
        (word >> self.offset) & self.max()
    }

    /// Return `word` with this field replaced by `value`. Values wider than
    /// the field are rejected.
    pub fn set(&self, word: u32, value: u32) -> Result<u32> {
        if value > self.max() {
            return Err(Error::FieldOverflow {
                width: self.width,
                value,
            });
        }
        Ok((word & !self.mask()) | (value << self.offset))
    }

    /// Like [`BitField::set`] but keeps only the bits that fit. Used where the
    /// wire format deliberately truncates a wider value.
    pub const fn set_truncated(&self, word: u32, value: u32) -> u32 {
        (word & !self.mask()) | ((value & self.max()) << self.offset)
    }

    pub const fn get_flag(&self, word: u32) -> bool {
        self.get(word) != 0
    }

    pub const fn set_flag(&self, word: u32, on: bool) -> u32 {
        self.set_truncated(word, on as u32)
    }
}
