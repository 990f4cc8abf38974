//! Integer bases and word-size arithmetic for the programmer mode
//!
//! Values are bit patterns in a u64, truncated to the active word size.
//! The four supported radixes match the mode's BIN/OCT/DEC/HEX selector;
//! hexadecimal digits display uppercase.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RadixError {
    #[error("empty digit string")]
    Empty,
    #[error("invalid digit '{0}' for base {1}")]
    InvalidDigit(char, u32),
    #[error("base-{0} value does not fit in 64 bits")]
    Overflow(u32),
}

/// A numerical radix supported by the programmer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub fn try_from_value(value: u32) -> Option<Self> {
        match value {
            2 => Some(Radix::Binary),
            8 => Some(Radix::Octal),
            10 => Some(Radix::Decimal),
            16 => Some(Radix::Hexadecimal),
            _ => None,
        }
    }

    /// Whether `c` is a digit of this radix (hex accepts both cases)
    pub fn is_valid_digit(self, c: char) -> bool {
        c.to_digit(self.value()).is_some()
    }

    /// Parse an unsigned value written in this radix
    pub fn parse(self, text: &str) -> Result<u64, RadixError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RadixError::Empty);
        }
        let base = self.value();
        let mut acc: u64 = 0;
        for c in text.chars() {
            let digit = c.to_digit(base).ok_or(RadixError::InvalidDigit(c, base))?;
            acc = acc
                .checked_mul(base as u64)
                .and_then(|a| a.checked_add(digit as u64))
                .ok_or(RadixError::Overflow(base))?;
        }
        Ok(acc)
    }

    /// Format a value in this radix (hex uppercase)
    pub fn format(self, value: u64) -> String {
        match self {
            Radix::Binary => format!("{:b}", value),
            Radix::Octal => format!("{:o}", value),
            Radix::Decimal => format!("{}", value),
            Radix::Hexadecimal => format!("{:X}", value),
        }
    }
}

/// Active word size for programmer-mode arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    W8,
    W16,
    W32,
    W64,
}

impl WordSize {
    pub fn bits(self) -> u32 {
        match self {
            WordSize::W8 => 8,
            WordSize::W16 => 16,
            WordSize::W32 => 32,
            WordSize::W64 => 64,
        }
    }

    pub fn try_from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(WordSize::W8),
            16 => Some(WordSize::W16),
            32 => Some(WordSize::W32),
            64 => Some(WordSize::W64),
            _ => None,
        }
    }

    pub fn mask(self) -> u64 {
        match self {
            WordSize::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Truncate a value to this word size
    pub fn truncate(self, value: u64) -> u64 {
        value & self.mask()
    }
}

/// Re-render a digit string from one radix in another
pub fn convert_base(text: &str, from: Radix, to: Radix) -> Result<String, RadixError> {
    Ok(to.format(from.parse(text)?))
}

// ============ Bitwise operations under a word size ============

pub fn bit_not(value: u64, size: WordSize) -> u64 {
    size.truncate(!value)
}

pub fn bit_and(a: u64, b: u64, size: WordSize) -> u64 {
    size.truncate(a & b)
}

pub fn bit_or(a: u64, b: u64, size: WordSize) -> u64 {
    size.truncate(a | b)
}

pub fn bit_xor(a: u64, b: u64, size: WordSize) -> u64 {
    size.truncate(a ^ b)
}

/// Shift left by one, dropping bits past the word size
pub fn shift_left(value: u64, size: WordSize) -> u64 {
    size.truncate(value << 1)
}

/// Logical shift right by one within the word size
pub fn shift_right(value: u64, size: WordSize) -> u64 {
    size.truncate(value) >> 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix_values() {
        assert_eq!(Radix::Binary.value(), 2);
        assert_eq!(Radix::Hexadecimal.value(), 16);
        assert_eq!(Radix::try_from_value(8), Some(Radix::Octal));
        assert_eq!(Radix::try_from_value(3), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Radix::Binary.parse("101"), Ok(5));
        assert_eq!(Radix::Octal.parse("17"), Ok(15));
        assert_eq!(Radix::Decimal.parse("255"), Ok(255));
        assert_eq!(Radix::Hexadecimal.parse("FF"), Ok(255));
        assert_eq!(Radix::Hexadecimal.parse("ff"), Ok(255));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Radix::Binary.parse(""), Err(RadixError::Empty));
        assert_eq!(Radix::Binary.parse("102"), Err(RadixError::InvalidDigit('2', 2)));
        assert_eq!(Radix::Decimal.parse("12a"), Err(RadixError::InvalidDigit('a', 10)));
        // 17 hex digits overflow 64 bits
        assert_eq!(
            Radix::Hexadecimal.parse("10000000000000000"),
            Err(RadixError::Overflow(16))
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(Radix::Binary.format(5), "101");
        assert_eq!(Radix::Octal.format(15), "17");
        assert_eq!(Radix::Decimal.format(255), "255");
        assert_eq!(Radix::Hexadecimal.format(255), "FF");
        assert_eq!(Radix::Hexadecimal.format(0), "0");
    }

    #[test]
    fn test_convert_base() {
        assert_eq!(convert_base("255", Radix::Decimal, Radix::Hexadecimal).unwrap(), "FF");
        assert_eq!(convert_base("FF", Radix::Hexadecimal, Radix::Binary).unwrap(), "11111111");
        assert_eq!(convert_base("101", Radix::Binary, Radix::Decimal).unwrap(), "5");
    }

    #[test]
    fn test_word_size_masks() {
        assert_eq!(WordSize::W8.mask(), 0xFF);
        assert_eq!(WordSize::W16.mask(), 0xFFFF);
        assert_eq!(WordSize::W32.mask(), 0xFFFF_FFFF);
        assert_eq!(WordSize::W64.mask(), u64::MAX);
        assert_eq!(WordSize::try_from_bits(12), None);
    }

    #[test]
    fn test_bit_not() {
        assert_eq!(bit_not(0, WordSize::W8), 0xFF);
        assert_eq!(bit_not(0b1010, WordSize::W8), 0b1111_0101);
        assert_eq!(bit_not(0, WordSize::W64), u64::MAX);
    }

    #[test]
    fn test_bitwise_pairs() {
        assert_eq!(bit_and(0b1100, 0b1010, WordSize::W8), 0b1000);
        assert_eq!(bit_or(0b1100, 0b1010, WordSize::W8), 0b1110);
        assert_eq!(bit_xor(0b1100, 0b1010, WordSize::W8), 0b0110);
    }

    #[test]
    fn test_shifts_respect_word_size() {
        // The high bit falls off an 8-bit word
        assert_eq!(shift_left(0b1000_0000, WordSize::W8), 0);
        assert_eq!(shift_left(0b0100_0000, WordSize::W8), 0b1000_0000);
        assert_eq!(shift_right(0b10, WordSize::W8), 0b1);
        // Bits above the word size are cleared before shifting right
        assert_eq!(shift_right(0x1FF, WordSize::W8), 0x7F);
    }
}
