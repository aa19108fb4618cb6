use std::{fmt, str::FromStr};

use super::NumberingError;

const ROMAN_VALUES: [u32; 13] = [1000, 900, 500, 400, 100, 90, 50, 40, 10, 9, 5, 4, 1];
const ROMAN_NUMERALS: [&str; 13] = [
    "M", "CM", "D", "CD", "C", "XC", "L", "XL", "X", "IX", "V", "IV", "I",
];
const ROMAN_MAX: u32 = 3999;

/// Numeral system of one list level.
///
/// Maps to `<w:numFmt w:val="..."/>` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumeralType {
    /// 1, 2, 3
    Decimal,
    /// 01, 02, 03
    DecimalZero,
    /// (1), (2), (3)
    DecimalParen,
    /// 1., 2., 3.
    DecimalFullStop,
    /// i, ii, iii
    LowerRoman,
    /// I, II, III
    UpperRoman,
    /// a, b, ..., z, aa
    LowerLetter,
    /// A, B, ..., Z, AA
    UpperLetter,
    Bullet,
    None,
}

impl NumeralType {
    pub const ALL: [NumeralType; 10] = [
        NumeralType::Decimal,
        NumeralType::DecimalZero,
        NumeralType::DecimalParen,
        NumeralType::DecimalFullStop,
        NumeralType::LowerRoman,
        NumeralType::UpperRoman,
        NumeralType::LowerLetter,
        NumeralType::UpperLetter,
        NumeralType::Bullet,
        NumeralType::None,
    ];

    /// Tag used by the list-format vocabulary.
    pub fn tag(&self) -> &'static str {
        match self {
            NumeralType::Decimal => "decimal",
            NumeralType::DecimalZero => "decimalZero",
            NumeralType::DecimalParen => "decimalEnclosedParen",
            NumeralType::DecimalFullStop => "decimalEnclosedFullstop",
            NumeralType::LowerRoman => "lowerRoman",
            NumeralType::UpperRoman => "upperRoman",
            NumeralType::LowerLetter => "lowerLetter",
            NumeralType::UpperLetter => "upperLetter",
            NumeralType::Bullet => "bullet",
            NumeralType::None => "none",
        }
    }

    /// Regex matching one rendered numeral. Contains no capturing groups.
    pub fn pattern(&self) -> &'static str {
        match self {
            NumeralType::Decimal => r"[0-9]+",
            NumeralType::DecimalZero => r"0*[0-9]+",
            NumeralType::DecimalParen => r"\([0-9]+\)",
            NumeralType::DecimalFullStop => r"[0-9]+\.",
            NumeralType::LowerRoman => r"m{0,3}(?:cm|cd|d?c{0,3})(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3})",
            NumeralType::UpperRoman => r"M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})",
            NumeralType::LowerLetter => r"[a-z]+",
            NumeralType::UpperLetter => r"[A-Z]+",
            NumeralType::Bullet => "\u{2022}",
            NumeralType::None => "",
        }
    }

    /// Whether `encode`/`decode` carry an actual value.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, NumeralType::Bullet | NumeralType::None)
    }

    pub fn encode(&self, value: u32) -> Result<String, NumberingError> {
        match self {
            NumeralType::Decimal => Ok(value.to_string()),
            NumeralType::DecimalZero => Ok(format!("{value:02}")),
            NumeralType::DecimalParen => Ok(format!("({value})")),
            NumeralType::DecimalFullStop => Ok(format!("{value}.")),
            NumeralType::LowerRoman => Ok(self.encode_roman(value)?.to_lowercase()),
            NumeralType::UpperRoman => self.encode_roman(value),
            NumeralType::LowerLetter => self.encode_letters(value, b'a'),
            NumeralType::UpperLetter => self.encode_letters(value, b'A'),
            NumeralType::Bullet => Ok("\u{2022}".to_string()),
            NumeralType::None => Ok(String::new()),
        }
    }

    pub fn decode(&self, text: &str) -> Result<u32, NumberingError> {
        match self {
            NumeralType::Decimal | NumeralType::DecimalZero => self.parse_digits(text),
            NumeralType::DecimalParen => {
                let inner = text
                    .strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                    .ok_or_else(|| self.unparsable(text))?;
                self.parse_digits(inner)
            }
            NumeralType::DecimalFullStop => {
                let inner = text.strip_suffix('.').ok_or_else(|| self.unparsable(text))?;
                self.parse_digits(inner)
            }
            NumeralType::LowerRoman | NumeralType::UpperRoman => self.decode_roman(text),
            NumeralType::LowerLetter => self.decode_letters(text, b'a'),
            NumeralType::UpperLetter => self.decode_letters(text, b'A'),
            NumeralType::Bullet | NumeralType::None => Ok(0),
        }
    }

    fn unparsable(&self, text: &str) -> NumberingError {
        NumberingError::Unparsable {
            numeral: *self,
            text: text.to_string(),
        }
    }

    fn parse_digits(&self, text: &str) -> Result<u32, NumberingError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.unparsable(text));
        }
        text.parse().map_err(|_| self.unparsable(text))
    }

    fn encode_roman(&self, value: u32) -> Result<String, NumberingError> {
        if value == 0 || value > ROMAN_MAX {
            return Err(NumberingError::OutOfRange {
                numeral: *self,
                value,
            });
        }

        let mut n = value;
        let mut result = String::new();
        for (&v, numeral) in ROMAN_VALUES.iter().zip(ROMAN_NUMERALS) {
            while n >= v {
                result.push_str(numeral);
                n -= v;
            }
        }
        Ok(result)
    }

    fn decode_roman(&self, text: &str) -> Result<u32, NumberingError> {
        let expected_case = match self {
            NumeralType::LowerRoman => text.chars().all(|c| c.is_ascii_lowercase()),
            _ => text.chars().all(|c| c.is_ascii_uppercase()),
        };
        if text.is_empty() || !expected_case {
            return Err(self.unparsable(text));
        }

        let upper = text.to_ascii_uppercase();
        let mut rest = upper.as_str();
        let mut value = 0;
        for (&v, numeral) in ROMAN_VALUES.iter().zip(ROMAN_NUMERALS) {
            while let Some(tail) = rest.strip_prefix(numeral) {
                value += v;
                rest = tail;
            }
        }

        // Greedy parsing accepts sloppy forms like "IIII"; only canonical
        // spellings round-trip.
        let canonical = self.encode_roman(value).ok();
        if !rest.is_empty() || canonical.as_deref() != Some(upper.as_str()) {
            return Err(self.unparsable(text));
        }
        Ok(value)
    }

    /// Bijective base-26: 1 -> a, 26 -> z, 27 -> aa.
    fn encode_letters(&self, value: u32, base: u8) -> Result<String, NumberingError> {
        if value == 0 {
            return Err(NumberingError::OutOfRange {
                numeral: *self,
                value,
            });
        }

        let mut n = value;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(base + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        Ok(letters.into_iter().map(char::from).collect())
    }

    fn decode_letters(&self, text: &str, base: u8) -> Result<u32, NumberingError> {
        if text.is_empty() {
            return Err(self.unparsable(text));
        }

        let mut value: u32 = 0;
        for b in text.bytes() {
            if !(base..base + 26).contains(&b) {
                return Err(self.unparsable(text));
            }
            let digit = u32::from(b - base) + 1;
            value = value
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| self.unparsable(text))?;
        }
        Ok(value)
    }
}

impl fmt::Display for NumeralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NumeralType {
    type Err = NumberingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" => Ok(NumeralType::Decimal),
            "decimalZero" => Ok(NumeralType::DecimalZero),
            "decimalEnclosedParen" => Ok(NumeralType::DecimalParen),
            "decimalEnclosedFullstop" | "decimalEnclosedFullStop" => {
                Ok(NumeralType::DecimalFullStop)
            }
            "lowerRoman" => Ok(NumeralType::LowerRoman),
            "upperRoman" => Ok(NumeralType::UpperRoman),
            "lowerLetter" => Ok(NumeralType::LowerLetter),
            "upperLetter" => Ok(NumeralType::UpperLetter),
            "bullet" => Ok(NumeralType::Bullet),
            "none" => Ok(NumeralType::None),
            _ => Err(NumberingError::UnknownNumeral(s.to_string())),
        }
    }
}
