use std::fmt;
use std::str::FromStr;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    #[default]
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// Get error correction level from its letter (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'L' => Some(ECLevel::L),
            'M' => Some(ECLevel::M),
            'Q' => Some(ECLevel::Q),
            'H' => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Approximate share of codewords that can be restored
    pub fn recovery_percent(&self) -> u8 {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(letter)
    }
}

impl FromStr for ECLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| format!("unknown EC level: {s}"))
            }
            _ => Err(format!("unknown EC level: {s}")),
        }
    }
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(level: ECLevel) -> Self {
        match level {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}
