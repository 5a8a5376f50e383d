use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// Linear symbol families the scanner can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    /// EAN-13 retail code
    Ean13,
    /// EAN-13 with a Bookland prefix (978/979)
    Isbn13,
    /// Legacy 10-character ISBN derived from a 978-prefixed EAN-13
    Isbn10,
}

impl Symbology {
    /// Every supported family, in classification priority order
    pub const ALL: [Symbology; 3] = [Symbology::Isbn13, Symbology::Isbn10, Symbology::Ean13];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::Isbn13 => "ISBN-13",
            Symbology::Isbn10 => "ISBN-10",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Symbology::Ean13 => 1,
            Symbology::Isbn13 => 1 << 1,
            Symbology::Isbn10 => 1 << 2,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "ean13" => Ok(Symbology::Ean13),
            "isbn13" => Ok(Symbology::Isbn13),
            "isbn10" => Ok(Symbology::Isbn10),
            _ => Err(ScanError::UnknownSymbology(s.trim().to_string())),
        }
    }
}

/// Set of enabled families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbologySet(u8);

impl SymbologySet {
    /// No family enabled
    pub fn empty() -> Self {
        Self(0)
    }

    /// EAN-13, ISBN-13 and ISBN-10
    pub fn all() -> Self {
        Symbology::ALL.into_iter().collect()
    }

    /// True when `symbology` is enabled
    pub fn contains(&self, symbology: Symbology) -> bool {
        self.0 & symbology.bit() != 0
    }

    /// Enable `symbology`
    pub fn insert(&mut self, symbology: Symbology) {
        self.0 |= symbology.bit();
    }

    /// Disable `symbology`
    pub fn remove(&mut self, symbology: Symbology) {
        self.0 &= !symbology.bit();
    }

    /// True when no family is enabled
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Enabled families in classification priority order
    pub fn iter(&self) -> impl Iterator<Item = Symbology> + '_ {
        Symbology::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<Symbology> for SymbologySet {
    fn from_iter<I: IntoIterator<Item = Symbology>>(iter: I) -> Self {
        let mut set = SymbologySet::empty();
        for symbology in iter {
            set.insert(symbology);
        }
        set
    }
}

impl FromStr for SymbologySet {
    type Err = ScanError;

    /// Parse a comma separated list such as `ean13,isbn13`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<Symbology>)
            .collect()
    }
}
