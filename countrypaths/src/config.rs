use std::{fmt, path::PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// EU member states, uppercase ISO 3166-1 alpha-2.
pub const EU_CODES: &[&str] = &[
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

/// Partner countries outside the EU that are drawn on the map as well.
pub const EXTRA_CODES: &[&str] = &["SA", "AE"];

pub const DEFAULT_INPUT: &str = "../public/europe.svg";
pub const DEFAULT_OUTPUT: &str = "../src/data/countries.js";
pub const DEFAULT_CONSTANT: &str = "COUNTRIES";

/// Two letter uppercase country code, doubling as the `sm_state_` class suffix
/// in the map svg.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: &str) -> Result<Self, Error> {
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code.to_string()))
        } else {
            Err(Error::InvalidRegionCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class name fragment marking a path as this region.
    pub fn marker(&self) -> String {
        format!("sm_state_{}", self.0)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RegionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RegionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        RegionCode::new(&code).map_err(serde::de::Error::custom)
    }
}

/// Ordered selection of regions. Duplicates are dropped on insertion, the
/// first occurrence keeps its place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    codes: Vec<RegionCode>,
}

impl RegionSet {
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Result<Self, Error> {
        let mut set = Self::default();
        for code in codes {
            set.insert(RegionCode::new(code)?);
        }
        Ok(set)
    }

    /// [`EU_CODES`] followed by [`EXTRA_CODES`].
    pub fn selected() -> Self {
        let codes = EU_CODES
            .iter()
            .chain(EXTRA_CODES)
            .map(|code| RegionCode(code.to_string()));

        let mut set = Self::default();
        codes.for_each(|code| set.insert(code));
        set
    }

    pub fn insert(&mut self, code: RegionCode) {
        if !self.contains(&code) {
            self.codes.push(code);
        }
    }

    pub fn contains(&self, code: &RegionCode) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Name of the exported constant in the generated module.
    pub constant: String,
    pub regions: RegionSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            constant: DEFAULT_CONSTANT.to_string(),
            regions: RegionSet::selected(),
        }
    }
}
