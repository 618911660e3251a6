//! Freight estimate by ZIP zone.
//!
//! Freight is priced independently of the structure: the ZIP's leading digit
//! picks a geographic zone with its own base band, the plan area scales it
//! (bigger footprint, more pallets) and HDG steel ships heavier.
//!
//! Without a usable ZIP (fewer than five leading digits) there is no freight
//! estimate at all. That is a distinct "unknown" state, never a zero.

use serde::{Deserialize, Serialize};

use crate::catalog::Finish;
use crate::config::StructureConfig;
use crate::units::{SqFt, Usd};

/// Geographic shipping bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreightZone {
    /// East (ZIP 0–2)
    A,
    /// Southeast (3–4)
    B,
    /// Midwest (5)
    C,
    /// Mountain (6–7)
    D,
    /// Interior West (8)
    E,
    /// West Coast (9)
    F,
}

impl FreightZone {
    pub fn from_leading_digit(digit: u8) -> FreightZone {
        match digit {
            0..=2 => FreightZone::A,
            3 | 4 => FreightZone::B,
            5 => FreightZone::C,
            6 | 7 => FreightZone::D,
            8 => FreightZone::E,
            _ => FreightZone::F,
        }
    }
}

impl std::fmt::Display for FreightZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            FreightZone::A => "A",
            FreightZone::B => "B",
            FreightZone::C => "C",
            FreightZone::D => "D",
            FreightZone::E => "E",
            FreightZone::F => "F",
        };
        write!(f, "{}", letter)
    }
}

/// Low/high freight band before size and finish factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

/// Base band for every zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBands {
    pub a: Band,
    pub b: Band,
    pub c: Band,
    pub d: Band,
    pub e: Band,
    pub f: Band,
}

impl ZoneBands {
    pub fn band(&self, zone: FreightZone) -> Band {
        match zone {
            FreightZone::A => self.a,
            FreightZone::B => self.b,
            FreightZone::C => self.c,
            FreightZone::D => self.d,
            FreightZone::E => self.e,
            FreightZone::F => self.f,
        }
    }
}

/// Plan areas strictly below `below_sqft` use `factor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeStep {
    pub below_sqft: f64,
    pub factor: f64,
}

/// Freight rate tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightTables {
    pub zones: ZoneBands,

    /// Ascending by `below_sqft`
    pub size_steps: Vec<SizeStep>,

    /// Factor for areas past the last step
    pub max_size_factor: f64,

    /// Extra weight/bulk of galvanized steel
    pub hdg_multiplier: f64,
}

impl Default for FreightTables {
    fn default() -> Self {
        FreightTables {
            zones: ZoneBands {
                a: Band { low: 650.0, high: 1000.0 },
                b: Band { low: 700.0, high: 1100.0 },
                c: Band { low: 800.0, high: 1200.0 },
                d: Band { low: 900.0, high: 1400.0 },
                e: Band { low: 950.0, high: 1500.0 },
                f: Band { low: 800.0, high: 1200.0 },
            },
            size_steps: vec![
                SizeStep { below_sqft: 150.0, factor: 0.9 },
                SizeStep { below_sqft: 250.0, factor: 1.0 },
                SizeStep { below_sqft: 400.0, factor: 1.1 },
            ],
            max_size_factor: 1.25,
            hdg_multiplier: 1.1,
        }
    }
}

impl FreightTables {
    pub fn size_factor(&self, area_sqft: f64) -> f64 {
        self.size_steps
            .iter()
            .find(|step| area_sqft < step.below_sqft)
            .map(|step| step.factor)
            .unwrap_or(self.max_size_factor)
    }
}

/// Zone and plan area behind a freight estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreightMeta {
    pub zone: FreightZone,
    pub area: SqFt,
}

/// Unrounded freight range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreightRange {
    pub low: Usd,
    pub high: Usd,
    pub meta: FreightMeta,
}

/// Zone for a ZIP, or `None` unless it starts with five digits.
///
/// ZIP+4 (`"84101-1234"`) and surrounding whitespace are accepted.
pub fn zone_for_zip(zip: &str) -> Option<FreightZone> {
    let zip = zip.trim();
    let digits = zip.bytes().take_while(u8::is_ascii_digit).count();
    if digits < 5 {
        return None;
    }
    zip.bytes()
        .next()
        .map(|first| FreightZone::from_leading_digit(first - b'0'))
}

/// Freight range for a configuration shipped to `zip`.
pub fn freight_range(config: &StructureConfig, zip: Option<&str>, tables: &FreightTables) -> Option<FreightRange> {
    let zone = zip.and_then(zone_for_zip)?;
    let area = config.area_sqft();
    let band = tables.zones.band(zone);

    let mut factor = tables.size_factor(area);
    if config.finish == Finish::Hdg {
        factor *= tables.hdg_multiplier;
    }

    Some(FreightRange {
        low: Usd(band.low * factor),
        high: Usd(band.high * factor),
        meta: FreightMeta {
            zone,
            area: SqFt(area),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_gating() {
        assert_eq!(zone_for_zip(""), None);
        assert_eq!(zone_for_zip("1234"), None);
        assert_eq!(zone_for_zip("12a45"), None);
        assert_eq!(zone_for_zip("ABCDE"), None);
        assert_eq!(zone_for_zip("12345"), Some(FreightZone::A));
        assert_eq!(zone_for_zip(" 84101 "), Some(FreightZone::E));
        assert_eq!(zone_for_zip("84101-1234"), Some(FreightZone::E));
    }

    #[test]
    fn test_zone_digits() {
        let expected = [
            FreightZone::A,
            FreightZone::A,
            FreightZone::A,
            FreightZone::B,
            FreightZone::B,
            FreightZone::C,
            FreightZone::D,
            FreightZone::D,
            FreightZone::E,
            FreightZone::F,
        ];
        for (digit, zone) in expected.iter().enumerate() {
            assert_eq!(FreightZone::from_leading_digit(digit as u8), *zone);
        }
    }

    #[test]
    fn test_size_factor_steps() {
        let tables = FreightTables::default();
        assert_eq!(tables.size_factor(144.0), 0.9);
        assert_eq!(tables.size_factor(150.0), 1.0);
        assert_eq!(tables.size_factor(399.0), 1.1);
        assert_eq!(tables.size_factor(400.0), 1.25);
        assert_eq!(tables.size_factor(720.0), 1.25);
    }

    #[test]
    fn test_freight_range_12x12_east() {
        let config = StructureConfig::default();
        let range = freight_range(&config, Some("02134"), &FreightTables::default()).unwrap();
        assert_eq!(range.meta.zone, FreightZone::A);
        assert_eq!(range.meta.area, SqFt(144.0));
        assert!((range.low.0 - 585.0).abs() < 1e-9);
        assert!((range.high.0 - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_hdg_ships_heavier() {
        let black = StructureConfig::default();
        let hdg = StructureConfig {
            finish: Finish::Hdg,
            ..black
        };
        let tables = FreightTables::default();
        let a = freight_range(&black, Some("84101"), &tables).unwrap();
        let b = freight_range(&hdg, Some("84101"), &tables).unwrap();
        assert!(b.low.0 > a.low.0);
        assert!((b.high.0 / a.high.0 - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_no_zip_no_freight() {
        let config = StructureConfig::default();
        let tables = FreightTables::default();
        assert!(freight_range(&config, None, &tables).is_none());
        assert!(freight_range(&config, Some("123"), &tables).is_none());
    }
}
