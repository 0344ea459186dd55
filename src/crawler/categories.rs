//! Fixed climate categories and their seed sites
//!
//! The category table is process-wide read-only configuration: defined here
//! at compile time, never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CrawlError;

/// A climate-change topic with a fixed list of seed sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CarbonEmissions,
    ElectricVehicles,
    SeaLevelRise,
    Temperature,
    Ecosystems,
}

impl Category {
    /// Every supported category, in declaration order
    pub const ALL: [Category; 5] = [
        Category::CarbonEmissions,
        Category::ElectricVehicles,
        Category::SeaLevelRise,
        Category::Temperature,
        Category::Ecosystems,
    ];

    /// Stable kebab-case identifier
    pub fn slug(self) -> &'static str {
        match self {
            Category::CarbonEmissions => "carbon-emissions",
            Category::ElectricVehicles => "electric-vehicles",
            Category::SeaLevelRise => "sea-level-rise",
            Category::Temperature => "temperature",
            Category::Ecosystems => "ecosystems",
        }
    }

    /// Korean label the upstream data set uses; accepted as a parse alias
    pub fn label(self) -> &'static str {
        match self {
            Category::CarbonEmissions => "탄소배출",
            Category::ElectricVehicles => "전기차",
            Category::SeaLevelRise => "해수면상승",
            Category::Temperature => "기온",
            Category::Ecosystems => "생태계",
        }
    }

    /// Seed sites crawled for this category, in declaration order
    pub fn seed_urls(self) -> &'static [&'static str] {
        match self {
            Category::CarbonEmissions => &[
                "https://www.ipcc.ch/",
                "https://www.epa.gov/ghgemissions",
                "https://www.carbonbrief.org/",
            ],
            Category::ElectricVehicles => &[
                "https://www.iea.org/topics/transport",
                "https://www.ev-volumes.com/",
                "https://cleantechnica.com/",
            ],
            Category::SeaLevelRise => &[
                "https://sealevel.nasa.gov/",
                "https://www.climate.gov/news-features/understanding-climate/climate-change-global-sea-level",
                "https://ocean.si.edu/through-time/ancient-seas/sea-level-rise",
            ],
            Category::Temperature => &[
                "https://climate.nasa.gov/vital-signs/global-temperature/",
                "https://www.ncei.noaa.gov/products/land-based-station/global-historical-climatology-network-monthly",
                "https://data.giss.nasa.gov/gistemp/",
            ],
            Category::Ecosystems => &[
                "https://www.iucn.org/our-work/topic/climate-change",
                "https://www.worldwildlife.org/threats/effects-of-climate-change",
                "https://www.nationalgeographic.com/environment/article/climate-change",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase();

        for category in Self::ALL {
            if normalized == category.slug() || trimmed == category.label() {
                return Ok(category);
            }
        }

        Err(CrawlError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        assert_eq!(
            "sea-level-rise".parse::<Category>().unwrap(),
            Category::SeaLevelRise
        );
        assert_eq!(
            "Carbon-Emissions".parse::<Category>().unwrap(),
            Category::CarbonEmissions
        );
    }

    #[test]
    fn test_parse_korean_label() {
        assert_eq!("탄소배출".parse::<Category>().unwrap(), Category::CarbonEmissions);
        assert_eq!("생태계".parse::<Category>().unwrap(), Category::Ecosystems);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "volcanoes".parse::<Category>().unwrap_err();
        assert!(matches!(err, CrawlError::UnknownCategory(_)));
    }

    #[test]
    fn test_every_category_has_seeds() {
        for category in Category::ALL {
            assert!(!category.seed_urls().is_empty(), "{category} has no seeds");
        }
    }

    #[test]
    fn test_display_matches_slug() {
        assert_eq!(Category::Temperature.to_string(), "temperature");
    }
}
