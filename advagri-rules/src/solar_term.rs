//! The twenty-four solar terms that make up one AdvAgri year.
use serde::{Deserialize, Serialize};

use crate::validation::{BaseUnit, ConfigurationError};

/// Seasons grouping six consecutive solar terms each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Spring => "season.spring",
            Self::Summer => "season.summer",
            Self::Autumn => "season.autumn",
            Self::Winter => "season.winter",
        }
    }
}

/// One discrete phase of the solar calendar, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    #[default]
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    PureBrightness,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostsDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
    MinorCold,
    MajorCold,
}

impl SolarTerm {
    pub const ALL: [Self; 24] = [
        Self::StartOfSpring,
        Self::RainWater,
        Self::AwakeningOfInsects,
        Self::SpringEquinox,
        Self::PureBrightness,
        Self::GrainRain,
        Self::StartOfSummer,
        Self::GrainBuds,
        Self::GrainInEar,
        Self::SummerSolstice,
        Self::MinorHeat,
        Self::MajorHeat,
        Self::StartOfAutumn,
        Self::EndOfHeat,
        Self::WhiteDew,
        Self::AutumnEquinox,
        Self::ColdDew,
        Self::FrostsDescent,
        Self::StartOfWinter,
        Self::MinorSnow,
        Self::MajorSnow,
        Self::WinterSolstice,
        Self::MinorCold,
        Self::MajorCold,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Granularity every year length must divide evenly.
    ///
    /// # Errors
    ///
    /// Returns an error only if the term table is empty or too large for the
    /// rule value type.
    pub fn base_unit() -> Result<BaseUnit, ConfigurationError> {
        let count = i32::try_from(Self::COUNT).map_err(|_| ConfigurationError::BaseUnitOverflow {
            count: Self::COUNT,
        })?;
        BaseUnit::new(count)
    }

    /// Zero-based position in the year.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn season(self) -> Season {
        match self.index() / 6 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Get i18n key for the term name
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::StartOfSpring => "solar_term.start_of_spring",
            Self::RainWater => "solar_term.rain_water",
            Self::AwakeningOfInsects => "solar_term.awakening_of_insects",
            Self::SpringEquinox => "solar_term.spring_equinox",
            Self::PureBrightness => "solar_term.pure_brightness",
            Self::GrainRain => "solar_term.grain_rain",
            Self::StartOfSummer => "solar_term.start_of_summer",
            Self::GrainBuds => "solar_term.grain_buds",
            Self::GrainInEar => "solar_term.grain_in_ear",
            Self::SummerSolstice => "solar_term.summer_solstice",
            Self::MinorHeat => "solar_term.minor_heat",
            Self::MajorHeat => "solar_term.major_heat",
            Self::StartOfAutumn => "solar_term.start_of_autumn",
            Self::EndOfHeat => "solar_term.end_of_heat",
            Self::WhiteDew => "solar_term.white_dew",
            Self::AutumnEquinox => "solar_term.autumn_equinox",
            Self::ColdDew => "solar_term.cold_dew",
            Self::FrostsDescent => "solar_term.frosts_descent",
            Self::StartOfWinter => "solar_term.start_of_winter",
            Self::MinorSnow => "solar_term.minor_snow",
            Self::MajorSnow => "solar_term.major_snow",
            Self::WinterSolstice => "solar_term.winter_solstice",
            Self::MinorCold => "solar_term.minor_cold",
            Self::MajorCold => "solar_term.major_cold",
        }
    }
}
