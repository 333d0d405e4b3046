use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PoolShape {
    Rectangular,
    Oval,
    Round,
    Kidney,
    Freeform,
}

impl Display for PoolShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Rectangular => "rectangular",
            Self::Oval => "oval",
            Self::Round => "round",
            Self::Kidney => "kidney",
            Self::Freeform => "freeform",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown pool shape: {0}")]
pub struct PoolShapeParseError(pub String);

impl FromStr for PoolShape {
    type Err = PoolShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangular" | "rectangle" => Ok(Self::Rectangular),
            "oval" => Ok(Self::Oval),
            "round" | "circular" => Ok(Self::Round),
            "kidney" => Ok(Self::Kidney),
            "freeform" | "free-form" => Ok(Self::Freeform),
            _ => Err(PoolShapeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PoolType {
    InGround,
    AboveGround,
}

impl Display for PoolType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InGround => write!(f, "in-ground"),
            Self::AboveGround => write!(f, "above-ground"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown pool type: {0}")]
pub struct PoolTypeParseError(pub String);

impl FromStr for PoolType {
    type Err = PoolTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-ground" | "inground" => Ok(Self::InGround),
            "above-ground" | "aboveground" => Ok(Self::AboveGround),
            _ => Err(PoolTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DepthProfile {
    pub shallow: f64,
    pub deep: f64,
}

impl DepthProfile {
    pub fn average(&self) -> f64 {
        (self.shallow + self.deep) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoolSpecs {
    pub length: f64,
    pub width: f64,
    pub depth: DepthProfile,
    pub shape: PoolShape,
    pub pool_type: PoolType,
}

/// Drive hardware of the pump. Each variant carries the settings that only
/// exist for that drive, so downstream branches never see half-configured
/// hardware.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PumpDrive {
    SingleSpeed,
    TwoSpeed {
        low_hp: f64,
        high_hp: f64,
    },
    VariableSpeed {
        low_rpm: f64,
        medium_rpm: f64,
        high_rpm: f64,
    },
}

impl PumpDrive {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::SingleSpeed => "single-speed",
            Self::TwoSpeed { .. } => "two-speed",
            Self::VariableSpeed { .. } => "variable-speed",
        }
    }

    pub fn is_variable_speed(&self) -> bool {
        matches!(self, Self::VariableSpeed { .. })
    }
}

impl Display for PumpDrive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpSpecs {
    pub drive: PumpDrive,
    pub horsepower: f64,
    pub age_years: f64,
    pub flow_rate_gpm: Option<f64>,
}

impl PumpSpecs {
    pub fn single_speed(horsepower: f64, age_years: f64) -> Self {
        Self {
            drive: PumpDrive::SingleSpeed,
            horsepower,
            age_years,
            flow_rate_gpm: None,
        }
    }

    /// The same pump hardware treated as single-speed. Used for the
    /// unoptimized cost baseline.
    pub fn as_single_speed(&self) -> Self {
        Self {
            drive: PumpDrive::SingleSpeed,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedSetting {
    Low,
    Medium,
    High,
}

impl Display for SpeedSetting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClimateZone {
    HotHumid,
    HotDry,
    MixedHumid,
    MixedDry,
    Cold,
    VeryCold,
    Marine,
}

impl Display for ClimateZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::HotHumid => "hot-humid",
            Self::HotDry => "hot-dry",
            Self::MixedHumid => "mixed-humid",
            Self::MixedDry => "mixed-dry",
            Self::Cold => "cold",
            Self::VeryCold => "very-cold",
            Self::Marine => "marine",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based month index, wrapping out-of-range values.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The calendar month right now. The only clock read in the crate;
    /// everything downstream takes the month as an explicit parameter.
    pub fn current() -> Self {
        Self::from_index(Utc::now().month0() as usize)
    }

    pub fn is_winter(self) -> bool {
        matches!(self, Month::Dec | Month::Jan | Month::Feb)
    }

    pub fn season(self) -> Season {
        match self {
            Month::Dec | Month::Jan | Month::Feb => Season::Winter,
            Month::Mar | Month::Apr | Month::May => Season::Spring,
            Month::Jun | Month::Jul | Month::Aug => Season::Summer,
            Month::Sep | Month::Oct | Month::Nov => Season::Fall,
        }
    }

    pub fn as_slug(self) -> &'static str {
        match self {
            Month::Jan => "jan",
            Month::Feb => "feb",
            Month::Mar => "mar",
            Month::Apr => "apr",
            Month::May => "may",
            Month::Jun => "jun",
            Month::Jul => "jul",
            Month::Aug => "aug",
            Month::Sep => "sep",
            Month::Oct => "oct",
            Month::Nov => "nov",
            Month::Dec => "dec",
        }
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown month: {0}")]
pub struct MonthParseError(pub String);

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Ok(number) = normalized.parse::<usize>() {
            if (1..=12).contains(&number) {
                return Ok(Self::from_index(number - 1));
            }
            return Err(MonthParseError(s.to_string()));
        }
        let month = Self::ALL
            .iter()
            .find(|m| normalized.starts_with(m.as_slug()));
        match month {
            Some(m) => Ok(*m),
            None => Err(MonthParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTemperatures {
    pub jan: f64,
    pub feb: f64,
    pub mar: f64,
    pub apr: f64,
    pub may: f64,
    pub jun: f64,
    pub jul: f64,
    pub aug: f64,
    pub sep: f64,
    pub oct: f64,
    pub nov: f64,
    pub dec: f64,
}

impl MonthlyTemperatures {
    pub fn for_month(&self, month: Month) -> f64 {
        match month {
            Month::Jan => self.jan,
            Month::Feb => self.feb,
            Month::Mar => self.mar,
            Month::Apr => self.apr,
            Month::May => self.may,
            Month::Jun => self.jun,
            Month::Jul => self.jul,
            Month::Aug => self.aug,
            Month::Sep => self.sep,
            Month::Oct => self.oct,
            Month::Nov => self.nov,
            Month::Dec => self.dec,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SunlightHours {
    pub winter: f64,
    pub spring: f64,
    pub summer: f64,
    pub fall: f64,
}

impl SunlightHours {
    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationData {
    pub zip_code: String,
    pub state: String,
    pub city: String,
    pub climate_zone: ClimateZone,
    pub latitude: f64,
    pub longitude: f64,
    pub avg_temperatures: MonthlyTemperatures,
    pub avg_sunlight_hours: SunlightHours,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UsageLevel {
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Error)]
#[error("unknown usage level: {0}")]
pub struct UsageLevelParseError(pub String);

impl FromStr for UsageLevel {
    type Err = UsageLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "heavy" => Ok(Self::Heavy),
            _ => Err(UsageLevelParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LandscapingDensity {
    Minimal,
    Moderate,
    Heavy,
}

#[derive(Debug, Error)]
#[error("unknown landscaping density: {0}")]
pub struct LandscapingParseError(pub String);

impl FromStr for LandscapingDensity {
    type Err = LandscapingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "moderate" => Ok(Self::Moderate),
            "heavy" => Ok(Self::Heavy),
            _ => Err(LandscapingParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WaterClarity {
    CrystalClear,
    SlightlyCloudy,
    Cloudy,
}

#[derive(Debug, Error)]
#[error("unknown water clarity: {0}")]
pub struct WaterClarityParseError(pub String);

impl FromStr for WaterClarity {
    type Err = WaterClarityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crystal-clear" | "clear" => Ok(Self::CrystalClear),
            "slightly-cloudy" => Ok(Self::SlightlyCloudy),
            "cloudy" => Ok(Self::Cloudy),
            _ => Err(WaterClarityParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageFactors {
    pub usage_level: UsageLevel,
    pub average_swimmers: u32,
    pub landscaping: LandscapingDensity,
    pub screen_enclosure: bool,
    pub has_waterfall: bool,
    pub has_heater: bool,
    pub has_salt_system: bool,
    pub water_clarity: WaterClarity,
}

impl UsageFactors {
    pub fn moderate() -> Self {
        Self {
            usage_level: UsageLevel::Moderate,
            average_swimmers: 2,
            landscaping: LandscapingDensity::Moderate,
            screen_enclosure: false,
            has_waterfall: false,
            has_heater: false,
            has_salt_system: false,
            water_clarity: WaterClarity::SlightlyCloudy,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourRange {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeOfUseRates {
    pub peak_rate: f64,
    pub off_peak_rate: f64,
    pub peak_hours: Vec<HourRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyCostData {
    pub electricity_rate: f64,
    pub time_of_use: Option<TimeOfUseRates>,
    /// Hours per day the pump runs today, before optimization.
    pub current_daily_runtime: f64,
}

impl EnergyCostData {
    pub fn flat_rate(electricity_rate: f64, current_daily_runtime: f64) -> Self {
        Self {
            electricity_rate,
            time_of_use: None,
            current_daily_runtime,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatorInput {
    pub pool: PoolSpecs,
    pub pump: PumpSpecs,
    pub location: LocationData,
    pub usage: UsageFactors,
    pub energy: EnergyCostData,
}

impl CalculatorInput {
    /// A representative Miami configuration, used as the CLI default and
    /// in tests.
    pub fn sample() -> Self {
        let mut location = crate::climate::location_for_state("FL");
        location.city = "Miami".to_string();
        location.zip_code = "33101".to_string();
        Self {
            pool: PoolSpecs {
                length: 30.0,
                width: 15.0,
                depth: DepthProfile {
                    shallow: 4.0,
                    deep: 8.0,
                },
                shape: PoolShape::Rectangular,
                pool_type: PoolType::InGround,
            },
            pump: PumpSpecs::single_speed(1.5, 3.0),
            location,
            usage: UsageFactors::moderate(),
            energy: EnergyCostData::flat_rate(0.14, 12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parses_names_and_numbers() {
        assert_eq!("jul".parse::<Month>().unwrap(), Month::Jul);
        assert_eq!("January".parse::<Month>().unwrap(), Month::Jan);
        assert_eq!("12".parse::<Month>().unwrap(), Month::Dec);
        assert!("13".parse::<Month>().is_err());
        assert!("notamonth".parse::<Month>().is_err());
    }

    #[test]
    fn month_index_wraps() {
        assert_eq!(Month::from_index(0), Month::Jan);
        assert_eq!(Month::from_index(11), Month::Dec);
        assert_eq!(Month::from_index(12), Month::Jan);
    }

    #[test]
    fn seasons_cover_the_year() {
        assert_eq!(Month::Dec.season(), Season::Winter);
        assert_eq!(Month::Feb.season(), Season::Winter);
        assert_eq!(Month::Apr.season(), Season::Spring);
        assert_eq!(Month::Jul.season(), Season::Summer);
        assert_eq!(Month::Oct.season(), Season::Fall);
    }

    #[test]
    fn pump_drive_serializes_with_type_tag() {
        let drive = PumpDrive::TwoSpeed {
            low_hp: 0.75,
            high_hp: 1.5,
        };
        let json = serde_json::to_value(&drive).unwrap();
        assert_eq!(json["type"], "two-speed");
        assert_eq!(json["low_hp"], 0.75);

        let parsed: PumpDrive = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, drive);
    }

    #[test]
    fn pool_shape_round_trips_kebab_case() {
        let json = serde_json::to_string(&PoolShape::Freeform).unwrap();
        assert_eq!(json, "\"freeform\"");
        let parsed: PoolType = serde_json::from_str("\"above-ground\"").unwrap();
        assert_eq!(parsed, PoolType::AboveGround);
    }
}
