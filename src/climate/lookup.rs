//! Static state-level climate data. Stands in for a live weather service;
//! unmapped states fall back to a generic mixed-humid profile.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{ClimateZone, LocationData, MonthlyTemperatures, SunlightHours};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateRecord {
    pub climate_zone: ClimateZone,
    pub avg_temperatures: MonthlyTemperatures,
    pub avg_sunlight_hours: SunlightHours,
    pub latitude: f64,
    pub longitude: f64,
    pub electricity_rate: f64,
}

/// Climate profile for a two-letter state code. Unmapped states get the
/// mixed-humid default.
pub fn climate_for_state(state: &str) -> ClimateRecord {
    let normalized = state.trim().to_ascii_uppercase();
    match normalized.as_str() {
        "FL" => ClimateRecord {
            climate_zone: ClimateZone::HotHumid,
            avg_temperatures: temperatures([68.0, 70.0, 74.0, 78.0, 82.0, 86.0, 88.0, 88.0, 86.0, 81.0, 75.0, 70.0]),
            avg_sunlight_hours: sunlight(7.0, 9.0, 10.0, 8.0),
            latitude: 28.0,
            longitude: -81.5,
            electricity_rate: 0.14,
        },
        "AZ" => ClimateRecord {
            climate_zone: ClimateZone::HotDry,
            avg_temperatures: temperatures([58.0, 62.0, 68.0, 76.0, 86.0, 95.0, 100.0, 98.0, 92.0, 80.0, 67.0, 58.0]),
            avg_sunlight_hours: sunlight(8.0, 10.0, 11.0, 9.0),
            latitude: 34.0,
            longitude: -111.0,
            electricity_rate: 0.13,
        },
        "CA" => ClimateRecord {
            climate_zone: ClimateZone::Marine,
            avg_temperatures: temperatures([58.0, 60.0, 62.0, 65.0, 68.0, 72.0, 75.0, 76.0, 75.0, 70.0, 64.0, 58.0]),
            avg_sunlight_hours: sunlight(7.0, 9.0, 11.0, 8.0),
            latitude: 37.0,
            longitude: -120.0,
            electricity_rate: 0.23,
        },
        "TX" => ClimateRecord {
            climate_zone: ClimateZone::HotHumid,
            avg_temperatures: temperatures([52.0, 56.0, 64.0, 72.0, 80.0, 86.0, 89.0, 89.0, 84.0, 74.0, 63.0, 54.0]),
            avg_sunlight_hours: sunlight(6.0, 8.0, 10.0, 7.0),
            latitude: 31.0,
            longitude: -100.0,
            electricity_rate: 0.12,
        },
        "NY" => ClimateRecord {
            climate_zone: ClimateZone::Cold,
            avg_temperatures: temperatures([32.0, 35.0, 43.0, 54.0, 64.0, 74.0, 79.0, 77.0, 70.0, 58.0, 47.0, 37.0]),
            avg_sunlight_hours: sunlight(5.0, 7.0, 9.0, 6.0),
            latitude: 43.0,
            longitude: -75.0,
            electricity_rate: 0.20,
        },
        "GA" => ClimateRecord {
            climate_zone: ClimateZone::MixedHumid,
            avg_temperatures: temperatures([45.0, 50.0, 58.0, 66.0, 74.0, 81.0, 84.0, 84.0, 78.0, 68.0, 58.0, 48.0]),
            avg_sunlight_hours: sunlight(6.0, 8.0, 9.0, 7.0),
            latitude: 33.0,
            longitude: -83.5,
            electricity_rate: 0.13,
        },
        "NC" => ClimateRecord {
            climate_zone: ClimateZone::MixedHumid,
            avg_temperatures: temperatures([42.0, 46.0, 54.0, 62.0, 70.0, 78.0, 81.0, 80.0, 74.0, 64.0, 54.0, 45.0]),
            avg_sunlight_hours: sunlight(6.0, 8.0, 9.0, 7.0),
            latitude: 35.5,
            longitude: -79.0,
            electricity_rate: 0.12,
        },
        "IL" => ClimateRecord {
            climate_zone: ClimateZone::Cold,
            avg_temperatures: temperatures([28.0, 32.0, 44.0, 56.0, 66.0, 76.0, 80.0, 78.0, 71.0, 59.0, 45.0, 32.0]),
            avg_sunlight_hours: sunlight(4.0, 7.0, 9.0, 6.0),
            latitude: 40.0,
            longitude: -89.0,
            electricity_rate: 0.14,
        },
        other => {
            warn!("no climate profile for state {other}, using mixed-humid defaults");
            default_climate()
        }
    }
}

fn default_climate() -> ClimateRecord {
    ClimateRecord {
        climate_zone: ClimateZone::MixedHumid,
        avg_temperatures: temperatures([45.0, 50.0, 58.0, 66.0, 74.0, 81.0, 84.0, 84.0, 78.0, 68.0, 58.0, 48.0]),
        avg_sunlight_hours: sunlight(6.0, 8.0, 9.0, 7.0),
        latitude: 35.0,
        longitude: -95.0,
        electricity_rate: 0.14,
    }
}

fn temperatures(by_month: [f64; 12]) -> MonthlyTemperatures {
    MonthlyTemperatures {
        jan: by_month[0],
        feb: by_month[1],
        mar: by_month[2],
        apr: by_month[3],
        may: by_month[4],
        jun: by_month[5],
        jul: by_month[6],
        aug: by_month[7],
        sep: by_month[8],
        oct: by_month[9],
        nov: by_month[10],
        dec: by_month[11],
    }
}

fn sunlight(winter: f64, spring: f64, summer: f64, fall: f64) -> SunlightHours {
    SunlightHours {
        winter,
        spring,
        summer,
        fall,
    }
}

/// Map a ZIP code to its state by prefix range. Returns "US" for ranges
/// outside the supported set.
pub fn state_for_zip(zip_code: &str) -> &'static str {
    let prefix: String = zip_code.chars().take(5).collect();
    let Ok(zip) = prefix.parse::<u32>() else {
        return "US";
    };
    match zip {
        32000..=34999 => "FL",
        85000..=86999 => "AZ",
        90000..=96199 => "CA",
        75000..=79999 => "TX",
        10000..=14999 => "NY",
        30000..=31999 => "GA",
        27000..=28999 => "NC",
        60000..=62999 => "IL",
        _ => "US",
    }
}

/// Average residential electricity rate for a state, in $/kWh.
pub fn electricity_rate_for_state(state: &str) -> f64 {
    climate_for_state(state).electricity_rate
}

pub fn location_for_state(state: &str) -> LocationData {
    let normalized = state.trim().to_ascii_uppercase();
    let record = climate_for_state(&normalized);
    LocationData {
        zip_code: String::new(),
        state: normalized,
        city: "Your City".to_string(),
        climate_zone: record.climate_zone,
        latitude: record.latitude,
        longitude: record.longitude,
        avg_temperatures: record.avg_temperatures,
        avg_sunlight_hours: record.avg_sunlight_hours,
    }
}

pub fn location_for_zip(zip_code: &str) -> LocationData {
    let state = state_for_zip(zip_code);
    let mut location = location_for_state(state);
    location.zip_code = zip_code.to_string();
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn florida_is_hot_humid_with_warm_winters() {
        let record = climate_for_state("FL");
        assert_eq!(record.climate_zone, ClimateZone::HotHumid);
        assert!(record.avg_temperatures.jan > 60.0);
    }

    #[test]
    fn new_york_is_cold_with_cold_winters() {
        let record = climate_for_state("NY");
        assert_eq!(record.climate_zone, ClimateZone::Cold);
        assert!(record.avg_temperatures.jan < 40.0);
    }

    #[test]
    fn arizona_summers_are_extreme() {
        let record = climate_for_state("AZ");
        assert_eq!(record.climate_zone, ClimateZone::HotDry);
        assert!(record.avg_temperatures.jul > 95.0);
    }

    #[test]
    fn unknown_states_get_mixed_humid_defaults() {
        let record = climate_for_state("XX");
        assert_eq!(record.climate_zone, ClimateZone::MixedHumid);
        assert_eq!(record.avg_temperatures.jan, 45.0);
        assert_eq!(record.avg_sunlight_hours.winter, 6.0);
    }

    #[test]
    fn state_lookup_is_case_insensitive() {
        assert_eq!(climate_for_state("fl"), climate_for_state("FL"));
    }

    #[test]
    fn zip_ranges_map_to_states() {
        assert_eq!(state_for_zip("33101"), "FL");
        assert_eq!(state_for_zip("85001"), "AZ");
        assert_eq!(state_for_zip("10001"), "NY");
        assert_eq!(state_for_zip("99999"), "US");
        assert_eq!(state_for_zip("bogus"), "US");
    }

    #[test]
    fn location_for_zip_carries_the_zip() {
        let location = location_for_zip("33101");
        assert_eq!(location.state, "FL");
        assert_eq!(location.zip_code, "33101");
        assert_eq!(location.climate_zone, ClimateZone::HotHumid);
    }

    #[test]
    fn florida_winter_sun_beats_illinois() {
        let fl = climate_for_state("FL");
        let il = climate_for_state("IL");
        assert!(fl.avg_sunlight_hours.winter > il.avg_sunlight_hours.winter);
    }

    #[test]
    fn state_rates_differ() {
        assert_eq!(electricity_rate_for_state("CA"), 0.23);
        assert_eq!(electricity_rate_for_state("TX"), 0.12);
        assert_eq!(electricity_rate_for_state("ZZ"), 0.14);
    }
}
