//! Boundary validation for calculator inputs. The engine itself never
//! validates; the CLI and API reject out-of-range inputs here before the
//! pipeline runs.

use thiserror::Error;

use crate::constants::HORSEPOWER_RATINGS;
use crate::types::{CalculatorInput, PumpDrive};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("pool length must be between 10 and 100 feet")]
    PoolLength,
    #[error("pool width must be between 5 and 50 feet")]
    PoolWidth,
    #[error("shallow end must be between 2 and 6 feet")]
    ShallowDepth,
    #[error("deep end must be between 4 and 12 feet")]
    DeepDepth,
    #[error("horsepower must be one of 0.5, 0.75, 1.0, 1.5, 2.0, 2.5, or 3.0")]
    Horsepower,
    #[error("pump age must be between 0 and 30 years")]
    PumpAge,
    #[error("two-speed horsepower settings must be positive")]
    TwoSpeedSettings,
    #[error("low speed must be between 1000 and 2000 RPM")]
    LowRpm,
    #[error("medium speed must be between 2000 and 3000 RPM")]
    MediumRpm,
    #[error("high speed must be between 3000 and 3450 RPM")]
    HighRpm,
    #[error("latitude must be between -90 and 90")]
    Latitude,
    #[error("longitude must be between -180 and 180")]
    Longitude,
    #[error("state must be a two-letter code")]
    StateCode,
    #[error("average swimmers must be between 0 and 20")]
    Swimmers,
    #[error("electricity rate must be between $0 and $1 per kWh")]
    ElectricityRate,
    #[error("time-of-use rates must be between $0 and $1 per kWh")]
    TimeOfUseRate,
    #[error("peak hours must fall within 0-23")]
    PeakHours,
    #[error("current daily runtime must be between 1 and 24 hours")]
    CurrentRuntime,
}

pub fn validate_input(input: &CalculatorInput) -> Result<(), ValidationError> {
    let pool = &input.pool;
    if !(10.0..=100.0).contains(&pool.length) {
        return Err(ValidationError::PoolLength);
    }
    if !(5.0..=50.0).contains(&pool.width) {
        return Err(ValidationError::PoolWidth);
    }
    if !(2.0..=6.0).contains(&pool.depth.shallow) {
        return Err(ValidationError::ShallowDepth);
    }
    if !(4.0..=12.0).contains(&pool.depth.deep) {
        return Err(ValidationError::DeepDepth);
    }

    let pump = &input.pump;
    if !HORSEPOWER_RATINGS
        .iter()
        .any(|hp| (hp - pump.horsepower).abs() < f64::EPSILON)
    {
        return Err(ValidationError::Horsepower);
    }
    if !(0.0..=30.0).contains(&pump.age_years) {
        return Err(ValidationError::PumpAge);
    }
    match pump.drive {
        PumpDrive::SingleSpeed => {}
        PumpDrive::TwoSpeed { low_hp, high_hp } => {
            if low_hp <= 0.0 || high_hp <= 0.0 {
                return Err(ValidationError::TwoSpeedSettings);
            }
        }
        PumpDrive::VariableSpeed {
            low_rpm,
            medium_rpm,
            high_rpm,
        } => {
            if !(1000.0..=2000.0).contains(&low_rpm) {
                return Err(ValidationError::LowRpm);
            }
            if !(2000.0..=3000.0).contains(&medium_rpm) {
                return Err(ValidationError::MediumRpm);
            }
            if !(3000.0..=3450.0).contains(&high_rpm) {
                return Err(ValidationError::HighRpm);
            }
        }
    }

    let location = &input.location;
    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(ValidationError::Latitude);
    }
    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(ValidationError::Longitude);
    }
    if location.state.len() != 2 {
        return Err(ValidationError::StateCode);
    }

    if input.usage.average_swimmers > 20 {
        return Err(ValidationError::Swimmers);
    }

    let energy = &input.energy;
    if !(0.0..=1.0).contains(&energy.electricity_rate) {
        return Err(ValidationError::ElectricityRate);
    }
    if let Some(tou) = &energy.time_of_use {
        if !(0.0..=1.0).contains(&tou.peak_rate) || !(0.0..=1.0).contains(&tou.off_peak_rate) {
            return Err(ValidationError::TimeOfUseRate);
        }
        for window in &tou.peak_hours {
            if !(0.0..=23.0).contains(&window.start) || !(0.0..=23.0).contains(&window.end) {
                return Err(ValidationError::PeakHours);
            }
        }
    }
    if !(1.0..=24.0).contains(&energy.current_daily_runtime) {
        return Err(ValidationError::CurrentRuntime);
    }

    Ok(())
}
