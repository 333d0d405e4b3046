use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::engine::ScheduleBlock;
use crate::types::{EnergyCostData, LocationData, Month, PumpDrive, PumpSpecs, SpeedSetting};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SunTimes {
    pub sunrise: f64,
    pub sunset: f64,
}

/// Rough sunrise/sunset estimate from latitude and month, using the
/// standard solar declination approximation. Results are rounded to whole
/// hours and clamped to residential timer windows.
pub fn estimate_sun_times(latitude: f64, month: Month) -> SunTimes {
    let day_of_year = month.index() as f64 * 30.0;
    let declination = -23.45 * ((360.0 / 365.0) * (day_of_year + 10.0) * (PI / 180.0)).cos();

    let lat_rad = latitude * (PI / 180.0);
    let dec_rad = declination * (PI / 180.0);

    // Polar latitudes push the cosine argument out of range; clamp instead
    // of producing NaN.
    let hour_angle = (-lat_rad.tan() * dec_rad.tan()).clamp(-1.0, 1.0).acos();
    let day_length = 2.0 * hour_angle * 12.0 / PI;

    let sunrise = 12.0 - day_length / 2.0;
    let sunset = 12.0 + day_length / 2.0;

    SunTimes {
        sunrise: sunrise.round().clamp(5.0, 8.0),
        sunset: sunset.round().clamp(17.0, 21.0),
    }
}

/// Build the daily operating blocks for the optimal runtime. Strategy
/// depends on the drive: variable-speed splits 70/30 between low and high
/// speed, two-speed 60/40, and single-speed only shifts its timing.
pub fn generate_schedule(
    runtime: f64,
    location: &LocationData,
    energy: &EnergyCostData,
    pump: &PumpSpecs,
    month: Month,
) -> Vec<ScheduleBlock> {
    let mut schedule = Vec::new();
    let sun = estimate_sun_times(location.latitude, month);

    match &pump.drive {
        PumpDrive::VariableSpeed { .. } => {
            let low_speed_hours = runtime * 0.7;
            let high_speed_hours = runtime * 0.3;

            if energy.time_of_use.is_some() {
                // High speed in the early-morning off-peak window.
                schedule.push(ScheduleBlock::at_speed(
                    6.0,
                    (6.0 + high_speed_hours).min(24.0),
                    SpeedSetting::High,
                ));

                // Low speed overnight, split across midnight when needed.
                let night_start = 22.0;
                let night_end = night_start + low_speed_hours;
                if night_end <= 24.0 {
                    schedule.push(ScheduleBlock::at_speed(
                        night_start,
                        night_end,
                        SpeedSetting::Low,
                    ));
                } else {
                    schedule.push(ScheduleBlock::at_speed(night_start, 24.0, SpeedSetting::Low));
                    schedule.push(ScheduleBlock::at_speed(
                        0.0,
                        night_end - 24.0,
                        SpeedSetting::Low,
                    ));
                }
            } else {
                // No TOU pricing: circulate during sunlight to keep algae
                // down. High speed just before sunrise, low speed through
                // the afternoon heat.
                let morning_start = (sun.sunrise - 1.0).max(6.0);
                schedule.push(ScheduleBlock::at_speed(
                    morning_start,
                    (morning_start + high_speed_hours).min(24.0),
                    SpeedSetting::High,
                ));

                let afternoon_start = 14.0;
                schedule.push(ScheduleBlock::at_speed(
                    afternoon_start,
                    (afternoon_start + low_speed_hours).min(24.0),
                    SpeedSetting::Low,
                ));
            }
        }
        PumpDrive::TwoSpeed { .. } => {
            let high_speed_hours = runtime * 0.4;
            let low_speed_hours = runtime * 0.6;

            schedule.push(ScheduleBlock::at_speed(
                8.0,
                (8.0 + high_speed_hours).min(24.0),
                SpeedSetting::High,
            ));
            schedule.push(ScheduleBlock::at_speed(
                18.0,
                (18.0 + low_speed_hours).min(24.0),
                SpeedSetting::Low,
            ));
        }
        PumpDrive::SingleSpeed => {
            if let Some(tou) = &energy.time_of_use {
                // Start as soon as the peak window closes.
                let off_peak_start = tou.peak_hours.first().map(|w| w.end).unwrap_or(20.0);

                if runtime <= 24.0 - off_peak_start {
                    schedule.push(ScheduleBlock::new(
                        off_peak_start,
                        (off_peak_start + runtime).min(24.0),
                    ));
                } else {
                    schedule.push(ScheduleBlock::new(off_peak_start, 24.0));
                    schedule.push(ScheduleBlock::new(0.0, runtime - (24.0 - off_peak_start)));
                }
            } else {
                // Split into two blocks for even circulation.
                let first_block_hours = (runtime / 2.0).ceil();
                let second_block_hours = runtime - first_block_hours;

                schedule.push(ScheduleBlock::new(8.0, 8.0 + first_block_hours));
                if second_block_hours > 0.0 {
                    schedule.push(ScheduleBlock::new(18.0, 18.0 + second_block_hours));
                }
            }
        }
    }

    normalize_schedule(schedule)
}

/// Normalize a generated schedule: clamp blocks into [0, 24], drop
/// degenerate ones, sort by start, and truncate overlaps so consumers can
/// rely on sorted, non-overlapping blocks.
pub fn normalize_schedule(mut blocks: Vec<ScheduleBlock>) -> Vec<ScheduleBlock> {
    for block in &mut blocks {
        block.start_hour = block.start_hour.clamp(0.0, 24.0);
        block.end_hour = block.end_hour.clamp(0.0, 24.0);
    }
    blocks.retain(|b| b.end_hour > b.start_hour);
    blocks.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));

    let mut normalized: Vec<ScheduleBlock> = Vec::with_capacity(blocks.len());
    for mut block in blocks {
        if let Some(previous) = normalized.last() {
            if block.start_hour < previous.end_hour {
                block.start_hour = previous.end_hour;
            }
        }
        if block.end_hour > block.start_hour {
            normalized.push(block);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalculatorInput, HourRange, TimeOfUseRates};

    fn sample_tou() -> TimeOfUseRates {
        TimeOfUseRates {
            peak_rate: 0.28,
            off_peak_rate: 0.10,
            peak_hours: vec![HourRange {
                start: 14.0,
                end: 20.0,
            }],
        }
    }

    fn assert_normalized(blocks: &[ScheduleBlock]) {
        for window in blocks.windows(2) {
            assert!(window[0].start_hour <= window[1].start_hour, "unsorted");
            assert!(
                window[0].end_hour <= window[1].start_hour,
                "overlapping blocks"
            );
        }
        for block in blocks {
            assert!(block.start_hour < block.end_hour, "degenerate block");
            assert!(block.start_hour >= 0.0 && block.end_hour <= 24.0);
        }
    }

    #[test]
    fn sun_times_stay_in_timer_windows() {
        for month in Month::ALL {
            for latitude in [25.0, 35.0, 45.0, 65.0] {
                let sun = estimate_sun_times(latitude, month);
                assert!((5.0..=8.0).contains(&sun.sunrise));
                assert!((17.0..=21.0).contains(&sun.sunset));
            }
        }
    }

    #[test]
    fn summer_days_are_longer_than_winter_days() {
        let summer = estimate_sun_times(40.0, Month::Jun);
        let winter = estimate_sun_times(40.0, Month::Dec);
        assert!(summer.sunrise <= winter.sunrise);
        assert!(summer.sunset >= winter.sunset);
    }

    #[test]
    fn single_speed_flat_rate_splits_morning_and_evening() {
        let input = CalculatorInput::sample();
        let blocks = generate_schedule(10.0, &input.location, &input.energy, &input.pump, Month::Jul);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_hour, 8.0);
        assert_eq!(blocks[0].end_hour, 13.0);
        assert_eq!(blocks[1].start_hour, 18.0);
        assert_eq!(blocks[1].end_hour, 23.0);
        assert!(blocks.iter().all(|b| b.speed_setting.is_none()));
        assert_normalized(&blocks);
    }

    #[test]
    fn single_speed_tou_starts_after_peak_and_wraps_midnight() {
        let mut input = CalculatorInput::sample();
        input.energy.time_of_use = Some(sample_tou());

        // 10h does not fit between 20:00 and midnight, so it wraps.
        let blocks = generate_schedule(10.0, &input.location, &input.energy, &input.pump, Month::Jul);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_hour, 0.0);
        assert_eq!(blocks[0].end_hour, 6.0);
        assert_eq!(blocks[1].start_hour, 20.0);
        assert_eq!(blocks[1].end_hour, 24.0);
        assert_normalized(&blocks);

        // 4h fits in a single off-peak block.
        let short = generate_schedule(4.0, &input.location, &input.energy, &input.pump, Month::Jul);
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].start_hour, 20.0);
        assert_eq!(short[0].end_hour, 24.0);
    }

    #[test]
    fn two_speed_splits_forty_sixty() {
        let mut input = CalculatorInput::sample();
        input.pump.drive = PumpDrive::TwoSpeed {
            low_hp: 0.75,
            high_hp: 1.5,
        };
        let blocks = generate_schedule(10.0, &input.location, &input.energy, &input.pump, Month::Jul);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_hour, 8.0);
        assert_eq!(blocks[0].end_hour, 12.0);
        assert_eq!(blocks[0].speed_setting, Some(SpeedSetting::High));
        assert_eq!(blocks[1].start_hour, 18.0);
        assert_eq!(blocks[1].end_hour, 24.0);
        assert_eq!(blocks[1].speed_setting, Some(SpeedSetting::Low));
        assert_normalized(&blocks);
    }

    #[test]
    fn variable_speed_tou_places_low_overnight() {
        let mut input = CalculatorInput::sample();
        input.pump.drive = PumpDrive::VariableSpeed {
            low_rpm: 1500.0,
            medium_rpm: 2600.0,
            high_rpm: 3450.0,
        };
        input.energy.time_of_use = Some(sample_tou());

        // 10h: 3h high at 06:00, 7h low from 22:00 wrapping to 05:00.
        let blocks = generate_schedule(10.0, &input.location, &input.energy, &input.pump, Month::Jul);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].start_hour, 0.0);
        assert_eq!(blocks[0].end_hour, 5.0);
        assert_eq!(blocks[0].speed_setting, Some(SpeedSetting::Low));
        assert_eq!(blocks[1].start_hour, 6.0);
        assert_eq!(blocks[1].end_hour, 9.0);
        assert_eq!(blocks[1].speed_setting, Some(SpeedSetting::High));
        assert_eq!(blocks[2].start_hour, 22.0);
        assert_eq!(blocks[2].end_hour, 24.0);
        assert_eq!(blocks[2].speed_setting, Some(SpeedSetting::Low));
        assert_normalized(&blocks);
    }

    #[test]
    fn variable_speed_without_tou_tracks_the_sun() {
        let mut input = CalculatorInput::sample();
        input.pump.drive = PumpDrive::VariableSpeed {
            low_rpm: 1500.0,
            medium_rpm: 2600.0,
            high_rpm: 3450.0,
        };
        let blocks = generate_schedule(10.0, &input.location, &input.energy, &input.pump, Month::Jul);

        assert_eq!(blocks.len(), 2);
        let sun = estimate_sun_times(input.location.latitude, Month::Jul);
        assert_eq!(blocks[0].start_hour, (sun.sunrise - 1.0).max(6.0));
        assert_eq!(blocks[0].speed_setting, Some(SpeedSetting::High));
        assert_eq!(blocks[1].start_hour, 14.0);
        assert_eq!(blocks[1].end_hour, 21.0);
        assert_eq!(blocks[1].speed_setting, Some(SpeedSetting::Low));
        assert_normalized(&blocks);
    }

    #[test]
    fn every_drive_produces_a_normalized_schedule_at_max_runtime() {
        let mut input = CalculatorInput::sample();
        let drives = [
            PumpDrive::SingleSpeed,
            PumpDrive::TwoSpeed {
                low_hp: 0.75,
                high_hp: 1.5,
            },
            PumpDrive::VariableSpeed {
                low_rpm: 1500.0,
                medium_rpm: 2600.0,
                high_rpm: 3450.0,
            },
        ];
        for drive in drives {
            input.pump.drive = drive;
            for tou in [None, Some(sample_tou())] {
                input.energy.time_of_use = tou;
                let blocks =
                    generate_schedule(24.0, &input.location, &input.energy, &input.pump, Month::Jan);
                assert!(!blocks.is_empty());
                assert_normalized(&blocks);
            }
        }
    }

    #[test]
    fn normalize_truncates_overlaps_and_drops_degenerates() {
        let raw = vec![
            ScheduleBlock::new(18.0, 30.0),
            ScheduleBlock::new(8.0, 20.0),
            ScheduleBlock::new(5.0, 5.0),
        ];
        let normalized = normalize_schedule(raw);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].start_hour, 8.0);
        assert_eq!(normalized[0].end_hour, 20.0);
        assert_eq!(normalized[1].start_hour, 20.0);
        assert_eq!(normalized[1].end_hour, 24.0);
        assert_normalized(&normalized);
    }
}
