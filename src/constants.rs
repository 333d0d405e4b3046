//! Domain constants shared across the calculation pipeline.

/// Gallons of water per cubic foot of pool volume.
pub const GALLONS_PER_CUBIC_FOOT: f64 = 7.5;

/// Volume correction for kidney and freeform pools relative to a
/// rectangle of the same footprint.
pub const IRREGULAR_SHAPE_FACTOR: f64 = 0.85;

/// Electrical watts per horsepower.
pub const WATTS_PER_HORSEPOWER: f64 = 746.0;

/// Motor inefficiency factor applied on top of nameplate horsepower.
pub const MOTOR_INEFFICIENCY_FACTOR: f64 = 1.15;

/// Reference maximum RPM for residential pool pump motors.
pub const MAX_PUMP_RPM: f64 = 3450.0;

/// Flow scales with (rpm ratio)^0.85 rather than linearly.
pub const FLOW_RPM_EXPONENT: f64 = 0.85;

/// Flow-rate efficiency lost per year of pump age.
pub const AGE_EFFICIENCY_LOSS_PER_YEAR: f64 = 0.02;

/// Cap on total age-related efficiency loss.
pub const MAX_AGE_EFFICIENCY_LOSS: f64 = 0.20;

/// Power draw of a variable-speed motor at low speed, as a fraction of
/// full power.
pub const VS_LOW_POWER_FRACTION: f64 = 0.125;

/// Power draw of a variable-speed motor at medium speed.
pub const VS_MEDIUM_POWER_FRACTION: f64 = 0.40;

/// Daily runtime bounds in hours.
pub const MIN_DAILY_RUNTIME_HOURS: f64 = 4.0;
pub const MAX_DAILY_RUNTIME_HOURS: f64 = 24.0;

/// Billing conventions: a month is 30 days, a year is 365.
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Average installed cost of a variable-speed pump upgrade.
pub const VARIABLE_SPEED_UPGRADE_COST_USD: f64 = 1500.0;

/// Additional annual savings a variable-speed upgrade yields on top of an
/// already optimized schedule.
pub const VARIABLE_SPEED_EXTRA_SAVINGS_FACTOR: f64 = 0.30;

/// Supported pump horsepower ratings.
pub const HORSEPOWER_RATINGS: [f64; 7] = [0.5, 0.75, 1.0, 1.5, 2.0, 2.5, 3.0];
