use crate::types::{
    ClimateZone, LandscapingDensity, LocationData, Month, PumpDrive, PumpSpecs, UsageFactors,
    UsageLevel, WaterClarity,
};

use crate::engine::SavingsResult;

const MAX_RECOMMENDATIONS: usize = 5;

/// Build up to five owner-facing suggestions. Rules run in a fixed
/// priority order and the list is cut at five, so the most impactful
/// advice (pump upgrades, algae control) always survives the cap.
pub fn generate_recommendations(
    pump: &PumpSpecs,
    location: &LocationData,
    usage: &UsageFactors,
    costs: &SavingsResult,
    month: Month,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    let current_temp = location.avg_temperatures.for_month(month);

    if matches!(pump.drive, PumpDrive::SingleSpeed) {
        if let Some(roi) = &costs.roi_metrics {
            recommendations.push(format!(
                "Upgrade to a variable-speed pump: Save an additional {} over 5 years with a {:.1}-month payback period.",
                format_usd(roi.five_year_savings),
                roi.payback_months
            ));
        }
    }

    if current_temp > 80.0 {
        recommendations.push(
            "Run your pump during early morning hours (6-9 AM) to prevent algae growth during peak heat."
                .to_string(),
        );
    }

    if pump.age_years > 3.0 {
        recommendations.push(
            "Your pump is over 3 years old. Regular maintenance can restore up to 15% efficiency. Consider professional servicing."
                .to_string(),
        );
    }

    if !usage.screen_enclosure && location.climate_zone == ClimateZone::HotHumid {
        recommendations.push(
            "A screen enclosure could reduce your filtration needs by 10% by minimizing debris and evaporation."
                .to_string(),
        );
    }

    if usage.water_clarity != WaterClarity::CrystalClear {
        recommendations.push(
            "Improving water chemistry through proper balancing can reduce required filtration time by up to 20%."
                .to_string(),
        );
    }

    if month.is_winter() {
        recommendations.push(
            "During winter months, you can safely reduce runtime by 1-2 hours if water remains clear and temperatures stay below 65\u{b0}F."
                .to_string(),
        );
    }

    if usage.usage_level == UsageLevel::Heavy || usage.average_swimmers > 6 {
        recommendations.push(
            "With heavy pool usage, consider testing water chemistry twice weekly to maintain optimal balance."
                .to_string(),
        );
    }

    if pump.drive.is_variable_speed() {
        recommendations.push(
            "Your variable-speed pump is already optimized! Run at low speed for most hours to maximize energy savings."
                .to_string(),
        );
    }

    if usage.landscaping == LandscapingDensity::Heavy {
        recommendations.push(
            "Heavy landscaping increases debris load. Regular skimming can reduce the burden on your filtration system."
                .to_string(),
        );
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Whole-dollar USD with thousands separators, e.g. `$1,234`.
fn format_usd(amount: f64) -> String {
    let whole = amount.abs().round() as i64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && whole != 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
