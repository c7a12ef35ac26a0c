use tracing::debug;

use super::domain::{
    EngagementLevel, RapidFireResponse, ValidityFlag, ValidityMetrics, ValidityStatus,
};
use super::scorers::{is_straight_lined, rapid_fire_consistency};

const TOO_FAST_SECONDS: f64 = 2.0;
const TOO_SLOW_SECONDS: f64 = 60.0;

/// Flags raised by a completion, in detection order.
pub fn detect_flags(
    item_count: usize,
    elapsed_ms: u64,
    rapid_fire: &[RapidFireResponse],
) -> Vec<ValidityFlag> {
    let mut flags = Vec::new();

    if item_count > 0 {
        let average = average_seconds(item_count, elapsed_ms);
        if average < TOO_FAST_SECONDS {
            flags.push(ValidityFlag::TooFast);
        } else if average > TOO_SLOW_SECONDS {
            flags.push(ValidityFlag::TooSlow);
        }
    }

    if is_straight_lined(rapid_fire) {
        flags.push(ValidityFlag::StraightLining);
    }

    flags
}

pub fn flag_count(flags: &[ValidityFlag]) -> u32 {
    flags.iter().map(|flag| flag.weight()).sum()
}

/// Monotonic in the flag count: more flags never improve the status.
pub fn status_for(flag_count: u32) -> ValidityStatus {
    if flag_count >= 4 {
        ValidityStatus::Invalid
    } else if flag_count >= 2 {
        ValidityStatus::Questionable
    } else {
        ValidityStatus::Valid
    }
}

pub fn engagement_for(flag_count: u32) -> EngagementLevel {
    let engagement = 100.0 - f64::from(flag_count) * 15.0;
    if engagement >= 80.0 {
        EngagementLevel::High
    } else if engagement >= 60.0 {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}

pub fn analyze(
    item_count: usize,
    elapsed_ms: u64,
    rapid_fire: &[RapidFireResponse],
) -> ValidityMetrics {
    let flags = detect_flags(item_count, elapsed_ms, rapid_fire);
    let count = flag_count(&flags);
    let validity_status = status_for(count);

    debug!(
        item_count,
        elapsed_ms,
        flag_count = count,
        ?validity_status,
        "validity analysed"
    );

    ValidityMetrics {
        response_time_seconds: average_seconds(item_count, elapsed_ms),
        consistency_score: (100.0 - f64::from(count) * 20.0).max(0.0),
        engagement_level: engagement_for(count),
        validity_status,
        flags,
        rapid_fire_consistency: rapid_fire_consistency(rapid_fire),
    }
}

fn average_seconds(item_count: usize, elapsed_ms: u64) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    elapsed_ms as f64 / 1000.0 / item_count as f64
}
