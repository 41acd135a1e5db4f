#![forbid(unsafe_code)]

//! Display helpers for guide labels.

/// Compact viewer count: `999`, `45.2K`, `1.3M`.
#[must_use]
pub fn format_viewer_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_949 => compact(count, 1_000, 'K'),
        _ => compact(count, 1_000_000, 'M'),
    }
}

fn compact(count: u64, unit: u64, suffix: char) -> String {
    // Round to one decimal in integer space to avoid float drift.
    let tenths = (count * 10 + unit / 2) / unit;
    let whole = tenths / 10;
    let frac = tenths % 10;
    if frac == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{frac}{suffix}")
    }
}

/// Channel label for a 1-based category rank: `CH 1`, `CH 2`, ...
#[must_use]
pub fn channel_label(rank: usize) -> String {
    format!("CH {rank}")
}
