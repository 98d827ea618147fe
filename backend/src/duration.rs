/// Format a minute count as a human-readable duration.
///
/// Durations under an hour render as `"N min"`. Longer durations decompose
/// into day/hour/minute clauses, omitting any clause whose value is zero,
/// so 120 minutes renders as `"2 hr"` rather than `"2 hr 0 min"`. The hour
/// label stays `"hr"` for every count; only the day clause pluralizes.
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.round() as i64;

    if total < 60 {
        return format!("{total} min");
    }

    let days = total / 1440;
    let hours = (total % 1440) / 60;
    let mins = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days} day{}", if days == 1 { "" } else { "s" }));
    }
    if hours > 0 {
        parts.push(format!("{hours} hr"));
    }
    if mins > 0 {
        parts.push(format!("{mins} min"));
    }

    if parts.is_empty() {
        "0 min".to_string()
    } else {
        parts.join(" ")
    }
}
