//! Media-type string helpers.

/// Start delimiter of the version token in a vendor media type.
pub const VERSION_START: &str = "-v";
/// End delimiter of the version token in a vendor media type.
pub const VERSION_END: &str = "+";

/// Substring strictly between the first `start` and the last `end`.
///
/// Returns `""` when either delimiter is missing or when the first `start`
/// does not end before the last `end`. Comparison is ordinal.
///
/// ```
/// use contacts_core::negotiation::between;
///
/// assert_eq!(between("application/vnd.demo-v2+json", "-v", "+"), "2");
/// assert_eq!(between("application/json", "-v", "+"), "");
/// ```
pub fn between<'a>(value: &'a str, start: &str, end: &str) -> &'a str {
    let (Some(start_pos), Some(end_pos)) = (value.find(start), value.rfind(end)) else {
        return "";
    };

    let from = start_pos + start.len();
    if from >= end_pos {
        return "";
    }
    value.get(from..end_pos).unwrap_or("")
}

/// Flatten raw `Accept` header values into bare media types, in order of appearance.
///
/// Each header value may hold a comma-separated list; parameters (`;q=0.8`)
/// are stripped and blank entries skipped. Quality values do not reorder the
/// candidates.
pub fn accept_candidates<'a, I>(values: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(|c| c.split(';').next().unwrap_or("").trim())
        .filter(|c| !c.is_empty())
}
