/// Interpret a digit buffer as a minute count.
///
/// Up to two digits are plain minutes. Longer buffers split into hours (leading
/// digits) and minutes (last two digits). The minute field is not range-checked,
/// so `"199"` is 1 h 99 min. Anything that is not a run of ASCII digits that fits
/// an `i64` yields `0`.
pub fn parse_buffer(buffer: &str) -> i64 {
    if buffer.is_empty() || !buffer.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    let Ok(raw) = buffer.parse::<i64>() else {
        return 0;
    };

    if buffer.len() <= 2 {
        return raw;
    }
    let minutes = raw % 100;
    let hours = raw / 100;
    hours.saturating_mul(60).saturating_add(minutes)
}
