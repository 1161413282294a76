/// Render a minute count as `H:MM`, with a single leading `-` for negative values.
pub fn format_hhmm(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    let abs = total_minutes.unsigned_abs();
    format!("{}{}:{:02}", sign, abs / 60, abs % 60)
}
