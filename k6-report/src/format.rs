pub(crate) fn format_duration(ms: f64) -> String {
    if ms < 1000.0 {
        return format!("{ms:.2}ms");
    }
    format!("{:.2}s", ms / 1000.0)
}

pub(crate) fn format_bytes(value: f64) -> String {
    let mut v = value;
    for unit in ["B", "KB", "MB", "GB"] {
        if v < 1024.0 {
            return format!("{v:.2}{unit}");
        }
        v /= 1024.0;
    }
    format!("{v:.2}TB")
}

pub(crate) fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Thousands-grouped integer, truncating any fractional part.
pub(crate) fn format_count(value: f64) -> String {
    let n = value.trunc() as i64;
    let digits = n.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
