//! Generated style text: the engine's wire format.
//!
//! Every complex run serializes its resolved keyframes into one
//! `@keyframes` rule with a globally unique name, so concurrently active
//! runs never collide. Name tokens are appended to and stripped from the
//! target's comma-separated `animation-name` without disturbing
//! co-existing runs.

use crate::types::format_number;

/// One resolved keyframe ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFrame {
    /// Timeline offset, 0.0 to 1.0.
    pub offset: f32,
    /// Concrete CSS declarations at this offset, in declaration order.
    pub declarations: Vec<(String, String)>,
}

/// Render an offset as a CSS keyframe selector (`0%`–`100%`).
///
/// Rounded to four decimal places so binary f32 offsets (0.7, 0.95, ...)
/// come out as the percentages they were declared as.
pub fn offset_to_percent(offset: f32) -> String {
    let pct = (offset.clamp(0.0, 1.0) as f64) * 100.0;
    let pct = (pct * 10_000.0).round() / 10_000.0;
    format!("{}%", format_number(pct))
}

/// Serialize resolved keyframes into one `@keyframes` rule set.
pub fn keyframes_rule(name: &str, frames: &[ResolvedFrame]) -> String {
    let mut out = format!("@keyframes {} {{\n", name);
    for frame in frames {
        out.push_str("  ");
        out.push_str(&offset_to_percent(frame.offset));
        out.push_str(" {");
        for (property, value) in &frame.declarations {
            out.push(' ');
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push(';');
        }
        out.push_str(" }\n");
    }
    out.push('}');
    out
}

/// Append a run's name token to an existing comma-separated
/// `animation-name` value.
pub fn append_name_token(existing: Option<&str>, token: &str) -> String {
    match existing.map(str::trim).filter(|e| !e.is_empty()) {
        Some(existing) => format!("{}, {}", existing, token),
        None => token.to_string(),
    }
}

/// Strip a run's name token from a comma-separated `animation-name` value.
///
/// Returns the remaining value, or `None` when no tokens are left (the
/// property should then be removed entirely).
pub fn strip_name_token(existing: &str, token: &str) -> Option<String> {
    let remaining: Vec<&str> = existing
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != token)
        .collect();
    if remaining.is_empty() {
        None
    } else {
        Some(remaining.join(", "))
    }
}
