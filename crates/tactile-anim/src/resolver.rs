//! Parameter resolution: descriptor templates to concrete values.
//!
//! Value templates may reference the target's live geometry through the
//! positional macros `$width`, `$height`, `$x`, `$y`, and arbitrary
//! `${name}` placeholders filled from per-run frame data first and the
//! descriptor's own parameter bag second. Resolution is stateless per call
//! and produces an owned copy, so concurrent runs against a changing target
//! never interfere with each other.

use std::collections::HashMap;

use crate::target::Component;
use crate::types::{StyleValue, format_number};

/// Snapshot of a target's geometry at run invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameGeometry {
    /// Target size as `[width, height]` in pixels.
    pub size: [f64; 2],
    /// Target position as `[x, y]` in pixels.
    pub position: [f64; 2],
}

impl FrameGeometry {
    /// Capture the current geometry of a component.
    pub fn of(component: &dyn Component) -> Self {
        Self {
            size: component.size(),
            position: component.position(),
        }
    }
}

/// Resolve one value template against live geometry and substitution data.
///
/// Numbers pass through unchanged. Text goes through two substitution
/// passes: positional geometry macros, then `${name}` placeholders —
/// `frame_data` first, falling back to `params`. Every occurrence of the
/// same name is substituted; unresolved placeholders are left verbatim.
pub fn resolve_value(
    raw: &StyleValue,
    geometry: &FrameGeometry,
    frame_data: &HashMap<String, String>,
    params: &HashMap<String, String>,
) -> StyleValue {
    match raw {
        StyleValue::Number(n) => StyleValue::Number(*n),
        StyleValue::Text(text) => {
            let text = substitute_positional(text, geometry);
            StyleValue::Text(substitute_named(&text, frame_data, params))
        }
    }
}

fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

fn substitute_positional(text: &str, geometry: &FrameGeometry) -> String {
    // `$width` must not swallow the `${` introducer of a named
    // placeholder; none of the positional names start with `{`, so plain
    // textual replacement is safe.
    text.replace("$width", &px(geometry.size[0]))
        .replace("$height", &px(geometry.size[1]))
        .replace("$x", &px(geometry.position[0]))
        .replace("$y", &px(geometry.position[1]))
}

fn substitute_named(
    text: &str,
    frame_data: &HashMap<String, String>,
    params: &HashMap<String, String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match frame_data.get(name).or_else(|| params.get(name)) {
                    Some(value) => out.push_str(value),
                    // Unresolved placeholders stay verbatim.
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated placeholder: keep the tail as-is.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
