//! Transform composition for CSS text output.
//!
//! Descriptors animate logical transform components (`rotate`,
//! `translateX`, `scale`, ...) as if they were ordinary properties; the
//! platform only understands a single `transform` declaration. This module
//! merges the logical components into one transform string, pairing
//! `translateX`/`translateY` into a single `translate(x, y)` and composing
//! after the target's current transform when a run is additive.

use crate::types::StyleValue;

/// Logical properties that contribute to the combined `transform`
/// declaration rather than being set directly.
pub const TRANSFORM_PROPERTIES: [&str; 8] = [
    "rotate",
    "rotateX",
    "rotateY",
    "rotateZ",
    "skew",
    "translateX",
    "translateY",
    "scale",
];

/// Whether a logical property is transform-producing.
pub fn is_transform_property(property: &str) -> bool {
    TRANSFORM_PROPERTIES.contains(&property)
}

/// Default unit appended to bare numeric values of a transform component.
fn default_unit(property: &str) -> Option<&'static str> {
    match property {
        "rotate" | "rotateX" | "rotateY" | "rotateZ" | "skew" => Some("deg"),
        "translateX" | "translateY" => Some("px"),
        _ => None,
    }
}

/// Split resolved (property, value) pairs into direct style declarations
/// and one combined transform string.
///
/// Declaration order is preserved: transform components render in the order
/// they were declared, with the translate pair merged at the position of
/// its first component. Returns `(direct, transform)`; `transform` is
/// `None` when no transform component was declared.
pub fn split_transform(
    resolved: &[(String, StyleValue)],
) -> (Vec<(String, String)>, Option<String>) {
    let mut direct = Vec::new();
    let mut ops: Vec<String> = Vec::new();
    let mut translate_slot: Option<usize> = None;
    let mut translate_x: Option<String> = None;
    let mut translate_y: Option<String> = None;

    for (property, value) in resolved {
        if !is_transform_property(property) {
            direct.push((property.clone(), value.render(None)));
            continue;
        }
        let rendered = value.render(default_unit(property));
        match property.as_str() {
            "translateX" => {
                translate_x = Some(rendered);
                if translate_slot.is_none() {
                    translate_slot = Some(ops.len());
                    ops.push(String::new());
                }
            }
            "translateY" => {
                translate_y = Some(rendered);
                if translate_slot.is_none() {
                    translate_slot = Some(ops.len());
                    ops.push(String::new());
                }
            }
            other => ops.push(format!("{}({})", other, rendered)),
        }
    }

    if let Some(slot) = translate_slot {
        let op = match (translate_x, translate_y) {
            (Some(x), Some(y)) => format!("translate({}, {})", x, y),
            (Some(x), None) => format!("translateX({})", x),
            (None, Some(y)) => format!("translateY({})", y),
            (None, None) => String::new(),
        };
        if op.is_empty() {
            ops.remove(slot);
        } else {
            ops[slot] = op;
        }
    }

    let transform = if ops.is_empty() {
        None
    } else {
        Some(ops.join(" "))
    };
    (direct, transform)
}

/// Compose a merged transform with the target's existing transform.
///
/// Additive runs append after the current transform (CSS applies the list
/// left to right); non-additive runs replace it.
pub fn compose(merged: &str, current: Option<&str>, additive: bool) -> String {
    match current.filter(|c| additive && !c.trim().is_empty()) {
        Some(current) => format!("{} {}", current.trim(), merged),
        None => merged.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &[(&str, StyleValue)]) -> Vec<(String, StyleValue)> {
        input
            .iter()
            .map(|(p, v)| (p.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_direct_properties_untouched() {
        let (direct, transform) = split_transform(&pairs(&[
            ("opacity", StyleValue::Number(0.5)),
            ("width", StyleValue::Text("50px".into())),
        ]));
        assert_eq!(
            direct,
            vec![
                ("opacity".to_string(), "0.5".to_string()),
                ("width".to_string(), "50px".to_string())
            ]
        );
        assert_eq!(transform, None);
    }

    #[test]
    fn test_translate_pair_merges() {
        let (direct, transform) = split_transform(&pairs(&[
            ("translateX", StyleValue::Text("10px".into())),
            ("translateY", StyleValue::Number(20.0)),
        ]));
        assert!(direct.is_empty());
        assert_eq!(transform.as_deref(), Some("translate(10px, 20px)"));
    }

    #[test]
    fn test_single_translate_component() {
        let (_, transform) =
            split_transform(&pairs(&[("translateY", StyleValue::Text("-100%".into()))]));
        assert_eq!(transform.as_deref(), Some("translateY(-100%)"));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let (_, transform) = split_transform(&pairs(&[
            ("rotate", StyleValue::Number(45.0)),
            ("translateX", StyleValue::Text("5px".into())),
            ("scale", StyleValue::Number(2.0)),
        ]));
        assert_eq!(
            transform.as_deref(),
            Some("rotate(45deg) translateX(5px) scale(2)")
        );
    }

    #[test]
    fn test_default_units() {
        let (_, transform) = split_transform(&pairs(&[
            ("rotateY", StyleValue::Number(-90.0)),
            ("translateX", StyleValue::Number(12.0)),
        ]));
        assert_eq!(
            transform.as_deref(),
            Some("rotateY(-90deg) translateX(12px)")
        );
    }

    #[test]
    fn test_compose_additive() {
        assert_eq!(
            compose("scale(2)", Some("rotate(10deg)"), true),
            "rotate(10deg) scale(2)"
        );
        assert_eq!(compose("scale(2)", Some("rotate(10deg)"), false), "scale(2)");
        assert_eq!(compose("scale(2)", Some("  "), true), "scale(2)");
        assert_eq!(compose("scale(2)", None, true), "scale(2)");
    }
}
