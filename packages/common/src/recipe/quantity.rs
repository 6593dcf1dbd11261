use std::sync::LazyLock;

use regex::Regex;

/// Leading magnitude (`200`, `1.5`, `.5`, `2.`) followed by anything.
static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\d+(?:\.\d*)?|\.\d+)(.*)$").expect("quantity pattern is valid")
});

/// A quantity label split into its numeric magnitude and opaque unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantity<'a> {
    pub magnitude: f64,
    /// Remainder of the label with surrounding whitespace trimmed. May be empty.
    pub unit: &'a str,
}

/// Split a free-form quantity label such as `"200g"` or `"1.5 cups"`.
///
/// Returns `None` when the label has no leading number (`"a pinch"`); callers
/// keep such quantities verbatim.
pub fn parse_quantity(label: &str) -> Option<Quantity<'_>> {
    let caps = QUANTITY_RE.captures(label)?;
    let magnitude: f64 = caps.get(1)?.as_str().parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    let unit = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Quantity { magnitude, unit })
}
