//! Hardware-ID derivation.
//!
//! The hardware ID (hid) is the identifier traceability systems use to track
//! a device globally. It is derived once, at creation, from the manufacturer,
//! serial number, and model.

/// Derive a hardware ID from the identity triple.
///
/// Convention: `{manufacturer}-{serial_number}-{model}`, each part slugged
/// (lowercased, runs of non-alphanumeric characters collapsed to a single
/// underscore).
///
/// Returns `None` when any part is missing or slugs to empty; a device
/// without a full identity triple simply gets no hardware ID.
///
/// # Examples
///
/// ```
/// use devicetrace_core::naming::hid;
///
/// assert_eq!(
///     hid(Some("Acer"), Some("AA34"), Some("Athlon II")),
///     Some("acer-aa34-athlon_ii".to_string())
/// );
/// assert_eq!(hid(Some("Acer"), None, Some("Athlon II")), None);
/// ```
pub fn hid(
    manufacturer: Option<&str>,
    serial_number: Option<&str>,
    model: Option<&str>,
) -> Option<String> {
    let manufacturer = slug(manufacturer?)?;
    let serial_number = slug(serial_number?)?;
    let model = slug(model?)?;
    Some(format!("{manufacturer}-{serial_number}-{model}"))
}

/// Lowercase slug of a single hid part. `None` if nothing alphanumeric
/// survives.
fn slug(part: &str) -> Option<String> {
    let mut out = String::with_capacity(part.len());
    let mut gap = false;
    for c in part.trim().chars() {
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_triple() {
        assert_eq!(
            hid(Some("Acer"), Some("AA34"), Some("Athlon II")),
            Some("acer-aa34-athlon_ii".to_string())
        );
    }

    #[test]
    fn deterministic() {
        let a = hid(Some("HP"), Some("SN-001"), Some("ProBook 450"));
        let b = hid(Some("HP"), Some("SN-001"), Some("ProBook 450"));
        assert_eq!(a, b);
        assert_eq!(a, Some("hp-sn_001-probook_450".to_string()));
    }

    #[test]
    fn missing_any_part_yields_none() {
        assert_eq!(hid(None, Some("AA34"), Some("Athlon II")), None);
        assert_eq!(hid(Some("Acer"), None, Some("Athlon II")), None);
        assert_eq!(hid(Some("Acer"), Some("AA34"), None), None);
    }

    #[test]
    fn blank_part_yields_none() {
        assert_eq!(hid(Some("   "), Some("AA34"), Some("Athlon II")), None);
        assert_eq!(hid(Some("Acer"), Some("---"), Some("Athlon II")), None);
    }

    #[test]
    fn punctuation_collapsed() {
        assert_eq!(slug("Athlon -- II").as_deref(), Some("athlon_ii"));
        assert_eq!(slug("  Intel(R) Core(TM) ").as_deref(), Some("intel_r_core_tm"));
    }

    #[test]
    fn never_empty_when_present() {
        let h = hid(Some("a"), Some("1"), Some("b")).unwrap();
        assert!(!h.is_empty());
        assert_eq!(h, "a-1-b");
    }
}
