//! Validation predicates shared by the services.
//!
//! Request payloads and rows describe their shape through [`Schema`], so
//! presence checks work on declared fields rather than on arbitrary keys.

/// A value that can be checked for meaningful presence.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for &str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for i32 {
    fn is_present(&self) -> bool {
        true
    }
}

impl Presence for f64 {
    fn is_present(&self) -> bool {
        !self.is_nan()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

/// Declared field layout of a record or payload.
pub trait Schema {
    /// Every field name, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Each field name paired with whether it currently holds a value.
    fn presence(&self) -> Vec<(&'static str, bool)>;
}

/// Parses a raw id and keeps it only when it is a positive integer.
///
/// Integral decimal forms (`"2.0"`, `"1e2"`) are accepted; fractions, zero,
/// negatives, NaN, infinities and non-numeric text are not.
pub fn validate_id(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return i32::try_from(id).ok().filter(|id| *id > 0);
    }
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// True when `obj` exists and every field outside `excluded` is present.
pub fn validate_obj<T: Schema>(obj: Option<&T>, excluded: &[&str]) -> bool {
    let Some(obj) = obj else {
        return false;
    };
    obj.presence()
        .into_iter()
        .filter(|(name, _)| !excluded.contains(name))
        .all(|(_, present)| present)
}

/// True when every value is a non-empty string.
pub fn validate_string(values: &[Option<&str>]) -> bool {
    values.iter().all(Presence::is_present)
}

/// True when `obj` is absent or carries no field at all.
pub fn validate_empty_obj<T: Schema>(obj: Option<&T>) -> bool {
    obj.is_none_or(|obj| obj.presence().iter().all(|(_, present)| !present))
}

/// True when `key` names a field of `T`.
pub fn is_property_of<T: Schema>(key: &str) -> bool {
    T::FIELDS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Badge {
        id: Option<i32>,
        label: Option<String>,
        note: Option<String>,
    }

    impl Schema for Badge {
        const FIELDS: &'static [&'static str] = &["id", "label", "note"];

        fn presence(&self) -> Vec<(&'static str, bool)> {
            vec![
                ("id", self.id.is_present()),
                ("label", self.label.is_present()),
                ("note", self.note.is_present()),
            ]
        }
    }

    fn badge(id: Option<i32>, label: Option<&str>, note: Option<&str>) -> Badge {
        Badge {
            id,
            label: label.map(str::to_string),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn positive_integers_are_valid_ids() {
        assert_eq!(validate_id("1"), Some(1));
        assert_eq!(validate_id(" 42 "), Some(42));
        assert_eq!(validate_id("2.0"), Some(2));
    }

    #[test]
    fn non_positive_or_fractional_ids_are_rejected() {
        for raw in ["0", "-1", "1.01", "NaN", "abc", "", "inf", "99999999999"] {
            assert_eq!(validate_id(raw), None, "{raw} should be rejected");
        }
    }

    #[test]
    fn validate_obj_requires_every_non_excluded_field() {
        let full = badge(Some(1), Some("gold"), Some("first"));
        assert!(validate_obj(Some(&full), &[]));

        let no_id = badge(None, Some("gold"), Some("first"));
        assert!(!validate_obj(Some(&no_id), &[]));
        assert!(validate_obj(Some(&no_id), &["id"]));

        let blank_label = badge(Some(1), Some("   "), Some("first"));
        assert!(!validate_obj(Some(&blank_label), &["id"]));

        assert!(!validate_obj::<Badge>(None, &[]));
    }

    #[test]
    fn validate_string_rejects_missing_or_empty_values() {
        assert!(validate_string(&[Some("bob"), Some("pw")]));
        assert!(!validate_string(&[Some("bob"), Some("")]));
        assert!(!validate_string(&[None, Some("pw")]));
    }

    #[test]
    fn empty_obj_detection() {
        assert!(validate_empty_obj::<Badge>(None));
        assert!(validate_empty_obj(Some(&badge(None, None, Some("")))));
        assert!(!validate_empty_obj(Some(&badge(Some(3), None, None))));
    }

    #[test]
    fn property_membership() {
        assert!(is_property_of::<Badge>("label"));
        assert!(!is_property_of::<Badge>("password"));
        assert!(!is_property_of::<Badge>("label; drop table badges"));
    }
}
