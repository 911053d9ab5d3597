use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Unit-interval hash of a name, used for deterministic placeholder colors
/// and float phase offsets.
pub fn stable_unit(id: &str) -> f32 {
    let (x, _) = stable_pair(id);
    (x + 1.0) * 0.5
}

/// Up to two initials for the placeholder badge of an entity without a
/// usable logo.
pub fn initials(display_name: &str) -> String {
    let mut out = String::new();
    for word in display_name.split_whitespace().take(2) {
        if let Some(first) = word.chars().next() {
            out.extend(first.to_uppercase());
        }
    }

    if out.is_empty() {
        out.push('?');
    }
    out
}

pub fn format_weight(weight: f32) -> String {
    if (weight - weight.round()).abs() < 0.005 {
        format!("{}", weight.round() as i64)
    } else {
        format!("{weight:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("react");
        let (x2, y2) = stable_pair("react");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Spring Boot"), "SB");
        assert_eq!(initials("react"), "R");
        assert_eq!(initials("  "), "?");
    }

    #[test]
    fn format_weight_drops_trailing_zeroes() {
        assert_eq!(format_weight(7.0), "7");
        assert_eq!(format_weight(2.5), "2.50");
    }
}
