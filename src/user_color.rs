//! Stable avatar colours per username.
//!
//! The colour is picked by hashing the lower-cased, trimmed name with djb2
//! over its UTF-16 code units, so a name gets the same colour in every
//! client regardless of platform.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use unicode_segmentation::UnicodeSegmentation;

use crate::storage::Theme;

/// Which palette to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Default,
    Light,
    Dark,
}

/// The light theme keeps the default palette so avatars match the web client.
impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light | Theme::Auto => Palette::Default,
            Theme::Dark => Palette::Dark,
        }
    }
}

// High contrast colours
const DEFAULT_COLORS: [&str; 16] = [
    "#1976d2", "#388e3c", "#f57c00", "#7b1fa2", "#c2185b", "#00796b", "#5d4037", "#455a64",
    "#e64a19", "#303f9f", "#689f38", "#fbc02d", "#512da8", "#0288d1", "#d32f2f", "#f57f17",
];

const LIGHT_COLORS: [&str; 16] = [
    "#42a5f5", "#66bb6a", "#ff7043", "#ab47bc", "#ec407a", "#26a69a", "#8d6e63", "#78909c",
    "#ffa726", "#5c6bc0", "#9ccc65", "#ffca28", "#7e57c2", "#29b6f6", "#ef5350", "#d4e157",
];

const DARK_COLORS: [&str; 16] = [
    "#1565c0", "#2e7d32", "#ef6c00", "#6a1b9a", "#ad1457", "#00695c", "#4e342e", "#37474f",
    "#e65100", "#283593", "#558b2f", "#f9a825", "#4527a0", "#0277bd", "#c62828", "#827717",
];

impl Palette {
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Palette::Default => &DEFAULT_COLORS,
            Palette::Light => &LIGHT_COLORS,
            Palette::Dark => &DARK_COLORS,
        }
    }
}

lazy_static! {
    static ref COLOR_CACHE: Mutex<HashMap<String, &'static str>> = Mutex::new(HashMap::new());
}

/// djb2 with JavaScript number semantics: the shift works on a wrapped
/// 32-bit integer while the running sum does not.
fn djb2_hash(input: &str) -> u64 {
    let mut hash: i64 = 5381;
    for unit in input.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = shifted + hash + i64::from(unit);
    }
    hash.unsigned_abs()
}

fn normalise(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Colour for `username`, skipping any colour in `exclude` unless that would
/// leave nothing to choose from.
pub fn user_color(username: &str, palette: Palette, exclude: &[&str]) -> &'static str {
    let colors = palette.colors();
    if username.trim().is_empty() {
        return colors[0];
    }

    let cache_key = format!("{}-{:?}-{}", username, palette, exclude.join(","));
    if let Ok(cache) = COLOR_CACHE.lock() {
        if let Some(color) = cache.get(&cache_key) {
            return color;
        }
    }

    let mut available: Vec<&'static str> =
        colors.iter().copied().filter(|c| !exclude.contains(c)).collect();
    if available.is_empty() {
        available = colors.to_vec();
    }

    let hash = djb2_hash(&normalise(username));
    let selected = available[(hash % available.len() as u64) as usize];

    if let Ok(mut cache) = COLOR_CACHE.lock() {
        cache.insert(cache_key, selected);
    }
    selected
}

/// Colours for a batch of names, avoiding repeats until the palette runs out.
pub fn user_colors(usernames: &[String], palette: Palette) -> HashMap<String, &'static str> {
    let mut result = HashMap::new();
    let mut used: HashSet<&'static str> = HashSet::new();

    for username in usernames {
        let available: Vec<&'static str> =
            palette.colors().iter().copied().filter(|c| !used.contains(c)).collect();
        let color = if available.is_empty() {
            user_color(username, palette, &[])
        } else {
            let hash = djb2_hash(&normalise(username));
            available[(hash % available.len() as u64) as usize]
        };
        used.insert(color);
        result.insert(username.clone(), color);
    }
    result
}

/// Black or white, whichever reads better on `background` (`#rrggbb`).
pub fn contrast_text_color(background: &str) -> &'static str {
    let hex = background.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .map(f64::from)
            .unwrap_or(0.0)
    };
    let brightness = (channel(0..2) * 299.0 + channel(2..4) * 587.0 + channel(4..6) * 114.0) / 1000.0;
    if brightness > 128.0 {
        "#000000"
    } else {
        "#ffffff"
    }
}

/// First grapheme of the name, upper-cased, for the avatar bubble.
pub fn avatar_initial(username: &str) -> String {
    username
        .trim()
        .graphemes(true)
        .next()
        .map(|g| g.to_uppercase())
        .unwrap_or_else(|| "?".to_string())
}

pub fn clear_color_cache() {
    if let Ok(mut cache) = COLOR_CACHE.lock() {
        cache.clear();
    }
}

pub fn color_cache_size() -> usize {
    COLOR_CACHE.lock().map(|c| c.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_matches_reference_values() {
        // Same results as the JS implementation used by the web client.
        assert_eq!(djb2_hash(""), 5381);
        assert_eq!(djb2_hash("a"), 177670);
        assert_eq!(djb2_hash("ab"), 5863208);
    }

    #[test]
    fn colour_is_stable_and_case_insensitive() {
        let a = user_color("Alice", Palette::Default, &[]);
        let b = user_color("  alice ", Palette::Default, &[]);
        assert_eq!(a, b);
        assert!(DEFAULT_COLORS.contains(&a));
    }

    #[test]
    fn default_theme_uses_default_palette() {
        assert_eq!(Palette::from(crate::storage::UserSettings::default().theme), Palette::Default);
        assert_eq!(Palette::from(Theme::Light), Palette::Default);
        assert_eq!(Palette::from(Theme::Dark), Palette::Dark);
    }

    #[test]
    fn blank_name_gets_first_colour() {
        assert_eq!(user_color("   ", Palette::Dark, &[]), DARK_COLORS[0]);
    }

    #[test]
    fn excluded_colour_is_skipped() {
        let first = user_color("bob", Palette::Light, &[]);
        let second = user_color("bob", Palette::Light, &[first]);
        assert_ne!(first, second);

        let all: Vec<&str> = LIGHT_COLORS.to_vec();
        assert!(LIGHT_COLORS.contains(&user_color("bob", Palette::Light, &all)));
    }

    #[test]
    fn batch_assignment_prefers_unique_colours() {
        let names: Vec<String> = (0..16).map(|i| format!("user{}", i)).collect();
        let colors = user_colors(&names, Palette::Default);
        let unique: HashSet<_> = colors.values().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn contrast_picks_black_on_light_backgrounds() {
        assert_eq!(contrast_text_color("#ffca28"), "#000000");
        assert_eq!(contrast_text_color("#1565c0"), "#ffffff");
        assert_eq!(contrast_text_color("bad"), "#ffffff");
    }

    #[test]
    fn initial_uses_first_grapheme() {
        assert_eq!(avatar_initial("alice"), "A");
        assert_eq!(avatar_initial("éva"), "É");
        assert_eq!(avatar_initial(""), "?");
    }

    #[test]
    fn cache_fills_and_clears() {
        user_color("cache-fill", Palette::Default, &[]);
        assert!(color_cache_size() > 0);
        clear_color_cache();
    }
}
