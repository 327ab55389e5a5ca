//! Named theme presets
//!
//! A preset is a partial record applied through the normal update path.

use shared::models::ThemeSettings;

struct Preset {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "Klasik",
        entries: &[
            ("primaryColor", "#1f2937"),
            ("accentColor", "#f59e0b"),
            ("backgroundColor", "#ffffff"),
            ("textColor", "#111827"),
            ("categoryActiveColor", "#1f2937"),
            ("bottomNavActiveColor", "#1f2937"),
        ],
    },
    Preset {
        name: "Lacivert",
        entries: &[
            ("primaryColor", "#1e3a5f"),
            ("accentColor", "#60a5fa"),
            ("backgroundColor", "#f8fafc"),
            ("textColor", "#0f172a"),
            ("categoryActiveColor", "#1e3a5f"),
            ("bottomNavActiveColor", "#1e3a5f"),
        ],
    },
    Preset {
        name: "Bordo",
        entries: &[
            ("primaryColor", "#7f1d1d"),
            ("accentColor", "#fca5a5"),
            ("backgroundColor", "#fffaf5"),
            ("textColor", "#1c1917"),
            ("categoryActiveColor", "#7f1d1d"),
            ("bottomNavActiveColor", "#7f1d1d"),
        ],
    },
    Preset {
        name: "Orman",
        entries: &[
            ("primaryColor", "#14532d"),
            ("accentColor", "#86efac"),
            ("backgroundColor", "#f7fdf9"),
            ("textColor", "#052e16"),
            ("categoryActiveColor", "#14532d"),
            ("bottomNavActiveColor", "#14532d"),
        ],
    },
    Preset {
        name: "Turuncu",
        entries: &[
            ("primaryColor", "#c2410c"),
            ("accentColor", "#fdba74"),
            ("backgroundColor", "#fffbf5"),
            ("textColor", "#1c1917"),
            ("categoryActiveColor", "#c2410c"),
            ("bottomNavActiveColor", "#c2410c"),
        ],
    },
    Preset {
        name: "Gece",
        entries: &[
            ("primaryColor", "#e5e7eb"),
            ("accentColor", "#a78bfa"),
            ("backgroundColor", "#0b0f19"),
            ("surfaceColor", "#111827"),
            ("cardBackground", "#111827"),
            ("textColor", "#f9fafb"),
            ("mutedTextColor", "#9ca3af"),
            ("categoryBarBackground", "#0b0f19"),
            ("categoryTextColor", "#d1d5db"),
            ("categoryActiveColor", "#a78bfa"),
            ("categoryActiveTextColor", "#0b0f19"),
            ("bottomNavBackground", "rgba(17, 24, 39, 0.9)"),
            ("bottomNavActiveColor", "#a78bfa"),
        ],
    },
];

/// Partial record for a preset name (exact, case-sensitive)
pub fn preset(name: &str) -> Option<ThemeSettings> {
    PRESETS.iter().find(|p| p.name == name).map(|p| {
        p.entries
            .iter()
            .fold(ThemeSettings::new(), |acc, (k, v)| acc.with(*k, *v))
    })
}

/// Preset names in display order
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lacivert_colors() {
        let p = preset("Lacivert").unwrap();
        assert_eq!(p.text("primaryColor"), Some("#1e3a5f"));
        assert_eq!(p.text("accentColor"), Some("#60a5fa"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(preset("not-a-real-preset").is_none());
        assert!(preset("lacivert").is_none());
    }

    #[test]
    fn test_preset_keys_exist_in_defaults() {
        let defaults = ThemeSettings::defaults();
        for name in preset_names() {
            for key in preset(name).unwrap().keys() {
                assert!(defaults.contains_key(key), "{name}: unknown key {key}");
            }
        }
    }
}
