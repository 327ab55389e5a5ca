//! Theme settings record
//!
//! A flat map of named presentation attributes. Keys are camelCase and
//! grouped by UI surface only by naming convention (`slider*`, `search*`,
//! `categoryBar*`, ...). Values are a string, a number or a boolean.
//!
//! The record persisted under `themeSettings` is always the full merged map,
//! so reading it back never needs the defaults to be re-applied key by key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single theme attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl ThemeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ThemeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ThemeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ThemeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i32> for ThemeValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for ThemeValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for ThemeValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for ThemeValue {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => Self::Number(n),
            // NaN / infinity have no JSON form
            None => Self::Text(value.to_string()),
        }
    }
}

/// Flat theme record, also used as a partial update ("patch")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeSettings(BTreeMap<String, ThemeValue>);

impl ThemeSettings {
    /// Empty record, typically the start of a patch
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in default record. Every key any view reads is present.
    pub fn defaults() -> Self {
        DEFAULT_THEME
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_value()))
            .collect()
    }

    /// Builder-style setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ThemeValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ThemeValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Shallow merge: every key in `patch` overwrites the same key here
    pub fn merge(&mut self, patch: &ThemeSettings) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// `self` merged over a copy of `base`
    pub fn merged_over(&self, base: &ThemeSettings) -> ThemeSettings {
        let mut out = base.clone();
        out.merge(self);
        out
    }

    pub fn get(&self, key: &str) -> Option<&ThemeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ThemeValue::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ThemeValue::as_f64)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ThemeValue::as_bool)
    }

    pub fn text_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.text(key).unwrap_or(fallback)
    }

    pub fn number_or(&self, key: &str, fallback: f64) -> f64 {
        self.number(key).unwrap_or(fallback)
    }

    pub fn flag_or(&self, key: &str, fallback: bool) -> bool {
        self.flag(key).unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ThemeValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ThemeValue)> for ThemeSettings {
    fn from_iter<I: IntoIterator<Item = (String, ThemeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Compile-time default value
#[derive(Debug, Clone, Copy)]
enum DefaultValue {
    T(&'static str),
    N(i64),
    B(bool),
}

impl DefaultValue {
    fn to_value(self) -> ThemeValue {
        match self {
            Self::T(s) => ThemeValue::from(s),
            Self::N(n) => ThemeValue::from(n),
            Self::B(b) => ThemeValue::from(b),
        }
    }
}

use DefaultValue::{B, N, T};

const DEFAULT_THEME: &[(&str, DefaultValue)] = &[
    // General
    ("primaryColor", T("#1f2937")),
    ("accentColor", T("#f59e0b")),
    ("backgroundColor", T("#ffffff")),
    ("surfaceColor", T("#f9fafb")),
    ("textColor", T("#111827")),
    ("mutedTextColor", T("#6b7280")),
    ("fontFamily", T("Inter, sans-serif")),
    ("headingFontFamily", T("Poppins, sans-serif")),
    ("borderRadius", T("12px")),
    ("cardBackground", T("#ffffff")),
    ("cardShadow", B(true)),
    ("cardPadding", N(12)),
    ("cardGap", N(16)),
    ("priceColor", T("#16a34a")),
    // Slider
    ("showSlider", B(true)),
    ("sliderHeight", T("200px")),
    ("sliderBorderRadius", T("16px")),
    ("sliderAutoplay", B(true)),
    ("sliderInterval", N(4000)),
    ("sliderOverlayColor", T("rgba(0, 0, 0, 0.35)")),
    ("sliderTitleColor", T("#ffffff")),
    ("sliderTitleSize", T("22px")),
    ("sliderBlur", B(false)),
    // Search
    ("showSearch", B(true)),
    ("searchBackground", T("#f3f4f6")),
    ("searchTextColor", T("#111827")),
    ("searchBorderRadius", T("9999px")),
    ("searchPadding", N(10)),
    // Product detail
    ("productDetailBackground", T("#ffffff")),
    ("productTitleColor", T("#111827")),
    ("productTitleSize", T("20px")),
    ("productDescriptionColor", T("#4b5563")),
    ("productImageHeight", T("240px")),
    ("productDetailBlur", B(true)),
    // Feedback
    ("showFeedback", B(true)),
    ("feedbackButtonColor", T("#1f2937")),
    ("feedbackStarColor", T("#fbbf24")),
    ("feedbackBackground", T("#ffffff")),
    // Category bar
    ("categoryBarBackground", T("#ffffff")),
    ("categoryTextColor", T("#374151")),
    ("categoryActiveColor", T("#1f2937")),
    ("categoryActiveTextColor", T("#ffffff")),
    ("categoryBarPadding", N(8)),
    ("categoryBarGap", N(8)),
    ("categoryBarSticky", B(true)),
    ("categoryBarBlur", B(false)),
    // Bottom navigation
    ("showBottomNav", B(true)),
    ("bottomNavBackground", T("rgba(255, 255, 255, 0.9)")),
    ("bottomNavIconColor", T("#6b7280")),
    ("bottomNavActiveColor", T("#1f2937")),
    ("bottomNavHeight", T("64px")),
    ("bottomNavBlur", B(true)),
    // Business profile
    ("showProfileCover", B(true)),
    ("profileCoverHeight", T("180px")),
    ("profileLogoSize", T("88px")),
    ("profileNameColor", T("#111827")),
    ("profileNameSize", T("24px")),
    ("profileInfoColor", T("#6b7280")),
];
