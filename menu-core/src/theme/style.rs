//! Global style variables
//!
//! Every theme key becomes a CSS custom property (`primaryColor` →
//! `--primary-color`). Views read only these variables, plus the document
//! background and font, which are applied separately.

use parking_lot::RwLock;
use shared::models::{ThemeSettings, ThemeValue};
use std::collections::BTreeMap;

/// Keys whose numeric values are pixel lengths
const PIXEL_SUFFIXES: [&str; 6] = ["Padding", "Gap", "Radius", "Size", "Width", "Height"];

/// Theme key that drives the document background
pub const BACKGROUND_KEY: &str = "backgroundColor";
/// Theme key that drives the document font
pub const FONT_KEY: &str = "fontFamily";

const FALLBACK_BACKGROUND: &str = "#ffffff";
const FALLBACK_FONT: &str = "sans-serif";

/// Receiver of style side effects (the document, in a browser)
pub trait StyleSink: Send + Sync {
    fn set_variable(&self, name: &str, value: &str);
    fn set_document_background(&self, color: &str);
    fn set_document_font(&self, font: &str);
}

/// `primaryColor` → `--primary-color`
pub fn css_variable_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    name.push_str("--");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// CSS text for one value. Values are not validated: whatever the record
/// holds ends up in the style output.
pub fn css_value(key: &str, value: &ThemeValue) -> String {
    match value {
        ThemeValue::Text(s) => s.clone(),
        ThemeValue::Flag(b) => (if *b { "1" } else { "0" }).to_string(),
        ThemeValue::Number(n) => {
            if PIXEL_SUFFIXES.iter().any(|s| key.ends_with(s)) {
                format!("{}px", n)
            } else {
                n.to_string()
            }
        }
    }
}

/// All custom properties for a record, keyed by variable name
pub fn derive_style_variables(theme: &ThemeSettings) -> BTreeMap<String, String> {
    theme
        .iter()
        .map(|(key, value)| (css_variable_name(key), css_value(key, value)))
        .collect()
}

/// Push a full record into a sink
pub fn apply_styles(theme: &ThemeSettings, sink: &dyn StyleSink) {
    for (name, value) in derive_style_variables(theme) {
        sink.set_variable(&name, &value);
    }
    sink.set_document_background(theme.text_or(BACKGROUND_KEY, FALLBACK_BACKGROUND));
    sink.set_document_font(theme.text_or(FONT_KEY, FALLBACK_FONT));
}

#[derive(Debug, Default)]
struct SheetState {
    variables: BTreeMap<String, String>,
    background: Option<String>,
    font: Option<String>,
    applied: u64,
}

/// In-memory style sheet that can render itself as CSS
#[derive(Debug, Default)]
pub struct StyleSheet {
    state: RwLock<SheetState>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<String> {
        self.state.read().variables.get(name).cloned()
    }

    pub fn variables(&self) -> BTreeMap<String, String> {
        self.state.read().variables.clone()
    }

    pub fn background(&self) -> Option<String> {
        self.state.read().background.clone()
    }

    pub fn font(&self) -> Option<String> {
        self.state.read().font.clone()
    }

    /// Number of background applications seen, one per full style pass
    pub fn apply_count(&self) -> u64 {
        self.state.read().applied
    }

    /// `:root { ... }` with every variable, plus the body rule
    pub fn to_css(&self) -> String {
        let state = self.state.read();
        let mut css = String::from(":root {\n");
        for (name, value) in &state.variables {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");
        if state.background.is_some() || state.font.is_some() {
            css.push_str("body {\n");
            if let Some(bg) = &state.background {
                css.push_str(&format!("  background-color: {};\n", bg));
            }
            if let Some(font) = &state.font {
                css.push_str(&format!("  font-family: {};\n", font));
            }
            css.push_str("}\n");
        }
        css
    }
}

impl StyleSink for StyleSheet {
    fn set_variable(&self, name: &str, value: &str) {
        self.state
            .write()
            .variables
            .insert(name.to_string(), value.to_string());
    }

    fn set_document_background(&self, color: &str) {
        let mut state = self.state.write();
        state.background = Some(color.to_string());
        state.applied += 1;
    }

    fn set_document_font(&self, font: &str) {
        self.state.write().font = Some(font.to_string());
    }
}
