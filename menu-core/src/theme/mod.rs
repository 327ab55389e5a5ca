//! Theme: settings record, presets, style variables and the store

pub mod presets;
pub mod store;
pub mod style;

pub use presets::{preset, preset_names};
pub use store::ThemeStore;
pub use style::{
    StyleSheet, StyleSink, apply_styles, css_value, css_variable_name, derive_style_variables,
};
