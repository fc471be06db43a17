use serde::{Deserialize, Serialize};

/// Editor color theme. `System` follows the OS preference reported by the
/// embedder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    /// Resolve to dark-or-not given the current OS preference.
    pub fn is_dark(self, system_dark: bool) -> bool {
        match self {
            Theme::System => system_dark,
            Theme::Light => false,
            Theme::Dark => true,
        }
    }
}

/// Editor preferences. Always fully populated; keys missing from storage or
/// from the server response are filled from defaults, and `indent_unit` is
/// re-derived from `tab_size` on every write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_tab_size")]
    pub tab_size: u32,
    #[serde(default = "default_tab_size")]
    pub indent_unit: u32,
    #[serde(default = "default_true")]
    pub line_numbers: bool,
    #[serde(default = "default_true")]
    pub fold_gutter: bool,
    #[serde(default = "default_true")]
    pub match_brackets: bool,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_font_family() -> String {
    "Cascadia Code".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_tab_size() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

fn default_line_height() -> f64 {
    1.5
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            font_family: default_font_family(),
            font_size: default_font_size(),
            tab_size: default_tab_size(),
            indent_unit: default_tab_size(),
            line_numbers: true,
            fold_gutter: true,
            match_brackets: true,
            line_height: default_line_height(),
        }
    }
}

impl Preferences {
    /// Clamp out-of-range values and re-derive `indent_unit` from `tab_size`.
    pub fn normalized(mut self) -> Self {
        self.font_size = self.font_size.clamp(10, 24);
        if !matches!(self.tab_size, 2 | 4 | 8) {
            self.tab_size = default_tab_size();
        }
        self.indent_unit = self.tab_size;
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            self.line_height = default_line_height();
        }
        self
    }

    /// Overlay `other`'s keys on `self`. Used for the
    /// `defaults ≺ local ≺ server` precedence on login: keys present in
    /// `other` win, keys it omits keep the base value.
    pub fn merged_with(&self, other: &serde_json::Value) -> Self {
        let mut base = match serde_json::to_value(self) {
            Ok(v) => v,
            Err(_) => return self.clone(),
        };
        if let (Some(base_map), Some(over)) = (base.as_object_mut(), other.as_object()) {
            for (k, v) in over {
                base_map.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value::<Preferences>(base)
            .map(Preferences::normalized)
            .unwrap_or_else(|_| self.clone())
    }
}
