//! Console theme configuration.

use serde::{Deserialize, Serialize};

/// Background and accent colors, persisted by a `ThemeStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub bg_color: String,
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bg_color: "#09090b".into(),
            accent_color: "#10b981".into(),
        }
    }
}

impl ThemeConfig {
    /// Basic sanity check: both fields must be `#rrggbb` hex colors.
    pub fn is_valid(&self) -> bool {
        is_hex_color(&self.bg_color) && is_hex_color(&self.accent_color)
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ThemeConfig::default().is_valid());
    }

    #[test]
    fn rejects_malformed_colors() {
        let theme = ThemeConfig {
            bg_color: "black".into(),
            accent_color: "#10b981".into(),
        };
        assert!(!theme.is_valid());
    }
}
