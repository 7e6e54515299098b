//! Light/dark colour scheme for the shell.

/// Colour scheme applied to the document body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl ThemeMode {
    /// Stable name used for storage and the body attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored mode name.
    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite mode, used by the navbar toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Resolve the startup mode: a stored choice wins over the system
    /// `prefers-color-scheme` hint.
    #[must_use]
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        stored.and_then(Self::from_name).unwrap_or(if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_choice_beats_system_hint() {
        assert_eq!(ThemeMode::initial(Some("light"), true), ThemeMode::Light);
        assert_eq!(ThemeMode::initial(Some("dark"), false), ThemeMode::Dark);
    }

    #[test]
    fn system_hint_applies_without_stored_choice() {
        assert_eq!(ThemeMode::initial(None, true), ThemeMode::Dark);
        assert_eq!(ThemeMode::initial(Some("bogus"), false), ThemeMode::Light);
    }

    #[test]
    fn toggle_flips_and_round_trips() {
        let mode = ThemeMode::Light.toggled();
        assert_eq!(mode, ThemeMode::Dark);
        assert_eq!(ThemeMode::from_name(mode.as_str()), Some(mode));
    }
}
