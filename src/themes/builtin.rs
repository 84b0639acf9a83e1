use super::Theme;
use crate::Result;
use ohno::IntoAppError;
use strum::IntoEnumIterator;

/// The built-in themes, embedded at compile time.
///
/// The build script validates the JSON sources, so `load` failing on an
/// embedded theme means the binary itself is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinTheme {
    Default,
    Dark,
    TokyoNight,
    Dracula,
    Gruvbox,
    Radical,
}

impl BuiltinTheme {
    /// Look up a built-in theme by its kebab-case name.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        Self::iter().find(|theme| theme.to_string() == name)
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Default => include_str!("../../themes/default.json"),
            Self::Dark => include_str!("../../themes/dark.json"),
            Self::TokyoNight => include_str!("../../themes/tokyo-night.json"),
            Self::Dracula => include_str!("../../themes/dracula.json"),
            Self::Gruvbox => include_str!("../../themes/gruvbox.json"),
            Self::Radical => include_str!("../../themes/radical.json"),
        }
    }

    pub fn load(self) -> Result<Theme> {
        serde_json::from_str(self.source()).into_app_err_with(|| format!("parsing built-in theme '{self}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_themes_load() {
        for theme in BuiltinTheme::iter() {
            let _ = theme.load().unwrap();
        }
    }

    #[test]
    fn test_find_by_kebab_case_name() {
        assert_eq!(BuiltinTheme::find("tokyo-night"), Some(BuiltinTheme::TokyoNight));
        assert_eq!(BuiltinTheme::find("default"), Some(BuiltinTheme::Default));
        assert_eq!(BuiltinTheme::find("TokyoNight"), None);
        assert_eq!(BuiltinTheme::find("nope"), None);
    }
}
