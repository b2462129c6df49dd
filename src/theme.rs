//! Theme configuration types for utility-first styling pipelines.
//!
//! Provides type-safe wrappers for color values, content glob patterns, and
//! plugin references with validation, plus the `ThemeConfig` record and its
//! last-write-wins merge semantics. Raw strings are kept as written so a
//! deserialize/serialize round trip reproduces the input.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CSS named colors accepted alongside hex notation
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0x00, 0x00, 0x00)),
    ("white", (0xFF, 0xFF, 0xFF)),
    ("red", (0xFF, 0x00, 0x00)),
    ("green", (0x00, 0x80, 0x00)),
    ("blue", (0x00, 0x00, 0xFF)),
    ("yellow", (0xFF, 0xFF, 0x00)),
    ("orange", (0xFF, 0xA5, 0x00)),
    ("purple", (0x80, 0x00, 0x80)),
    ("gray", (0x80, 0x80, 0x80)),
    ("grey", (0x80, 0x80, 0x80)),
    ("silver", (0xC0, 0xC0, 0xC0)),
    ("maroon", (0x80, 0x00, 0x00)),
    ("olive", (0x80, 0x80, 0x00)),
    ("lime", (0x00, 0xFF, 0x00)),
    ("aqua", (0x00, 0xFF, 0xFF)),
    ("cyan", (0x00, 0xFF, 0xFF)),
    ("teal", (0x00, 0x80, 0x80)),
    ("navy", (0x00, 0x00, 0x80)),
    ("fuchsia", (0xFF, 0x00, 0xFF)),
    ("magenta", (0xFF, 0x00, 0xFF)),
    ("indigo", (0x4B, 0x00, 0x82)),
    ("violet", (0xEE, 0x82, 0xEE)),
    ("pink", (0xFF, 0xC0, 0xCB)),
    ("brown", (0xA5, 0x2A, 0x2A)),
    ("gold", (0xFF, 0xD7, 0x00)),
    ("coral", (0xFF, 0x7F, 0x50)),
];

/// Keywords that are valid color values but carry no RGB triple
const COLOR_KEYWORDS: &[&str] = &["transparent", "currentcolor", "inherit"];

/// A validated color token value (hex or named).
/// Newtype wrapper keeping the raw string for round-trip fidelity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue(Arc<str>);

impl ColorValue {
    /// Create a validated ColorValue, returning error for unrecognized values
    /// Accepts #RGB, #RRGGBB, #RRGGBBAA, CSS named colors, and keywords
    pub fn validated(s: &str) -> Result<Self, String> {
        if Self::validate_format(s) {
            Ok(Self(Arc::from(s)))
        } else {
            Err(format!(
                "invalid color value '{}': expected hex (#RRGGBB) or a CSS color name",
                s
            ))
        }
    }

    fn validate_format(s: &str) -> bool {
        if let Some(hex) = s.strip_prefix('#') {
            return matches!(hex.len(), 3 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
        }

        let lower = s.to_ascii_lowercase();
        COLOR_KEYWORDS.contains(&lower.as_str())
            || NAMED_COLORS.iter().any(|(name, _)| *name == lower)
    }

    /// Get the inner string reference
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGB triple for hex and named forms; None for keywords like `inherit`
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        if let Some(hex) = self.0.strip_prefix('#') {
            return match hex.len() {
                3 => {
                    let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                    let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                    let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                    Some((r * 17, g * 17, b * 17))
                }
                6 | 8 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                    Some((r, g, b))
                }
                _ => None,
            };
        }

        let lower = self.0.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ColorValue {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validated(&s)
    }
}

impl From<ColorValue> for String {
    fn from(c: ColorValue) -> Self {
        c.0.to_string()
    }
}

/// A content glob pattern (e.g., "./src/**/*.{html,ts}")
/// Newtype wrapper for type safety; syntax is checked when the matcher is built
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobPattern(Arc<str>);

impl GlobPattern {
    /// Create a validated GlobPattern, returning error for empty patterns
    pub fn validated(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("glob pattern must be a non-empty string".to_string())
        } else {
            Ok(Self(Arc::from(s)))
        }
    }

    /// Get the inner string reference
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pattern with any leading "./" stripped, for matching root-relative paths
    #[inline]
    pub fn normalized(&self) -> &str {
        self.0.strip_prefix("./").unwrap_or(&self.0)
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validated(&s)
    }
}

impl From<GlobPattern> for String {
    fn from(g: GlobPattern) -> Self {
        g.0.to_string()
    }
}

/// An opaque plugin reference consumed by the downstream styling engine.
/// Never executed here; order determines application order downstream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginRef(Arc<str>);

impl PluginRef {
    /// Create a validated PluginRef, returning error for empty references
    pub fn validated(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("plugin reference must be a non-empty string".to_string())
        } else {
            Ok(Self(Arc::from(s)))
        }
    }

    /// Get the inner string reference
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PluginRef {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validated(&s)
    }
}

impl From<PluginRef> for String {
    fn from(p: PluginRef) -> Self {
        p.0.to_string()
    }
}

/// Token overrides layered on top of the styling engine's defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeExtend {
    /// Named color tokens (key -> color value)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, ColorValue>,
    /// Named font stacks (key -> ordered fallback list)
    #[serde(
        default,
        rename = "fontFamily",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub font_family: IndexMap<String, Vec<String>>,
}

impl ThemeExtend {
    /// Overlay `later` on top of self: last write wins per key
    pub fn merge_from(&mut self, later: ThemeExtend) {
        for (key, value) in later.colors {
            self.colors.insert(key, value);
        }
        for (key, stack) in later.font_family {
            self.font_family.insert(key, stack);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.font_family.is_empty()
    }
}

/// The `theme` section of a configuration fragment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeSection {
    /// Overrides merged into engine defaults rather than replacing them
    #[serde(default)]
    pub extend: ThemeExtend,
}

/// A theme configuration record: content globs, token overrides, plugins.
/// Constructed once at build-configuration time, read-only afterwards
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Glob patterns identifying source files to scan for class usage
    #[serde(default)]
    pub content: Vec<GlobPattern>,
    /// Theme token overrides
    #[serde(default)]
    pub theme: ThemeSection,
    /// Plugin references, applied in order by the downstream engine
    #[serde(default)]
    pub plugins: Vec<PluginRef>,
}

impl ThemeConfig {
    /// Overlay a later fragment on top of self.
    /// Maps merge last-write-wins; sequences take the order-preserving union
    pub fn merge_from(&mut self, later: ThemeConfig) {
        for glob in later.content {
            if !self.content.contains(&glob) {
                self.content.push(glob);
            }
        }

        self.theme.extend.merge_from(later.theme.extend);

        for plugin in later.plugins {
            if !self.plugins.contains(&plugin) {
                self.plugins.push(plugin);
            }
        }
    }
}

/// Fold an ordered fragment chain into one effective config (first is base)
pub fn merge_chain<I>(fragments: I) -> ThemeConfig
where
    I: IntoIterator<Item = ThemeConfig>,
{
    let mut iter = fragments.into_iter();
    let Some(mut merged) = iter.next() else {
        return ThemeConfig::default();
    };

    for fragment in iter {
        merged.merge_from(fragment);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(s: &str) -> ColorValue {
        ColorValue::validated(s).unwrap()
    }

    fn glob(s: &str) -> GlobPattern {
        GlobPattern::validated(s).unwrap()
    }

    // ==================== ColorValue tests ====================

    #[test]
    fn test_color_value_hex_six() {
        let c = color("#4F46E5");
        assert_eq!(c.as_str(), "#4F46E5");
        assert_eq!(c.rgb(), Some((0x4F, 0x46, 0xE5)));
    }

    #[test]
    fn test_color_value_hex_three_expands() {
        let c = color("#abc");
        assert_eq!(c.rgb(), Some((0xAA, 0xBB, 0xCC)));
    }

    #[test]
    fn test_color_value_hex_eight_ignores_alpha() {
        let c = color("#7C4DFF80");
        assert_eq!(c.rgb(), Some((0x7C, 0x4D, 0xFF)));
    }

    #[test]
    fn test_color_value_named() {
        let c = color("indigo");
        assert_eq!(c.rgb(), Some((0x4B, 0x00, 0x82)));
    }

    #[test]
    fn test_color_value_named_case_insensitive() {
        let c = color("Coral");
        assert_eq!(c.as_str(), "Coral");
        assert_eq!(c.rgb(), Some((0xFF, 0x7F, 0x50)));
    }

    #[test]
    fn test_color_value_keywords_have_no_rgb() {
        assert_eq!(color("transparent").rgb(), None);
        assert_eq!(color("currentColor").rgb(), None);
        assert_eq!(color("inherit").rgb(), None);
    }

    #[test]
    fn test_color_value_invalid() {
        assert!(ColorValue::validated("").is_err());
        assert!(ColorValue::validated("#12345").is_err()); // wrong length
        assert!(ColorValue::validated("#GGGGGG").is_err()); // non-hex digits
        assert!(ColorValue::validated("not-a-color").is_err());
        assert!(ColorValue::validated("4F46E5").is_err()); // missing '#'
    }

    #[test]
    fn test_color_value_display_preserves_raw() {
        assert_eq!(format!("{}", color("#FFD54F")), "#FFD54F");
        assert_eq!(format!("{}", color("currentColor")), "currentColor");
    }

    #[test]
    fn test_color_value_serde_rejects_invalid() {
        let result: Result<ColorValue, _> = serde_json::from_str("\"#12\"");
        assert!(result.is_err());

        let result: Result<ColorValue, _> = serde_json::from_str("\"#4F46E5\"");
        assert!(result.is_ok());
    }

    // ==================== GlobPattern tests ====================

    #[test]
    fn test_glob_pattern_valid() {
        let g = glob("./src/**/*.ts");
        assert_eq!(g.as_str(), "./src/**/*.ts");
    }

    #[test]
    fn test_glob_pattern_empty_rejected() {
        assert!(GlobPattern::validated("").is_err());
        assert!(GlobPattern::validated("   ").is_err());
    }

    #[test]
    fn test_glob_pattern_normalized_strips_dot_slash() {
        assert_eq!(glob("./src/**/*.ts").normalized(), "src/**/*.ts");
        assert_eq!(glob("src/**/*.ts").normalized(), "src/**/*.ts");
    }

    #[test]
    fn test_glob_pattern_serde_rejects_empty() {
        let result: Result<GlobPattern, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    // ==================== PluginRef tests ====================

    #[test]
    fn test_plugin_ref_valid() {
        let p = PluginRef::validated("@tailwindcss/typography").unwrap();
        assert_eq!(p.as_str(), "@tailwindcss/typography");
    }

    #[test]
    fn test_plugin_ref_empty_rejected() {
        assert!(PluginRef::validated("").is_err());
    }

    // ==================== ThemeExtend merge tests ====================

    #[test]
    fn test_extend_merge_last_write_wins() {
        let mut base = ThemeExtend::default();
        base.colors.insert("primary".to_string(), color("#4F46E5"));

        let mut later = ThemeExtend::default();
        later.colors.insert("primary".to_string(), color("#7C4DFF"));
        later
            .colors
            .insert("secondary".to_string(), color("#FFD54F"));

        base.merge_from(later);

        assert_eq!(base.colors.len(), 2);
        assert_eq!(base.colors["primary"].as_str(), "#7C4DFF");
        assert_eq!(base.colors["secondary"].as_str(), "#FFD54F");
    }

    #[test]
    fn test_extend_merge_disjoint_is_union() {
        let mut base = ThemeExtend::default();
        base.colors.insert("primary".to_string(), color("#111111"));

        let mut later = ThemeExtend::default();
        later.font_family.insert(
            "sans".to_string(),
            vec!["Inter".to_string(), "sans-serif".to_string()],
        );

        base.merge_from(later);

        assert_eq!(base.colors.len(), 1);
        assert_eq!(base.font_family.len(), 1);
        assert_eq!(base.font_family["sans"], vec!["Inter", "sans-serif"]);
    }

    #[test]
    fn test_extend_merge_font_stack_replaced_whole() {
        let mut base = ThemeExtend::default();
        base.font_family
            .insert("sans".to_string(), vec!["Helvetica".to_string()]);

        let mut later = ThemeExtend::default();
        later.font_family.insert(
            "sans".to_string(),
            vec!["Inter".to_string(), "sans-serif".to_string()],
        );

        base.merge_from(later);

        // The later stack replaces the earlier one, no element-wise merging
        assert_eq!(base.font_family["sans"], vec!["Inter", "sans-serif"]);
    }

    #[test]
    fn test_extend_is_empty() {
        assert!(ThemeExtend::default().is_empty());

        let mut extend = ThemeExtend::default();
        extend.colors.insert("primary".to_string(), color("#000000"));
        assert!(!extend.is_empty());
    }

    // ==================== ThemeConfig merge tests ====================

    fn fragment_a() -> ThemeConfig {
        let mut config = ThemeConfig {
            content: vec![glob("./src/**/*.{astro,html,js,jsx,ts,tsx}")],
            ..Default::default()
        };
        config
            .theme
            .extend
            .colors
            .insert("primary".to_string(), color("#4F46E5"));
        config.theme.extend.font_family.insert(
            "sans".to_string(),
            vec!["Inter".to_string(), "sans-serif".to_string()],
        );
        config
    }

    fn fragment_b() -> ThemeConfig {
        let mut config = ThemeConfig {
            content: vec![glob("./src/**/*.{astro,html,js,jsx,ts,tsx}")],
            ..Default::default()
        };
        config
            .theme
            .extend
            .colors
            .insert("primary".to_string(), color("#7C4DFF"));
        config
            .theme
            .extend
            .colors
            .insert("secondary".to_string(), color("#FFD54F"));
        config
    }

    #[test]
    fn test_config_merge_later_overrides() {
        let mut merged = fragment_a();
        merged.merge_from(fragment_b());

        assert_eq!(merged.theme.extend.colors["primary"].as_str(), "#7C4DFF");
        assert_eq!(merged.theme.extend.colors["secondary"].as_str(), "#FFD54F");
        // Font family from the earlier fragment survives
        assert_eq!(
            merged.theme.extend.font_family["sans"],
            vec!["Inter", "sans-serif"]
        );
    }

    #[test]
    fn test_config_merge_dedups_content() {
        let mut merged = fragment_a();
        merged.merge_from(fragment_b());

        // Identical content glob appears once
        assert_eq!(merged.content.len(), 1);
    }

    #[test]
    fn test_config_merge_preserves_content_order() {
        let mut base = ThemeConfig {
            content: vec![glob("./src/**/*.ts")],
            ..Default::default()
        };
        base.merge_from(ThemeConfig {
            content: vec![glob("./pages/**/*.html"), glob("./src/**/*.ts")],
            ..Default::default()
        });

        let patterns: Vec<&str> = base.content.iter().map(|g| g.as_str()).collect();
        assert_eq!(patterns, vec!["./src/**/*.ts", "./pages/**/*.html"]);
    }

    #[test]
    fn test_config_merge_plugins_union_in_order() {
        let mut base = ThemeConfig {
            plugins: vec![PluginRef::validated("a").unwrap()],
            ..Default::default()
        };
        base.merge_from(ThemeConfig {
            plugins: vec![
                PluginRef::validated("b").unwrap(),
                PluginRef::validated("a").unwrap(),
            ],
            ..Default::default()
        });

        let names: Vec<&str> = base.plugins.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // ==================== merge_chain tests ====================

    #[test]
    fn test_merge_chain_empty() {
        let merged = merge_chain(Vec::new());
        assert_eq!(merged, ThemeConfig::default());
    }

    #[test]
    fn test_merge_chain_single() {
        let merged = merge_chain(vec![fragment_a()]);
        assert_eq!(merged, fragment_a());
    }

    #[test]
    fn test_merge_chain_order_matters() {
        let forward = merge_chain(vec![fragment_a(), fragment_b()]);
        let reverse = merge_chain(vec![fragment_b(), fragment_a()]);

        assert_eq!(forward.theme.extend.colors["primary"].as_str(), "#7C4DFF");
        assert_eq!(reverse.theme.extend.colors["primary"].as_str(), "#4F46E5");
    }

    // ==================== serde round-trip tests ====================

    #[test]
    fn test_config_deserialize_full() {
        let json = r##"{
            "content": ["./src/**/*.{astro,html,js,jsx,ts,tsx}"],
            "theme": {
                "extend": {
                    "fontFamily": { "sans": ["Inter", "sans-serif"] },
                    "colors": { "primary": "#4F46E5" }
                }
            },
            "plugins": []
        }"##;

        let config: ThemeConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.content.len(), 1);
        assert_eq!(config.theme.extend.colors["primary"].as_str(), "#4F46E5");
        assert_eq!(
            config.theme.extend.font_family["sans"],
            vec!["Inter", "sans-serif"]
        );
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_config_deserialize_missing_sections_default() {
        let config: ThemeConfig = serde_json::from_str("{}").unwrap();
        assert!(config.content.is_empty());
        assert!(config.theme.extend.is_empty());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let original = fragment_a();
        let json = serde_json::to_string(&original).unwrap();
        let reparsed: ThemeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_config_round_trip_preserves_key_order() {
        let json = r##"{"theme":{"extend":{"colors":{"zeta":"#111111","alpha":"#222222"}}}}"##;
        let config: ThemeConfig = serde_json::from_str(json).unwrap();

        let keys: Vec<&String> = config.theme.extend.colors.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_config_deserialize_invalid_color_is_fatal() {
        let json = r##"{"theme":{"extend":{"colors":{"primary":"#nope"}}}}"##;
        let result: Result<ThemeConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
