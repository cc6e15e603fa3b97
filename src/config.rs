use serde::Deserialize;
use std::path::PathBuf;

use tracing::warn;

use crate::graph::{BuildOptions, GraphKind, LayoutOptions};

/// Archive read when neither the command line nor the config names one
pub const DEFAULT_ARCHIVE: &str = "enron.baughman-d.power.legal_agreements";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// mbox archive to analyse
    pub archive: String,
    pub graph: GraphConfig,
    pub layout: LayoutOptions,
    pub stats: StatsConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// "multi" (directed, one edge per message) or "simple" (undirected, one edge per pair)
    pub kind: GraphKind,
    /// Remove sender == recipient edges (default: only for "simple")
    pub strip_self_loops: Option<bool>,
    /// Compare addresses case-insensitively
    pub lowercase_addresses: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Bars in the degree rank chart
    pub top_nodes: usize,
    /// Report average shortest path as undefined instead of failing
    pub allow_disconnected: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg: String,
    pub bg_panel: String,
    pub fg: String,
    pub fg_muted: String,

    // Border colors
    pub border: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,
    pub secondary: String,

    // Plot colors
    pub node: String,
    pub edge: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive: DEFAULT_ARCHIVE.to_string(),
            graph: GraphConfig::default(),
            layout: LayoutOptions::default(),
            stats: StatsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kind: GraphKind::Multi,
            strip_self_loops: None,
            lowercase_addresses: true,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_nodes: 5,
            allow_disconnected: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            bg: "#1a1917".to_string(),
            bg_panel: "#262422".to_string(),
            fg: "#f7f7f5".to_string(),
            fg_muted: "#8c8985".to_string(),

            border: "#524f4c".to_string(),
            border_active: "#d4a366".to_string(), // primary

            primary: "#d4a366".to_string(),
            secondary: "#8fa5ae".to_string(),

            node: "#d4a366".to_string(),
            edge: "#3f6b3a".to_string(), // dim green
        }
    }
}

impl GraphConfig {
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::for_kind(self.kind);
        if let Some(strip) = self.strip_self_loops {
            options.strip_self_loops = strip;
        }
        options
    }
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("mailgraph/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/mailgraph/config.toml"))
    }

    pub fn load() -> Self {
        let config_path = Self::path();

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => warn!(path = %config_path.display(), "config parse error: {}", e),
                },
                Err(e) => warn!(path = %config_path.display(), "config read error: {}", e),
            }
        }

        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Archive path: command line first, then config, with `~` expanded
    pub fn archive_path(&self, cli: Option<&str>) -> PathBuf {
        let raw = cli.unwrap_or(&self.archive);
        PathBuf::from(shellexpand::tilde(raw).into_owned())
    }
}

impl ThemeConfig {
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn node(&self) -> ratatui::style::Color {
        parse_color(&self.node)
    }
    pub fn edge(&self) -> ratatui::style::Color {
        parse_color(&self.edge)
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    // Named colors
    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightgreen" => Color::LightGreen,
        "lightblue" => Color::LightBlue,
        "white" => Color::White,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.archive, DEFAULT_ARCHIVE);
        assert_eq!(config.graph.kind, GraphKind::Multi);
        assert_eq!(config.stats.top_nodes, 5);
        assert!(!config.graph.build_options().strip_self_loops);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
archive = "~/mail/enron.mbox"

[graph]
kind = "simple"

[layout]
seed = 1

[theme]
edge = "green"
"#,
        )
        .unwrap();

        assert_eq!(config.graph.kind, GraphKind::Simple);
        assert!(config.graph.build_options().strip_self_loops);
        assert!(config.graph.lowercase_addresses);
        assert_eq!(config.layout.seed, 1);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.theme.edge(), Color::Green);
        assert_eq!(config.theme.bg(), Color::Rgb(0x1a, 0x19, 0x17));

        let path = config.archive_path(None);
        assert!(path.ends_with("mail/enron.mbox"));
        assert!(!path.to_string_lossy().starts_with('~'));
        assert_eq!(config.archive_path(Some("other.mbox")), PathBuf::from("other.mbox"));
    }

    #[test]
    fn test_self_loop_override() {
        let config = Config::parse("[graph]\nkind = \"simple\"\nstrip_self_loops = false\n").unwrap();
        assert!(!config.graph.build_options().strip_self_loops);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Config::parse("[graph]\nkind = \"hyper\"\n").is_err());
    }
}
