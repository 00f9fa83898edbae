//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize the icon table as a TOML array
    fn icons_to_toml(&self) -> String {
        let quoted: Vec<String> = self
            .icons
            .iter()
            .map(|icon| format!("{:?}", icon))
            .collect();
        format!("[{}]", quoted.join(", "))
    }

    /// Render this config as a commented config.toml
    pub fn to_toml(&self) -> String {
        let catalog_line = match &self.catalog_path {
            Some(path) => format!("catalog_path = {:?}", path.display().to_string()),
            None => "# catalog_path = \"/path/to/items.json\"   # default: bundled catalog".to_string(),
        };

        format!(
            r#"# stockpile configuration

# Catalog of inventory records ({{"ItemDatas": [{{"IconIndex", "Name", "Description", "Stat"}}]}})
{catalog_line}

# How many times the catalog is repeated to build the list (1-10000)
scale = {scale}

# Rows this many lines above and below the viewport stay active (0-500)
buffer = {buffer:?}

# Viewport height assumed until the terminal reports its size
viewport_height = {viewport:?}

# Lines per row (1-3)
row_height = {row_height}

# Icon glyphs, indexed by IconIndex
icons = {icons}

# Theme: Dark, Light, Monokai, Dracula, Nord, Solarized
theme = "{theme}"

# Frame counter in the title bar
show_fps = {show_fps}

[fps]
refresh_interval_secs = {fps_interval:?}  # 0.1 - 5.0

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            catalog_line = catalog_line,
            scale = self.scale,
            buffer = self.buffer,
            viewport = self.viewport_height,
            row_height = self.row_height,
            icons = self.icons_to_toml(),
            theme = self.theme,
            show_fps = self.show_fps,
            fps_interval = self.fps.refresh_interval_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
