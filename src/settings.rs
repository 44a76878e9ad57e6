use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Overall overlay opacity in `[0.0, 1.0]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Pause input capture and CPU sampling while the overlay is minimized.
    /// Off by default; the panels keep running out of sight.
    #[serde(default)]
    pub pause_when_hidden: bool,
    /// Width of the CPU strip in cells.
    #[serde(default = "default_cpu_columns")]
    pub cpu_columns: usize,
    #[serde(default = "default_keyboard_cell_size")]
    pub keyboard_cell_size: f32,
    #[serde(default = "default_mouse_cell_size")]
    pub mouse_cell_size: f32,
    #[serde(default = "default_cpu_cell_size")]
    pub cpu_cell_size: f32,
    /// Inactive block color.
    #[serde(default = "default_block_color")]
    pub block_color: [u8; 3],
    /// Active block color.
    #[serde(default = "default_active_color")]
    pub active_color: [u8; 3],
    #[serde(default = "default_border_color")]
    pub border_color: [u8; 3],
    /// Panel background visible through the block gutters.
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Background flashed while the pointer is moving.
    #[serde(default = "default_highlight_background")]
    pub highlight_background: [u8; 3],
}

fn default_opacity() -> f32 {
    0.9
}

fn default_cpu_columns() -> usize {
    29
}

fn default_keyboard_cell_size() -> f32 {
    12.0
}

fn default_mouse_cell_size() -> f32 {
    14.0
}

fn default_cpu_cell_size() -> f32 {
    10.0
}

fn default_block_color() -> [u8; 3] {
    [0x69, 0x69, 0x69]
}

fn default_active_color() -> [u8; 3] {
    [0xFC, 0x89, 0x74]
}

fn default_border_color() -> [u8; 3] {
    [0x00, 0x00, 0x00]
}

fn default_background() -> [u8; 3] {
    [0xA9, 0xA9, 0xA9]
}

fn default_highlight_background() -> [u8; 3] {
    [0xFC, 0x89, 0x74]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            debug_logging: false,
            pause_when_hidden: false,
            cpu_columns: default_cpu_columns(),
            keyboard_cell_size: default_keyboard_cell_size(),
            mouse_cell_size: default_mouse_cell_size(),
            cpu_cell_size: default_cpu_cell_size(),
            block_color: default_block_color(),
            active_color: default_active_color(),
            border_color: default_border_color(),
            background: default_background(),
            highlight_background: default_highlight_background(),
        }
    }
}

impl Settings {
    /// A missing or empty file yields the defaults; malformed JSON is an
    /// error so a typo does not silently reset the configuration.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
