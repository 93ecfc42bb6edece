//! Panel configuration and presets.
//!
//! The two observed deployments of this widget differed only in which
//! heading ranks participate and in the panel title, so both live here as
//! built-in presets. A TOML config file can adjust the defaults and define
//! further named presets; CLI flags override both.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PagetocError;

/// Distance in px from the viewport top at which a heading counts as
/// "current" while scrolling.
pub const DEFAULT_OFFSET_PX: u32 = 100;

/// Element id the panel mounts into when present.
pub const DEFAULT_MOUNT_ID: &str = "toc";

/// Inclusive heading rank range, validated to 1 ≤ min ≤ max ≤ 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    min: u8,
    max: u8,
}

impl LevelRange {
    pub fn new(min: u8, max: u8) -> Result<Self, PagetocError> {
        let reason = if min == 0 || max == 0 {
            Some("levels start at 1")
        } else if max > 6 {
            Some("levels end at 6")
        } else if min > max {
            Some("range is inverted")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(PagetocError::InvalidLevels {
                spec: format!("{min}-{max}"),
                reason: reason.into(),
            }),
            None => Ok(Self { min, max }),
        }
    }

    /// Parse "2-3" or a single rank "2".
    pub fn parse(spec: &str) -> Result<Self, PagetocError> {
        let invalid = |reason: &str| PagetocError::InvalidLevels {
            spec: spec.to_string(),
            reason: reason.into(),
        };
        let (a, b) = match spec.split_once('-') {
            Some((a, b)) => (a, b),
            None => (spec, spec),
        };
        let min: u8 = a.trim().parse().map_err(|_| invalid("not a number"))?;
        let max: u8 = b.trim().parse().map_err(|_| invalid("not a number"))?;
        Self::new(min, max)
    }

    pub fn contains(&self, rank: u8) -> bool {
        rank >= self.min && rank <= self.max
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

/// Full panel configuration. Field-for-field this is the union of the two
/// observed variants plus the labels they hardcoded.
#[derive(Debug, Clone)]
pub struct TocConfig {
    pub levels: LevelRange,
    pub offset_px: u32,
    pub mount_id: String,
    pub panel_title: String,
    /// Visible caption on the toggle button.
    pub toggle_caption: String,
    /// aria-label on the toggle button.
    pub open_label: String,
    /// aria-label on the close button.
    pub close_label: String,
}

impl TocConfig {
    /// Preset `page`: ranks 1–3, the variant whose selector includes the
    /// page's own top-level heading.
    pub fn page() -> Self {
        Self {
            levels: LevelRange { min: 1, max: 3 },
            offset_px: DEFAULT_OFFSET_PX,
            mount_id: DEFAULT_MOUNT_ID.into(),
            panel_title: "Содержание статьи".into(),
            toggle_caption: "Содержание".into(),
            open_label: "Открыть содержание".into(),
            close_label: "Закрыть содержание".into(),
        }
    }

    /// Preset `article`: ranks 2–3, skipping the page title heading.
    pub fn article() -> Self {
        Self {
            levels: LevelRange { min: 2, max: 3 },
            panel_title: "Содержание".into(),
            ..Self::page()
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Self::page()),
            "article" => Some(Self::article()),
            _ => None,
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self::page()
    }
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Top-level shape of a pagetoc.toml. Everything optional; absent fields
/// keep their preset values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub offset: Option<u32>,
    pub mount: Option<String>,
    pub title: Option<String>,
    pub toggle_caption: Option<String>,
    pub open_label: Option<String>,
    pub close_label: Option<String>,
    #[serde(default)]
    pub presets: BTreeMap<String, PresetDef>,
}

/// A named preset in the config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetDef {
    /// `[min, max]` inclusive rank range.
    pub levels: [u8; 2],
    pub title: Option<String>,
    pub offset: Option<u32>,
    pub mount: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, PagetocError> {
        let text = fs::read_to_string(path).map_err(|e| PagetocError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| PagetocError::ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Resolve the effective config: built-in default, then config-file
/// defaults, then the named preset (built-in or file-defined). CLI flag
/// overrides are applied by the caller on top of the result.
pub fn resolve(preset: Option<&str>, file: Option<&ConfigFile>) -> Result<TocConfig, PagetocError> {
    let mut config = TocConfig::default();

    if let Some(file) = file {
        apply_file_defaults(&mut config, file);
    }

    if let Some(name) = preset {
        if let Some(builtin) = TocConfig::builtin(name) {
            config.levels = builtin.levels;
            config.panel_title = builtin.panel_title;
        } else {
            let def = file
                .and_then(|f| f.presets.get(name))
                .ok_or_else(|| PagetocError::UnknownPreset { name: name.into() })?;
            config.levels = LevelRange::new(def.levels[0], def.levels[1])?;
            if let Some(title) = &def.title {
                config.panel_title = title.clone();
            }
            if let Some(offset) = def.offset {
                config.offset_px = offset;
            }
            if let Some(mount) = &def.mount {
                config.mount_id = mount.clone();
            }
        }
    }

    Ok(config)
}

fn apply_file_defaults(config: &mut TocConfig, file: &ConfigFile) {
    if let Some(offset) = file.offset {
        config.offset_px = offset;
    }
    if let Some(mount) = &file.mount {
        config.mount_id = mount.clone();
    }
    if let Some(title) = &file.title {
        config.panel_title = title.clone();
    }
    if let Some(caption) = &file.toggle_caption {
        config.toggle_caption = caption.clone();
    }
    if let Some(label) = &file.open_label {
        config.open_label = label.clone();
    }
    if let Some(label) = &file.close_label {
        config.close_label = label.clone();
    }
}
