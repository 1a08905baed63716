use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BlockswapError, BlockswapResult};
use crate::patch::{builtin_patches, Patch};

pub const LOCAL_CONFIG_FILE: &str = "blockswap.toml";

/// A user-defined patch, as written in a config file
///
/// Each side is given either inline (`*_text`) or as a path (`*_file`)
/// relative to the config file. Leaving out the new side deletes the block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockswapConfig {
    /// Directory to scan, relative paths resolve against `base_dir`
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// File extension to patch, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub patches: Vec<PatchSpec>,

    /// Directory of the config file; not serialized
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_extension() -> String {
    "cpp".to_string()
}

impl Default for BlockswapConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            extension: default_extension(),
            patches: Vec::new(),
            base_dir: None,
        }
    }
}

fn read_side(
    spec_name: &str,
    side: &str,
    text: &Option<String>,
    file: &Option<PathBuf>,
    base: &Path,
) -> BlockswapResult<Option<String>> {
    match (text, file) {
        (Some(_), Some(_)) => Err(BlockswapError::config_error(format!(
            "patch '{}' sets both {side}_text and {side}_file",
            spec_name
        ))),
        (Some(text), None) => Ok(Some(text.clone())),
        (None, Some(file)) => {
            let path = base.join(file);
            let text =
                fs::read_to_string(&path).map_err(|e| BlockswapError::io_error(e, Some(&path)))?;
            Ok(Some(text))
        }
        (None, None) => Ok(None),
    }
}

impl PatchSpec {
    /// Turn the spec into a `Patch`, reading any referenced files from `base`
    pub fn resolve(&self, base: &Path) -> BlockswapResult<Patch> {
        let old_text = read_side(&self.name, "old", &self.old_text, &self.old_file, base)?
            .ok_or_else(|| {
                BlockswapError::config_error(format!(
                    "patch '{}' needs old_text or old_file",
                    self.name
                ))
            })?;
        let new_text =
            read_side(&self.name, "new", &self.new_text, &self.new_file, base)?.unwrap_or_default();

        let patch = Patch::new(self.name.clone(), old_text, new_text)?;
        Ok(match &self.description {
            Some(d) => patch.with_description(d.clone()),
            None => patch,
        })
    }
}

impl BlockswapConfig {
    pub fn load(path: &Path) -> BlockswapResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let content =
            fs::read_to_string(path).map_err(|e| BlockswapError::io_error(e, Some(path)))?;

        let mut config: Self = match ext {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => {
                return Err(BlockswapError::config_error(format!(
                    "Unsupported config format: {}",
                    ext
                )))
            }
        };

        config.base_dir = Some(
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        );
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> BlockswapResult<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let content = match ext {
            "json" => serde_json::to_string_pretty(self)?,
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string(self)?,
            _ => {
                return Err(BlockswapError::config_error(format!(
                    "Unsupported config format: {}",
                    ext
                )))
            }
        };

        fs::write(path, content).map_err(|e| BlockswapError::io_error(e, Some(path)))
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blockswap")
            .join("config.toml")
    }

    /// Explicit path, else `./blockswap.toml`, else the user config, else defaults
    pub fn discover(explicit: Option<&Path>) -> BlockswapResult<Self> {
        Self::discover_in(explicit, Path::new("."), &Self::default_config_path())
    }

    fn discover_in(explicit: Option<&Path>, cwd: &Path, user: &Path) -> BlockswapResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }

        if user.is_file() {
            return Self::load(user);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn base(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Target directory with relative paths anchored at the config file
    pub fn resolved_target_dir(&self) -> PathBuf {
        if self.target_dir.is_absolute() {
            self.target_dir.clone()
        } else {
            self.base().join(&self.target_dir)
        }
    }

    pub fn user_patches(&self) -> BlockswapResult<Vec<Patch>> {
        let base = self.base();
        self.patches.iter().map(|spec| spec.resolve(&base)).collect()
    }

    /// User patches shadow built-ins with the same name
    pub fn resolve_patch(&self, name: &str) -> BlockswapResult<Patch> {
        if let Some(spec) = self.patches.iter().find(|p| p.name == name) {
            return spec.resolve(&self.base());
        }
        crate::patch::find_builtin(name).ok_or_else(|| BlockswapError::unknown_patch(name))
    }

    /// Built-ins first, in application order, then user patches
    pub fn all_patches(&self) -> BlockswapResult<Vec<Patch>> {
        let user = self.user_patches()?;
        let mut patches: Vec<Patch> = builtin_patches()
            .into_iter()
            .map(|b| match user.iter().find(|u| u.name == b.name) {
                Some(u) => u.clone(),
                None => b,
            })
            .collect();

        for patch in user {
            if !patches.iter().any(|p| p.name == patch.name) {
                patches.push(patch);
            }
        }
        Ok(patches)
    }
}
