//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["agentgen.toml", ".agentgen.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `AGENTGEN_GENERATION__MODEL=...`
    /// 3. Project root: `./agentgen.toml` or `./.agentgen.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/agentgen/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path.filter(|p| !p.is_file()) {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }
        Self::figment(config_path, Self::global_config_path(), Self::project_config_path())
            .extract()
            .map_err(Box::new)
    }

    fn figment(
        config_path: Option<&Path>,
        global_path: Option<PathBuf>,
        project_path: Option<PathBuf>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = project_path {
            figment = figment.merge(Toml::file(project_path));
        }

        figment = figment.merge(Env::prefixed("AGENTGEN_").split("__"));

        // Explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/agentgen/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agentgen").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Render the effective configuration as TOML
    pub fn render_effective(config: &FileConfig) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(config)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let found = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Explicit: {}", found, path.display());
        }

        println!("  [ ENV ] Environment: AGENTGEN_<SECTION>__<KEY>");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./agentgen.toml or ./.agentgen.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let found = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", found, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.generation.agent_name, "MyAgent");
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("agentgen"));
    }

    #[test]
    fn test_file_priority() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("agentgen.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(
            &global,
            "[generation]\nagent_name = \"GlobalBot\"\nmodel = \"global/model\"\n\n[output]\ncolor = false\n",
        )
        .unwrap();
        fs::write(&project, "[generation]\nagent_name = \"ProjectBot\"\nmodel = \"project/model\"\n")
            .unwrap();
        fs::write(&explicit, "[generation]\nmodel = \"explicit/model\"\n").unwrap();

        let config: FileConfig =
            ConfigLoader::figment(Some(&explicit), Some(global), Some(project))
                .extract()
                .unwrap();
        assert_eq!(config.generation.agent_name, "ProjectBot");
        assert_eq!(config.generation.model, "explicit/model");
        assert!(!config.output.color);
        assert_eq!(config.output.code_extension, "py");
    }

    #[test]
    fn test_render_effective_round_trips() {
        let mut config = FileConfig::default();
        config.generation.agent_name = "NewsBot".to_string();
        let rendered = ConfigLoader::render_effective(&config).unwrap();
        assert!(rendered.contains("[generation]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_global_file_is_ignored() {
        let config: FileConfig = ConfigLoader::figment(
            None,
            Some(PathBuf::from("/nonexistent/agentgen/config.toml")),
            None,
        )
        .extract()
        .unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
