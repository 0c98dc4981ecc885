//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILENAMES: [&str; 2] = ["traitor.toml", ".traitor.toml"];
const APP_DIR: &str = "turing-traitor";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./traitor.toml` or `./.traitor.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/turing-traitor/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the given sources over the defaults; missing files are skipped.
    fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./traitor.toml or ./.traitor.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", marker, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.session.models.is_empty());
        assert_eq!(config.game.max_turns, 15);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("turing-traitor"));
    }

    #[test]
    fn test_later_sources_override_earlier_ones() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("traitor.toml");
        fs::write(
            &global,
            "[game]\nmax_turns = 20\nmax_retries = 5\n\n[session]\ntopic = \"from global\"\n",
        )
        .unwrap();
        fs::write(&project, "[game]\nmax_turns = 6\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), Some(&project), None).unwrap();

        assert_eq!(config.game.max_turns, 6);
        assert_eq!(config.game.max_retries, 5);
        assert_eq!(config.session.topic.as_deref(), Some("from global"));
    }

    #[test]
    fn test_explicit_path_has_highest_priority() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("traitor.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[providers]\ndefault = \"groq\"\n").unwrap();
        fs::write(&explicit, "[providers]\ndefault = \"google\"\n").unwrap();

        let config = ConfigLoader::load_from(None, Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.providers.default.as_deref(), Some("google"));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("absent.toml");

        let config = ConfigLoader::load_from(Some(&absent), Some(&absent), None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[game]\nmax_turns = \"many\"\n").unwrap();

        assert!(ConfigLoader::load_from(None, None, Some(&explicit)).is_err());
    }
}
