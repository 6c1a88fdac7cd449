use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// UI theme name (e.g., "dark", "light", "dracula")
    pub theme: Option<String>,
    /// Startup default for the thought visibility toggle
    pub show_thoughts: Option<bool>,
    /// Pacing of the built-in mock supervisor's thought steps
    pub thinking_delay_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "ponder")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
        match self.show_thoughts {
            Some(true) => println!("  show-thoughts: on"),
            Some(false) => println!("  show-thoughts: off"),
            None => println!("  show-thoughts: (unset, defaults to off)"),
        }
        match self.thinking_delay_ms {
            Some(ms) => println!("  thinking-delay-ms: {ms}"),
            None => println!("  thinking-delay-ms: (unset, defaults to 400)"),
        }
    }

    /// Applies a `set` from the CLI. Keys use the hyphenated CLI spelling.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<String, Box<dyn std::error::Error>> {
        match key {
            "theme" => {
                self.theme = Some(value.to_string());
                Ok(format!("Set theme to: {value}"))
            }
            "show-thoughts" => {
                let on = match value {
                    "on" | "true" => true,
                    "off" | "false" => false,
                    other => return Err(format!("show-thoughts must be on or off, got: {other}").into()),
                };
                self.show_thoughts = Some(on);
                Ok(format!("Set show-thoughts to: {value}"))
            }
            "thinking-delay-ms" => {
                let ms: u64 = value
                    .parse()
                    .map_err(|_| format!("thinking-delay-ms must be a number, got: {value}"))?;
                self.thinking_delay_ms = Some(ms);
                Ok(format!("Set thinking-delay-ms to: {ms}"))
            }
            other => Err(format!("Unknown config key: {other}").into()),
        }
    }

    pub fn unset_key(&mut self, key: &str) -> Result<String, Box<dyn std::error::Error>> {
        match key {
            "theme" => {
                self.theme = None;
                Ok("Unset theme".to_string())
            }
            "show-thoughts" => {
                self.show_thoughts = None;
                Ok("Unset show-thoughts".to_string())
            }
            "thinking-delay-ms" => {
                self.thinking_delay_ms = None;
                Ok("Unset thinking-delay-ms".to_string())
            }
            other => Err(format!("Unknown config key: {other}").into()),
        }
    }
}
