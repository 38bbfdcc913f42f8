use crate::config::toml_config::MAX_DEPTH_LIMIT;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cookbook")]
#[command(about = "Normalize recipe names and summarize recipes from a cookbook file")]
pub struct CliConfig {
    /// Override resolver.max_depth from the cookbook file
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the canonical form of a recipe name
    Parse { input: String },

    /// Flatten a recipe into its ingredients and total cook time
    Summary {
        /// Path to the TOML cookbook file
        #[arg(short, long, default_value = "cookbook.toml")]
        cookbook: String,

        name: String,
    },

    /// Load a cookbook file and resolve every recipe in it
    Check {
        #[arg(short, long, default_value = "cookbook.toml")]
        cookbook: String,
    },
}

impl CliConfig {
    pub fn cookbook_path(&self) -> Option<&str> {
        match &self.command {
            Command::Parse { .. } => None,
            Command::Summary { cookbook, .. } | Command::Check { cookbook } => Some(cookbook.as_str()),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            validate_range("max_depth", max_depth, 1, MAX_DEPTH_LIMIT)?;
        }
        if let Some(path) = self.cookbook_path() {
            validate_path("cookbook", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_command() {
        let config = CliConfig::try_parse_from([
            "cookbook",
            "summary",
            "--cookbook",
            "pancakes.toml",
            "Pancake",
            "--max-depth",
            "12",
        ])
        .unwrap();

        assert_eq!(config.max_depth, Some(12));
        assert_eq!(config.cookbook_path(), Some("pancakes.toml"));
        assert!(matches!(config.command, Command::Summary { ref name, .. } if name == "Pancake"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_command_needs_no_file() {
        let config = CliConfig::try_parse_from(["cookbook", "-v", "parse", "alpHa-alFRedo"]).unwrap();
        assert!(config.verbose);
        assert_eq!(config.cookbook_path(), None);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config =
            CliConfig::try_parse_from(["cookbook", "check", "--max-depth", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
