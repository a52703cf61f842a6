//! Configuration CLI commands
//!
//! Shows and updates the saved export settings.

use clap::Subcommand;

use crate::config::{ExportPaths, Settings, SEPARATOR_CHOICES};
use crate::error::{ExportError, ExportResult};
use crate::export::{ExportFormat, TreeEncoding};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change saved settings
    Set {
        /// Cell separator for tables
        #[arg(long)]
        separator: Option<char>,
        /// Stem of exported file names
        #[arg(long)]
        base_name: Option<String>,
        /// Default output shape
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Default tree encoding
        #[arg(long, value_enum)]
        encoding: Option<TreeEncoding>,
        /// Add path level columns to tables by default
        #[arg(long)]
        path_levels: Option<bool>,
        /// Default site key
        #[arg(long)]
        site: Option<String>,
        /// Default content language
        #[arg(long)]
        language: Option<String>,
        /// Default workspace
        #[arg(long)]
        workspace: Option<String>,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &ExportPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> ExportResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Content Export Configuration");
            println!("============================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Output directory: {}", paths.output_dir().display());
            println!();
            println!("Settings:");
            println!("  Separator:       {}", settings.separator);
            println!("  Base name:       {}", settings.base_name);
            println!("  Format:          {:?}", settings.default_format);
            println!("  Tree encoding:   {:?}", settings.tree_encoding);
            println!("  Pretty JSON:     {}", settings.pretty);
            println!("  Path levels:     {}", settings.include_path_levels);
            println!(
                "  Site:            {}",
                settings.site_key.as_deref().unwrap_or("(not set)")
            );
            println!("  Language:        {}", settings.language);
            println!("  Workspace:       {}", settings.workspace);
        }

        ConfigCommands::Set {
            separator,
            base_name,
            format,
            encoding,
            path_levels,
            site,
            language,
            workspace,
        } => {
            if let Some(separator) = separator {
                settings.separator = separator;
            }
            if let Some(base_name) = base_name {
                if base_name.trim().is_empty() {
                    return Err(ExportError::Validation("Base name cannot be empty".into()));
                }
                settings.base_name = base_name;
            }
            if let Some(format) = format {
                settings.default_format = format;
            }
            if let Some(encoding) = encoding {
                settings.tree_encoding = encoding;
            }
            if let Some(path_levels) = path_levels {
                settings.include_path_levels = path_levels;
            }
            if let Some(site) = site {
                settings.site_key = Some(site);
            }
            if let Some(language) = language {
                settings.language = language;
            }
            if let Some(workspace) = workspace {
                settings.workspace = workspace;
            }

            settings.save(paths)?;
            println!("Settings saved to {}", paths.settings_file().display());

            if !settings.separator_is_offered() {
                let offered: Vec<String> = SEPARATOR_CHOICES.iter().map(|c| c.to_string()).collect();
                println!(
                    "Note: '{}' is not one of the usual separators ({})",
                    settings.separator,
                    offered.join(" ")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set_site(site: &str) -> ConfigCommands {
        ConfigCommands::Set {
            separator: Some('|'),
            base_name: None,
            format: None,
            encoding: Some(TreeEncoding::Yaml),
            path_levels: None,
            site: Some(site.into()),
            language: None,
            workspace: None,
        }
    }

    #[test]
    fn test_set_persists_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_config_command(&paths, &mut settings, set_site("digitall")).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.separator, '|');
        assert_eq!(loaded.tree_encoding, TreeEncoding::Yaml);
        assert_eq!(loaded.site_key.as_deref(), Some("digitall"));
        assert_eq!(loaded.language, "en");
    }

    #[test]
    fn test_empty_base_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let cmd = ConfigCommands::Set {
            separator: None,
            base_name: Some("  ".into()),
            format: None,
            encoding: None,
            path_levels: None,
            site: None,
            language: None,
            workspace: None,
        };
        let err = handle_config_command(&paths, &mut settings, cmd).unwrap_err();
        assert!(matches!(err, ExportError::Validation(_)));
        assert!(!paths.settings_file().exists());
    }
}
