//! CLI module for audiograb.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{CliResultsView, Output};

use clap::{Parser, Subcommand};

/// audiograb - best-audio downloader with MP3 conversion
///
/// Paste a video URL or code (or a list of them), pick a destination folder,
/// and get one MP3 per item.
#[derive(Parser, Debug)]
#[command(name = "audiograb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the audio of one or more videos as MP3
    Download {
        /// Video URL or code; a list when --list is set. Reads stdin when omitted or "-"
        input: Option<String>,

        /// Treat the input as one URL or code per line
        #[arg(short, long)]
        list: bool,

        /// Destination folder (defaults to the last one used)
        #[arg(short, long)]
        dest: Option<String>,

        /// yt-dlp executable to use
        #[arg(long = "yt-dlp", env = "AUDIOGRAB_YTDLP", default_value = "yt-dlp")]
        yt_dlp: String,

        /// Let yt-dlp print its warnings (shown with -vv)
        #[arg(long)]
        tool_output: bool,
    },

    /// Check system requirements and configuration
    Doctor {
        /// yt-dlp executable to check
        #[arg(long = "yt-dlp", env = "AUDIOGRAB_YTDLP", default_value = "yt-dlp")]
        yt_dlp: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "destination_folder")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download_list() {
        let cli = Cli::try_parse_from([
            "audiograb", "-v", "download", "--list", "-d", "/music", "abc",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Download {
                input, list, dest, ..
            } => {
                assert_eq!(input.as_deref(), Some("abc"));
                assert!(list);
                assert_eq!(dest.as_deref(), Some("/music"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_download_tool_output() {
        let cli = Cli::try_parse_from(["audiograb", "download", "--tool-output", "abc"]).unwrap();
        match cli.command {
            Commands::Download { tool_output, .. } => assert!(tool_output),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["audiograb", "download", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Download {
                tool_output: false,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["audiograb", "download", "--verbose-tool", "abc"]).is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from([
            "audiograb", "config", "set", "destination_folder", "/tmp/x",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Set { .. }
            }
        ));
    }
}
