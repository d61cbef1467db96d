use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::focus::{FocusMinutes, SessionType};

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(about = "A Pomodoro-style study timer for the terminal")]
#[command(long_about = "studybuddy - A Pomodoro-style study timer

Alternate focused study sessions with short breaks, and take a long break
after every fourth focus session. Completed sessions are kept in a local
history you can review and summarize.

QUICK START:
  studybuddy                  Open the interactive timer
  studybuddy start            Run one 25-minute focus session in the terminal
  studybuddy report week      Summarize the last 7 days

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studybuddy <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys: space/s start, p pause, r reset, 1/2/3 switch session,
    /// +/- change focus length, ? help, q quit.
    #[command(alias = "ui")]
    Tui,

    /// Run the timer in the plain terminal
    ///
    /// Counts down without a full-screen interface. After each session
    /// the next one is staged and started automatically until the
    /// requested number of sessions has completed.
    ///
    /// # Examples
    ///
    ///   studybuddy start                       One 25-minute focus session
    ///   studybuddy start -d 45                 One 45-minute focus session
    ///   studybuddy start --session short       A 5-minute break
    ///   studybuddy start --cycles 8            Four focus sessions and their breaks
    #[command(alias = "s")]
    Start(StartArgs),

    /// Show completed sessions
    ///
    /// Lists the most recent sessions first.
    #[command(alias = "h")]
    History {
        /// Maximum number of sessions to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },

    /// Summarize focus time over a period
    ///
    /// Periods: today, week (last 7 days), month (last 30 days), all.
    #[command(alias = "r")]
    Report {
        /// Period to report on
        #[arg(default_value = "week")]
        period: String,
    },

    /// Delete all recorded session history
    Clear {
        /// Skip the confirmation guard
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// View or change configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: studybuddy completions zsh > ~/.zsh/completions/_studybuddy
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the plain-terminal timer.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Session to begin with
    #[arg(long, short = 's', value_enum, default_value = "focus")]
    pub session: SessionArg,

    /// Focus length in minutes (15, 25, 30, 45 or 60)
    #[arg(long, short = 'd')]
    pub duration: Option<FocusMinutes>,

    /// Number of sessions to complete before exiting
    #[arg(long, short = 'c', default_value = "1")]
    pub cycles: u32,

    /// Do not record completed sessions
    #[arg(long)]
    pub no_record: bool,
}

/// Session type as given on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionArg {
    /// Focus session
    Focus,
    /// Short break
    #[value(alias = "break")]
    Short,
    /// Long break
    Long,
}

impl From<SessionArg> for SessionType {
    fn from(arg: SessionArg) -> Self {
        match arg {
            SessionArg::Focus => Self::Focus,
            SessionArg::Short => Self::ShortBreak,
            SessionArg::Long => Self::LongBreak,
        }
    }
}

/// Arguments for config commands.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set the default focus length (15, 25, 30, 45 or 60 minutes)
    SetDuration {
        /// Minutes
        minutes: FocusMinutes,
    },

    /// Print the configuration file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_command_defaults_to_tui() {
        let cli = Cli::try_parse_from(["studybuddy"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["studybuddy", "--output", "json", "history"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_short() {
        let cli = Cli::try_parse_from(["studybuddy", "history", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_start_defaults() {
        let cli = Cli::try_parse_from(["studybuddy", "start"]).unwrap();
        match cli.command {
            Some(Commands::Start(args)) => {
                assert_eq!(args.session, SessionArg::Focus);
                assert!(args.duration.is_none());
                assert_eq!(args.cycles, 1);
                assert!(!args.no_record);
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_start_with_options() {
        let cli = Cli::try_parse_from([
            "studybuddy", "start", "--session", "break", "-d", "45", "--cycles", "3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Start(args)) => {
                assert_eq!(SessionType::from(args.session), SessionType::ShortBreak);
                assert_eq!(args.duration.map(FocusMinutes::get), Some(45));
                assert_eq!(args.cycles, 3);
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_start_rejects_unlisted_duration() {
        assert!(Cli::try_parse_from(["studybuddy", "start", "-d", "20"]).is_err());
    }

    #[test]
    fn test_cli_report_default_period() {
        let cli = Cli::try_parse_from(["studybuddy", "report"]).unwrap();
        match cli.command {
            Some(Commands::Report { period }) => assert_eq!(period, "week"),
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_cli_history_alias() {
        let cli = Cli::try_parse_from(["studybuddy", "h", "-n", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::History { limit: 5 })));
    }

    #[test]
    fn test_cli_config_set_duration() {
        let cli = Cli::try_parse_from(["studybuddy", "config", "set-duration", "30"]).unwrap();
        match cli.command {
            Some(Commands::Config(args)) => match args.command {
                ConfigCommands::SetDuration { minutes } => assert_eq!(minutes.get(), 30),
                _ => panic!("Expected SetDuration"),
            },
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
