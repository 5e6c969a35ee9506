pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::*;

use crate::config::API_KEY_ENV;

/// Kakao REST API CLI
#[derive(Parser, Debug)]
#[command(
    name = "kakao",
    about = "Kakao REST API CLI - Search, local, translation and vision APIs from the terminal",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// REST API key, overriding the configured one
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// XML format
    Xml,
    /// CSV format
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the web, blogs, cafes, images, videos and books
    #[command(alias = "s")]
    Search(args::SearchArgs),

    /// Addresses, places and coordinates
    #[command(alias = "l")]
    Local(args::LocalArgs),

    /// Translate text
    #[command(alias = "t")]
    Translate(args::TranslateArgs),

    /// Detect the language of text
    Detect {
        text: String,
    },

    /// Analyze images
    Vision(args::VisionArgs),

    /// Estimate human poses in an image
    Pose {
        /// Image URL or file path
        image: String,
    },

    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completion scripts
    fn generate_completions(shell: Shell) {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
    }

    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        // Set up logging
        let filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

        let api_key = cli.api_key.as_deref();
        let result = match cli.command {
            Commands::Search(args) => commands::search::execute(args, api_key, cli.format).await,
            Commands::Local(args) => commands::local::execute(args, api_key, cli.format).await,
            Commands::Translate(args) => {
                commands::translate::execute(args, api_key, cli.format).await
            }
            Commands::Detect { text } => {
                commands::translate::detect(&text, api_key, cli.format).await
            }
            Commands::Vision(args) => commands::vision::execute(args, api_key, cli.format).await,
            Commands::Pose { image } => commands::vision::pose(&image, api_key, cli.format).await,
            Commands::Config(args) => commands::config::execute(args),
            Commands::Completions { shell } => {
                Self::generate_completions(shell);
                Ok(())
            }
        };

        // Handle errors with better messaging
        if let Err(e) = &result {
            use crate::error::KakaoError;
            match e {
                KakaoError::ApiError { code, message, .. } => {
                    eprintln!("{} {}", "Error:".red().bold(), message);
                    if cli.verbose {
                        eprintln!("Code: {}", code);
                    }
                }
                KakaoError::Parse(msg) => {
                    eprintln!("{} failed to read response: {}", "Error:".red().bold(), msg);
                    if !cli.verbose {
                        eprintln!("\nRun with --verbose for more details.");
                    }
                }
                _ => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
            }
            if let Some(hint) = e.hint() {
                eprintln!("\n{} {}", "Hint:".yellow(), hint);
            }
        }
        result
    }
}
