use clap::{Parser, Subcommand};

use gloss_cli::commands::{config_ops, convert_ops, translate_ops};

#[derive(Parser)]
#[command(name = "glosstool", about = "Romaji gloss diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate romaji to kana
    Kana {
        /// Romaji text
        text: String,
    },

    /// Show how the input is tokenized
    Tokens {
        /// Romaji text
        text: String,
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the full translation pipeline
    Translate {
        /// Romaji text
        text: String,
        /// Skip network lookups (offline phrases and word markers only)
        #[arg(long)]
        offline: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Path to a settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
        /// Directory for the JSONL trace log (requires the `trace` feature)
        #[arg(long)]
        trace_dir: Option<String>,
    },

    /// Report whether the text looks like romaji
    Detect {
        /// Text to check
        text: String,
    },

    /// Print the built-in romaji table TOML
    RomajiExport,

    /// Validate a romaji table TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },

    /// Print the built-in lexicon TOML
    LexiconExport,

    /// Validate a lexicon TOML file
    LexiconValidate {
        /// Path to the TOML file
        file: String,
    },

    /// Print the built-in settings TOML
    SettingsExport,

    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Kana { text } => convert_ops::kana_cmd(&text),
        Command::Tokens { text, json } => convert_ops::tokens_cmd(&text, json),
        Command::Translate {
            text,
            offline,
            json,
            settings,
            trace_dir,
        } => translate_ops::translate_cmd(
            &text,
            offline,
            json,
            settings.as_deref(),
            trace_dir.as_deref(),
        ),
        Command::Detect { text } => convert_ops::detect_cmd(&text),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::LexiconExport => config_ops::lexicon_export(),
        Command::LexiconValidate { file } => config_ops::lexicon_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
