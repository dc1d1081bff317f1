use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "finmate")]
#[command(about = "FinMate financial assistant: chat, loan EMI calculator, fraud check, glossary")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "finmate.toml")]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate the monthly installment for a fixed-rate loan
    Emi {
        /// Loan amount
        #[arg(long, allow_hyphen_values = true)]
        principal: String,

        /// Annual interest rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: String,

        /// Loan term in years
        #[arg(long, allow_hyphen_values = true)]
        term: String,

        /// Print the unrounded result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a message for phrases common in financial scams
    Scan { message: String },

    /// Search the financial glossary
    Glossary { query: Option<String> },

    /// Ask the assistant a question
    Chat {
        message: String,

        /// Start a new conversation instead of continuing the latest one
        #[arg(long)]
        new: bool,

        /// Continue a specific conversation
        #[arg(long, conflicts_with = "new")]
        chat_id: Option<String>,
    },

    /// Manage saved conversations
    Chats {
        #[command(subcommand)]
        action: ChatsAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ChatsAction {
    List,
    Show { id: String },
    Rename { id: String, title: String },
    Delete { id: String },
    Export {
        id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
