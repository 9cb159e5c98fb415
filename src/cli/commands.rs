use crate::model::{Answer, LeadType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rts")]
#[command(
    author,
    version,
    about = "Reserved-area questionnaire and lead intake client for third-sector organizations"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .rts.toml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new project in the current directory
    Init {
        /// Lead intake endpoint to store in the config
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Walk through the questionnaire interactively
    #[command(visible_alias = "w")]
    Wizard,

    /// Show the current question
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer the current question
    #[command(visible_alias = "a")]
    Answer {
        /// The answer
        #[arg(value_enum)]
        answer: AnswerArg,

        /// Free-text note for this question
        #[arg(short, long)]
        note: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Attach a note to the current question without answering it
    Note {
        /// Note text
        text: String,
    },

    /// Go back to the previously visited question
    Back,

    /// Show questionnaire progress
    #[command(visible_alias = "dashboard")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show answers and priority-path indications
    #[command(visible_alias = "esito")]
    Outcome {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the questionnaire summary as JSON
    Summary {
        /// Lead type to tag the summary with
        #[arg(long, value_enum)]
        lead_type: Option<LeadTypeArg>,
    },

    /// Discard all answers and the saved contact
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Register contact details locally
    Contact(ContactArgs),

    /// Build or submit a lead
    #[command(subcommand)]
    Lead(LeadCommands),
}

#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub nome: String,

    #[arg(long, default_value = "")]
    pub ruolo: String,

    #[arg(long, default_value = "")]
    pub ente: String,

    #[arg(long, default_value = "")]
    pub sede: String,

    #[arg(long, default_value = "")]
    pub citta: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub telefono: String,

    #[arg(long, default_value = "")]
    pub messaggio: String,

    /// Consent to the privacy policy
    #[arg(long)]
    pub privacy: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum LeadCommands {
    /// Print the payload that would be submitted
    Build(LeadArgs),

    /// Build the payload and post it to the lead endpoint
    Submit {
        #[command(flatten)]
        lead: LeadArgs,

        /// Lead intake endpoint (overrides config)
        #[arg(long, env = "RTS_ENDPOINT")]
        endpoint: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct LeadArgs {
    /// Visible form field, as NAME=VALUE
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Hidden form field, as NAME=VALUE
    #[arg(long = "hidden", value_name = "NAME=VALUE")]
    pub hidden: Vec<String>,

    /// File to attach (only name, size and type are sent)
    #[arg(long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,

    /// Lead type (inferred from the page URL when omitted)
    #[arg(short = 't', long, value_enum)]
    pub lead_type: Option<LeadTypeArg>,

    /// URL of the page the form is on
    #[arg(long)]
    pub page_url: Option<String>,

    /// State shared by another page script, as SOURCE=JSON
    #[arg(long = "shared", value_name = "SOURCE=JSON")]
    pub shared: Vec<String>,

    /// Legacy page global, as NAME=JSON
    #[arg(long = "global", value_name = "NAME=JSON")]
    pub globals: Vec<String>,

    /// Session storage entry, as KEY=VALUE
    #[arg(long = "session", value_name = "KEY=VALUE")]
    pub session: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AnswerArg {
    #[value(alias = "y", alias = "si")]
    Yes,
    #[value(alias = "n")]
    No,
}

impl From<AnswerArg> for Answer {
    fn from(arg: AnswerArg) -> Self {
        match arg {
            AnswerArg::Yes => Answer::Yes,
            AnswerArg::No => Answer::No,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LeadTypeArg {
    Contact,
    Wizard,
    Esito,
    Dashboard,
    Generic,
}

impl From<LeadTypeArg> for LeadType {
    fn from(arg: LeadTypeArg) -> Self {
        match arg {
            LeadTypeArg::Contact => LeadType::Contact,
            LeadTypeArg::Wizard => LeadType::Wizard,
            LeadTypeArg::Esito => LeadType::Esito,
            LeadTypeArg::Dashboard => LeadType::Dashboard,
            LeadTypeArg::Generic => LeadType::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_lead_args_parse_lead_type() {
        let cli = Cli::parse_from(["rts", "lead", "build", "-t", "esito", "-f", "nome=Anna"]);
        let Commands::Lead(LeadCommands::Build(args)) = cli.command else {
            panic!("expected lead build");
        };
        assert!(matches!(args.lead_type, Some(LeadTypeArg::Esito)));
        assert!(format!("{:?}", args).contains("Esito"));
    }
}
