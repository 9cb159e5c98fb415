use anyhow::Result;
use clap::Parser;

use rts::cli::handlers::{self, CommandContext};
use rts::cli::{Cli, Commands, LeadCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    rts::logging::init(cli.verbose, cli.log_file.clone());

    let load = || CommandContext::load(cli.config.as_deref());

    match cli.command {
        Commands::Init { endpoint } => handlers::handle_init(endpoint),
        Commands::Wizard => handlers::handle_wizard(&mut load()?),
        Commands::Show { json } => handlers::handle_show(&load()?, json),
        Commands::Answer { answer, note, json } => {
            handlers::handle_answer(&mut load()?, answer.into(), note, json)
        }
        Commands::Note { text } => handlers::handle_note(&mut load()?, text),
        Commands::Back => handlers::handle_back(&mut load()?),
        Commands::Status { json } => handlers::handle_status(&load()?, json),
        Commands::Outcome { json } => handlers::handle_outcome(&load()?, json),
        Commands::Summary { lead_type } => {
            handlers::handle_summary(&load()?, lead_type.map(Into::into))
        }
        Commands::Reset { force } => handlers::handle_reset(&mut load()?, force),
        Commands::Contact(args) => handlers::handle_contact(&mut load()?, args),
        Commands::Lead(LeadCommands::Build(args)) => handlers::handle_lead_build(&load()?, args),
        Commands::Lead(LeadCommands::Submit {
            lead,
            endpoint,
            json,
        }) => handlers::handle_lead_submit(&load()?, lead, endpoint, json),
    }
}
