mod commands;
pub mod handlers;

pub use commands::{
    AnswerArg, Cli, Commands, ContactArgs, LeadArgs, LeadCommands, LeadTypeArg,
};
