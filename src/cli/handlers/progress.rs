use anyhow::Result;

use super::CommandContext;
use super::utils::{print_dashboard, print_outcome};
use crate::model::LeadType;

pub fn handle_status(ctx: &CommandContext, json: bool) -> Result<()> {
    let dashboard = ctx.wizard.dashboard();

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_dashboard(&dashboard);
    }
    Ok(())
}

pub fn handle_outcome(ctx: &CommandContext, json: bool) -> Result<()> {
    let outcome = ctx.wizard.outcome();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

pub fn handle_summary(ctx: &CommandContext, lead_type: Option<LeadType>) -> Result<()> {
    let summary = ctx.wizard.summary(lead_type);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
