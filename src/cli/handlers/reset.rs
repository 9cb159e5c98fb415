use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

use super::CommandContext;

pub fn handle_reset(ctx: &mut CommandContext, force: bool) -> Result<()> {
    if !force {
        print!("Discard all answers and the saved contact? [y/N] ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.wizard.reset()?;
    println!("{} questionnaire and contact cleared", "Reset".red());
    Ok(())
}
