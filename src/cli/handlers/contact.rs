use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use crate::cli::ContactArgs;
use crate::lead::LeadForm;
use crate::validation;

pub fn handle_contact(ctx: &mut CommandContext, args: ContactArgs) -> Result<()> {
    validation::validate_email(&args.email)?;
    validation::validate_message(&args.messaggio)?;

    let mut form = LeadForm::default()
        .with_field("nome", &args.nome)
        .with_field("ruolo", &args.ruolo)
        .with_field("ente", &args.ente)
        .with_field("sede", &args.sede)
        .with_field("citta", &args.citta)
        .with_field("email", &args.email)
        .with_field("telefono", &args.telefono)
        .with_field("messaggio", &args.messaggio);
    if args.privacy {
        form = form.with_field("privacy", "on");
    }

    let contact = form.to_contact();
    ctx.wizard.register_contact(contact.clone())?;
    form.mark_registered();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else if let Some(notice) = form.notice() {
        println!("{}", notice.text.green());
    }
    Ok(())
}
