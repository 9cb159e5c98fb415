use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use super::utils::{parse_json_pair, parse_pair, parse_pairs};
use crate::cli::LeadArgs;
use crate::lead::{HttpTransport, LeadForm, LeadPayloadBuilder, PageContext, SharedState};
use crate::model::Attachment;
use crate::storage::{KeyValueStore, MemoryStore};

/// Media type from a file extension; unknown extensions are sent as binary.
fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

fn attachment_from_path(path: &Path) -> Result<Attachment> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Attachment is not a file: {}", path.display());
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Attachment has no valid file name")?
        .to_string();
    Ok(Attachment {
        name,
        size: metadata.len(),
        media_type: guess_media_type(path).to_string(),
    })
}

/// Turn command-line lead arguments into the form, page context and session area.
fn prepare(args: &LeadArgs) -> Result<(LeadForm, PageContext, MemoryStore)> {
    let mut form = LeadForm::default();
    form.fields = parse_pairs(&args.fields)?;
    form.hidden = parse_pairs(&args.hidden)?;
    form.files = args
        .attachments
        .iter()
        .map(|p| attachment_from_path(p))
        .collect::<Result<_>>()?;
    form.lead_type = args.lead_type.map(Into::into);

    if let Some(email) = form.fields.get("email") {
        crate::validation::validate_email(email)?;
    }

    let mut page = PageContext {
        url: args.page_url.clone(),
        ..PageContext::default()
    };
    for raw in &args.shared {
        let (source, value) = parse_json_pair(raw)?;
        let data = match value {
            serde_json::Value::Object(map) => map,
            _ => anyhow::bail!("Shared state '{}' must be a JSON object", source),
        };
        page.shared.push(SharedState { source, data });
    }
    for raw in &args.globals {
        let (name, value) = parse_json_pair(raw)?;
        page.legacy_globals.insert(name, value);
    }

    let mut session = MemoryStore::new();
    for raw in &args.session {
        let (key, value) = parse_pair(raw)?;
        session.set(&key, &value)?;
    }

    Ok((form, page, session))
}

fn builder<'a>(ctx: &'a CommandContext, session: &'a MemoryStore) -> LeadPayloadBuilder<'a> {
    LeadPayloadBuilder::new(ctx.config.lead.clone())
        .with_area("local", ctx.wizard.store().store())
        .with_area("session", session)
}

pub fn handle_lead_build(ctx: &CommandContext, args: LeadArgs) -> Result<()> {
    let (form, page, session) = prepare(&args)?;
    let payload = builder(ctx, &session).build(&form.submission(), &page);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn handle_lead_submit(
    ctx: &CommandContext,
    args: LeadArgs,
    endpoint: Option<String>,
    json: bool,
) -> Result<()> {
    let (mut form, page, session) = prepare(&args)?;
    let endpoint = endpoint.unwrap_or_else(|| ctx.config.lead.endpoint.clone());
    url::Url::parse(&endpoint)
        .map_err(|e| anyhow::anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
    let transport = HttpTransport::new(&endpoint)?;
    let builder = builder(ctx, &session);

    if !json {
        println!("{} {}", form.control().label.dimmed(), endpoint.dimmed());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (payload, outcome) = runtime.block_on(form.submit(&builder, &page, &transport));

    let notice = form
        .notice()
        .map(|n| n.text.clone())
        .unwrap_or_default();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "success": outcome.is_ok(),
                "message": notice,
                "error": outcome.as_ref().err().map(|e| e.to_string()),
                "payload": payload,
            }))?
        );
    } else if outcome.is_ok() {
        println!("{}", notice.green());
    } else {
        println!("{}", notice.red());
    }

    outcome.map_err(anyhow::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type(Path::new("bolletta.PDF")), "application/pdf");
        assert_eq!(guess_media_type(Path::new("foto.jpeg")), "image/jpeg");
        assert_eq!(
            guess_media_type(Path::new("senza_estensione")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_attachment_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("visura.pdf");
        std::fs::write(&path, vec![0u8; 1234]).unwrap();

        let attachment = attachment_from_path(&path).unwrap();
        assert_eq!(attachment.name, "visura.pdf");
        assert_eq!(attachment.size, 1234);
        assert_eq!(attachment.media_type, "application/pdf");

        assert!(attachment_from_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_prepare_rejects_non_object_shared_state() {
        let args = LeadArgs {
            shared: vec!["wizard=[1,2]".to_string()],
            ..LeadArgs::default()
        };
        assert!(prepare(&args).is_err());
    }

    #[test]
    fn test_prepare_seeds_session_area() {
        let args = LeadArgs {
            session: vec![r#"rts.answers={"answers":{"cer":"yes"}}"#.to_string()],
            fields: vec!["nome= Anna ".to_string()],
            ..LeadArgs::default()
        };
        let (form, _, session) = prepare(&args).unwrap();
        assert_eq!(form.fields["nome"], " Anna ");
        assert_eq!(session.keys(), vec!["rts.answers"]);
    }
}
