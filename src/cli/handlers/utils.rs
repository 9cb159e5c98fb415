use crate::model::{Answer, Step};
use crate::wizard::{Dashboard, Outcome, steps};
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeMap;

/// Split a `NAME=VALUE` argument.
pub fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Missing name in '{}'", raw);
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn parse_pairs(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter().map(|r| parse_pair(r)).collect()
}

/// Split a `NAME=JSON` argument and parse the JSON part.
pub fn parse_json_pair(raw: &str) -> Result<(String, serde_json::Value)> {
    let (name, value) = parse_pair(raw)?;
    let json = serde_json::from_str(&value)
        .with_context(|| format!("Invalid JSON for '{}'", name))?;
    Ok((name, json))
}

/// Color an answer the way the outcome page highlights it
pub fn format_answer(answer: Answer) -> colored::ColoredString {
    match answer {
        Answer::Yes => answer.label().green(),
        Answer::No => answer.label().red(),
    }
}

/// Color a completion percentage by how far along it is
pub fn format_completion(completion: u32) -> colored::ColoredString {
    let text = format!("{}%", completion);
    match completion {
        100.. => text.green().bold(),
        50..=99 => text.yellow(),
        _ => text.white(),
    }
}

/// Print a question with its position and help text
pub fn print_step(step: &Step, completion: u32, note: Option<&str>) {
    let position = steps::STEPS
        .iter()
        .position(|s| s.id == step.id)
        .map(|i| i + 1)
        .unwrap_or(1);
    println!(
        "{} {} {}",
        format!("[{}/{}]", position, steps::total()).cyan(),
        step.id.dimmed(),
        format!("{} completato", format_completion(completion)).dimmed()
    );
    println!("{}", step.question.bold());
    println!("{}", step.help.dimmed());
    if let Some(note) = note {
        println!("Nota: {}", note.italic());
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    println!("Completamento:  {}", format_completion(dashboard.completion));
    println!(
        "Risposte:       {}/{}",
        dashboard.answered, dashboard.total
    );
    println!("Domanda attuale: {}", dashboard.current_step.cyan());
    println!("Ultimo aggiornamento: {}", dashboard.last_updated.dimmed());
}

pub fn print_outcome(outcome: &Outcome) {
    let status = if outcome.completion >= 100 {
        outcome.status.green().bold()
    } else {
        outcome.status.yellow().bold()
    };
    println!("{} ({})", status, format_completion(outcome.completion));

    if outcome.responses.is_empty() {
        println!();
        println!("Nessuna risposta registrata.");
    } else {
        println!();
        for response in &outcome.responses {
            println!("{}", response.question.bold());
            println!("  {}", format_answer(response.answer));
            if let Some(ref note) = response.note {
                println!("  {}", format!("Nota: {}", note).dimmed());
            }
        }
    }

    println!();
    println!("{}", "Indicazioni".bold());
    for indication in &outcome.indications {
        println!("  - {}", indication);
    }
}
