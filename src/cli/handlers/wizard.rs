use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use super::CommandContext;
use super::utils::{print_outcome, print_step};
use crate::model::Answer;
use crate::wizard::Transition;

fn print_current(ctx: &CommandContext) {
    let step = ctx.wizard.current_step();
    let state = ctx.wizard.state();
    print_step(
        step,
        ctx.wizard.completion(),
        state.notes.get(step.id).map(String::as_str),
    );
}

fn report_transition(ctx: &CommandContext, transition: Transition) {
    match transition {
        Transition::Next(_) => print_current(ctx),
        Transition::Complete => {
            println!("{}", "Questionario completato.".green().bold());
            println!();
            print_outcome(&ctx.wizard.outcome());
        }
    }
}

pub fn handle_show(ctx: &CommandContext, json: bool) -> Result<()> {
    if json {
        let step = ctx.wizard.current_step();
        let state = ctx.wizard.state();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "step": step,
                "answer": state.answers.get(step.id),
                "note": state.notes.get(step.id),
                "completion": ctx.wizard.completion(),
            }))?
        );
    } else {
        print_current(ctx);
    }
    Ok(())
}

pub fn handle_answer(
    ctx: &mut CommandContext,
    answer: Answer,
    note: Option<String>,
    json: bool,
) -> Result<()> {
    let answered = ctx.wizard.current_step();
    let transition = ctx.wizard.answer(answer, note.as_deref())?;

    if json {
        let (next, complete) = match transition {
            Transition::Next(step) => (Some(step.id), false),
            Transition::Complete => (None, true),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "answered": answered.id,
                "answer": answer,
                "next": next,
                "complete": complete,
                "completion": ctx.wizard.completion(),
            }))?
        );
    } else {
        println!(
            "{} {} = {}",
            "Recorded".green(),
            answered.id.cyan(),
            answer.label()
        );
        println!();
        report_transition(ctx, transition);
    }
    Ok(())
}

pub fn handle_note(ctx: &mut CommandContext, text: String) -> Result<()> {
    let step = ctx.wizard.current_step();
    if ctx.wizard.save_note(&text)? {
        println!("{} note on {}", "Saved".green(), step.id.cyan());
    } else {
        println!("Empty note, nothing saved.");
    }
    Ok(())
}

pub fn handle_back(ctx: &mut CommandContext) -> Result<()> {
    ctx.wizard.back()?;
    print_current(ctx);
    Ok(())
}

/// Text after a `nota`/`note` command word, in any letter case.
fn note_text(input: &str) -> Option<&str> {
    let (command, rest) = input.split_once(char::is_whitespace)?;
    matches!(command.to_lowercase().as_str(), "nota" | "note").then_some(rest)
}

/// Interactive loop over stdin until the questionnaire completes or input ends.
pub fn handle_wizard(ctx: &mut CommandContext) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_current(ctx);
        print!(
            "{} ",
            "Risposta [s/n] · b = indietro · nota <testo> · q = esci >".dimmed()
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let input = line.trim();
        println!();

        match input.to_lowercase().as_str() {
            "q" | "quit" | "esci" => break,
            "b" | "back" | "indietro" => {
                ctx.wizard.back()?;
                continue;
            }
            _ => {}
        }

        if let Some(note) = note_text(input) {
            if ctx.wizard.save_note(note)? {
                println!("{}", "Nota salvata.".green());
            }
            continue;
        }

        match input.parse::<Answer>() {
            Ok(answer) => {
                if ctx.wizard.answer(answer, None)? == Transition::Complete {
                    report_transition(ctx, Transition::Complete);
                    return Ok(());
                }
            }
            Err(_) => println!("{}", "Risposta non valida.".red()),
        }
    }

    println!("Progresso salvato ({}%).", ctx.wizard.completion());
    Ok(())
}
