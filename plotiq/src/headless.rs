//! Line-oriented wizard mode.
//!
//! Steps through the analysis one stage at a time over stdin/stdout, for
//! terminals, scripts and automated testing.

use anyhow::Result;
use plotiq_core::analysis::claim::parse_claim_line;
use plotiq_core::{render_report, write_report, AnalysisWizard, WizardStep};
use std::io::{BufRead, Write};

/// Run the wizard protocol.
///
/// - Lines starting with `#` are commands (next, back, status, reset, save,
///   report, help, quit)
/// - Any other line is input for the current step: story text on step 1,
///   the character name on step 2, a `Trait|level|text` claim on step 5
/// - The first story line and the first claim typed replace whatever the
///   wizard was loaded with; later lines append
pub async fn run_wizard<R, W>(mut wizard: AnalysisWizard, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "=== PlotIQ Wizard ===")?;
    print_help(out)?;
    print_step(&wizard, out)?;

    let mut story_typed = false;
    let mut claims_typed = false;

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            let parts: Vec<&str> = command.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                Some("next") => match wizard.advance() {
                    Ok(_) => print_step(&wizard, out)?,
                    Err(e) => writeln!(out, "[ERROR] {e}")?,
                },
                Some("back") => {
                    if wizard.back() {
                        print_step(&wizard, out)?;
                    } else {
                        writeln!(out, "[ERROR] Already on the first step")?;
                    }
                }
                Some("reset") => {
                    wizard.reset();
                    writeln!(out, "[RESET] Analysis cleared")?;
                    print_step(&wizard, out)?;
                }
                Some("clear") => match wizard.step() {
                    WizardStep::StoreStory => {
                        wizard.novel_text.clear();
                        story_typed = true;
                        writeln!(out, "[CLEARED] Story")?;
                    }
                    WizardStep::FindCharacter => {
                        wizard.character_name.clear();
                        writeln!(out, "[CLEARED] Character")?;
                    }
                    WizardStep::GetClaims => {
                        wizard.claims.clear();
                        claims_typed = true;
                        writeln!(out, "[CLEARED] Claims")?;
                    }
                    step => writeln!(out, "[ERROR] Step {} has no input to clear", step.number())?,
                },
                Some("status") => print_status(&wizard, out)?,
                Some("report") => match wizard.finished_result() {
                    Ok(result) => write!(out, "{}", render_report(result))?,
                    Err(e) => writeln!(out, "[ERROR] {e}")?,
                },
                Some("save") => {
                    let Some(dir) = parts.get(1) else {
                        writeln!(out, "[ERROR] Usage: #save <dir>")?;
                        continue;
                    };
                    match wizard.finished_result() {
                        Ok(result) => match write_report(result, dir).await {
                            Ok(path) => writeln!(out, "[SAVED] Report written to {}", path.display())?,
                            Err(e) => writeln!(out, "[ERROR] Save failed: {e}")?,
                        },
                        Err(e) => writeln!(out, "[ERROR] {e}")?,
                    }
                }
                Some("help") => print_help(out)?,
                _ => writeln!(out, "[ERROR] Unknown command. Type #help for help.")?,
            }
            out.flush()?;
            continue;
        }

        match wizard.step() {
            WizardStep::StoreStory => {
                if !story_typed {
                    wizard.novel_text.clear();
                    story_typed = true;
                }
                if !wizard.novel_text.is_empty() {
                    wizard.novel_text.push('\n');
                }
                wizard.novel_text.push_str(line);
                writeln!(out, "[STORY] {} words", plotiq_core::analysis::word_count(&wizard.novel_text))?;
            }
            WizardStep::FindCharacter => {
                wizard.character_name = line.to_string();
                writeln!(out, "[CHARACTER] {line}")?;
            }
            WizardStep::GetClaims => match parse_claim_line(line_no + 1, line) {
                Ok(claim) => {
                    writeln!(
                        out,
                        "[CLAIM] {}: {} \"{}\"",
                        claim.trait_ref, claim.expected_level, claim.text
                    )?;
                    if !claims_typed {
                        wizard.claims.clear();
                        claims_typed = true;
                    }
                    wizard.claims.push(claim);
                }
                Err(e) => writeln!(out, "[ERROR] {e}")?,
            },
            step => writeln!(
                out,
                "[ERROR] Step {} takes no input. Type #next to continue.",
                step.number()
            )?,
        }
        out.flush()?;
    }

    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  #next        - Run the current step and move on")?;
    writeln!(out, "  #back        - Go back one step")?;
    writeln!(out, "  #status      - Show the current state")?;
    writeln!(out, "  #clear       - Empty the current step's input")?;
    writeln!(out, "  #reset       - Clear the analysis and start over")?;
    writeln!(out, "  #report      - Print the finished report")?;
    writeln!(out, "  #save <dir>  - Write the finished report into a directory")?;
    writeln!(out, "  #quit        - Exit")?;
    writeln!(out, "  (other lines are input for the current step)")?;
    writeln!(out)?;
    Ok(())
}

/// Announce the step just reached, with whatever the previous step produced.
fn print_step<W: Write>(wizard: &AnalysisWizard, out: &mut W) -> Result<()> {
    let step = wizard.step();
    writeln!(out, "[STEP {}/8] {}", step.number(), step.title())?;

    match step {
        WizardStep::StoreStory => {
            writeln!(out, "  Enter story text to replace what is loaded, or #next to use it.")?;
        }
        WizardStep::FindCharacter => {
            writeln!(out, "  Story split into {} chunk(s).", wizard.chunks().len())?;
            writeln!(out, "  Enter the character name (current: {:?}).", wizard.character_name)?;
        }
        WizardStep::ExtractActions => {
            writeln!(out, "  Analyzing {}.", wizard.character_name)?;
        }
        WizardStep::BuildTraits => {
            writeln!(out, "  Extracted {} action(s).", wizard.actions().len())?;
            for action in wizard.actions().iter().take(5) {
                writeln!(out, "  - [{}] {}", action.chunk_id, action.action)?;
            }
        }
        WizardStep::GetClaims => {
            for t in wizard.traits() {
                writeln!(out, "  {}: {}", t.kind, t.level.as_str().to_uppercase())?;
            }
            writeln!(
                out,
                "  {} claim(s) loaded. Enter Trait|level|text to replace them.",
                wizard.claims.len()
            )?;
        }
        WizardStep::Compare => {
            writeln!(out, "  Comparing {} claim(s).", wizard.claims.len())?;
        }
        WizardStep::FinalDecision => {
            for c in wizard.comparisons() {
                let status = if c.supported { "SUPPORTED" } else { "CONTRADICTED" };
                writeln!(out, "  {status}: {}", c.claim_text)?;
            }
        }
        WizardStep::Explain => {
            if let Ok(result) = wizard.finished_result() {
                writeln!(out, "  Final Decision: {}", result.final_decision)?;
                writeln!(out)?;
                writeln!(out, "{}", result.explanation)?;
                writeln!(out)?;
                writeln!(out, "  Type #report to print or #save <dir> to export.")?;
            }
        }
    }

    Ok(())
}

fn print_status<W: Write>(wizard: &AnalysisWizard, out: &mut W) -> Result<()> {
    let step = wizard.step();
    writeln!(out, "[STATUS]")?;
    writeln!(out, "  Step: {} ({})", step.number(), step.title())?;
    writeln!(out, "  Story: {} words", plotiq_core::analysis::word_count(&wizard.novel_text))?;
    writeln!(out, "  Character: {}", wizard.character_name)?;
    writeln!(out, "  Chunks: {}", wizard.chunks().len())?;
    writeln!(out, "  Actions: {}", wizard.actions().len())?;
    writeln!(out, "  Claims: {}", wizard.claims.len())?;
    if let Some(result) = wizard.result() {
        writeln!(out, "  Decision: {}", result.final_decision)?;
    }
    Ok(())
}
