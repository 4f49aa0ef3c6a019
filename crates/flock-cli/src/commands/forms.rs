//! Form definition commands.

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use flock_core::{lint_form, render_fields, FlockConfig, FlockError};

use crate::output;

#[derive(Subcommand)]
pub enum FormsCommands {
    /// List every available form
    List,

    /// Show how a form's fields are rendered
    Show {
        /// Form key
        key: String,

        /// Print the rendered fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check form definitions for mistakes
    Check,
}

pub fn execute(cmd: FormsCommands, config: &FlockConfig) -> Result<()> {
    match cmd {
        FormsCommands::List => {
            output::print_forms_table(&config.forms());
        }
        FormsCommands::Show { key, json } => {
            let form = config.form(&key).ok_or(FlockError::FormNotFound(key))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&render_fields(&form.fields))?);
            } else {
                output::print_form(&form);
            }
        }
        FormsCommands::Check => {
            let forms = config.forms();
            let mut problems = 0;
            for form in &forms {
                let issues = lint_form(form);
                if issues.is_empty() {
                    continue;
                }
                problems += issues.len();
                println!("{} {}", form.key.cyan().bold(), format!("({})", form.title).dimmed());
                for issue in issues {
                    println!("  {} {}", "!".yellow().bold(), issue);
                }
            }

            if problems > 0 {
                println!();
                bail!("{} issue(s) found in {} form(s)", problems, forms.len());
            }
            println!("{} {} form(s) checked", "✓".green().bold(), forms.len());
        }
    }
    Ok(())
}
