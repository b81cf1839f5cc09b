//! Terminal implementation of the Console trait

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use hookforge_core::{Console, Error, Result};

/// Console backed by the terminal, using dialoguer prompts
pub struct TermConsole;

fn map_dialoguer_error(error: dialoguer::Error) -> Error {
    match error {
        dialoguer::Error::IO(io_error) => {
            if io_error.kind() == std::io::ErrorKind::Interrupted {
                Error::Cancelled
            } else {
                Error::Io(io_error)
            }
        }
    }
}

impl Console for TermConsole {
    fn print(&self, message: &str) {
        println!("{message}");
    }

    fn prompt(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        } else {
            input = input.allow_empty(true);
        }
        input.interact_text().map_err(map_dialoguer_error)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(map_dialoguer_error)
    }

    fn choose(&self, prompt: &str, labels: &[String]) -> Result<usize> {
        println!("{prompt}");
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }
        println!();

        // Numeric selection, re-prompted until valid
        loop {
            let reply: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Select option")
                .interact_text()
                .map_err(map_dialoguer_error)?;
            match reply.trim().parse::<usize>() {
                Ok(number) if (1..=labels.len()).contains(&number) => return Ok(number - 1),
                _ => println!("Please enter a number between 1 and {}", labels.len()),
            }
        }
    }
}
