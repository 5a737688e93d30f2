//! `railbook completions <SHELL>`.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "railbook";

/// Print a shell completion script
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Writes the script to stdout. An install hint goes to stderr unless
    /// `--quiet` is set, so redirecting stdout yields a clean file.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout().lock());
        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    let hint = match shell {
        Shell::Bash => {
            "railbook completions bash > ~/.local/share/bash-completion/completions/railbook"
        }
        Shell::Zsh => "railbook completions zsh > ~/.zsh/completions/_railbook",
        Shell::Fish => "railbook completions fish > ~/.config/fish/completions/railbook.fish",
        Shell::PowerShell => "railbook completions powershell | Out-String | Invoke-Expression",
        _ => return,
    };
    eprintln!("# To enable {shell} completions, run:");
    eprintln!("#   {hint}");
}
