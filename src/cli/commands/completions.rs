//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StudyNestError;

const BIN_NAME: &str = "studynest";

/// Generate a completion script, or installation instructions with `install`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, StudyNestError> {
    if install {
        return Ok(install_instructions(shell));
    }

    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| StudyNestError::InvalidInput(format!("Completion script is not UTF-8: {e}")))
}

fn install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc:
source <(studynest completions bash)
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
studynest completions zsh > ~/.zsh/completions/_studynest
# Then add to ~/.zshrc (before compinit):
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to the fish completions directory:
studynest completions fish > ~/.config/fish/completions/studynest.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
studynest completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to the elvish lib directory:
studynest completions elvish > ~/.elvish/lib/studynest.elv
# Then add to ~/.elvish/rc.elv:
use studynest
"
        .to_string(),

        _ => format!("# Run: studynest completions {shell}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = completions(Shell::Bash, false).unwrap();
        assert!(script.contains("studynest"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_zsh_completions_lists_subcommands() {
        let script = completions(Shell::Zsh, false).unwrap();
        assert!(script.contains("timer"));
        assert!(script.contains("task"));
    }

    #[test]
    fn test_install_instructions() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let text = completions(shell, true).unwrap();
            assert!(text.contains("studynest completions"));
        }
    }
}
