// Commands module - handles CLI command execution

use anyhow::Result;
use roxmltree::Document;

use crate::parsers;

pub mod check;
pub mod inspect;
pub mod parse;

pub use check::handle_check;
pub use inspect::handle_inspect;
pub use parse::handle_parse;

/// Handle shell completion
pub fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        _ => {
            anyhow::bail!(
                "Unsupported shell: {}. Supported: bash, zsh, fish, powershell",
                shell_type
            );
        }
    };

    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = std::io::stdout();

    generate(shell, &mut cmd, name, &mut stdout);

    Ok(())
}

/// Suite identifier used for dispatch: the explicit override, or the one derived
/// from the declared suite name
pub(crate) fn suite_identifier_for(
    document: &Document<'_>,
    explicit: Option<&str>,
) -> Option<String> {
    match explicit {
        Some(suite) => Some(suite.to_string()),
        None => parsers::declared_suite_name(document)
            .map(|declared| parsers::suite_identifier(&declared).to_string()),
    }
}

/// Like [`suite_identifier_for`], but a report without a suite name is an error
pub(crate) fn resolve_suite_identifier(
    document: &Document<'_>,
    explicit: Option<&str>,
) -> Result<String> {
    suite_identifier_for(document, explicit).ok_or_else(|| {
        anyhow::anyhow!("Report does not declare a suite name; pass --suite to pick one")
    })
}
