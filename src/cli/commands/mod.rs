//! Command execution for release bookkeeping steps.

mod page;
mod release;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use page::execute_page;
use release::execute_release;

/// Execute the selected command and map its result to an exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new();
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::new();

    let result = match &args.command {
        Command::CreateRelease(release_args) => execute_release(release_args, &config).await,
        Command::CreatePage(page_args) => execute_page(page_args, &config).await,
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
