use std::path::Path;

use dialoguer::Confirm;

use crate::error::Result;

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask before clobbering an existing output file. Missing files need no
/// confirmation.
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    prompt_yes_no(&format!("'{}' already exists. Overwrite?", path.display()), false)
}
