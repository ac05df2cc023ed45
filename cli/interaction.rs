use anyhow::Result;
use console::style;
use dialoguer::Confirm;

pub fn confirm_rewrite(file_count: usize, no_confirm: bool) -> Result<bool> {
    if no_confirm {
        return Ok(true);
    }
    if file_count == 0 {
        println!("No files to scan.");
        return Ok(false);
    }

    let prompt = format!(
        "Scan {} files and rewrite them in place where needed?",
        style(file_count).cyan()
    );

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user.");
    }

    Ok(confirmed)
}
