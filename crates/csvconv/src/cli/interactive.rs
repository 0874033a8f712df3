use std::path::PathBuf;

use dialoguer::{Input, Select};

use super::Target;

const MODES: [&str; 2] = [
    "Convert a single file",
    "Convert all CSV files in a folder",
];

/// Asks for the mode and the path. `None` when the user backs out.
pub fn prompt() -> Result<Option<Target>, dialoguer::Error> {
    let Some(choice) = Select::new()
        .with_prompt("Choose a mode")
        .items(&MODES[..])
        .default(0)
        .interact_opt()?
    else {
        return Ok(None);
    };

    let target = match choice {
        0 => {
            let raw: String = Input::new()
                .with_prompt("CSV file path")
                .interact_text()?;
            Target::File(PathBuf::from(clean_path_input(&raw)))
        }
        _ => {
            let raw: String = Input::new()
                .with_prompt("Folder path (Enter for the current folder)")
                .allow_empty(true)
                .interact_text()?;
            Target::Directory(directory_or_current(&raw))
        }
    };

    Ok(Some(target))
}

/// Strips whitespace and the quotes file managers add when pasting a path.
pub fn clean_path_input(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

fn directory_or_current(raw: &str) -> PathBuf {
    let cleaned = clean_path_input(raw);
    if cleaned.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(cleaned)
    }
}
