//! Keys command - lists the top-level keys of a document in order.

use duomodel::Key;

use crate::cli::FileArgs;
use crate::commands::{LoadOptions, load};
use crate::output::{OutputFormat, print_table};

/// Run the keys command
pub fn run(
    args: &FileArgs,
    options: &LoadOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = load(&args.file, options)?;
    let entries = model.entries();

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No entries found.");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = entries
                .iter()
                .enumerate()
                .map(|(pos, (key, value))| {
                    vec![pos.to_string(), key.to_string(), value.type_name().to_string()]
                })
                .collect();
            print_table(&["POSITION", "KEY", "TYPE"], &rows);
        }
        OutputFormat::Json => {
            let keys: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|(key, _)| match key {
                    Key::Index(i) => i.into(),
                    Key::Name(name) => name.into(),
                })
                .collect();
            println!("{}", serde_json::to_string(&keys)?);
        }
    }

    Ok(())
}
