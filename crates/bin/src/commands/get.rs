//! Get command - follows a chain of keys through nested models.

use duomodel::{ModelError, ModelKind, Value};

use crate::cli::GetArgs;
use crate::commands::{LoadOptions, load};
use crate::output::{OutputFormat, human_value};

/// Run the get command
pub fn run(
    args: &GetArgs,
    options: &LoadOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = load(&args.file, options)?;
    let mut current = Value::from(root);

    for key in &args.keys {
        let model = current.model()?;
        current = match model.kind() {
            ModelKind::Hash => model.get(key.as_str())?,
            ModelKind::List => {
                let pos: i64 = key
                    .parse()
                    .map_err(|_| ModelError::InvalidIndexType { key: key.clone() })?;
                model.get(pos)?
            }
        };
    }

    match format {
        OutputFormat::Human => match current.model() {
            Ok(nested) => println!("{}", nested.to_json_pretty()?),
            Err(_) => println!("{}", human_value(&current)),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string(&current)?),
    }

    Ok(())
}
