//! Dump command - prints every entry of a document, nested models included.

use duomodel::{Model, Value};

use crate::cli::FileArgs;
use crate::commands::{LoadOptions, load};
use crate::output::{OutputFormat, human_value};

/// One visited entry
struct Row {
    depth: usize,
    path: String,
    key: String,
    value: Value,
}

/// Run the dump command
pub fn run(
    args: &FileArgs,
    options: &LoadOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = load(&args.file, options)?;
    let mut rows = Vec::new();
    walk(&model, "", &mut Vec::new(), &mut rows)?;

    match format {
        OutputFormat::Human => {
            for row in &rows {
                let indent = "  ".repeat(row.depth);
                match row.value.model() {
                    Ok(nested) => println!("{indent}{}: ({})", row.key, nested.kind()),
                    Err(_) => println!("{indent}{}: {}", row.key, human_value(&row.value)),
                }
            }
        }
        OutputFormat::Json => {
            let mut entries = Vec::with_capacity(rows.len());
            for row in &rows {
                let mut entry = serde_json::json!({
                    "path": row.path,
                    "type": row.value.type_name(),
                });
                match row.value.model() {
                    Ok(nested) => {
                        entry["kind"] = serde_json::to_value(nested.kind())?;
                        entry["len"] = nested.len().into();
                    }
                    Err(_) => entry["value"] = serde_json::to_value(&row.value)?,
                }
                entries.push(entry);
            }
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}

/// Visits entries depth-first with an independent cursor.
///
/// `ancestors` holds the Models on the current path; meeting one of them
/// again is a cycle and fails instead of recursing forever.
fn walk(
    model: &Model,
    prefix: &str,
    ancestors: &mut Vec<*const Model>,
    rows: &mut Vec<Row>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ptr: *const Model = model;
    if ancestors.contains(&ptr) {
        return Err(format!("cyclic model reference at '{prefix}'").into());
    }
    ancestors.push(ptr);

    for (key, value) in model {
        let key = key.to_string();
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let nested = value.model().ok();
        rows.push(Row {
            depth: ancestors.len() - 1,
            path: path.clone(),
            key,
            value,
        });
        if let Some(nested) = nested {
            walk(&nested, &path, ancestors, rows)?;
        }
    }

    ancestors.pop();
    Ok(())
}
