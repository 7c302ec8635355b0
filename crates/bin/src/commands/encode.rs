//! Encode command - re-encodes a document through the model tree.

use crate::cli::EncodeArgs;
use crate::commands::{LoadOptions, load};

/// Run the encode command
pub fn run(args: &EncodeArgs, options: &LoadOptions) -> Result<(), Box<dyn std::error::Error>> {
    let model = load(&args.file, options)?;
    let encoded = if args.pretty {
        model.to_json_pretty()?
    } else {
        model.to_json()?
    };
    println!("{encoded}");
    Ok(())
}
