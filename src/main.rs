use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;

use richedit::cli::{CliArgs, DocumentReport};
use richedit::commands::Command;
use richedit::config::EngineConfig;
use richedit::editable::RichText;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    richedit::tracing::init();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::load(),
    };

    let mut doc = match &args.file {
        Some(path) => {
            let markup = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            RichText::from_markup(&markup, config)
                .with_context(|| format!("Failed to decode {}", path.display()))?
        }
        None => RichText::new(config),
    };

    for (index, script) in args.exec.iter().enumerate() {
        let command: Command = script
            .parse()
            .map_err(|e: String| anyhow!(e))
            .with_context(|| format!("Invalid command #{}: {}", index + 1, script))?;
        command
            .apply(&mut doc)
            .with_context(|| format!("Command #{} failed: {}", index + 1, script))?;
    }

    doc.flush_history();

    if args.json {
        let report = DocumentReport::new(&doc);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", doc.to_markup());
    }

    Ok(())
}
