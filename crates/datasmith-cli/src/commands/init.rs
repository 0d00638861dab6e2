use anyhow::{Context, Result};

use datasmith_core::config::sample_config;

use crate::args::InitArgs;

pub fn run(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            args.path.display()
        );
    }

    std::fs::write(&args.path, sample_config())
        .with_context(|| format!("Failed to write {}", args.path.display()))?;

    eprintln!("✓ Sample rules written to {}", args.path.display());
    eprintln!("  Next: datasmith generate --rules {} --output output.csv", args.path.display());
    Ok(())
}
