//! The `examhall init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("examhall.toml");
    if path.exists() {
        println!("examhall.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created examhall.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the [simulation] table in examhall.toml");
    println!("  2. Run: examhall simulate");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examhall configuration

[simulation]
# Number of simulated students
students = 100
# Max students answering at the same time
parallelism = 16
# Pause before each answer, in milliseconds
think_time_ms = 100
# alternating | all_correct | all_wrong
strategy = "alternating"
"#;
