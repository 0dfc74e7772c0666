use anyhow::Result;

use engram::config::EngramConfig;

/// Print working memory, oldest first.
pub fn context(config: &EngramConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let context = store.get_context();

    if context.is_empty() {
        println!("Working memory is empty.");
        return Ok(());
    }

    println!("{:<38} {:<12} {}", "ID", "Kind", "Preview");
    println!("{}", "-".repeat(90));
    for record in &context {
        println!(
            "{:<38} {:<12} {}",
            record.id,
            record.kind.as_str(),
            super::preview(&record.content, 40)
        );
    }

    Ok(())
}
