//! Models command - list models offered by the configured provider.

use console::style;

use factura_core::extract::build_provider;

use super::config::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let provider = build_provider(&config.extraction)?;

    let models = provider.list_models().await?;

    if models.is_empty() {
        println!(
            "{} Provider {} reported no models",
            style("⚠").yellow(),
            provider.name()
        );
        return Ok(());
    }

    println!(
        "{}",
        style(format!("Models available from {}", provider.name())).bold()
    );
    for name in &models {
        let marker = if name == provider.model() {
            style(" (configured)").green().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", name, marker);
    }

    if !models.iter().any(|name| name == provider.model()) {
        println!();
        println!(
            "{} Configured model '{}' is not in the list. Run 'factura config set extraction.model <name>' to switch.",
            style("⚠").yellow(),
            provider.model()
        );
    }

    Ok(())
}
