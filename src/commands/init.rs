use crate::config::{CONFIG_FILE, RefactorConfig};
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::Path;

/// Escribe `.stylesplitrc.toml` con los valores por defecto.
/// Retorna Err si ya existe y `force == false`.
pub fn run_init(project_root: &Path, force: bool) -> anyhow::Result<()> {
    let config_path = project_root.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "Ya existe una configuración en {}. Usa --force para sobrescribir.",
            config_path.display()
        );
    }
    RefactorConfig::default().save(project_root)
}

pub fn handle_init_command(project_root: &Path, force: bool) -> anyhow::Result<()> {
    println!("\n{}", "🚀 Stylesplit Init".bold().green());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config_path = project_root.join(CONFIG_FILE);
    let mut overwrite = force;
    if config_path.exists() && !force {
        overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} ya existe. ¿Sobrescribir?", CONFIG_FILE))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("   ℹ️  Configuración sin cambios.");
            return Ok(());
        }
    }

    run_init(project_root, overwrite)?;
    println!(
        "   ✅ Configuración creada en: {}",
        config_path.display().to_string().cyan()
    );
    println!("\n   {} Próximos pasos:", "💡".yellow());
    println!("      stylesplit run --dry-run   # revisar los cambios");
    println!("      stylesplit run             # aplicar la refactorización");
    Ok(())
}
