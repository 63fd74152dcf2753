//! Módulo de interfaz de usuario
//!
//! Salida de consola del lote: encabezados, mensajes por archivo y resumen.

use crate::commands::OutputMode;
use crate::config::RefactorConfig;
use crate::files::Candidate;
use crate::refactor::patcher::FactoryImport;
use crate::refactor::{BatchTotals, FileOutcome, RefactorError};
use crate::report::{Verification, display_path};
use colored::*;
use std::path::Path;

pub fn print_header(text: &str) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.blue().bold());
    println!("{}", text.blue().bold());
    println!("{}\n", rule.blue().bold());
}

pub fn print_success(text: &str) {
    println!("{}", format!("✅ {}", text).green());
}

pub fn print_warning(text: &str) {
    println!("{}", format!("⚠️  {}", text).yellow());
}

pub fn print_error(text: &str) {
    eprintln!("{}", format!("❌ {}", text).red());
}

pub fn print_info(text: &str) {
    println!("{}", format!("ℹ️  {}", text).blue());
}

pub fn print_debug(mode: OutputMode, text: &str) {
    if mode == OutputMode::Verbose {
        eprintln!("{}", format!("[DEBUG] {}", text).dimmed());
    }
}

/// Aviso (por stderr) de una configuración escrita por otra versión
pub fn print_config_upgrade(config: &RefactorConfig, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    if let Some(previous) = &config.upgraded_from {
        eprintln!(
            "{}",
            format!(
                "🔄 Configuración escrita por la versión {}, usando {}",
                previous, config.version
            )
            .yellow()
        );
    }
}

/// Spinner genérico; solo visible en modo normal sobre una terminal
pub fn crear_progreso(mensaje: &str, mode: OutputMode) -> indicatif::ProgressBar {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    if mode != OutputMode::Normal || !is_tty {
        return indicatif::ProgressBar::hidden();
    }

    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(mensaje.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Muestra el resultado de un archivo según el modo de salida.
pub fn print_outcome(
    candidate: &Candidate,
    outcome: &FileOutcome,
    project_root: &Path,
    mode: OutputMode,
    dry_run: bool,
) {
    let name = candidate
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| candidate.path.display().to_string());

    match outcome {
        FileOutcome::Failed(err) => {
            print_error(&format!("Error al procesar {}: {}", name, err));
            if let RefactorError::MultipleBlocks { .. } = err {
                println!(
                    "   {}",
                    "Usa allow_multiple_blocks = true en .stylesplitrc.toml para extraer solo el primero".dimmed()
                );
            }
            return;
        }
        _ if mode == OutputMode::Quiet => return,
        _ => {}
    }

    print_info(&format!("Procesando: {}", name));
    match outcome {
        FileOutcome::Refactored(summary) => {
            let verb = if dry_run { "Se crearía" } else { "Creado" };
            print_success(&format!("{}: {}", verb, display_path(&summary.module_path, project_root)));
            let verb = if dry_run { "Se actualizaría" } else { "Actualizado" };
            print_success(&format!("{}: {}", verb, display_path(&summary.source, project_root)));

            print_debug(
                mode,
                &format!(
                    "{} → {} ({} referencias renombradas)",
                    summary.local_name, summary.export_name, summary.renamed
                ),
            );
            print_debug(mode, &format!("imports: {}", summary.dependencies.helpers.join(", ")));
            if !summary.dependencies.theme.is_empty() {
                print_debug(mode, &format!("tema: {}", summary.dependencies.theme.join(", ")));
            }
            print_debug(mode, &format!("nuevo import: {}", summary.import_statement));
            match &summary.factory_import {
                FactoryImport::Removed => print_debug(mode, "import de la fábrica eliminado"),
                FactoryImport::Kept(Some(member)) => {
                    print_debug(mode, &format!("import de la fábrica conservado (usa .{})", member))
                }
                FactoryImport::Kept(None) => print_debug(mode, "import de la fábrica conservado (otros usos)"),
                FactoryImport::NotImported => {}
            }

            if summary.extra_blocks > 0 {
                print_warning(&format!(
                    "{} bloque(s) adicional(es) siguen inline en {}",
                    summary.extra_blocks, name
                ));
            }
        }
        FileOutcome::Skipped(reason) => print_warning(&format!("{}: {}", name, reason.describe())),
        FileOutcome::Failed(_) => {}
    }
}

/// Resumen de un directorio o de una lista explícita
pub fn print_batch_summary(totals: &BatchTotals, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    println!("\n{}", "Resumen:".bold());
    print_success(&format!("{} archivos refactorizados", totals.refactored));
    print_warning(&format!("{} archivos saltados", totals.skipped));
    if totals.failed > 0 {
        print_error(&format!("{} errores", totals.failed));
    }
}

/// Lista de archivos que aún tienen estilos inline
pub fn print_verification(verification: &Verification) {
    if verification.is_clean() {
        print_success("¡Todos los estilos fueron separados con éxito!");
        return;
    }
    print_warning(&format!(
        "Aún existen {} archivo(s) con estilos inline:",
        verification.remaining.len()
    ));
    for file in &verification.remaining {
        println!("   - {}", file.display());
    }
}

pub fn print_final_summary(totals: &BatchTotals, verification: &Verification, dry_run: bool) {
    print_header("Resumen Final");
    println!("{} {}", "Total de archivos procesados:".bold(), totals.total());
    print_success(&format!("{} refactorizados con éxito", totals.refactored));
    print_warning(&format!("{} saltados (sin estilos inline)", totals.skipped));
    if totals.failed > 0 {
        print_error(&format!("{} errores", totals.failed));
    }

    if dry_run {
        println!(
            "\n{}",
            "🔎 Modo simulación: no se escribió ningún archivo".cyan().bold()
        );
        return;
    }

    if verification.is_clean() {
        println!("\n{}", "🎉 ¡Refactorización completa!".green().bold());
        print_info("Próximos pasos:");
        println!("   1. Probar la app: npm start");
        println!("   2. Ejecutar lint: npm run lint");
        println!("   3. Commit: git add . && git commit -m 'refactor: separar estilos'");
    } else {
        println!("\n{}", "⚠️  Refactorización parcial".yellow().bold());
        print_warning("Algunos archivos aún tienen estilos inline");
        print_info("Revisa los archivos listados arriba");
    }
}
