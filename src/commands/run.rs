//! Comando `run`: refactoriza todos los archivos configurados

use crate::commands::{OutputMode, ReportFormat};
use crate::config::RefactorConfig;
use crate::files::{self, Candidate};
use crate::refactor::{BatchTotals, Category, FileOutcome, Pipeline};
use crate::report::{self, JsonReport, Verification};
use crate::ui;
use colored::*;
use std::path::Path;

/// Resultado completo de un lote
pub struct BatchRun {
    pub outcomes: Vec<(Candidate, FileOutcome)>,
    pub totals: BatchTotals,
    pub verification: Verification,
}

/// Comprueba que la raíz de fuentes exista bajo la raíz del proyecto.
pub fn ensure_source_root(project_root: &Path, config: &RefactorConfig) -> anyhow::Result<()> {
    let source_root = project_root.join(&config.source_root);
    if !source_root.is_dir() {
        anyhow::bail!(
            "No se encontró el directorio '{}' en {}. Ejecuta stylesplit desde la raíz del proyecto.",
            config.source_root,
            project_root.display()
        );
    }
    Ok(())
}

/// Ejecuta el lote completo. Con `console = None` no se imprime nada.
pub fn run_batch(
    project_root: &Path,
    config: &RefactorConfig,
    dry_run: bool,
    console: Option<OutputMode>,
) -> anyhow::Result<BatchRun> {
    ensure_source_root(project_root, config)?;

    let pipeline = Pipeline::new(project_root, config, dry_run)?;
    pipeline.prepare_destinations()?;

    let candidates = files::collect_candidates(project_root, config);
    if let Some(mode) = console {
        ui::print_debug(mode, &format!("{} archivos candidatos", candidates.len()));
    }

    let mut outcomes = Vec::with_capacity(candidates.len());
    let mut totals = BatchTotals::default();

    for group in candidates.chunk_by(|a, b| a.category == b.category) {
        if let Some(mode) = console {
            if mode != OutputMode::Quiet {
                println!("\n{}", group_title(group[0].category).bold());
                println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            }
        }

        let mut group_totals = BatchTotals::default();
        for candidate in group {
            let outcome = pipeline.process(candidate);
            group_totals.record(&outcome);
            if let Some(mode) = console {
                ui::print_outcome(candidate, &outcome, project_root, mode, pipeline.is_dry_run());
            }
            outcomes.push((candidate.clone(), outcome));
        }

        if let Some(mode) = console {
            ui::print_batch_summary(&group_totals, mode);
        }
        totals.merge(group_totals);
    }

    let verification = match console {
        Some(mode) => {
            let pb = ui::crear_progreso("Verificando estilos inline restantes...", mode);
            let verification = report::verify(project_root, config);
            pb.finish_and_clear();
            verification
        }
        None => report::verify(project_root, config),
    };

    Ok(BatchRun {
        outcomes,
        totals,
        verification,
    })
}

fn group_title(category: Category) -> &'static str {
    match category {
        Category::Component => "🧩 Procesando componentes...",
        Category::Screen => "📱 Procesando pantallas...",
    }
}

/// Ejecuta el lote sin salida de consola y devuelve el reporte JSON.
pub fn render_json_report(project_root: &Path, dry_run: bool) -> anyhow::Result<String> {
    let config = RefactorConfig::load_or_default(project_root)?;
    let batch = run_batch(project_root, &config, dry_run, None)?;
    let report = JsonReport::build(
        project_root,
        &batch.outcomes,
        batch.totals,
        &batch.verification,
        dry_run,
    );
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn handle_run_command(
    project_root: &Path,
    dry_run: bool,
    format: ReportFormat,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if format == ReportFormat::Json {
        println!("{}", render_json_report(project_root, dry_run)?);
        return Ok(());
    }

    let config = RefactorConfig::load_or_default(project_root)?;
    ui::print_config_upgrade(&config, mode);
    if mode != OutputMode::Quiet {
        ui::print_header("🎨 Refactorización de estilos");
    }
    let batch = run_batch(project_root, &config, dry_run, Some(mode))?;
    if !dry_run {
        println!();
        ui::print_verification(&batch.verification);
    }
    ui::print_final_summary(&batch.totals, &batch.verification, dry_run);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_FILE, ExplicitFile};
    use crate::refactor::{RefactorError, SkipReason};
    use std::fs;
    use tempfile::TempDir;

    const CARD: &str = "import React from 'react';
import { View, StyleSheet } from 'react-native';

export default function Card() {
  return <View style={styles.card} />;
}

const styles = StyleSheet.create({
  card: {
    padding: 8,
  },
});
";

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/components")).unwrap();
        fs::create_dir_all(tmp.path().join("src/screens")).unwrap();
        tmp
    }

    #[test]
    fn test_missing_source_root_fails() {
        let tmp = TempDir::new().unwrap();
        let result = run_batch(tmp.path(), &RefactorConfig::default(), false, None);
        assert!(result.is_err());
        assert!(!tmp.path().join("src/styles").exists());
    }

    #[test]
    fn test_batch_refactors_and_verifies_clean() {
        let tmp = project();
        fs::write(tmp.path().join("src/components/Card.js"), CARD).unwrap();
        fs::write(tmp.path().join("src/screens/Empty.js"), "export default 1;\n").unwrap();

        let batch = run_batch(tmp.path(), &RefactorConfig::default(), false, None).unwrap();
        assert_eq!(batch.totals.refactored, 1);
        assert_eq!(batch.totals.skipped, 1);
        assert!(batch.verification.is_clean());
        assert!(tmp.path().join("src/styles/components/cardStyles.js").exists());
        assert!(tmp.path().join("src/styles/screens").is_dir());
    }

    #[test]
    fn test_second_run_skips_everything() {
        let tmp = project();
        fs::write(tmp.path().join("src/components/Card.js"), CARD).unwrap();
        let config = RefactorConfig::default();

        run_batch(tmp.path(), &config, false, None).unwrap();
        let after_first = fs::read_to_string(tmp.path().join("src/components/Card.js")).unwrap();

        let batch = run_batch(tmp.path(), &config, false, None).unwrap();
        assert_eq!(batch.totals.refactored, 0);
        assert!(matches!(
            batch.outcomes[0].1,
            FileOutcome::Skipped(SkipReason::NoMarker)
        ));
        let after_second = fs::read_to_string(tmp.path().join("src/components/Card.js")).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_dry_run_leaves_tree_untouched() {
        let tmp = project();
        fs::write(tmp.path().join("src/components/Card.js"), CARD).unwrap();

        let batch = run_batch(tmp.path(), &RefactorConfig::default(), true, None).unwrap();
        assert_eq!(batch.totals.refactored, 1);
        assert!(!tmp.path().join("src/styles").exists());
        assert_eq!(
            fs::read_to_string(tmp.path().join("src/components/Card.js")).unwrap(),
            CARD
        );
        assert_eq!(batch.verification.remaining.len(), 1);
    }

    #[test]
    fn test_unreadable_file_fails_without_stopping_batch() {
        let tmp = project();
        fs::write(tmp.path().join("src/components/A.js"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(tmp.path().join("src/components/B.js"), CARD).unwrap();

        let batch = run_batch(tmp.path(), &RefactorConfig::default(), false, None).unwrap();
        assert_eq!(
            batch.totals,
            BatchTotals {
                refactored: 1,
                skipped: 0,
                failed: 1,
            }
        );
        assert!(batch.outcomes[0].0.path.ends_with("A.js"));
        assert!(matches!(
            batch.outcomes[0].1,
            FileOutcome::Failed(RefactorError::Io { .. })
        ));
        assert!(matches!(batch.outcomes[1].1, FileOutcome::Refactored(_)));
        assert!(tmp.path().join("src/styles/components/bStyles.js").exists());
    }

    #[test]
    fn test_json_report_is_pure_json_with_older_config() {
        let tmp = project();
        fs::write(tmp.path().join("src/components/Card.js"), CARD).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "version = \"0.9.0\"\n").unwrap();

        let output = render_json_report(tmp.path(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totals"]["refactored"], 1);
        assert_eq!(value["dry_run"], true);
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_absolute_explicit_file_gets_relative_import() {
        let tmp = project();
        let screen = tmp.path().join("src/screens/AuthScreen.js");
        fs::write(&screen, CARD).unwrap();

        let mut config = RefactorConfig::default();
        config.files = vec![ExplicitFile {
            path: screen.display().to_string(),
            category: Category::Screen,
        }];
        let root = crate::commands::resolve_root(Some(tmp.path().to_path_buf())).unwrap();

        let batch = run_batch(&root, &config, false, None).unwrap();
        assert_eq!(batch.totals.refactored, 1);
        let patched = fs::read_to_string(&screen).unwrap();
        assert!(patched.contains("import { authStyles } from '../styles/screens/authStyles';"));
    }
}
