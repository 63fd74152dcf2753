//! Verificación final y reporte del lote
//!
//! El verificador vuelve a escanear los directorios objetivo buscando el
//! marcador de estilos inline. No modifica nada: su resultado solo alimenta
//! el resumen.

use crate::config::RefactorConfig;
use crate::files::{self, Candidate};
use crate::refactor::{BatchTotals, FileOutcome, SkipReason};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Resultado del re-escaneo de directorios
#[derive(Debug, Clone, Default)]
pub struct Verification {
    pub scanned_dirs: usize,
    pub scanned_files: usize,
    /// Archivos (relativos a la raíz del proyecto) que aún contienen el marcador
    pub remaining: Vec<PathBuf>,
}

impl Verification {
    pub fn is_clean(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Directorios a verificar: los objetivos configurados más los directorios
/// padres de los archivos explícitos.
fn verification_dirs(project_root: &Path, config: &RefactorConfig) -> Vec<PathBuf> {
    let mut dirs: BTreeSet<PathBuf> = config
        .targets
        .iter()
        .map(|t| project_root.join(&t.dir))
        .collect();

    for file in &config.files {
        if let Some(parent) = project_root.join(&file.path).parent() {
            dirs.insert(parent.to_path_buf());
        }
    }
    dirs.into_iter().collect()
}

/// Re-escanea los directorios en busca de archivos con estilos inline.
pub fn verify(project_root: &Path, config: &RefactorConfig) -> Verification {
    let marker = config.factory.marker();
    let mut verification = Verification::default();

    for dir in verification_dirs(project_root, config) {
        if !dir.is_dir() {
            continue;
        }
        verification.scanned_dirs += 1;

        for path in files::list_files(&dir, config) {
            verification.scanned_files += 1;
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            if content.contains(&marker) {
                verification
                    .remaining
                    .push(path.strip_prefix(project_root).unwrap_or(&path).to_path_buf());
            }
        }
    }

    verification
}

/// Ruta para mostrar: relativa a la raíz si es posible
pub fn display_path(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[derive(Debug, Serialize)]
pub struct JsonFileEntry {
    pub file: String,
    pub category: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub dry_run: bool,
    pub totals: BatchTotals,
    pub files: Vec<JsonFileEntry>,
    pub remaining_inline: Vec<String>,
    pub clean: bool,
}

impl JsonReport {
    pub fn build(
        project_root: &Path,
        outcomes: &[(Candidate, FileOutcome)],
        totals: BatchTotals,
        verification: &Verification,
        dry_run: bool,
    ) -> Self {
        let files = outcomes
            .iter()
            .map(|(candidate, outcome)| {
                let mut entry = JsonFileEntry {
                    file: display_path(&candidate.path, project_root),
                    category: candidate.category.label(),
                    status: "",
                    reason: None,
                    error: None,
                    module: None,
                    export_name: None,
                    imports: Vec::new(),
                };
                match outcome {
                    FileOutcome::Refactored(summary) => {
                        entry.status = "refactored";
                        entry.module = Some(display_path(&summary.module_path, project_root));
                        entry.export_name = Some(summary.export_name.clone());
                        entry.imports = summary.dependencies.helpers.clone();
                        entry.imports.extend(summary.dependencies.theme.iter().cloned());
                    }
                    FileOutcome::Skipped(reason) => {
                        entry.status = "skipped";
                        entry.reason = Some(*reason);
                    }
                    FileOutcome::Failed(err) => {
                        entry.status = "failed";
                        entry.error = Some(err.to_string());
                    }
                }
                entry
            })
            .collect();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            dry_run,
            totals,
            files,
            remaining_inline: verification
                .remaining
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            clean: verification.is_clean(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplicitFile;
    use crate::refactor::{Category, RefactorError};
    use tempfile::TempDir;

    #[test]
    fn test_verify_lists_files_with_marker() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("src/screens")).unwrap();
        fs::write(
            root.join("src/components/Card.js"),
            "const styles = StyleSheet.create({ a: {} });",
        )
        .unwrap();
        fs::write(root.join("src/components/Clean.js"), "export default 1;").unwrap();
        fs::write(
            root.join("src/screens/HomeScreen.js"),
            "import { homeStyles } from '../styles/screens/homeStyles';",
        )
        .unwrap();

        let verification = verify(root, &RefactorConfig::default());
        assert!(!verification.is_clean());
        assert_eq!(verification.scanned_dirs, 2);
        assert_eq!(verification.scanned_files, 3);
        assert_eq!(verification.remaining, vec![PathBuf::from("src/components/Card.js")]);
    }

    #[test]
    fn test_verify_clean_when_no_dirs() {
        let tmp = TempDir::new().unwrap();
        let verification = verify(tmp.path(), &RefactorConfig::default());
        assert!(verification.is_clean());
        assert_eq!(verification.scanned_dirs, 0);
    }

    #[test]
    fn test_verification_dirs_include_explicit_file_parents() {
        let mut config = RefactorConfig::default();
        config.files = vec![ExplicitFile {
            path: "app/views/Main.js".to_string(),
            category: Category::Screen,
        }];
        let dirs = verification_dirs(Path::new("/p"), &config);
        assert!(dirs.contains(&PathBuf::from("/p/app/views")));
        assert!(dirs.contains(&PathBuf::from("/p/src/components")));
    }

    #[test]
    fn test_json_report_shapes_outcomes() {
        let root = Path::new("/p");
        let outcomes = vec![
            (
                Candidate {
                    path: PathBuf::from("/p/src/components/A.js"),
                    category: Category::Component,
                },
                FileOutcome::Skipped(SkipReason::NoMarker),
            ),
            (
                Candidate {
                    path: PathBuf::from("/p/src/screens/B.js"),
                    category: Category::Screen,
                },
                FileOutcome::Failed(RefactorError::MultipleBlocks { count: 2 }),
            ),
        ];
        let totals = BatchTotals {
            refactored: 0,
            skipped: 1,
            failed: 1,
        };
        let report = JsonReport::build(root, &outcomes, totals, &Verification::default(), false);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["files"][0]["file"], "src/components/A.js");
        assert_eq!(value["files"][0]["status"], "skipped");
        assert_eq!(value["files"][0]["reason"], "no_marker");
        assert_eq!(value["files"][1]["status"], "failed");
        assert!(value["files"][1]["error"].as_str().unwrap().contains("2 bloques"));
        assert_eq!(value["totals"]["skipped"], 1);
        assert_eq!(value["clean"], true);
    }
}
