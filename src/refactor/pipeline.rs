//! Orquestación por archivo: leer → planificar → escribir
//!
//! Cada archivo es una unidad atómica e independiente. Los errores se
//! clasifican aquí en un `FileOutcome` y nunca cruzan al siguiente archivo.

use crate::config::RefactorConfig;
use crate::files::{self, Candidate};
use crate::refactor::dependencies::infer_dependencies;
use crate::refactor::extractor::BlockExtractor;
use crate::refactor::generator::{build_module, write_module};
use crate::refactor::patcher::{FactoryImport, PatchedSource, patch_source};
use crate::refactor::{
    Category, DependencySet, ExtractedBlock, GeneratedModule, RefactorError, SourceUnit,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Motivo por el que un archivo no se modificó (sin ser un error)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    NoMarker,
    ExtractionFailed,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NotFound => "archivo no encontrado",
            SkipReason::NoMarker => "sin estilos inline (ya refactorizado)",
            SkipReason::ExtractionFailed => "no se pudo extraer el bloque de estilos",
        }
    }
}

/// Datos de un archivo refactorizado con éxito
#[derive(Debug, Clone)]
pub struct RefactorSummary {
    pub source: PathBuf,
    pub module_path: PathBuf,
    pub export_name: String,
    pub local_name: String,
    pub dependencies: DependencySet,
    pub import_statement: String,
    pub renamed: usize,
    pub factory_import: FactoryImport,
    /// Bloques adicionales que quedaron inline (solo con `allow_multiple_blocks`)
    pub extra_blocks: usize,
}

#[derive(Debug)]
pub enum FileOutcome {
    Refactored(RefactorSummary),
    Skipped(SkipReason),
    Failed(RefactorError),
}

/// Todo lo que se escribirá para un archivo, calculado en memoria
#[derive(Debug, Clone)]
pub struct FilePlan {
    pub unit: SourceUnit,
    pub block: ExtractedBlock,
    pub module: GeneratedModule,
    pub patched: PatchedSource,
    pub extra_blocks: usize,
}

impl FilePlan {
    fn summary(&self, config: &RefactorConfig) -> RefactorSummary {
        RefactorSummary {
            source: self.unit.path.clone(),
            module_path: self.module.path.clone(),
            export_name: self.module.export_name.clone(),
            local_name: self.block.local_name.clone(),
            dependencies: infer_dependencies(&self.block.body, config),
            import_statement: self.patched.import_statement.trim_end().to_string(),
            renamed: self.patched.renamed,
            factory_import: self.patched.factory_import.clone(),
            extra_blocks: self.extra_blocks,
        }
    }
}

/// Contadores agregados del lote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub refactored: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchTotals {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Refactored(_) => self.refactored += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.refactored + self.skipped + self.failed
    }

    pub fn merge(&mut self, other: BatchTotals) {
        self.refactored += other.refactored;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

pub struct Pipeline<'a> {
    project_root: PathBuf,
    config: &'a RefactorConfig,
    extractor: BlockExtractor,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(project_root: &Path, config: &'a RefactorConfig, dry_run: bool) -> anyhow::Result<Self> {
        let extractor = BlockExtractor::new(&config.factory.symbol, config.scan_mode)?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
            config,
            extractor,
            dry_run,
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Calcula el plan de un archivo sin escribir nada.
    ///
    /// `Ok(None)` significa que el archivo no contiene el marcador.
    pub fn plan(&self, candidate: &Candidate) -> Result<Option<FilePlan>, RefactorError> {
        let path = &candidate.path;
        if !path.is_file() {
            return Err(RefactorError::NotFound { path: path.clone() });
        }

        let text = fs::read_to_string(path).map_err(|e| RefactorError::io(path, e))?;
        if !self.extractor.has_marker(&text) {
            return Ok(None);
        }

        let definitions = self.extractor.count_definitions(&text);
        if definitions > 1 && !self.config.allow_multiple_blocks {
            return Err(RefactorError::MultipleBlocks { count: definitions });
        }

        let block = self
            .extractor
            .extract(&text)
            .ok_or_else(|| RefactorError::ExtractionFailed {
                marker: self.extractor.marker().to_string(),
            })?;

        let unit = SourceUnit {
            path: path.clone(),
            base_name: files::base_name(path).unwrap_or_default(),
            category: candidate.category,
            text,
        };

        let module = build_module(&unit, &block, &self.project_root, self.config)?;
        let source_dir = path.parent().unwrap_or(self.project_root.as_path());
        let import_path = files::import_specifier(source_dir, &module.path.with_extension(""));
        let patched = patch_source(&unit.text, &block, &module.export_name, &import_path, self.config);

        Ok(Some(FilePlan {
            unit,
            block,
            module,
            patched,
            extra_blocks: definitions.saturating_sub(1),
        }))
    }

    /// Escribe el módulo generado y sobrescribe el archivo fuente.
    pub fn apply(&self, plan: &FilePlan) -> Result<(), RefactorError> {
        write_module(&plan.module)?;
        fs::write(&plan.unit.path, &plan.patched.text).map_err(|e| RefactorError::io(&plan.unit.path, e))
    }

    /// Procesa un archivo completo y clasifica el resultado.
    pub fn process(&self, candidate: &Candidate) -> FileOutcome {
        let plan = match self.plan(candidate) {
            Ok(Some(plan)) => plan,
            Ok(None) => return FileOutcome::Skipped(SkipReason::NoMarker),
            Err(RefactorError::NotFound { .. }) => return FileOutcome::Skipped(SkipReason::NotFound),
            Err(RefactorError::ExtractionFailed { .. }) => {
                return FileOutcome::Skipped(SkipReason::ExtractionFailed);
            }
            Err(e) => return FileOutcome::Failed(e),
        };

        if !self.dry_run {
            if let Err(e) = self.apply(&plan) {
                return FileOutcome::Failed(e);
            }
        }
        FileOutcome::Refactored(plan.summary(self.config))
    }

    /// Crea de antemano los subdirectorios de destino de cada categoría.
    pub fn prepare_destinations(&self) -> Result<(), RefactorError> {
        if self.dry_run {
            return Ok(());
        }
        for category in [Category::Component, Category::Screen] {
            let dir = self.config.destination_dir(&self.project_root, category);
            fs::create_dir_all(&dir).map_err(|e| RefactorError::io(&dir, e))?;
        }
        Ok(())
    }
}
