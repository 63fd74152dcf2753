//! Núcleo de la refactorización de estilos
//!
//! Cada archivo fuente pasa por el mismo ciclo leer → transformar → escribir:
//! el extractor localiza el bloque `X.create({ ... })`, el inferidor de
//! dependencias decide qué imports necesita el nuevo módulo, el generador
//! sintetiza el módulo de estilos y el patcher reescribe el archivo original.

pub mod dependencies;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod patcher;
pub mod pipeline;

pub use error::RefactorError;
pub use pipeline::{BatchTotals, FileOutcome, Pipeline, SkipReason};

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

/// Tipo de archivo fuente; decide el subdirectorio de destino
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Component,
    Screen,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Component => "component",
            Category::Screen => "screen",
        }
    }
}

/// Contenido completo de un archivo fuente junto con su nombre base
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub base_name: String,
    pub category: Category,
    pub text: String,
}

/// Bloque de estilos capturado dentro de un archivo fuente
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedBlock {
    /// Identificador local ligado al bloque (ej: `styles`)
    pub local_name: String,
    /// Cuerpo entre las llaves de la llamada, sin espacios en los extremos
    pub body: String,
    /// Rango en bytes del texto original capturado
    pub span: Range<usize>,
    /// Texto exacto capturado (`&text[span]`)
    pub span_text: String,
}

/// Símbolos auxiliares referenciados por el cuerpo de un bloque
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencySet {
    /// Símbolos del módulo de la fábrica; siempre empieza por la fábrica
    pub helpers: Vec<String>,
    /// Constantes de tema detectadas (vacío = sin import de tema)
    pub theme: Vec<String>,
}

/// Módulo de estilos listo para escribirse en disco
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub export_name: String,
    pub path: PathBuf,
    pub imports: Vec<String>,
    pub text: String,
}
