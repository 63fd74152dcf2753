use std::path::PathBuf;

/// Errores que pueden ocurrir al refactorizar un archivo.
///
/// Ninguno aborta el lote: el pipeline los convierte en un resultado por archivo.
#[derive(Debug, thiserror::Error)]
pub enum RefactorError {
    #[error("archivo no encontrado: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("se encontró `{marker}` pero no se pudo extraer el bloque de estilos")]
    ExtractionFailed { marker: String },

    #[error("{count} bloques de estilos en el mismo archivo; solo se admite uno")]
    MultipleBlocks { count: usize },

    #[error("el nombre base '{base_name}' no produce un identificador válido ('{export_name}')")]
    InvalidExportName {
        base_name: String,
        export_name: String,
    },

    #[error("error de E/S en {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RefactorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RefactorError::Io {
            path: path.into(),
            source,
        }
    }
}
