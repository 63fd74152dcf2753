//! # Selección de archivos y rutas relativas
//!
//! Enumera los archivos candidatos (lista explícita o escaneo no recursivo de
//! los directorios configurados) y calcula las rutas de import relativas que
//! se escriben en el código generado.

use crate::config::RefactorConfig;
use crate::refactor::Category;
use std::path::{Component, Path, PathBuf};

/// Archivo fuente candidato a refactorizar
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub path: PathBuf,
    pub category: Category,
}

/// Enumera los archivos a procesar.
///
/// Si la configuración lista archivos explícitos, se usan tal cual (aunque no
/// existan: el pipeline los reporta como no encontrados). Si no, se escanea el
/// primer nivel de cada directorio objetivo que exista, filtrando por extensión.
pub fn collect_candidates(project_root: &Path, config: &RefactorConfig) -> Vec<Candidate> {
    if !config.files.is_empty() {
        return config
            .files
            .iter()
            .map(|f| Candidate {
                path: project_root.join(&f.path),
                category: f.category,
            })
            .collect();
    }

    let mut candidates = Vec::new();
    for target in &config.targets {
        let dir = project_root.join(&target.dir);
        for path in list_files(&dir, config) {
            candidates.push(Candidate {
                path,
                category: target.category,
            });
        }
    }
    candidates
}

/// Archivos de primer nivel de `dir` con una extensión aceptada, ordenados.
pub fn list_files(dir: &Path, config: &RefactorConfig) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = ignore::WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(false)
        .git_ignore(true)
        .build()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && config.accepts_extension(p))
        .collect();

    files.sort();
    files
}

/// Ruta de `to` relativa al directorio `from_dir`, sin tocar el sistema de archivos.
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from_dir.components().collect();
    let target: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for c in &target[common..] {
        rel.push(c.as_os_str());
    }
    rel
}

/// Especificador de import estilo JS (`../styles/x`, `./x`) desde `from_dir`
/// hacia un módulo cuya ruta ya viene sin extensión.
pub fn import_specifier(from_dir: &Path, module: &Path) -> String {
    let rel = relative_path(from_dir, module);
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if joined.starts_with("..") {
        joined
    } else {
        format!("./{}", joined)
    }
}

/// Nombre de archivo sin extensión (`ProfileScreen.js` → `ProfileScreen`)
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
