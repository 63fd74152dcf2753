//! Generación del módulo de estilos dedicado

use crate::config::RefactorConfig;
use crate::files;
use crate::refactor::dependencies::infer_dependencies;
use crate::refactor::{ExtractedBlock, GeneratedModule, RefactorError, SourceUnit};
use std::fs;
use std::path::Path;

/// Deriva el nombre exportado a partir del nombre base del archivo.
///
/// Quita los sufijos de rol configurados (repetidamente, nunca dejando el
/// nombre vacío), pasa la primera letra a minúscula y añade el sufijo fijo:
/// `ProfileScreen` → `profileStyles`.
pub fn derive_export_name(base_name: &str, config: &RefactorConfig) -> Result<String, RefactorError> {
    let mut stem = base_name;
    let mut changed = true;
    while changed {
        changed = false;
        for suffix in &config.strip_suffixes {
            if suffix.is_empty() {
                continue;
            }
            if let Some(rest) = stem.strip_suffix(suffix.as_str()) {
                if !rest.is_empty() {
                    stem = rest;
                    changed = true;
                }
            }
        }
    }

    let mut chars = stem.chars();
    let export_name = match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str() + &config.export_suffix,
        None => config.export_suffix.clone(),
    };

    if stem.is_empty() || !is_identifier(&export_name) {
        return Err(RefactorError::InvalidExportName {
            base_name: base_name.to_string(),
            export_name,
        });
    }
    Ok(export_name)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Sintetiza el módulo de estilos (sin escribirlo).
///
/// El archivo se llama `<export_name>.<ext>` con la extensión del archivo
/// fuente y vive en el subdirectorio de su categoría.
pub fn build_module(
    unit: &SourceUnit,
    block: &ExtractedBlock,
    project_root: &Path,
    config: &RefactorConfig,
) -> Result<GeneratedModule, RefactorError> {
    let export_name = derive_export_name(&unit.base_name, config)?;
    let extension = unit
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("js");

    let dest_dir = config.destination_dir(project_root, unit.category);
    let path = dest_dir.join(format!("{}.{}", export_name, extension));

    let deps = infer_dependencies(&block.body, config);
    let mut imports = vec![format!(
        "import {{ {} }} from '{}';",
        deps.helpers.join(", "),
        config.factory.module
    )];
    if !deps.theme.is_empty() {
        let theme_path = files::import_specifier(&dest_dir, &config.theme_module_path(project_root));
        imports.push(format!(
            "import {{ {} }} from '{}';",
            deps.theme.join(", "),
            theme_path
        ));
    }

    let text = format!(
        "{}\n\nexport const {} = {}.create({{\n{}\n}});\n",
        imports.join("\n"),
        export_name,
        config.factory.symbol,
        block.body
    );

    Ok(GeneratedModule {
        export_name,
        path,
        imports,
        text,
    })
}

/// Escribe el módulo, creando directorios padres. Sobrescribe sin preguntar.
pub fn write_module(module: &GeneratedModule) -> Result<(), RefactorError> {
    if let Some(parent) = module.path.parent() {
        fs::create_dir_all(parent).map_err(|e| RefactorError::io(parent, e))?;
    }
    fs::write(&module.path, &module.text).map_err(|e| RefactorError::io(&module.path, e))
}
