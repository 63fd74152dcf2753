//! Reescritura del archivo fuente original
//!
//! Todas las operaciones son de texto: no hay AST ni validación sintáctica
//! posterior. El span eliminado es exactamente el capturado por el extractor.

use crate::config::RefactorConfig;
use crate::refactor::ExtractedBlock;
use once_cell::sync::Lazy;
use regex::Regex;

/// Declaración `import ... from '...';` completa (admite varias líneas)
static IMPORT_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+[^;]*?\bfrom\s+['"][^'"\n]*['"][ \t]*;?[ \t]*\r?\n?"#).unwrap()
});

/// Qué pasó con el import de la fábrica tras quitar el bloque
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryImport {
    /// Se quitó el símbolo (o la declaración entera si quedó vacía)
    Removed,
    /// Sigue en uso: `Some(miembro)` si es una llamada utilitaria conocida
    Kept(Option<String>),
    /// El archivo no importaba la fábrica desde su módulo
    NotImported,
}

/// Resultado de parchear un archivo fuente
#[derive(Debug, Clone)]
pub struct PatchedSource {
    pub text: String,
    pub import_statement: String,
    pub renamed: usize,
    pub factory_import: FactoryImport,
}

/// Aplica los cinco pasos sobre el texto original:
/// quitar el bloque, construir el import, insertarlo tras el último import,
/// renombrar `viejo.` → `nuevo.` y limpiar el import de la fábrica.
pub fn patch_source(
    original: &str,
    block: &ExtractedBlock,
    export_name: &str,
    import_path: &str,
    config: &RefactorConfig,
) -> PatchedSource {
    let mut text = original.to_string();
    text.replace_range(block.span.clone(), "");

    let import_statement = format!(
        "import {{ {} }} from '{}';{}",
        export_name,
        import_path,
        line_ending(original)
    );
    text = insert_after_last_import(&text, &import_statement);

    let mut renamed = 0;
    if block.local_name != export_name {
        let (updated, count) = rename_member_access(&text, &block.local_name, export_name);
        text = updated;
        renamed = count;
    }

    let factory_import = match factory_usage(&text, &config.factory.symbol, &config.utility_calls) {
        Some(usage) => {
            if find_factory_import(&text, &config.factory.symbol, &config.factory.module).is_some() {
                FactoryImport::Kept(usage)
            } else {
                FactoryImport::NotImported
            }
        }
        None => match strip_factory_import(&text, &config.factory.symbol, &config.factory.module) {
            Some(updated) => {
                text = updated;
                FactoryImport::Removed
            }
            None => FactoryImport::NotImported,
        },
    };

    PatchedSource {
        text,
        import_statement,
        renamed,
        factory_import,
    }
}

/// Fin de línea dominante del archivo: `\r\n` si aparece alguno
fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Inserta `statement` justo después de la última declaración de import,
/// o al principio del archivo si no hay ninguna.
pub fn insert_after_last_import(text: &str, statement: &str) -> String {
    match IMPORT_DECL_RE.find_iter(text).last() {
        Some(last) => {
            let mut out = String::with_capacity(text.len() + statement.len() + 1);
            out.push_str(&text[..last.end()]);
            if !last.as_str().ends_with('\n') {
                out.push_str(line_ending(text));
            }
            out.push_str(statement);
            out.push_str(&text[last.end()..]);
            out
        }
        None => format!("{}{}", statement, text),
    }
}

/// Reemplaza `\bviejo\.` por `nuevo.` y devuelve cuántas ocurrencias cambió.
pub fn rename_member_access(text: &str, old: &str, new: &str) -> (String, usize) {
    let re = match Regex::new(&format!(r"\b{}\.", regex::escape(old))) {
        Ok(re) => re,
        Err(_) => return (text.to_string(), 0),
    };
    let count = re.find_iter(text).count();
    let replacement = format!("{}.", new);
    let updated = re.replace_all(text, regex::NoExpand(&replacement)).into_owned();
    (updated, count)
}

/// Busca usos de la fábrica fuera de las declaraciones de import.
///
/// Retorna `None` si no queda ninguno; `Some(Some(miembro))` si el primer uso
/// es una llamada utilitaria permitida y `Some(None)` para cualquier otro uso.
pub fn factory_usage(text: &str, factory: &str, utility_calls: &[String]) -> Option<Option<String>> {
    let body = IMPORT_DECL_RE.replace_all(text, "");
    let re = Regex::new(&format!(r"\b{}\b(?:\s*\.\s*(\w+))?", regex::escape(factory))).ok()?;

    let mut other_use = false;
    for caps in re.captures_iter(&body) {
        match caps.get(1).map(|m| m.as_str()) {
            Some(member) if utility_calls.iter().any(|u| u == member) => {
                return Some(Some(member.to_string()));
            }
            _ => other_use = true,
        }
    }
    if other_use { Some(None) } else { None }
}

fn named_import_re(module: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?m)^([ \t]*)import\s+(?:(\w+)\s*,\s*)?\{{([^}}]*)\}}\s*from\s*(['"]){}['"][ \t]*;?[ \t]*(\r?\n?)"#,
        regex::escape(module)
    ))
    .ok()
}

fn specifier_name(spec: &str) -> &str {
    spec.split_whitespace().next().unwrap_or("")
}

/// Primera declaración `import { ... } from '<module>'` que nombra a la fábrica
fn find_factory_import<'t>(text: &'t str, factory: &str, module: &str) -> Option<regex::Captures<'t>> {
    let re = named_import_re(module)?;
    re.captures_iter(text).find(|caps| {
        caps.get(3)
            .map(|m| m.as_str().split(',').any(|s| specifier_name(s.trim()) == factory))
            .unwrap_or(false)
    })
}

/// Quita la fábrica de su declaración de import; si la lista queda vacía se
/// elimina la declaración completa (o queda solo el import por defecto).
pub fn strip_factory_import(text: &str, factory: &str, module: &str) -> Option<String> {
    let caps = find_factory_import(text, factory, module)?;

    let whole = caps.get(0)?;
    let indent = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let default_import = caps.get(2).map(|m| m.as_str());
    let quote = caps.get(4).map(|m| m.as_str()).unwrap_or("'");
    let newline = caps.get(5).map(|m| m.as_str()).unwrap_or("");

    let remaining: Vec<&str> = caps
        .get(3)
        .map(|m| m.as_str())
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && specifier_name(s) != factory)
        .collect();

    let replacement = match (default_import, remaining.is_empty()) {
        (None, true) => String::new(),
        (Some(default_name), true) => format!(
            "{indent}import {default_name} from {quote}{module}{quote};{newline}"
        ),
        (None, false) => format!(
            "{indent}import {{ {} }} from {quote}{module}{quote};{newline}",
            remaining.join(", ")
        ),
        (Some(default_name), false) => format!(
            "{indent}import {default_name}, {{ {} }} from {quote}{module}{quote};{newline}",
            remaining.join(", ")
        ),
    };

    let mut out = text.to_string();
    out.replace_range(whole.range(), &replacement);
    Some(out)
}
