//! Localización del bloque `const x = Fabrica.create({ ... });`
//!
//! El modo por defecto (`Lazy`) reproduce el comportamiento histórico: un
//! único match perezoso que termina en el primer `});` encontrado, por lo que
//! un `});` dentro de un string trunca el cuerpo. El modo `Balanced` cuenta
//! la profundidad de llaves y salta strings, templates y comentarios.

use crate::config::ScanMode;
use crate::refactor::ExtractedBlock;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cierre de la llamada tras la llave final: `)` y `;` con espacios opcionales
static CALL_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\)\s*;").unwrap());

pub struct BlockExtractor {
    marker: String,
    mode: ScanMode,
    /// Definición completa, cuerpo perezoso
    lazy_re: Regex,
    /// Solo la apertura hasta la primera `{` de la llamada
    opening_re: Regex,
}

impl BlockExtractor {
    pub fn new(factory_symbol: &str, mode: ScanMode) -> Result<Self, regex::Error> {
        let factory = regex::escape(factory_symbol);
        let head = format!(
            r"(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*{}\.create\s*\(\s*\{{",
            factory
        );
        let lazy_re = Regex::new(&format!(r"(?s){}(.*?)\}}\s*\)\s*;", head))?;
        let opening_re = Regex::new(&head)?;

        Ok(Self {
            marker: format!("{}.create", factory_symbol),
            mode,
            lazy_re,
            opening_re,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Búsqueda de texto plano del marcador (sin validar la forma del bloque)
    pub fn has_marker(&self, text: &str) -> bool {
        text.contains(&self.marker)
    }

    /// Número de definiciones `x = Fabrica.create({` presentes en el texto
    pub fn count_definitions(&self, text: &str) -> usize {
        self.opening_re.find_iter(text).count()
    }

    /// Extrae el primer bloque de estilos, o `None` si ninguno encaja.
    pub fn extract(&self, text: &str) -> Option<ExtractedBlock> {
        match self.mode {
            ScanMode::Lazy => self.extract_lazy(text),
            ScanMode::Balanced => self.extract_balanced(text),
        }
    }

    fn extract_lazy(&self, text: &str) -> Option<ExtractedBlock> {
        let caps = self.lazy_re.captures(text)?;
        let whole = caps.get(0)?;
        let local_name = caps.get(1)?.as_str().to_string();
        let body = caps.get(2)?.as_str().trim().to_string();

        Some(ExtractedBlock {
            local_name,
            body,
            span: whole.range(),
            span_text: whole.as_str().to_string(),
        })
    }

    fn extract_balanced(&self, text: &str) -> Option<ExtractedBlock> {
        let caps = self.opening_re.captures(text)?;
        let opening = caps.get(0)?;
        let local_name = caps.get(1)?.as_str().to_string();

        let close = find_closing_brace(text, opening.end())?;
        let tail = CALL_TAIL_RE.find(&text[close + 1..])?;
        let end = close + 1 + tail.end();

        Some(ExtractedBlock {
            local_name,
            body: text[opening.end()..close].trim().to_string(),
            span: opening.start()..end,
            span_text: text[opening.start()..end].to_string(),
        })
    }
}

/// Posición de la `}` que cierra la llave abierta justo antes de `start`.
fn find_closing_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth: i32 = 1;
    let mut chars = text[start..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '/' if chars.peek().map(|&(_, c)| c) == Some('/') => {
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek().map(|&(_, c)| c) == Some('*') => {
                chars.next();
                let mut prev = ' ';
                for (_, c) in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            '"' | '\'' => {
                let mut esc = false;
                for (_, c) in chars.by_ref() {
                    if esc {
                        esc = false;
                    } else if c == '\\' {
                        esc = true;
                    } else if c == ch || c == '\n' {
                        break;
                    }
                }
            }
            '`' => skip_template(&mut chars),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn skip_template(chars: &mut std::iter::Peekable<std::str::CharIndices>) {
    let mut esc = false;
    while let Some((_, c)) = chars.next() {
        if esc {
            esc = false;
            continue;
        }
        match c {
            '\\' => esc = true,
            '`' => break,
            '$' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                chars.next();
                let mut d = 1i32;
                while let Some((_, inner)) = chars.next() {
                    match inner {
                        '{' => d += 1,
                        '}' => {
                            d -= 1;
                            if d == 0 {
                                break;
                            }
                        }
                        '`' => skip_template(chars),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy() -> BlockExtractor {
        BlockExtractor::new("StyleSheet", ScanMode::Lazy).unwrap()
    }

    fn balanced() -> BlockExtractor {
        BlockExtractor::new("StyleSheet", ScanMode::Balanced).unwrap()
    }

    const SIMPLE: &str = "import { StyleSheet } from 'react-native';\n\n\
export default function Card() {\n  return null;\n}\n\n\
const styles = StyleSheet.create({\n  container: {\n    flex: 1,\n  },\n});\n";

    #[test]
    fn test_extracts_body_and_exact_span() {
        let block = lazy().extract(SIMPLE).unwrap();
        assert_eq!(block.local_name, "styles");
        assert_eq!(block.body, "container: {\n    flex: 1,\n  },");
        assert_eq!(
            block.span_text,
            "const styles = StyleSheet.create({\n  container: {\n    flex: 1,\n  },\n});"
        );
        assert_eq!(&SIMPLE[block.span.clone()], block.span_text);
    }

    #[test]
    fn test_lazy_and_balanced_agree_on_simple_block() {
        assert_eq!(lazy().extract(SIMPLE), balanced().extract(SIMPLE));
    }

    #[test]
    fn test_returns_none_without_marker() {
        let text = "import React from 'react';\nexport const x = 1;\n";
        assert!(!lazy().has_marker(text));
        assert!(lazy().extract(text).is_none());
        assert!(balanced().extract(text).is_none());
    }

    #[test]
    fn test_marker_without_literal_body_is_not_extracted() {
        let text = "const styles = StyleSheet.create(baseStyles);\n";
        assert!(lazy().has_marker(text));
        assert!(lazy().extract(text).is_none());
        assert!(balanced().extract(text).is_none());
    }

    #[test]
    fn test_custom_name_and_export_prefix_are_captured() {
        let text = "export const cardStyles = StyleSheet.create({ a: { flex: 1 } });\n";
        let block = lazy().extract(text).unwrap();
        assert_eq!(block.local_name, "cardStyles");
        assert_eq!(block.body, "a: { flex: 1 }");
        assert!(block.span_text.starts_with("export const"));
    }

    #[test]
    fn test_lazy_truncates_at_first_call_close_inside_string() {
        let text = "const styles = StyleSheet.create({\n  a: { content: '});' },\n  b: { flex: 1 },\n});\n";

        let truncated = lazy().extract(text).unwrap();
        assert_eq!(truncated.body, "a: { content: '");

        let full = balanced().extract(text).unwrap();
        assert_eq!(full.body, "a: { content: '});' },\n  b: { flex: 1 },");
        assert!(full.span_text.ends_with("});"));
    }

    #[test]
    fn test_balanced_skips_comments_and_templates() {
        let text = "const styles = StyleSheet.create({\n  // cierra } aquí\n  a: { width: `${w}px` }, /* } */\n});";
        let block = balanced().extract(text).unwrap();
        assert!(block.body.ends_with("/* } */"));
        assert_eq!(block.span.end, text.len());
    }

    #[test]
    fn test_balanced_requires_call_tail() {
        let text = "const styles = StyleSheet.create({ a: {} }, extra);";
        assert!(balanced().extract(text).is_none());
    }

    #[test]
    fn test_first_match_only_and_definition_count() {
        let text = "const a = StyleSheet.create({ x: {} });\nconst b = StyleSheet.create({ y: {} });\n";
        let block = lazy().extract(text).unwrap();
        assert_eq!(block.local_name, "a");
        assert_eq!(lazy().count_definitions(text), 2);
    }

    #[test]
    fn test_factory_symbol_is_configurable() {
        let extractor = BlockExtractor::new("Factory", ScanMode::Lazy).unwrap();
        let text = "const styles = Factory.create({ container: { flex: 1 } });";
        assert_eq!(extractor.marker(), "Factory.create");
        let block = extractor.extract(text).unwrap();
        assert_eq!(block.body, "container: { flex: 1 }");
        assert_eq!(block.span_text, text);
    }
}
