use crate::config::RefactorConfig;
use crate::refactor::DependencySet;

/// Detecta qué símbolos auxiliares usa el cuerpo de un bloque de estilos.
///
/// Es una búsqueda de subcadenas sensible a mayúsculas: `Platform` dentro de
/// `isPlatformReady` o de un string también cuenta. El orden sigue al de la
/// configuración y la fábrica siempre va primero.
pub fn infer_dependencies(body: &str, config: &RefactorConfig) -> DependencySet {
    let mut helpers = vec![config.factory.symbol.clone()];
    for helper in &config.helpers {
        if body.contains(helper.as_str()) && !helpers.contains(helper) {
            helpers.push(helper.clone());
        }
    }

    let mut theme: Vec<String> = Vec::new();
    for symbol in &config.theme.symbols {
        if body.contains(symbol.as_str()) && !theme.contains(symbol) {
            theme.push(symbol.clone());
        }
    }

    DependencySet { helpers, theme }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_always_included() {
        let deps = infer_dependencies("container: { flex: 1 }", &RefactorConfig::default());
        assert_eq!(deps.helpers, vec!["StyleSheet"]);
        assert!(deps.theme.is_empty());
    }

    #[test]
    fn test_helpers_follow_config_order() {
        let body = "header: { paddingTop: StatusBar.currentHeight, width: Dimensions.get('window').width, \
                    height: Platform.OS === 'ios' ? 44 : 56 }";
        let deps = infer_dependencies(body, &RefactorConfig::default());
        assert_eq!(
            deps.helpers,
            vec!["StyleSheet", "Platform", "Dimensions", "StatusBar"]
        );
    }

    #[test]
    fn test_absent_helper_is_not_imported() {
        let deps = infer_dependencies("box: { width: 10 }", &RefactorConfig::default());
        assert!(!deps.helpers.iter().any(|h| h == "Platform"));
    }

    #[test]
    fn test_theme_symbols_detected() {
        let body = "card: { backgroundColor: Colors.white, padding: Spacing.md, ...Shadows.small }";
        let deps = infer_dependencies(body, &RefactorConfig::default());
        assert_eq!(deps.theme, vec!["Colors", "Spacing", "Shadows"]);
    }

    #[test]
    fn test_substring_false_positive_is_accepted() {
        let deps = infer_dependencies("label: { content: 'PlatformName' }", &RefactorConfig::default());
        assert!(deps.helpers.contains(&"Platform".to_string()));
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let deps = infer_dependencies("a: { color: colors.primary }", &RefactorConfig::default());
        assert!(deps.theme.is_empty());
    }

    #[test]
    fn test_duplicate_config_entries_are_deduplicated() {
        let mut config = RefactorConfig::default();
        config.helpers.push("Platform".to_string());
        config.helpers.push("StyleSheet".to_string());
        let deps = infer_dependencies("a: { top: Platform.OS }", &config);
        assert_eq!(deps.helpers, vec!["StyleSheet", "Platform"]);
    }
}
