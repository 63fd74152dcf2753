use crate::refactor::Category;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Versión actual de stylesplit (leída desde Cargo.toml en tiempo de compilación)
pub const STYLESPLIT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nombre del archivo de configuración en la raíz del proyecto
pub const CONFIG_FILE: &str = ".stylesplitrc.toml";

/// Directorio escaneado en busca de archivos fuente
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TargetDir {
    pub dir: String,
    pub category: Category,
}

/// Archivo fuente listado explícitamente (reemplaza el escaneo de directorios)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExplicitFile {
    pub path: String,
    pub category: Category,
}

/// Subdirectorio de destino (bajo `styles_root`) para cada categoría
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Destinations {
    pub component: String,
    pub screen: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            component: "components".to_string(),
            screen: "screens".to_string(),
        }
    }
}

/// Símbolo de la fábrica de estilos y el módulo que lo exporta
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FactoryConfig {
    pub symbol: String,
    pub module: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            symbol: "StyleSheet".to_string(),
            module: "react-native".to_string(),
        }
    }
}

impl FactoryConfig {
    /// Texto literal que delata un bloque inline (ej: `StyleSheet.create`)
    pub fn marker(&self) -> String {
        format!("{}.create", self.symbol)
    }
}

/// Constantes de tema y la ruta (relativa a la raíz del proyecto, sin extensión) de su módulo
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub symbols: Vec<String>,
    pub module: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            symbols: vec![
                "Colors".to_string(),
                "Spacing".to_string(),
                "FontSizes".to_string(),
                "BorderRadius".to_string(),
                "Shadows".to_string(),
                "FontWeights".to_string(),
            ],
            module: "src/constants/theme".to_string(),
        }
    }
}

/// Estrategia para delimitar el cuerpo del bloque de estilos
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Primer match perezoso: se detiene en el primer `});` bien formado
    #[default]
    Lazy,
    /// Escaneo con profundidad de llaves (ignora strings y comentarios)
    Balanced,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RefactorConfig {
    pub version: String,
    pub source_root: String,
    pub extensions: Vec<String>,
    pub styles_root: String,
    pub strip_suffixes: Vec<String>,
    pub export_suffix: String,
    pub helpers: Vec<String>,
    pub utility_calls: Vec<String>,
    pub scan_mode: ScanMode,
    pub allow_multiple_blocks: bool,
    // Las tablas van al final para que TOML las serialice después de los valores
    pub targets: Vec<TargetDir>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ExplicitFile>,
    pub destinations: Destinations,
    pub factory: FactoryConfig,
    pub theme: ThemeConfig,
    /// Versión que escribió el archivo cuando difiere de la actual
    #[serde(skip)]
    pub upgraded_from: Option<String>,
}

impl Default for RefactorConfig {
    fn default() -> Self {
        Self {
            version: STYLESPLIT_VERSION.to_string(),
            source_root: "src".to_string(),
            targets: vec![
                TargetDir {
                    dir: "src/components".to_string(),
                    category: Category::Component,
                },
                TargetDir {
                    dir: "src/screens".to_string(),
                    category: Category::Screen,
                },
            ],
            files: Vec::new(),
            extensions: vec!["js".to_string()],
            styles_root: "src/styles".to_string(),
            destinations: Destinations::default(),
            strip_suffixes: vec![
                "Screen".to_string(),
                "Modal".to_string(),
                "Component".to_string(),
            ],
            export_suffix: "Styles".to_string(),
            factory: FactoryConfig::default(),
            helpers: vec![
                "Platform".to_string(),
                "Dimensions".to_string(),
                "PixelRatio".to_string(),
                "StatusBar".to_string(),
            ],
            theme: ThemeConfig::default(),
            utility_calls: vec![
                "flatten".to_string(),
                "compose".to_string(),
                "absoluteFill".to_string(),
                "absoluteFillObject".to_string(),
                "hairlineWidth".to_string(),
            ],
            scan_mode: ScanMode::Lazy,
            allow_multiple_blocks: false,
            upgraded_from: None,
        }
    }
}

impl RefactorConfig {
    /// Carga la configuración desde `.stylesplitrc.toml`.
    ///
    /// Retorna `Ok(None)` si el archivo no existe; los campos ausentes toman
    /// su valor por defecto. No imprime nada: un cambio de versión queda en
    /// `upgraded_from` para que el comando decida cómo avisarlo.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("No se pudo leer {}", config_path.display()))?;
        let mut config: RefactorConfig = toml::from_str(&content)
            .with_context(|| format!("{} no es un TOML válido", config_path.display()))?;

        if config.version != STYLESPLIT_VERSION {
            config.upgraded_from = Some(std::mem::replace(
                &mut config.version,
                STYLESPLIT_VERSION.to_string(),
            ));
        }

        Ok(Some(config))
    }

    /// Carga la configuración del proyecto o usa los valores por defecto.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), toml)?;
        Ok(())
    }

    /// Directorio donde se escriben los módulos de estilos de una categoría
    pub fn destination_dir(&self, project_root: &Path, category: Category) -> PathBuf {
        let sub = match category {
            Category::Component => &self.destinations.component,
            Category::Screen => &self.destinations.screen,
        };
        project_root.join(&self.styles_root).join(sub)
    }

    /// Ruta absoluta (sin extensión) del módulo de tema
    pub fn theme_module_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.theme.module)
    }

    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}
