pub mod init;
pub mod run;
pub mod verify;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stylesplit")]
#[command(version, about = "Separa los bloques StyleSheet.create de componentes y pantallas en módulos de estilos", long_about = None)]
pub struct Cli {
    /// Solo muestra errores y el resumen final
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Muestra detalles de cada archivo ([DEBUG])
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refactoriza los archivos configurados (comportamiento por defecto)
    Run {
        /// Raíz del proyecto (por defecto el directorio actual)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Calcula los cambios sin escribir archivos
        #[arg(long)]
        dry_run: bool,
        /// Formato de salida
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Busca archivos que aún tienen estilos inline
    Verify {
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Crea .stylesplitrc.toml con los valores por defecto
    Init {
        #[arg(long)]
        root: Option<PathBuf>,
        /// Sobrescribe sin pedir confirmación
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Nivel de detalle de la salida de consola
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Resuelve la raíz del proyecto: la indicada o el directorio actual.
///
/// Siempre devuelve una ruta absoluta, para que las rutas explícitas
/// absolutas del config y las de destino compartan la misma base.
pub fn resolve_root(root: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match root {
        Some(path) => Ok(std::path::absolute(path)?),
        None => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["stylesplit"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from(["stylesplit", "run", "--dry-run", "--format", "json", "--root", "app"]).unwrap();
        match cli.command {
            Some(Commands::Run { root, dry_run, format }) => {
                assert_eq!(root, Some(PathBuf::from("app")));
                assert!(dry_run);
                assert_eq!(format, ReportFormat::Json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["stylesplit", "verify", "--verbose"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["stylesplit", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let root = resolve_root(Some(PathBuf::from("app"))).unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, std::env::current_dir().unwrap().join("app"));
    }
}
