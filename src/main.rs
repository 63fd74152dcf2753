//! # Stylesplit - separación de estilos de React Native
//!
//! Busca los bloques `const styles = StyleSheet.create({...});` en los
//! componentes y pantallas del proyecto, los mueve a módulos de estilos
//! dedicados bajo `src/styles/` y reescribe cada archivo para importarlos.

use clap::Parser;
use commands::{Cli, Commands, ReportFormat};

// Módulos
pub mod commands;
pub mod config;
pub mod files;
pub mod refactor;
pub mod report;
pub mod ui;

fn main() {
    let cli = Cli::parse();
    let mode = cli.output_mode();

    let result = match cli.command {
        Some(Commands::Run { root, dry_run, format }) => commands::resolve_root(root)
            .and_then(|root| commands::run::handle_run_command(&root, dry_run, format, mode)),
        Some(Commands::Verify { root }) => commands::resolve_root(root)
            .and_then(|root| commands::verify::handle_verify_command(&root, mode))
            .map(|clean| {
                if !clean {
                    std::process::exit(1);
                }
            }),
        Some(Commands::Init { root, force }) => commands::resolve_root(root)
            .and_then(|root| commands::init::handle_init_command(&root, force)),
        None => {
            // Comportamiento por defecto: lote completo en el directorio actual
            commands::resolve_root(None)
                .and_then(|root| commands::run::handle_run_command(&root, false, ReportFormat::Text, mode))
        }
    };

    if let Err(e) = result {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
