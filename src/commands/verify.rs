use crate::commands::OutputMode;
use crate::config::RefactorConfig;
use crate::report;
use crate::ui;
use std::path::Path;

/// Ejecuta solo la verificación. Retorna `true` si no quedan estilos inline.
pub fn handle_verify_command(project_root: &Path, mode: OutputMode) -> anyhow::Result<bool> {
    let config = RefactorConfig::load_or_default(project_root)?;
    ui::print_config_upgrade(&config, mode);

    let pb = ui::crear_progreso("Buscando estilos inline...", mode);
    let verification = report::verify(project_root, &config);
    pb.finish_and_clear();

    ui::print_debug(
        mode,
        &format!(
            "{} directorios, {} archivos revisados",
            verification.scanned_dirs, verification.scanned_files
        ),
    );
    if mode != OutputMode::Quiet || !verification.is_clean() {
        ui::print_verification(&verification);
    }
    Ok(verification.is_clean())
}
