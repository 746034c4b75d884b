//! Startup diagnostics and user-friendly error formatting.

use tracing::info;

use crate::display::{ProfileError, SelectionError};
use crate::presentation::PresentationError;
use crate::server::replay::ScriptError;

/// Log environment facts useful when triaging bug reports.
pub fn log_startup_diagnostics() {
    info!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "runtime environment"
    );
    if let Ok(dir) = std::env::current_dir() {
        info!(working_dir = %dir.display(), "startup context");
    }
}

/// Turn an orchestration error into a message a user can act on.
///
/// Walks the error chain for the known failure kinds and adds a hint;
/// unknown errors print their chain as-is.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut message = format!("Error: {error}");
    for cause in error.chain().skip(1) {
        message.push_str(&format!("\n  Caused by: {cause}"));
    }

    if let Some(hint) = hint_for(error) {
        message.push_str(&format!("\n\nHint: {hint}"));
    }
    message
}

fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    for cause in error.chain() {
        if let Some(selection) = cause.downcast_ref::<SelectionError>() {
            return Some(match selection {
                SelectionError::Query(_) => {
                    "The display system rejected the config query. Check that the \
                     display profile describes a valid display."
                }
                SelectionError::NoMatchingConfig => {
                    "No display config satisfies the [rendering] settings. Lower the \
                     depth/stencil minimums or disable multisampling."
                }
            });
        }
        if let Some(presentation) = cause.downcast_ref::<PresentationError>() {
            return Some(match presentation {
                PresentationError::InvalidDisplay(_) => {
                    "The remote display disappeared before the presentation could be \
                     shown. It will be re-shown when a display is offered again."
                }
                PresentationError::Selection(_) => {
                    "Surface setup failed while selecting a rendering config. Check \
                     the [rendering] settings against the display profile."
                }
            });
        }
        if cause.downcast_ref::<ProfileError>().is_some() {
            return Some(
                "The display profile could not be loaded. Check the [provider] \
                 profile path and the file's TOML syntax.",
            );
        }
        if cause.downcast_ref::<ScriptError>().is_some() {
            return Some(
                "The replay script could not be loaded. Check the [provider] script \
                 path and the file's TOML syntax.",
            );
        }
    }
    None
}
