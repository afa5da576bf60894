//! Route guard for commands.
//!
//! Each command maps to a screen path and goes through the same resolution
//! the application uses for navigation.

use anyhow::{Result, bail};

use eco_core::{Navigation, Route, resolve};
use eco_persistence::{AppState, KeyValueStore};

/// Resolve `path` for the current login state.
///
/// Being sent to the login screen is an error; any other redirect is
/// followed and the target returned.
pub fn enter<S: KeyValueStore>(app: &AppState<S>, path: &str) -> Result<Route> {
    match resolve(path, app.is_authenticated()) {
        Navigation::Render(route) => Ok(route),
        Navigation::Redirect(Route::Login) => {
            bail!("belum login; jalankan `ecoinspect login <NAMA>` terlebih dahulu")
        }
        Navigation::Redirect(route) => {
            tracing::debug!(from = path, to = %route, "redirected");
            Ok(route)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_persistence::MemoryStore;

    #[test]
    fn signed_out_commands_are_refused() {
        let app = AppState::load(MemoryStore::new());
        let err = enter(&app, "/history").unwrap_err();
        assert!(err.to_string().contains("ecoinspect login"));
    }

    #[test]
    fn login_screen_redirects_once_signed_in() {
        let mut app = AppState::load(MemoryStore::new());
        assert_eq!(enter(&app, "/login").unwrap(), Route::Login);
        app.login("Rina").unwrap();
        assert_eq!(enter(&app, "/login").unwrap(), Route::Dashboard);
        assert_eq!(
            enter(&app, "/new-inspection?form=6C").unwrap(),
            Route::new_inspection("6C")
        );
    }
}
