//! Application routes and the login guard.

use std::fmt;

use crate::wizard::EntryContext;

/// A screen of the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    Login,
    #[default]
    Dashboard,
    /// The inspection wizard, optionally entered with a preselected form.
    NewInspection { form: Option<String> },
    History,
}

impl Route {
    pub fn new_inspection(form: impl Into<String>) -> Self {
        Self::NewInspection {
            form: Some(form.into()),
        }
    }

    /// Parse a path such as `/new-inspection?form=6B`.
    ///
    /// Returns `None` for paths that name no screen.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.strip_prefix('#').unwrap_or(path);
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Some(Self::Dashboard),
            "/login" => Some(Self::Login),
            "/history" => Some(Self::History),
            "/new-inspection" => Some(Self::NewInspection {
                form: query.and_then(form_param),
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::NewInspection { form: Some(form) } => format!("/new-inspection?form={form}"),
            Self::NewInspection { form: None } => "/new-inspection".to_string(),
            Self::History => "/history".to_string(),
        }
    }

    pub fn requires_login(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Wizard entry context, for the new-inspection route.
    pub fn entry_context(&self) -> Option<EntryContext> {
        match self {
            Self::NewInspection { form } => Some(EntryContext {
                preselected_form: form.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn form_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "form")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up on screen.
    pub fn route(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Decide what to show for `path`.
///
/// Signed-out users only see the login screen; signed-in users are sent
/// from the login screen to the dashboard. Unknown paths go to the
/// dashboard (or to login when signed out).
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    match (Route::parse(path), authenticated) {
        (Some(Route::Login), false) => Navigation::Render(Route::Login),
        (Some(Route::Login), true) => Navigation::Redirect(Route::Dashboard),
        (Some(route), true) => Navigation::Render(route),
        (None, true) => Navigation::Redirect(Route::Dashboard),
        (_, false) => Navigation::Redirect(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("#/history"), Some(Route::History));
        assert_eq!(
            Route::parse("/new-inspection?form=6B"),
            Some(Route::new_inspection("6B"))
        );
        assert_eq!(
            Route::parse("/new-inspection?form="),
            Some(Route::NewInspection { form: None })
        );
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn guard_redirects() {
        assert_eq!(
            resolve("/history", false),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(resolve("/login", false), Navigation::Render(Route::Login));
        assert_eq!(
            resolve("/login", true),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(
            resolve("/nowhere", true),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(resolve("/nowhere", false).route(), &Route::Login);
    }

    #[test]
    fn entry_context_carries_form() {
        let route = Route::parse("/new-inspection?form=6C").unwrap();
        assert_eq!(route.entry_context(), Some(EntryContext::with_form("6C")));
        assert_eq!(route.path(), "/new-inspection?form=6C");
        assert_eq!(Route::History.entry_context(), None);
    }
}
