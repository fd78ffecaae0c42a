use std::fmt;

/// Client-side routes: `/` and `/edit/:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Edit { name: String },
}

const EDIT_PREFIX: &str = "/edit/";

impl Route {
    pub fn edit(name: impl Into<String>) -> Self {
        Route::Edit { name: name.into() }
    }

    /// Everything after `/edit/` is the item name, slashes included.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "" | "/" => Some(Route::Home),
            _ => path
                .strip_prefix(EDIT_PREFIX)
                .filter(|name| !name.is_empty())
                .map(Route::edit),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Edit { name } => format!("{EDIT_PREFIX}{name}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
