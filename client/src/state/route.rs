//! Unauthenticated sub-view selector derived from the current location.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    CreateAccount,
    RecoverPassword,
    /// Any location that names none of the sub-views.
    Other,
}

impl Route {
    /// Parse a route name (`LOGIN`, `CREATE-ACCOUNT`, `RECOVER-PASSWORD`).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "LOGIN" => Self::Login,
            "CREATE-ACCOUNT" => Self::CreateAccount,
            "RECOVER-PASSWORD" => Self::RecoverPassword,
            _ => Self::Other,
        }
    }

    /// Map a URL pathname to a route. The site root opens the login view.
    #[must_use]
    pub fn from_path(pathname: &str) -> Self {
        match pathname.trim_end_matches('/') {
            "" | "/login" => Self::Login,
            "/create-account" => Self::CreateAccount,
            "/recover-password" => Self::RecoverPassword,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::CreateAccount => "CREATE-ACCOUNT",
            Self::RecoverPassword => "RECOVER-PASSWORD",
            Self::Other => "OTHER",
        }
    }

    /// Canonical pathname for links between sub-views.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login | Self::Other => "/login",
            Self::CreateAccount => "/create-account",
            Self::RecoverPassword => "/recover-password",
        }
    }
}
