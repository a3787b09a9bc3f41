use crate::model::Role;
use crate::session::SessionState;

/// The five screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Admin,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Admin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Admin => "/admin",
        }
    }

    /// Parse a path. A single trailing slash is tolerated; anything unknown is `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Screens anyone may see. Signed-in users are bounced off them.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Landing | Self::Login | Self::Register)
    }

    /// Home screen for a signed-in role.
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::Admin,
            Role::User => Route::Dashboard,
            Role::Anonymous => Route::Landing,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of asking the gate for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Session not yet known; show the loading screen.
    Loading,
    Render(Route),
    Redirect(Route),
}

/// Role-based route guard. Pure: it only reads the session state.
///
/// This is navigation convenience. The backend enforces access on every call.
pub struct Gate;

impl Gate {
    const MAX_HOPS: usize = 2;

    pub fn resolve(state: &SessionState, route: Route) -> Resolution {
        let Some(role) = state.role() else {
            return Resolution::Loading;
        };

        match (role, route) {
            (Role::Anonymous, r) if r.is_public() => Resolution::Render(r),
            (Role::Anonymous, _) => Resolution::Redirect(Route::Login),

            (role, r) if r.is_public() => Resolution::Redirect(Route::home_for(role)),

            (Role::User, Route::Dashboard) | (Role::Admin, Route::Admin) => {
                Resolution::Render(route)
            }
            // Wrong protected area for this role: back to login, which then
            // forwards to the role's home.
            _ => Resolution::Redirect(Route::Login),
        }
    }

    /// Follow redirects until a route renders. `Loading` passes through.
    pub fn settle(state: &SessionState, route: Route) -> Resolution {
        let mut current = route;
        for _ in 0..=Self::MAX_HOPS {
            match Self::resolve(state, current) {
                Resolution::Redirect(next) => current = next,
                other => return other,
            }
        }
        tracing::warn!(from = %route, to = %current, "redirect chain did not settle");
        Resolution::Render(current)
    }
}
