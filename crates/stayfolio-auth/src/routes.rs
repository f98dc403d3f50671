//! View routes

use stayfolio_types::ApartmentId;

use crate::{HOME_PATH, LOGIN_PATH};

/// A navigable view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/login`
    Login,
    /// `/apartments` (also what `/` resolves to)
    ApartmentList,
    /// `/apartments/new`
    ApartmentCreate,
    /// `/apartments/{id}`
    ApartmentDetails(ApartmentId),
    /// `/apartments/{id}/edit`
    ApartmentEdit(ApartmentId),
}

impl Route {
    /// Parse a path. Query strings, fragments and trailing slashes are
    /// ignored. Returns `None` for paths that match no view.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["apartments"] => Some(Self::ApartmentList),
            ["login"] => Some(Self::Login),
            ["apartments", "new"] => Some(Self::ApartmentCreate),
            ["apartments", id] => ApartmentId::parse(id).ok().map(Self::ApartmentDetails),
            ["apartments", id, "edit"] => ApartmentId::parse(id).ok().map(Self::ApartmentEdit),
            _ => None,
        }
    }

    /// Canonical path of this view
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::ApartmentList => HOME_PATH.to_string(),
            Self::ApartmentCreate => format!("{HOME_PATH}/new"),
            Self::ApartmentDetails(id) => format!("{HOME_PATH}/{id}"),
            Self::ApartmentEdit(id) => format!("{HOME_PATH}/{id}/edit"),
        }
    }

    /// Whether entering this view requires a session
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::ApartmentCreate | Self::ApartmentEdit(_))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ApartmentId {
        ApartmentId::parse(s).unwrap()
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::ApartmentList));
        assert_eq!(Route::parse("/apartments/"), Some(Route::ApartmentList));
        assert_eq!(Route::parse("/login?next=1"), Some(Route::Login));
        assert_eq!(Route::parse("/apartments/new"), Some(Route::ApartmentCreate));
        assert_eq!(
            Route::parse("/apartments/abc-1"),
            Some(Route::ApartmentDetails(id("abc-1")))
        );
        assert_eq!(
            Route::parse("/apartments/abc-1/edit#top"),
            Some(Route::ApartmentEdit(id("abc-1")))
        );
        assert_eq!(Route::parse("/apartments/abc-1/photos"), None);
        assert_eq!(Route::parse("/billing"), None);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [
            Route::Login,
            Route::ApartmentList,
            Route::ApartmentCreate,
            Route::ApartmentDetails(id("9")),
            Route::ApartmentEdit(id("9")),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::ApartmentCreate.is_protected());
        assert!(Route::ApartmentEdit(id("1")).is_protected());
        assert!(!Route::ApartmentDetails(id("1")).is_protected());
        assert!(!Route::ApartmentList.is_protected());
        assert!(!Route::Login.is_protected());
    }
}
