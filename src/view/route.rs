//! Navigation targets and the user-facing collaborators of the edit view.

/// Pages the edit view can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Directory listing (back link and cancel)
    Listing,
    /// Detail page of one student
    Detail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Detail(id) => format!("/students/{}", urlencoding::encode(id)),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Client-side router.
pub trait Navigator: Send {
    fn push(&self, route: Route);
}

/// Blocking notification shown to the user.
pub trait Notifier: Send {
    fn alert(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Listing.path(), "/");
        assert_eq!(Route::Detail("s1".to_string()).path(), "/students/s1");
    }

    #[test]
    fn test_detail_path_escapes_id() {
        assert_eq!(
            Route::Detail("a/b?c".to_string()).path(),
            "/students/a%2Fb%3Fc"
        );
    }
}
