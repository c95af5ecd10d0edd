//! Route table
//!
//! Static `(method, pattern) -> handler` bindings, built once at startup.

use hyper::Method;

use super::matcher::{PathParams, PathPattern};

pub const ROOT: &str = "/";
pub const GET_SCRIPT: &str = "/cdn/:domain/:cdnPath";
pub const GET_SCREENSHOT: &str = "/screenshot/:domain/:cdnPath";
pub const DOWNLOAD_SCRIPT: &str = "/download/:domain/:cdnPath";
pub const ADD_SCRIPT: &str = "/add-script/:domain/:cdnPath";
pub const ADD_SCREENSHOT: &str = "/add-screenshot/:domain/:cdnPath";
pub const DETECT_IMAGE: &str = "/detect-image";
pub const GET_REPORT: &str = "/report";

/// Handler a route dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Root,
    GetScript,
    GetScreenshot,
    DownloadScript,
    AddScript,
    AddScreenshot,
    DetectImage,
    GetReport,
}

/// One binding of the table
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub kind: RouteKind,
}

/// Result of resolving a request against the table
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch {
    Found { kind: RouteKind, params: PathParams },
    /// The path exists under other methods
    MethodNotAllowed { allow: Vec<Method> },
    NotFound,
}

/// Immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The server's route bindings
    pub fn new() -> Self {
        Self::from_routes(vec![
            route(Method::GET, ROOT, RouteKind::Root),
            route(Method::GET, GET_SCRIPT, RouteKind::GetScript),
            route(Method::GET, GET_SCREENSHOT, RouteKind::GetScreenshot),
            route(Method::GET, DOWNLOAD_SCRIPT, RouteKind::DownloadScript),
            route(Method::POST, ADD_SCRIPT, RouteKind::AddScript),
            route(Method::POST, ADD_SCREENSHOT, RouteKind::AddScreenshot),
            route(Method::POST, DETECT_IMAGE, RouteKind::DetectImage),
            route(Method::GET, GET_REPORT, RouteKind::GetReport),
        ])
    }

    pub const fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a request; `HEAD` resolves like `GET`
    pub fn resolve(&self, method: &Method, path: &str) -> RouteMatch {
        let lookup = if method == Method::HEAD {
            &Method::GET
        } else {
            method
        };

        let mut allow = Vec::new();
        for route in &self.routes {
            let Some(params) = route.pattern.match_path(path) else {
                continue;
            };
            if route.method == *lookup {
                return RouteMatch::Found {
                    kind: route.kind,
                    params,
                };
            }
            if !allow.contains(&route.method) {
                allow.push(route.method.clone());
            }
        }

        if allow.is_empty() {
            RouteMatch::NotFound
        } else {
            if allow.contains(&Method::GET) {
                allow.push(Method::HEAD);
            }
            allow.push(Method::OPTIONS);
            RouteMatch::MethodNotAllowed { allow }
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

fn route(method: Method, pattern: &'static str, kind: RouteKind) -> Route {
    Route {
        method,
        pattern: PathPattern::parse(pattern),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(table: &RouteTable, method: &Method, path: &str) -> Option<(RouteKind, PathParams)> {
        match table.resolve(method, path) {
            RouteMatch::Found { kind, params } => Some((kind, params)),
            _ => None,
        }
    }

    #[test]
    fn test_asset_routes() {
        let table = RouteTable::new();

        let (kind, params) = found(&table, &Method::GET, "/cdn/example.com/fix.js").unwrap();
        assert_eq!(kind, RouteKind::GetScript);
        assert_eq!(params.get("domain"), Some("example.com"));

        let (kind, params) =
            found(&table, &Method::GET, "/screenshot/example.com/shot1.png").unwrap();
        assert_eq!(kind, RouteKind::GetScreenshot);
        assert_eq!(params.get("cdnPath"), Some("shot1.png"));

        let (kind, _) = found(&table, &Method::GET, "/download/example.com/fix.js").unwrap();
        assert_eq!(kind, RouteKind::DownloadScript);
    }

    #[test]
    fn test_upload_routes_are_post_only() {
        let table = RouteTable::new();

        let (kind, _) = found(&table, &Method::POST, "/add-script/example.com/fix.js").unwrap();
        assert_eq!(kind, RouteKind::AddScript);
        let (kind, _) =
            found(&table, &Method::POST, "/add-screenshot/example.com/a.png").unwrap();
        assert_eq!(kind, RouteKind::AddScreenshot);

        assert_eq!(
            table.resolve(&Method::GET, "/add-script/example.com/fix.js"),
            RouteMatch::MethodNotAllowed {
                allow: vec![Method::POST, Method::OPTIONS]
            }
        );
    }

    #[test]
    fn test_head_resolves_like_get() {
        let table = RouteTable::new();
        let (kind, _) = found(&table, &Method::HEAD, "/").unwrap();
        assert_eq!(kind, RouteKind::Root);
    }

    #[test]
    fn test_method_not_allowed_lists_get_and_head() {
        let table = RouteTable::new();
        assert_eq!(
            table.resolve(&Method::DELETE, "/cdn/example.com/fix.js"),
            RouteMatch::MethodNotAllowed {
                allow: vec![Method::GET, Method::HEAD, Method::OPTIONS]
            }
        );
    }

    #[test]
    fn test_unknown_path() {
        let table = RouteTable::new();
        assert_eq!(table.resolve(&Method::GET, "/nope"), RouteMatch::NotFound);
        assert_eq!(
            table.resolve(&Method::GET, "/cdn/example.com"),
            RouteMatch::NotFound
        );
    }

    #[test]
    fn test_table_shape() {
        let table = RouteTable::new();
        let bindings: Vec<_> = table
            .routes()
            .iter()
            .map(|r| (r.method.as_str(), r.pattern.as_str()))
            .collect();
        assert!(bindings.contains(&("GET", ROOT)));
        assert!(bindings.contains(&("POST", ADD_SCREENSHOT)));
        assert_eq!(bindings.len(), 8);
    }
}
