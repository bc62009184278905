use crate::err::RouteError;
use crate::redirect::Redirect;
use crate::table::RedirectTable;
use http::header::{HeaderValue, ALLOW, LOCATION};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Empty;
use hyper::body::Bytes;

pub struct State {
    router: matchit::Router<Redirect>,
}

impl State {
    pub fn new(table: &RedirectTable) -> Result<Self, RouteError> {
        let mut router = matchit::Router::new();
        for (path, template) in table.iter() {
            if HeaderValue::from_str(template).is_err() {
                return Err(RouteError::InvalidTemplate(template.to_string()));
            }
            let redirect = Redirect::new(path, template);
            let route = redirect.route()?;
            log::debug!("Registering {} as {}", path, route);
            router
                .insert(route, redirect)
                .map_err(|source| RouteError::Insert {
                    path: path.to_string(),
                    source,
                })?;
        }
        Ok(Self { router })
    }
}

pub async fn respond_to_request<B>(req: Request<B>, state: &State) -> Response<Empty<Bytes>> {
    let resp = dispatch(&req, state);
    log::info!("{} {} -> {}", req.method(), req.uri(), resp.status());
    resp
}

fn dispatch<B>(req: &Request<B>, state: &State) -> Response<Empty<Bytes>> {
    let path = req.uri().path();

    let matched = match state.router.at(path) {
        Ok(matched) => matched,
        Err(_) => {
            log::debug!("{} -> [no match]", path);
            return with_status(StatusCode::NOT_FOUND);
        }
    };

    log::trace!("{} matched {}", path, matched.value.pattern());

    if req.method() != Method::GET {
        let mut resp = with_status(StatusCode::METHOD_NOT_ALLOWED);
        resp.headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET"));
        return resp;
    }

    let location = matched
        .value
        .location(|name| matched.params.get(name), req.uri().query());

    moved_permanently(path, location)
}

fn moved_permanently(path: &str, location: String) -> Response<Empty<Bytes>> {
    match HeaderValue::try_from(&location) {
        Ok(value) => {
            log::info!("Redirecting {} -> {}", path, location);
            let mut resp = with_status(StatusCode::MOVED_PERMANENTLY);
            resp.headers_mut().insert(LOCATION, value);
            resp
        }
        Err(e) => {
            log::warn!("{} -> [invalid location] {:?} : {}", path, location, e);
            with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn with_status(status: StatusCode) -> Response<Empty<Bytes>> {
    let mut resp = Response::new(Empty::new());
    *resp.status_mut() = status;
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(base: &str, mappings: &[&str]) -> State {
        let mappings = mappings.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        State::new(&RedirectTable::build(base, &mappings)).unwrap()
    }

    async fn get(state: &State, uri: &str) -> Response<Empty<Bytes>> {
        let req = Request::get(uri).body(()).unwrap();
        respond_to_request(req, state).await
    }

    fn location<B>(resp: &Response<B>) -> &str {
        resp.headers()[LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn redirects_with_param() {
        let state = state(
            "https://example.com",
            &["/path/:user", "/redirectTo/:user"],
        );

        let resp = get(&state, "/path/alice").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&resp), "https://example.com/redirectTo/alice");

        let resp = get(&state, "/path/alice?x=1").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&resp), "https://example.com/redirectTo/alice?x=1");
    }

    #[tokio::test]
    async fn redirects_static_path() {
        let state = state("https://example.com", &["/old", "/new", "/a/:x", "/b/:x"]);

        let resp = get(&state, "/old").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&resp), "https://example.com/new");

        let resp = get(&state, "/old?a=1&b=2").await;
        assert_eq!(location(&resp), "https://example.com/new?a=1&b=2");
    }

    #[tokio::test]
    async fn appends_query_to_template_query() {
        let state = state("https://example.com", &["/go", "/landing?src=go"]);

        let resp = get(&state, "/go?x=1").await;
        assert_eq!(location(&resp), "https://example.com/landing?src=go&x=1");
    }

    #[tokio::test]
    async fn multiple_params() {
        let state = state("http://h", &["/u/:org/:repo", "/:repo/of/:org"]);

        let resp = get(&state, "/u/rust-lang/cargo").await;
        assert_eq!(location(&resp), "http://h/cargo/of/rust-lang");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let state = state("http://h", &["/path/:user", "/to/:user"]);

        assert_eq!(get(&state, "/nope").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&state, "/path").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get(&state, "/path/a/b").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn only_get_is_allowed() {
        let state = state("http://h", &["/a", "/b"]);

        let req = Request::post("/a").body(()).unwrap();
        let resp = respond_to_request(req, &state).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET");
        assert!(resp.headers().get(LOCATION).is_none());
    }

    #[tokio::test]
    async fn trailing_wildcard_matches_subpaths() {
        let state = state("http://h", &["/docs/*", "/manual", "/u/:id/*", "/users/:id"]);

        for uri in ["/docs/intro", "/docs/a/b/c"] {
            let resp = get(&state, uri).await;
            assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY, "{}", uri);
            assert_eq!(location(&resp), "http://h/manual");
        }

        let resp = get(&state, "/u/7/posts/1?x=1").await;
        assert_eq!(location(&resp), "http://h/users/7?x=1");

        assert_eq!(get(&state, "/doc/intro").await.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn misplaced_wildcard_rejected() {
        let mappings = ["/docs/*/more", "/b"].map(String::from);
        let table = RedirectTable::build("http://h", &mappings);
        assert!(matches!(
            State::new(&table),
            Err(RouteError::MisplacedWildcard(_))
        ));
    }

    #[test]
    fn unrepresentable_location_is_server_error() {
        let resp = moved_permanently("/a", "http://h/\n".to_string());
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(LOCATION).is_none());

        let resp = moved_permanently("/a", "http://h/b".to_string());
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location(&resp), "http://h/b");
    }

    #[test]
    fn conflicting_patterns_rejected() {
        let mappings = ["/a/:x", "/1", "/a/:y", "/2"].map(String::from);
        let table = RedirectTable::build("http://h", &mappings);
        assert!(matches!(
            State::new(&table),
            Err(RouteError::Insert { path, .. }) if path == "/a/:y"
        ));
    }

    #[test]
    fn unnamed_param_rejected() {
        let mappings = ["/a/:", "/b"].map(String::from);
        let table = RedirectTable::build("http://h", &mappings);
        assert!(matches!(
            State::new(&table),
            Err(RouteError::UnnamedParam(_))
        ));
    }

    #[test]
    fn invalid_template_rejected() {
        let mappings = ["/a", "/b\n"].map(String::from);
        let table = RedirectTable::build("http://h", &mappings);
        assert!(matches!(
            State::new(&table),
            Err(RouteError::InvalidTemplate(t)) if t == "http://h/b\n"
        ));
    }
}
