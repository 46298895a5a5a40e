use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tasklist::auth::{verify_password, SessionManager, SessionMiddleware, SESSION_COOKIE};
use tasklist::routes;
use tasklist::store::{CredentialStore, MemoryCredentialStore, MemoryTaskStore};
use tasklist::AppContext;

const SECRET: &[u8] = b"integration_test_secret";

fn sessions() -> SessionManager {
    SessionManager::new(SECRET, chrono::Duration::hours(1))
}

fn context(credentials: Arc<MemoryCredentialStore>) -> AppContext {
    AppContext::new(credentials, Arc::new(MemoryTaskStore::new()), sessions(), 4)
}

fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

async fn post_credentials(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    uri: &str,
    username: &str,
    password: &str,
) -> (StatusCode, Option<String>, Option<Cookie<'static>>) {
    let req = test::TestRequest::post()
        .uri(uri)
        .set_form([("username", username), ("password", password)])
        .to_request();
    let resp = test::call_service(app, req).await;
    (resp.status(), location(&resp), session_cookie(&resp))
}

#[test_log::test(actix_rt::test)]
async fn test_signup_and_login_flow() {
    let credentials = Arc::new(MemoryCredentialStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context(credentials.clone())))
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    // Signup redirects to the login form without starting a session.
    let (status, to, cookie) = post_credentials(&app, "/signup", "alice", "s3cret").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(to.as_deref(), Some("/login"));
    assert!(cookie.is_none());

    let stored = credentials.find_by_username("alice").await.unwrap();
    assert_ne!(stored.password_hash, "s3cret");
    assert!(verify_password("s3cret", &stored.password_hash).unwrap());

    // Same username again is re-prompted and adds no row.
    let (status, to, _) = post_credentials(&app, "/signup", "alice", "other").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(to.as_deref(), Some("/signup?error=taken"));
    assert_eq!(credentials.len().unwrap(), 1);

    // Login sets a cookie bound to the account.
    let (status, to, cookie) = post_credentials(&app, "/login", "alice", "s3cret").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(to.as_deref(), Some("/"));
    let cookie = cookie.expect("login should set the session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(sessions().resolve_token(cookie.value()), Some(stored.id));

    // The cookie opens the task list.
    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Your tasks"));
}

#[actix_rt::test]
async fn test_login_failures_look_the_same() {
    let credentials = Arc::new(MemoryCredentialStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context(credentials)))
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    post_credentials(&app, "/signup", "alice", "s3cret").await;

    let wrong_password = post_credentials(&app, "/login", "alice", "wrong").await;
    let unknown_user = post_credentials(&app, "/login", "nobody", "s3cret").await;

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.0, StatusCode::SEE_OTHER);
    assert_eq!(wrong_password.1.as_deref(), Some("/login?error=invalid"));
    assert!(wrong_password.2.is_none());

    let req = test::TestRequest::get()
        .uri("/login?error=invalid")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(String::from_utf8_lossy(&body).contains("Invalid username or password."));
}

#[actix_rt::test]
async fn test_signup_requires_username_and_password() {
    let credentials = Arc::new(MemoryCredentialStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context(credentials.clone())))
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    let (status, to, _) = post_credentials(&app, "/signup", "", "s3cret").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(to.as_deref(), Some("/signup?error=invalid"));
    assert!(credentials.is_empty().unwrap());

    let req = test::TestRequest::get()
        .uri("/signup?error=taken")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(String::from_utf8_lossy(&body).contains("That username is already taken."));
}

#[actix_rt::test]
async fn test_bad_session_cookies_are_anonymous() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context(Arc::new(
                MemoryCredentialStore::new(),
            ))))
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    let foreign = SessionManager::new(b"someone_else", chrono::Duration::hours(1))
        .establish(1)
        .unwrap();
    let mut tampered = sessions().establish(1).unwrap();
    tampered.set_value(format!("{}x", tampered.value()));
    let garbage = Cookie::new(SESSION_COOKIE, "garbage");

    for cookie in [foreign, tampered, garbage] {
        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/index"));
    }
}

#[actix_rt::test]
async fn test_missing_form_fields_reprompt() {
    let credentials = Arc::new(MemoryCredentialStore::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context(credentials.clone())))
            .wrap(SessionMiddleware)
            .configure(routes::config),
    )
    .await;

    post_credentials(&app, "/signup", "alice", "s3cret").await;

    let cases = [
        ("/signup", [("username", "bob")], "/signup?error=invalid"),
        ("/signup", [("password", "s3cret")], "/signup?error=invalid"),
        ("/login", [("username", "alice")], "/login?error=invalid"),
        ("/login", [("password", "s3cret")], "/login?error=invalid"),
    ];
    for (uri, form, expected) in cases {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_form(form)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{} {:?}", uri, form);
        assert_eq!(location(&resp).as_deref(), Some(expected));
        assert!(session_cookie(&resp).is_none());
    }
    assert_eq!(credentials.len().unwrap(), 1);
}
