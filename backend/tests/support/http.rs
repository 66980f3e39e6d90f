//! HTTP wiring for integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use fresque::Trace;
use fresque::domain::ports::FixtureLoginService;
use fresque::domain::{PackageCatalogueService, PackageSubmissionService, UserActivityService};
use fresque::inbound::http::state::HttpState;
use fresque::inbound::http::{packages, users};

use super::in_memory::{FrozenClock, InMemoryStore};

/// Real services over the in-memory store, with submissions stamped `now`.
pub fn state_over(store: &InMemoryStore, now: DateTime<Utc>) -> HttpState {
    let repo = Arc::new(store.clone());
    HttpState::new(
        Arc::new(PackageCatalogueService::new(repo.clone(), repo.clone())),
        Arc::new(PackageSubmissionService::new(
            repo.clone(),
            repo.clone(),
            Arc::new(FrozenClock(now)),
        )),
        Arc::new(UserActivityService::new(repo.clone(), repo)),
        Arc::new(FixtureLoginService),
    )
}

pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new().app_data(web::Data::new(state)).wrap(Trace).service(
        web::scope("/api/v1")
            .wrap(session)
            .service(users::login)
            .service(users::logout)
            .service(users::user_packages)
            .service(users::user_reviews)
            .service(packages::index)
            .service(packages::list_packages)
            .service(packages::new_package_form)
            .service(packages::submit_package)
            .service(packages::get_package),
    )
}

fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Log in as the fixture account and open the submission form.
///
/// Returns the session cookie carrying the CSRF token, and the token.
pub async fn logged_in_form<S, B>(app: &S) -> (Cookie<'static>, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let login = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "admin", "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(login.status().is_success(), "fixture login succeeds");

    let form = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/packages/new")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert!(form.status().is_success(), "form opens");
    let cookie = session_cookie(&form);
    let body: Value = test::read_body_json(form).await;
    let token = body["csrfToken"].as_str().expect("csrf token").to_owned();
    (cookie, token)
}

/// GET `uri` and decode the JSON body.
pub async fn get_json<S, B>(app: &S, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    assert!(response.status().is_success(), "GET {uri} succeeds");
    test::read_body_json(response).await
}
