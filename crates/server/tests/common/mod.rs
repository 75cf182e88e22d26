//! Shared harness: a full router over a throwaway SQLite file

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bloglist_server::config::{AppState, ServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn is_json(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"))
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::new(SECRET);
        config.database_url = format!("sqlite://{}", dir.path().join("bloglist.sqlite").display());
        config.bcrypt_cost = 4;
        configure(&mut config);

        let state = bloglist_server::build_state(config).await.unwrap();
        let app = bloglist_server::router(state.clone());

        Self {
            app,
            state,
            _dir: dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn create_user(&self, username: &str, name: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "username": username, "name": name, "password": password })),
        )
        .await
    }

    /// Register `username` and return a login token for it
    pub async fn user_token(&self, username: &str, password: &str) -> String {
        let created = self.create_user(username, "Test User", password).await;
        assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
        self.login(username, password).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_blog(&self, token: &str, blog: Value) -> TestResponse {
        self.request(Method::POST, "/api/blogs", Some(token), Some(blog))
            .await
    }

    pub async fn blogs(&self) -> Vec<Value> {
        self.get("/api/blogs").await.body.as_array().unwrap().clone()
    }
}

pub fn initial_blogs() -> Vec<Value> {
    vec![
        json!({
            "title": "React patterns",
            "author": "Michael Chan",
            "url": "https://reactpatterns.com/",
            "likes": 7,
        }),
        json!({
            "title": "Go To Statement Considered Harmful",
            "author": "Edsger W. Dijkstra",
            "url": "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
            "likes": 5,
        }),
        json!({
            "title": "Canonical string reduction",
            "author": "Edsger W. Dijkstra",
            "url": "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
            "likes": 12,
        }),
        json!({
            "title": "First class tests",
            "author": "Robert C. Martin",
            "url": "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll",
            "likes": 10,
        }),
        json!({
            "title": "TDD harms architecture",
            "author": "Robert C. Martin",
            "url": "http://blog.cleancoder.com/uncle-bob/2017/03/03/TDD-Harms-Architecture.html",
            "likes": 0,
        }),
        json!({
            "title": "Type wars",
            "author": "Robert C. Martin",
            "url": "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html",
            "likes": 2,
        }),
    ]
}

/// App with `root` registered and the initial blogs saved under it
pub async fn seeded() -> (TestApp, String) {
    let app = TestApp::spawn().await;
    let token = app.user_token("root", "sekret").await;
    for blog in initial_blogs() {
        let response = app.create_blog(&token, blog).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }
    (app, token)
}
