//! In-memory models and a cookie-carrying client for router tests

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{Duration, TimeZone, Utc};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer, SessionStore, session::Id};

use crate::{
    models::{ModelError, ModelResult, Snippet, SnippetModel, User, UserModel},
    routes::create_router,
    state::AppState,
};

#[derive(Default)]
pub struct MockSnippetModel {
    snippets: Mutex<Vec<Snippet>>,
    failing: bool,
}

impl MockSnippetModel {
    /// A model whose every call fails with a backend error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.snippets.lock().unwrap().len()
    }

    pub fn seed(&self, title: &str, content: &str) -> i64 {
        let mut snippets = self.snippets.lock().unwrap();
        let id = snippets.len() as i64 + 1;
        let created = Utc.with_ymd_and_hms(2024, 3, 17, 10, 15, 0).unwrap();
        snippets.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created,
            expires: created + Duration::days(3650),
        });
        id
    }

    fn check(&self) -> ModelResult<()> {
        if self.failing {
            return Err(ModelError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SnippetModel for MockSnippetModel {
    async fn insert(&self, title: &str, content: &str, _expires_days: i32) -> ModelResult<i64> {
        self.check()?;
        Ok(self.seed(title, content))
    }

    async fn get(&self, id: i64) -> ModelResult<Snippet> {
        self.check()?;
        self.snippets
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self) -> ModelResult<Vec<Snippet>> {
        self.check()?;
        let snippets = self.snippets.lock().unwrap();
        Ok(snippets.iter().rev().take(10).cloned().collect())
    }
}

struct MockUser {
    user: User,
    password: String,
}

/// Emails compare case-insensitively, like the `lower(email)` index
#[derive(Default)]
pub struct MockUserModel {
    users: Mutex<Vec<MockUser>>,
    last_id: AtomicI64,
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl MockUserModel {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn seed(&self, name: &str, email: &str, password: &str) -> i64 {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.users.lock().unwrap().push(MockUser {
            user: User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            },
            password: password.to_string(),
        });
        id
    }

    pub fn delete(&self, id: i64) {
        self.users.lock().unwrap().retain(|u| u.user.id != id);
    }

    pub fn password_of(&self, id: i64) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.password.clone())
    }
}

#[async_trait]
impl UserModel for MockUserModel {
    async fn insert(&self, name: &str, email: &str, password: &str) -> ModelResult<()> {
        if self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| same_email(&u.user.email, email))
        {
            return Err(ModelError::DuplicateEmail);
        }
        self.seed(name, email, password);
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| same_email(&u.user.email, email) && u.password == password)
            .map(|u| u.user.id)
            .ok_or(ModelError::InvalidCredentials)
    }

    async fn exists(&self, id: i64) -> ModelResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.user.id == id))
    }

    async fn get(&self, id: i64) -> ModelResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone())
            .ok_or(ModelError::NoRecord)
    }

    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ModelResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(ModelError::NoRecord)?;

        if user.password != current_password {
            return Err(ModelError::InvalidCredentials);
        }
        user.password = new_password.to_string();
        Ok(())
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Router over in-memory models that replays the session cookie like a browser
pub struct TestApp {
    router: Router,
    pub snippets: Arc<MockSnippetModel>,
    pub users: Arc<MockUserModel>,
    store: MemoryStore,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_snippets(MockSnippetModel::default())
    }

    pub fn with_snippets(snippets: MockSnippetModel) -> Self {
        let snippets = Arc::new(snippets);
        let users = Arc::new(MockUserModel::default());
        let state = AppState {
            snippets: snippets.clone(),
            users: users.clone(),
        };
        let store = MemoryStore::default();
        let sessions = SessionManagerLayer::new(store.clone()).with_secure(false);

        Self {
            router: create_router(state, sessions),
            snippets,
            users,
            store,
            cookie: None,
        }
    }

    /// The `id=<session id>` pair the next request will send
    pub fn cookie(&self) -> Option<String> {
        self.cookie.clone()
    }

    pub fn set_cookie(&mut self, cookie: Option<String>) {
        self.cookie = cookie;
    }

    /// Whether the store still holds a record for an `id=<session id>` cookie
    pub async fn session_exists(&self, cookie: &str) -> bool {
        let value = cookie.strip_prefix("id=").unwrap_or(cookie);
        let id: Id = value.parse().expect("Failed to parse session id");
        self.store
            .load(&id)
            .await
            .expect("Failed to load session")
            .is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    /// Log in as a freshly seeded user, returning its id
    pub async fn login_as(&mut self, email: &str, password: &str) -> i64 {
        let id = self.users.seed("Test User", email, password);
        let response = self
            .post_form(
                "/user/login",
                &form(&[("email", email), ("password", password)]),
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        id
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }

        let request = builder
            .body(Body::from(body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            self.cookie = match pair.split_once('=') {
                Some((_, value)) if !value.is_empty() => Some(pair.to_string()),
                _ => None,
            };
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Encode a request body as `application/x-www-form-urlencoded`
pub fn form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("Failed to encode form")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ids_are_not_reused_after_delete() {
        let users = MockUserModel::default();
        let first = users.seed("Alice", "alice@example.com", "pa$$word");
        let second = users.seed("Bob", "bob@example.com", "pa$$word");
        users.delete(first);

        let third = users.seed("Carol", "carol@example.com", "pa$$word");

        assert_ne!(third, first);
        assert_ne!(third, second);
        assert_eq!(users.count(), 2);
    }

    #[test]
    fn test_form_encodes_reserved_characters() {
        assert_eq!(
            form(&[("email", "a+b@example.com"), ("password", "p&ss=w%rd #1")]),
            "email=a%2Bb%40example.com&password=p%26ss%3Dw%25rd+%231"
        );
    }
}
