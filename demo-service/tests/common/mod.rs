use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenCodec;
use chrono::Duration;
use demo_service::domain::account::errors::AccountError;
use demo_service::domain::account::models::Account;
use demo_service::domain::account::ports::AccountRepository;
use demo_service::domain::account::service::AccountService;
use demo_service::domain::dummy::errors::DummyError;
use demo_service::domain::dummy::models::Dummy;
use demo_service::domain::dummy::models::NewDummy;
use demo_service::domain::dummy::ports::DummyRepository;
use demo_service::domain::dummy::service::DummyService;
use demo_service::domain::files::service::FileService;
use demo_service::inbound::http::router::create_router;
use demo_service::inbound::http::router::AppState;
use demo_service::outbound::storage::DiskFileStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
    // Held so the upload directory outlives the server
    _upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::default()),
            Arc::clone(&authenticator),
            Duration::minutes(30),
        ));
        let dummy_service = Arc::new(DummyService::new(Arc::new(
            InMemoryDummyRepository::default(),
        )));
        let file_service = Arc::new(FileService::new(Arc::new(DiskFileStore::new(
            upload_dir.path(),
        ))));

        let state = AppState {
            account_service,
            dummy_service,
            file_service,
            s3_file_service: None,
        };

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(TEST_SECRET),
            _upload_dir: upload_dir,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account, asserting success
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let response = self
            .post("/users")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the bearer token, asserting success
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"].as_str().unwrap().to_string()
    }
}

/// In-memory account directory for tests.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        let username = account.username.as_str().to_string();
        if accounts.contains_key(&username) {
            return Err(AccountError::UsernameTaken(username));
        }

        if let Some(email) = account.email.as_ref() {
            if accounts
                .values()
                .any(|a| a.email.as_ref().map(|e| e.as_str()) == Some(email.as_str()))
            {
                return Err(AccountError::EmailTaken(email.as_str().to_string()));
            }
        }

        accounts.insert(username, account.clone());
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email.as_ref().map(|e| e.as_str()) == Some(email))
            .cloned())
    }

    async fn set_disabled(&self, username: &str, disabled: bool) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        match accounts.get_mut(username) {
            Some(account) => {
                account.disabled = disabled;
                Ok(())
            }
            None => Err(AccountError::NotFound(username.to_string())),
        }
    }
}

/// In-memory dummy table for tests.
#[derive(Default)]
pub struct InMemoryDummyRepository {
    state: Mutex<DummyTable>,
}

#[derive(Default)]
struct DummyTable {
    next_id: i64,
    rows: Vec<Dummy>,
}

#[async_trait]
impl DummyRepository for InMemoryDummyRepository {
    async fn list(&self) -> Result<Vec<Dummy>, DummyError> {
        Ok(self.state.lock().unwrap().rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Dummy>, DummyError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Dummy>, DummyError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn insert(&self, dummy: NewDummy) -> Result<Dummy, DummyError> {
        let mut state = self.state.lock().unwrap();

        state.next_id += 1;
        let dummy = Dummy {
            id: state.next_id,
            name: dummy.name,
            description: dummy.description,
            optional_field: dummy.optional_field,
        };
        state.rows.push(dummy.clone());

        Ok(dummy)
    }

    async fn update(&self, dummy: Dummy) -> Result<Dummy, DummyError> {
        let mut state = self.state.lock().unwrap();

        match state.rows.iter_mut().find(|d| d.id == dummy.id) {
            Some(row) => {
                *row = dummy.clone();
                Ok(dummy)
            }
            None => Err(DummyError::NotFound(dummy.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DummyError> {
        let mut state = self.state.lock().unwrap();

        let before = state.rows.len();
        state.rows.retain(|d| d.id != id);

        if state.rows.len() == before {
            return Err(DummyError::NotFound(id));
        }

        Ok(())
    }
}
