//! Fakes and fixtures shared by unit and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::export::{PdfError, PdfRenderer};
use crate::llm_client::{LlmError, TextGenerator};
use crate::media::{ImageHost, MediaError};
use crate::models::resume::{Resume, ResumeContent};
use crate::models::user::User;
use crate::state::AppState;
use crate::store::MemoryStore;

/// Text generator that returns a canned reply and counts calls.
pub struct FakeGenerator {
    reply: Result<String, ()>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(LlmError::RateLimited),
        }
    }
}

/// PDF renderer that either echoes a fixed document or fails like a crashed browser.
pub struct FakePdf {
    fail: bool,
}

impl FakePdf {
    pub const DOCUMENT: &'static [u8] = b"%PDF-1.7 fake";

    pub fn working() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl PdfRenderer for FakePdf {
    async fn render(&self, _html: &str) -> Result<Vec<u8>, PdfError> {
        if self.fail {
            return Err(PdfError::Browser {
                status: "exit status: 1".into(),
                stderr: "crashed".into(),
            });
        }
        Ok(Self::DOCUMENT.to_vec())
    }
}

/// Image host that remembers stored keys and serves them from a fixed base URL.
#[derive(Default)]
pub struct FakeImageHost {
    keys: Mutex<Vec<String>>,
}

impl FakeImageHost {
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn put(&self, key: &str, _content_type: &str, _body: Bytes) -> Result<String, MediaError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://cdn.test/{key}"))
    }
}

pub fn sample_user(fullname: &str) -> User {
    User {
        id: Uuid::new_v4(),
        fullname: fullname.to_string(),
        email: format!("{}@example.com", fullname.to_lowercase().replace(' ', ".")),
        profile_picture: None,
        portfolio_slug: None,
        created_at: Utc::now(),
    }
}

pub fn sample_resume(owner: Uuid, content: ResumeContent) -> Resume {
    let now = Utc::now();
    Resume {
        id: Uuid::new_v4(),
        user_id: owner,
        resume_name: "Sample".to_string(),
        template_name: "template1".to_string(),
        content,
        created_at: now,
        last_modified: now,
    }
}

/// Application state over one shared in-memory store.
pub fn app_state(store: Arc<MemoryStore>, llm: FakeGenerator, pdf: FakePdf) -> AppState {
    AppState {
        resumes: store.clone(),
        personas: store.clone(),
        portfolios: store.clone(),
        users: store,
        llm: Arc::new(llm),
        pdf: Arc::new(pdf),
        images: Arc::new(FakeImageHost::default()),
    }
}
