//! Per-browser-session state: the uploaded résumé, its live-edited text,
//! the target job and one result slot per analysis panel.
//!
//! Sessions live in memory only and expire after a period of inactivity.

pub mod handlers;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::AnalysisKind;

/// The résumé a session is working on.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeDocument {
    pub file_name: String,
    /// Text as extracted from the upload.
    pub extracted_text: String,
    /// Text as currently shown in the live editor; this is what prompts use.
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeDocument {
    pub fn new(file_name: String, extracted_text: String) -> Self {
        Self {
            file_name,
            text: extracted_text.clone(),
            extracted_text,
            uploaded_at: Utc::now(),
        }
    }

    pub fn is_edited(&self) -> bool {
        self.text != self.extracted_text
    }
}

/// A stored model response for one panel.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    pub job_description: Option<String>,
    pub personalization: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub resume: Option<ResumeDocument>,
    pub target_job: String,
    results: BTreeMap<AnalysisKind, AnalysisResult>,
    /// Bumped on every upload; results computed against an older revision are stale.
    revision: u64,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            resume: None,
            target_job: String::new(),
            results: BTreeMap::new(),
            revision: 0,
            created_at: now,
            last_active: now,
        }
    }

    pub fn result(&self, kind: AnalysisKind) -> Option<&AnalysisResult> {
        self.results.get(&kind)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume.as_ref().map(|r| r.text.as_str())
    }

    /// Stores a panel result. General and ATS feedback share one slot in the
    /// feedback tab, so recording either clears the other.
    pub fn record(&mut self, kind: AnalysisKind, result: AnalysisResult) {
        match kind {
            AnalysisKind::General => {
                self.results.remove(&AnalysisKind::Ats);
            }
            AnalysisKind::Ats => {
                self.results.remove(&AnalysisKind::General);
            }
            _ => {}
        }
        self.results.insert(kind, result);
    }

    /// A fresh upload replaces the document and invalidates every panel.
    pub fn replace_resume(&mut self, document: ResumeDocument) {
        self.resume = Some(document);
        self.results.clear();
        self.revision += 1;
    }

    /// Live-editor update. Existing results are kept.
    /// Returns `false` when there is no résumé to edit.
    pub fn edit_resume_text(&mut self, text: String) -> bool {
        match self.resume.as_mut() {
            Some(doc) => {
                doc.text = text;
                true
            }
            None => false,
        }
    }

    pub fn set_target_job(&mut self, target_job: &str) {
        self.target_job = target_job.trim().to_string();
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active > ttl
    }
}

/// In-memory session registry shared by all handlers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> Session {
        let session = Session::new(Utc::now());
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        info!(session_id = %session.id, "Session created");
        session
    }

    /// Returns a snapshot of the session and marks it active.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.update(id, |session| session.clone()).await
    }

    /// Applies `f` to the session under the write lock and marks it active.
    /// Expired sessions are dropped and reported as missing.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        if sessions
            .get(&id)
            .is_some_and(|session| session.is_expired(now, self.ttl))
        {
            sessions.remove(&id);
            debug!(session_id = %id, "Session expired on access");
            return None;
        }

        let session = sessions.get_mut(&id)?;
        session.last_active = now;
        Some(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Drops every session idle for longer than the TTL. Returns how many were dropped.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.ttl));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Spawns a background task that purges idle sessions every `every`.
pub fn spawn_sweeper(store: SessionStore, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = store.purge_expired(Utc::now()).await;
            if purged > 0 {
                info!(
                    "Purged {purged} idle session(s), {} still active",
                    store.len().await
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> AnalysisResult {
        AnalysisResult {
            text: text.to_string(),
            job_description: None,
            personalization: None,
            generated_at: Utc::now(),
        }
    }

    fn session_with_resume() -> Session {
        let mut session = Session::new(Utc::now());
        session.replace_resume(ResumeDocument::new(
            "resume.pdf".to_string(),
            "Jane Doe".to_string(),
        ));
        session
    }

    #[test]
    fn test_general_and_ats_are_mutually_exclusive() {
        let mut session = session_with_resume();
        session.record(AnalysisKind::General, result("Resume Score: 70/100"));
        session.record(AnalysisKind::Enhance, result("rewritten"));

        session.record(AnalysisKind::Ats, result("ATS Score: 60/100"));
        assert!(session.result(AnalysisKind::General).is_none());
        assert!(session.result(AnalysisKind::Ats).is_some());
        assert!(session.result(AnalysisKind::Enhance).is_some());

        session.record(AnalysisKind::General, result("Resume Score: 72/100"));
        assert!(session.result(AnalysisKind::Ats).is_none());
        assert_eq!(
            session.result(AnalysisKind::General).unwrap().text,
            "Resume Score: 72/100"
        );
    }

    #[test]
    fn test_new_upload_clears_results() {
        let mut session = session_with_resume();
        session.record(AnalysisKind::Roadmap, result("plan"));
        session.replace_resume(ResumeDocument::new(
            "other.docx".to_string(),
            "John Roe".to_string(),
        ));
        assert!(session.result(AnalysisKind::Roadmap).is_none());
        assert_eq!(session.resume_text(), Some("John Roe"));
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_editing_keeps_results() {
        let mut session = session_with_resume();
        session.record(AnalysisKind::Opportunity, result("paths"));
        let revision = session.revision();
        assert!(session.edit_resume_text("Jane Doe, PhD".to_string()));
        assert!(session.result(AnalysisKind::Opportunity).is_some());
        assert_eq!(session.revision(), revision);
        let doc = session.resume.as_ref().unwrap();
        assert!(doc.is_edited());
        assert_eq!(doc.extracted_text, "Jane Doe");
    }

    #[test]
    fn test_edit_without_resume_is_refused() {
        let mut session = Session::new(Utc::now());
        assert!(!session.edit_resume_text("text".to_string()));
    }

    #[test]
    fn test_target_job_is_trimmed() {
        let mut session = Session::new(Utc::now());
        session.set_target_job("  Senior Python Developer \n");
        assert_eq!(session.target_job, "Senior Python Developer");
    }

    #[tokio::test]
    async fn test_store_update_and_get() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create().await.id;

        let updated = store
            .update(id, |s| {
                s.set_target_job("Data Scientist");
                s.target_job.clone()
            })
            .await;
        assert_eq!(updated.as_deref(), Some("Data Scientist"));
        assert_eq!(store.get(id).await.unwrap().target_job, "Data Scientist");
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_store_remove() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create().await.id;
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_drops_only_idle_sessions() {
        let store = SessionStore::new(Duration::minutes(30));
        let _stale = store.create().await;
        let fresh = store.create().await;

        let later = Utc::now() + Duration::minutes(31);
        store
            .inner
            .write()
            .await
            .get_mut(&fresh.id)
            .unwrap()
            .last_active = later;

        assert_eq!(store.purge_expired(later).await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.inner.read().await.contains_key(&fresh.id));
    }

    #[tokio::test]
    async fn test_expired_session_is_missing_on_access() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.create().await.id;
        store.inner.write().await.get_mut(&id).unwrap().last_active =
            Utc::now() - Duration::minutes(45);

        assert!(store.get(id).await.is_none());
        assert_eq!(store.len().await, 0);
    }
}
