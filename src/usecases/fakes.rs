//! In-memory port implementations for use-case tests.

use crate::domain::{CalendarEvent, DomainError, EmailRecord, NewEvent};
use crate::ports::{CalendarPort, ChatExcerptPort, GeneratorPort, MailArchivePort, MailPort};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

/// Replays scripted answers in order; repeats `default` once the script is exhausted.
pub struct FakeGenerator {
    script: Mutex<VecDeque<Result<String, String>>>,
    default: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn answering(default: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: default.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, answer: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(answer.to_string()));
        self
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GeneratorPort for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(answer)) => Ok(answer),
            Some(Err(message)) => Err(DomainError::Generator(message)),
            None => Ok(self.default.clone()),
        }
    }
}

pub fn email(i: usize) -> EmailRecord {
    EmailRecord {
        id: format!("m{}", i),
        subject: format!("Subject {}", i),
        sender: format!("sender{}@example.com", i),
        date: "Fri, 1 Aug 2025 10:00:00 +0000".to_string(),
        body: format!("Body {}", i),
        snippet: format!("Snippet {}", i),
    }
}

#[derive(Default)]
pub struct FakeMail {
    pub records: Vec<EmailRecord>,
    pub fail_with: Option<String>,
    pub send_result: bool,
    pub list_calls: Mutex<Vec<(u32, Option<String>)>>,
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl FakeMail {
    pub fn with_records(n: usize) -> Self {
        Self {
            records: (1..=n).map(email).collect(),
            send_result: true,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> Vec<(u32, Option<String>)> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MailPort for FakeMail {
    async fn list(
        &self,
        max_results: u32,
        query: Option<&str>,
    ) -> Result<Vec<EmailRecord>, DomainError> {
        self.list_calls
            .lock()
            .unwrap()
            .push((max_results, query.map(String::from)));
        if let Some(message) = &self.fail_with {
            return Err(DomainError::Mail(message.clone()));
        }
        Ok(self
            .records
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<bool, DomainError> {
        if let Some(message) = &self.fail_with {
            return Err(DomainError::Mail(message.clone()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(self.send_result)
    }
}

#[derive(Default)]
pub struct FakeArchive {
    pub fail: bool,
    pub written: Mutex<Vec<(usize, Option<String>)>>,
}

impl FakeArchive {
    pub fn written(&self) -> Vec<(usize, Option<String>)> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MailArchivePort for FakeArchive {
    async fn archive(
        &self,
        records: &[EmailRecord],
        filename: Option<&str>,
    ) -> Result<PathBuf, DomainError> {
        if self.fail {
            return Err(DomainError::Archive("disk full".to_string()));
        }
        self.written
            .lock()
            .unwrap()
            .push((records.len(), filename.map(String::from)));
        Ok(PathBuf::from("emails").join(filename.unwrap_or("emails_test.md")))
    }
}

#[derive(Default)]
pub struct FakeCalendar {
    pub today: Vec<CalendarEvent>,
    pub fail_with: Option<String>,
    pub created: Mutex<Vec<NewEvent>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeCalendar {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, call: &'static str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(DomainError::Calendar(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl CalendarPort for FakeCalendar {
    async fn list_today(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        self.check("list_today")?;
        Ok(self.today.clone())
    }

    async fn list_yesterday(&self) -> Result<Vec<CalendarEvent>, DomainError> {
        self.check("list_yesterday")?;
        Ok(Vec::new())
    }

    async fn create(&self, event: &NewEvent) -> Result<CalendarEvent, DomainError> {
        self.check("create")?;
        self.created.lock().unwrap().push(event.clone());
        Ok(CalendarEvent {
            id: "created-1".to_string(),
            summary: event.summary.clone(),
            start: event.start.to_rfc3339(),
            end: event.end.to_rfc3339(),
            location: None,
            description: None,
            attendees: event.attendees.clone(),
        })
    }

    async fn delete(&self, _event_id: &str) -> Result<bool, DomainError> {
        self.check("delete")?;
        Ok(true)
    }
}

#[derive(Default)]
pub struct FakeChats {
    pub excerpts: HashMap<String, String>,
    pub requests: Mutex<Vec<(String, usize)>>,
}

impl FakeChats {
    pub fn with(contact: &str, excerpt: &str) -> Self {
        let mut excerpts = HashMap::new();
        excerpts.insert(contact.to_string(), excerpt.to_string());
        Self {
            excerpts,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ChatExcerptPort for FakeChats {
    async fn excerpt(
        &self,
        contact: &str,
        max_messages: usize,
    ) -> Result<Option<String>, DomainError> {
        self.requests
            .lock()
            .unwrap()
            .push((contact.to_string(), max_messages));
        Ok(self.excerpts.get(contact).cloned())
    }
}
