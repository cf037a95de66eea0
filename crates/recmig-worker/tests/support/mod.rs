//! In-memory provider and store fakes for pipeline tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use recmig_models::{DestinationKey, RecordingItem, RecordingSid};
use recmig_storage::{ObjectStore, StorageError, StorageResult};
use recmig_twilio::{RecordingSource, TwilioError, TwilioResult};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn recording(sid: &str, call_sid: &str, day: NaiveDate) -> RecordingItem {
    RecordingItem::new(
        sid,
        call_sid,
        format!("/2010-04-01/Accounts/AC1/Recordings/{}.json", sid),
        day,
    )
}

/// Calls observed by the fake provider, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    List(NaiveDate),
    Fetch(String),
    Delete(String),
}

/// Fake provider with scripted failures.
#[derive(Default)]
pub struct FakeSource {
    listings: Mutex<HashMap<NaiveDate, Vec<RecordingItem>>>,
    failing_listings: Mutex<Vec<NaiveDate>>,
    /// Number of leading fetch failures per recording (`usize::MAX` = always).
    fetch_failures: Mutex<HashMap<String, usize>>,
    /// Number of leading delete failures per recording.
    delete_failures: Mutex<HashMap<String, usize>>,
    /// Simulated fetch latency per recording.
    fetch_latency: Mutex<HashMap<String, Duration>>,
    events: Mutex<Vec<Event>>,
    fetch_calls: Mutex<HashMap<String, usize>>,
    delete_calls: Mutex<HashMap<String, usize>>,
    active_fetches: AtomicUsize,
    peak_fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(self, day: NaiveDate, items: Vec<RecordingItem>) -> Self {
        self.listings.lock().unwrap().insert(day, items);
        self
    }

    pub fn with_failing_listing(self, day: NaiveDate) -> Self {
        self.failing_listings.lock().unwrap().push(day);
        self
    }

    pub fn with_fetch_failures(self, sid: &str, failures: usize) -> Self {
        self.fetch_failures
            .lock()
            .unwrap()
            .insert(sid.to_string(), failures);
        self
    }

    pub fn with_delete_failures(self, sid: &str, failures: usize) -> Self {
        self.delete_failures
            .lock()
            .unwrap()
            .insert(sid.to_string(), failures);
        self
    }

    pub fn with_fetch_latency(self, sid: &str, latency: Duration) -> Self {
        self.fetch_latency
            .lock()
            .unwrap()
            .insert(sid.to_string(), latency);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn listed_dates(&self) -> Vec<NaiveDate> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::List(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn fetch_calls(&self, sid: &str) -> usize {
        self.fetch_calls.lock().unwrap().get(sid).copied().unwrap_or(0)
    }

    pub fn delete_calls(&self, sid: &str) -> usize {
        self.delete_calls.lock().unwrap().get(sid).copied().unwrap_or(0)
    }

    pub fn total_delete_calls(&self) -> usize {
        self.delete_calls.lock().unwrap().values().sum()
    }

    pub fn peak_concurrent_fetches(&self) -> usize {
        self.peak_fetches.load(Ordering::SeqCst)
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn bump(calls: &Mutex<HashMap<String, usize>>, sid: &str) -> usize {
        let mut calls = calls.lock().unwrap();
        let count = calls.entry(sid.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn should_fail(failures: &Mutex<HashMap<String, usize>>, sid: &str, call: usize) -> bool {
        failures
            .lock()
            .unwrap()
            .get(sid)
            .map(|n| call <= *n)
            .unwrap_or(false)
    }
}

#[async_trait]
impl RecordingSource for FakeSource {
    async fn list_recordings(&self, date: NaiveDate) -> TwilioResult<Vec<RecordingItem>> {
        self.record(Event::List(date));
        tokio::task::yield_now().await;

        if self.failing_listings.lock().unwrap().contains(&date) {
            return Err(TwilioError::from_http_status(503, "Service Unavailable"));
        }

        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_media(&self, item: &RecordingItem) -> TwilioResult<Vec<u8>> {
        let sid = item.sid.as_str();
        self.record(Event::Fetch(sid.to_string()));
        let call = Self::bump(&self.fetch_calls, sid);

        let now = self.active_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_fetches.fetch_max(now, Ordering::SeqCst);

        let latency = self
            .fetch_latency
            .lock()
            .unwrap()
            .get(sid)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(latency).await;

        self.active_fetches.fetch_sub(1, Ordering::SeqCst);

        if Self::should_fail(&self.fetch_failures, sid, call) {
            return Err(TwilioError::from_http_status(500, "Internal Server Error"));
        }

        Ok(format!("media:{}", sid).into_bytes())
    }

    async fn delete_recording(&self, sid: &RecordingSid) -> TwilioResult<()> {
        self.record(Event::Delete(sid.to_string()));
        let call = Self::bump(&self.delete_calls, sid.as_str());
        tokio::task::yield_now().await;

        if Self::should_fail(&self.delete_failures, sid.as_str(), call) {
            return Err(TwilioError::from_http_status(500, "Internal Server Error"));
        }

        Ok(())
    }
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Fake object store keeping objects in memory.
#[derive(Default)]
pub struct FakeStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    put_calls: Mutex<HashMap<String, usize>>,
    failing_keys: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_key(self, key: &str) -> Self {
        self.failing_keys.lock().unwrap().push(key.to_string());
        self
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn put_calls(&self, key: &str) -> usize {
        self.put_calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn put_object(
        &self,
        key: &DestinationKey,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        *self
            .put_calls
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert(0) += 1;
        tokio::task::yield_now().await;

        if self.failing_keys.lock().unwrap().contains(&key.to_string()) {
            return Err(StorageError::upload_failed(format!("{}: access denied", key)));
        }

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn bucket(&self) -> &str {
        "test-bucket"
    }
}
