#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fd_app::{App, AppDeps};
use fd_core::crm::{
    Contact, Customer, CustomerStatus, Engagement, EngagementLetter, Partner, Proposal,
};
use fd_core::ports::{ApiError, EntityApiPort};
use fd_core::{Entity, EntityId};
use fd_infra::{InMemoryColumnPrefsStore, InMemoryQueryCache, RecordingNotifier};
use tokio::sync::oneshot;

/// In-process stand-in for one REST resource.
pub struct FakeApi<E: Entity> {
    records: Mutex<Vec<E>>,
    next_id: AtomicI64,
    fail_next: Mutex<Option<ApiError>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub calls: AtomicUsize,
}

impl<E: Entity> FakeApi<E> {
    pub fn new(records: Vec<E>) -> Arc<Self> {
        let next_id = records.iter().map(|r| r.id().value()).max().unwrap_or(0) + 1;
        Arc::new(Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(next_id),
            fail_next: Mutex::new(None),
            gate: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// The next call waits until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn records(&self) -> Vec<E> {
        self.records.lock().unwrap().clone()
    }

    pub fn replace(&self, records: Vec<E>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityApiPort<E> for FakeApi<E> {
    /// Answers with the records held when the request was made.
    async fn fetch_all(&self) -> Result<Vec<E>, ApiError> {
        let records = self.records();
        self.enter().await?;
        Ok(records)
    }

    async fn fetch_by_id(&self, id: EntityId) -> Result<E, ApiError> {
        self.enter().await?;
        self.records()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} {id}", E::RESOURCE.label())))
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        self.enter().await?;
        let id = EntityId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = E::from_draft(id, draft);
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: &E::Patch) -> Result<E, ApiError> {
        self.enter().await?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} {id}", E::RESOURCE.label())))?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.enter().await?;
        self.records.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}

pub fn customer(id: i64, name: &str) -> Customer {
    Customer {
        id: EntityId::new(id),
        name: name.to_string(),
        email: Some(format!("{}@client.test", name.to_lowercase().replace(' ', "."))),
        phone: None,
        status: CustomerStatus::Active,
        partner_id: None,
        created_at: None,
        contacts: vec![Contact {
            name: format!("{name} contact"),
            email: None,
            phone: None,
            is_primary: true,
        }],
        addresses: vec![],
    }
}

pub struct Harness {
    pub app: App,
    pub customers: Arc<FakeApi<Customer>>,
    pub cache: Arc<InMemoryQueryCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub prefs: Arc<InMemoryColumnPrefsStore>,
}

pub fn harness(customers: Vec<Customer>) -> Harness {
    let customers = FakeApi::new(customers);
    let cache = Arc::new(InMemoryQueryCache::default());
    let notifier = Arc::new(RecordingNotifier::new());
    let prefs = Arc::new(InMemoryColumnPrefsStore::new());

    let app = App::new(AppDeps {
        cache: cache.clone(),
        customers: customers.clone(),
        partners: FakeApi::<Partner>::new(vec![]),
        proposals: FakeApi::<Proposal>::new(vec![]),
        engagement_letters: FakeApi::<EngagementLetter>::new(vec![]),
        engagements: FakeApi::<Engagement>::new(vec![]),
        notifier: notifier.clone(),
        column_prefs: prefs.clone(),
    });

    Harness {
        app,
        customers,
        cache,
        notifier,
        prefs,
    }
}
