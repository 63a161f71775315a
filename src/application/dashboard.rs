use crate::application::filter::{apply_filters, FilterOptions, FilterSpec};
use crate::application::stats::JournalStats;
use crate::application::view_state::ViewState;
use crate::domain::entities::trade_record::{TradeFields, TradeRecord, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::trade_store::TradeStore;
use crate::domain::values::emotion::Emotion;
use crate::domain::values::record_id::RecordId;
use crate::domain::values::visibility::Visibility;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

type WriteJob = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Single worker draining one dashboard's remote writes in submission order,
/// so a delete or edit never reaches the store ahead of the create it follows.
struct WriteQueue {
    tx: mpsc::UnboundedSender<WriteJob>,
}

impl WriteQueue {
    fn start() -> Result<Self, DomainError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DomainError::Store(format!("No async runtime for remote writes: {e}")))?;
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();
        runtime.spawn(async move {
            while let Some(job) = rx.recv().await {
                job.await;
            }
            tracing::debug!("Write queue drained");
        });
        Ok(Self { tx })
    }

    fn submit<F>(&self, op: &'static str, id: RecordId, fut: F) -> Result<PendingWrite, DomainError>
    where
        F: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let log_id = id.clone();
        let job: WriteJob = Box::pin(async move {
            let result = fut.await;
            match &result {
                Ok(()) => tracing::debug!(op, id = %log_id, "Remote write completed"),
                Err(e) => tracing::warn!(op, id = %log_id, error = %e, "Remote write failed, local state kept"),
            }
            let _ = done_tx.send(result);
        });
        self.tx
            .send(job)
            .map_err(|_| DomainError::Store(format!("Write queue closed before {op} of {id}")))?;
        Ok(PendingWrite { id, op, done: done_rx })
    }
}

/// A queued remote write. Drop it to fire-and-forget, or `wait` on it to
/// observe the store's answer. Local state is already updated either way and
/// is never rolled back.
#[must_use = "dropping a PendingWrite detaches it; call `wait` to observe the result"]
pub struct PendingWrite {
    id: RecordId,
    op: &'static str,
    done: oneshot::Receiver<Result<(), DomainError>>,
}

impl PendingWrite {
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub async fn wait(self) -> Result<(), DomainError> {
        match self.done.await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Store(format!("{} of {} was dropped", self.op, self.id))),
        }
    }
}

/// In-memory journal view for one user: the merged private + public list, the
/// active filter, and which form or overlay is open.
pub struct Dashboard {
    store: Arc<dyn TradeStore>,
    user_id: String,
    records: Vec<TradeRecord>,
    filters: FilterSpec,
    view: ViewState,
    loading: bool,
    writes: Option<WriteQueue>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn TradeStore>, user_id: impl Into<String>) -> Result<Self, DomainError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("user id must not be empty".into()));
        }
        Ok(Self {
            store,
            user_id,
            records: Vec::new(),
            filters: FilterSpec::default(),
            view: ViewState::Idle,
            loading: true,
            writes: None,
        })
    }

    /// Fetch private then public records and replace the base list with their
    /// concatenation. A failed fetch is logged and leaves the list empty.
    pub async fn load(&mut self) {
        match self.fetch_merged().await {
            Ok(records) => {
                tracing::info!(user = %self.user_id, count = records.len(), "Loaded journal");
                self.records = records;
            }
            Err(e) => {
                tracing::error!(user = %self.user_id, error = %e, "Error fetching trades");
                self.records.clear();
            }
        }
        self.loading = false;
    }

    async fn fetch_merged(&self) -> Result<Vec<TradeRecord>, DomainError> {
        let private = self.store.fetch_private(&self.user_id).await?;
        let public = self.store.fetch_public().await?;

        let mut merged = Vec::with_capacity(private.len() + public.len());
        for (_, mut record) in private {
            record.visibility = Visibility::Private;
            merged.push(record);
        }
        for (_, mut record) in public {
            record.visibility = Visibility::Public;
            merged.push(record);
        }
        Ok(merged)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The unfiltered base list.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn record(&self, id: &RecordId) -> Option<&TradeRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn find(&self, visibility: Visibility, id: &RecordId) -> Option<&TradeRecord> {
        self.records
            .iter()
            .find(|r| &r.id == id && r.visibility == visibility)
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Replace the active filter and return the resulting view. The base list
    /// is left untouched, so loosening a filter brings records back.
    pub fn apply_filters(&mut self, spec: FilterSpec) -> Vec<&TradeRecord> {
        self.filters = spec;
        self.visible()
    }

    pub fn visible(&self) -> Vec<&TradeRecord> {
        apply_filters(&self.records, &self.filters)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.records)
    }

    pub fn stats(&self) -> JournalStats {
        JournalStats::compute(self.visible())
    }

    /// Reserve an id from the store, prepend the record locally, then write it
    /// in the background.
    pub async fn create_record(&mut self, fields: TradeFields, emotion: Emotion) -> Result<PendingWrite, DomainError> {
        self.ensure_write_queue()?;
        let id = self.store.reserve_id(&self.user_id).await?;
        let record = TradeRecord::new(id.clone(), emotion, fields, Visibility::Private);
        self.records.insert(0, record.clone());

        let store = self.store.clone();
        let user_id = self.user_id.clone();
        self.enqueue("create", id, async move { store.put(&user_id, &record).await })
    }

    pub fn update_record(&mut self, id: &RecordId, update: TradeUpdate) -> Result<PendingWrite, DomainError> {
        let idx = self.private_index(id)?;
        self.ensure_write_queue()?;
        self.records[idx].apply(&update);

        let store = self.store.clone();
        let user_id = self.user_id.clone();
        let target = id.clone();
        self.enqueue("update", id.clone(), async move {
            store.update(&user_id, &target, &update).await
        })
    }

    pub fn delete_record(&mut self, id: &RecordId) -> Result<PendingWrite, DomainError> {
        let idx = self.private_index(id)?;
        self.ensure_write_queue()?;
        self.records.remove(idx);
        if self.view_targets(id) {
            self.view = ViewState::Idle;
        }

        let store = self.store.clone();
        let user_id = self.user_id.clone();
        let target = id.clone();
        self.enqueue("delete", id.clone(), async move {
            store.delete(&user_id, &target).await
        })
    }

    fn ensure_write_queue(&mut self) -> Result<(), DomainError> {
        if self.writes.is_none() {
            self.writes = Some(WriteQueue::start()?);
        }
        Ok(())
    }

    fn enqueue<F>(&self, op: &'static str, id: RecordId, fut: F) -> Result<PendingWrite, DomainError>
    where
        F: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        match &self.writes {
            Some(queue) => queue.submit(op, id, fut),
            None => Err(DomainError::Store(format!("No write queue for {op}"))),
        }
    }

    fn private_index(&self, id: &RecordId) -> Result<usize, DomainError> {
        if let Some(idx) = self
            .records
            .iter()
            .position(|r| &r.id == id && r.visibility == Visibility::Private)
        {
            return Ok(idx);
        }
        if self.records.iter().any(|r| &r.id == id) {
            Err(DomainError::ReadOnly(format!("Public trade {id} cannot be modified")))
        } else {
            Err(DomainError::NotFound(format!("Trade not found: {id}")))
        }
    }

    fn view_targets(&self, id: &RecordId) -> bool {
        match &self.view {
            ViewState::FormOpen { editing_id, .. } => editing_id.as_ref() == Some(id),
            ViewState::OverlayOpen { id: shown, visibility } => {
                *visibility == Visibility::Private && shown == id
            }
            ViewState::Idle => false,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn open_create_form(&mut self, emotion: Emotion) {
        self.view = ViewState::FormOpen {
            emotion,
            editing_id: None,
        };
    }

    pub fn select_for_edit(&mut self, id: &RecordId) -> Result<(), DomainError> {
        let idx = self.private_index(id)?;
        self.view = ViewState::FormOpen {
            emotion: self.records[idx].emotion,
            editing_id: Some(id.clone()),
        };
        Ok(())
    }

    /// Open the detail overlay for one merged-list entry, addressed by its
    /// (visibility, id) key.
    pub fn select_for_overlay(&mut self, visibility: Visibility, id: &RecordId) -> Result<(), DomainError> {
        if self.find(visibility, id).is_none() {
            return Err(DomainError::NotFound(format!("Trade not found: {visibility} {id}")));
        }
        self.view = ViewState::OverlayOpen {
            id: id.clone(),
            visibility,
        };
        Ok(())
    }

    pub fn close(&mut self) {
        self.view = ViewState::Idle;
    }

    /// The record being edited, for pre-filling the form.
    pub fn editing(&self) -> Option<&TradeRecord> {
        match &self.view {
            ViewState::FormOpen {
                editing_id: Some(id),
                ..
            } => self.find(Visibility::Private, id),
            _ => None,
        }
    }

    pub fn overlay(&self) -> Option<&TradeRecord> {
        match &self.view {
            ViewState::OverlayOpen { id, visibility } => self.find(*visibility, id),
            _ => None,
        }
    }

    /// Submit the open form: update when editing, create otherwise. The form
    /// closes once the local change is applied.
    pub async fn save_form(&mut self, fields: TradeFields) -> Result<PendingWrite, DomainError> {
        let (emotion, editing_id) = match &self.view {
            ViewState::FormOpen { emotion, editing_id } => (*emotion, editing_id.clone()),
            _ => return Err(DomainError::InvalidInput("No entry form is open".into())),
        };
        let pending = match editing_id {
            Some(id) => self.update_record(&id, TradeUpdate::from(fields))?,
            None => self.create_record(fields, emotion).await?,
        };
        self.view = ViewState::Idle;
        Ok(pending)
    }
}
