//! Local list state for one admin resource page.
//!
//! A [`ResourceStore`] loads the list once, then keeps it in step with the
//! server after every mutation: creates are spliced in (or the list is
//! fetched again), updates and deletes are applied optimistically and
//! rolled back when the server refuses them.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::join_all;
use salon_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::Identified;
use crate::notify::Notifier;
use crate::resource::Resource;
use crate::selection::Selection;

/// Asks the admin before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything. For scripts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What to do with the local list after a successful create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Insert the returned item at the front.
    #[default]
    Splice,
    /// Fetch the whole list again.
    Refetch,
}

pub struct ResourceStore<R: Resource> {
    client: Arc<ApiClient>,
    items: Vec<R::Item>,
    selection: Selection,
    notifier: Notifier,
    confirm: Arc<dyn Confirm>,
    policy: RefreshPolicy,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            items: Vec::new(),
            selection: Selection::new(),
            notifier: Notifier::default(),
            confirm: Arc::new(AlwaysConfirm),
            policy: RefreshPolicy::default(),
            _resource: PhantomData,
        }
    }

    pub fn with_confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn get(&self, id: DbId) -> Option<&R::Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    fn position(&self, id: DbId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn fail(&mut self, error: ClientError, fallback: &str) -> ClientError {
        tracing::warn!(resource = R::PATH, error = %error, "Admin operation failed");
        self.notifier.error(error.user_message(fallback));
        error
    }

    /// Replace the local list with the server's.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.client.list::<R>().await {
            Ok(items) => {
                self.selection
                    .retain_present(items.iter().map(Identified::id));
                self.items = items;
                Ok(())
            }
            Err(e) => Err(self.fail(e, R::MESSAGES.load_failed)),
        }
    }

    /// Create an item and add it to the list according to the refresh policy.
    pub async fn create(&mut self, input: &R::Create) -> Result<R::Item, ClientError> {
        let item = match self.client.create::<R>(input).await {
            Ok(item) => item,
            Err(e) => return Err(self.fail(e, R::MESSAGES.create_failed)),
        };

        match self.policy {
            RefreshPolicy::Splice => self.items.insert(0, item.clone()),
            RefreshPolicy::Refetch => {
                // The item exists either way; a failed reload has its own notice.
                let _ = self.load().await;
            }
        }
        self.notifier.success(R::MESSAGES.created);
        Ok(item)
    }

    /// Update an item, showing the change before the server confirms it.
    ///
    /// On failure the local copy is restored.
    pub async fn update(&mut self, id: DbId, input: &R::Update) -> Result<R::Item, ClientError> {
        let previous = self.position(id).map(|index| {
            let previous = self.items[index].clone();
            R::apply_update(&mut self.items[index], input);
            previous
        });

        match self.client.update::<R>(id, input).await {
            Ok(item) => {
                if let Some(index) = self.position(id) {
                    self.items[index] = item.clone();
                }
                self.notifier.success(R::MESSAGES.updated);
                Ok(item)
            }
            Err(e) => {
                if let (Some(previous), Some(index)) = (previous, self.position(id)) {
                    self.items[index] = previous;
                }
                Err(self.fail(e, R::MESSAGES.update_failed))
            }
        }
    }

    /// Delete one item after confirmation. Returns `false` when the admin
    /// declined.
    ///
    /// The row disappears at once and comes back at its old position if the
    /// server refuses.
    pub async fn delete(&mut self, id: DbId) -> Result<bool, ClientError> {
        if !self.confirm.confirm(R::MESSAGES.delete_prompt) {
            return Ok(false);
        }

        let removed = self.position(id).map(|index| (index, self.items.remove(index)));
        let was_selected = self.selection.is_selected(id);
        self.selection.deselect(id);

        match self.client.delete::<R>(id).await {
            Ok(_) => {
                self.notifier.success(R::MESSAGES.deleted);
                Ok(true)
            }
            Err(e) => {
                if let Some((index, item)) = removed {
                    let index = index.min(self.items.len());
                    self.items.insert(index, item);
                }
                if was_selected {
                    self.selection.select(id);
                }
                Err(self.fail(e, R::MESSAGES.delete_failed))
            }
        }
    }

    /// Delete every selected item after one confirmation. Returns how many
    /// were deleted.
    ///
    /// The requests run concurrently and are not atomic. Any failure fails
    /// the batch, and the list is fetched again either way so it matches the
    /// server.
    pub async fn delete_selected(&mut self) -> Result<usize, ClientError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(0);
        }
        let prompt = format!("{} ({})", R::MESSAGES.delete_prompt, ids.len());
        if !self.confirm.confirm(&prompt) {
            return Ok(0);
        }

        let client = Arc::clone(&self.client);
        let results = join_all(ids.iter().map(|&id| {
            let client = Arc::clone(&client);
            async move { client.delete::<R>(id).await }
        }))
        .await;

        let total = ids.len();
        let failed = results.iter().filter(|r| r.is_err()).count();
        for (id, result) in ids.iter().zip(&results) {
            if let Err(e) = result {
                tracing::warn!(resource = R::PATH, id, error = %e, "Bulk delete request failed");
            }
        }

        self.selection.clear();
        // Converge on server state whatever happened.
        let _ = self.load().await;

        if failed > 0 {
            let error = ClientError::Batch { failed, total };
            self.notifier.error(R::MESSAGES.delete_failed);
            return Err(error);
        }
        self.notifier.success(R::MESSAGES.deleted);
        Ok(total)
    }
}
