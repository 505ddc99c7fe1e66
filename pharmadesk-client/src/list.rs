use pharmadesk_core::FormValues;
use pharmadesk_data::{Entity, EntityId};

use crate::crud::CrudApi;
use crate::error::ApiError;

/// State behind a list view: the last successfully loaded items, whether a
/// load is in flight, and the most recent failure.
///
/// A failed load or mutation never discards the held items.
#[derive(Debug, Clone)]
pub struct ResourceList<E> {
    items: Vec<E>,
    loaded: bool,
    pending: bool,
    last_error: Option<ApiError>,
}

impl<E> Default for ResourceList<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            pending: false,
            last_error: None,
        }
    }
}

impl<E: Entity> ResourceList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Whether at least one load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn begin_load(&mut self) {
        self.pending = true;
    }

    /// Settle a load started with [`begin_load`](Self::begin_load). The
    /// list is replaced wholesale on success.
    pub fn complete_load(&mut self, result: Result<Vec<E>, ApiError>) {
        self.pending = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!(
                    resource = E::RESOURCE,
                    %error,
                    "list load failed, keeping previous items"
                );
                self.last_error = Some(error);
            }
        }
    }

    pub async fn refresh<A: CrudApi<E>>(&mut self, api: &A) -> Result<(), ApiError> {
        self.begin_load();
        let result = api.list().await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.complete_load(result);
        outcome
    }

    pub async fn create_and_refresh<A: CrudApi<E>>(
        &mut self,
        api: &A,
        form: &FormValues,
    ) -> Result<E, ApiError> {
        let created = self.mutation(api.create(form).await)?;
        self.refresh(api).await?;
        Ok(created)
    }

    pub async fn update_and_refresh<A: CrudApi<E>>(
        &mut self,
        api: &A,
        id: EntityId,
        form: &FormValues,
    ) -> Result<E, ApiError> {
        let updated = self.mutation(api.update(id, form).await)?;
        self.refresh(api).await?;
        Ok(updated)
    }

    pub async fn remove_and_refresh<A: CrudApi<E>>(
        &mut self,
        api: &A,
        id: EntityId,
    ) -> Result<(), ApiError> {
        self.mutation(api.remove(id).await)?;
        self.refresh(api).await
    }

    fn mutation<R>(&mut self, result: Result<R, ApiError>) -> Result<R, ApiError> {
        if let Err(error) = &result {
            self.last_error = Some(error.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmadesk_data::Role;

    fn role(id: EntityId, name: &str) -> Role {
        Role {
            id,
            name: name.into(),
            description: None,
            users_count: None,
        }
    }

    #[test]
    fn failed_load_keeps_previous_items() {
        let mut list = ResourceList::<Role>::new();
        list.begin_load();
        assert!(list.is_pending());
        list.complete_load(Ok(vec![role(1, "Admin"), role(2, "Cajero")]));
        assert!(!list.is_pending());
        assert!(list.is_loaded());

        list.begin_load();
        list.complete_load(Err(ApiError::unreachable("connection refused")));
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.find(2).map(|r| r.name.as_str()), Some("Cajero"));
        assert!(list.last_error().is_some());

        list.begin_load();
        list.complete_load(Ok(vec![role(1, "Admin")]));
        assert_eq!(list.items().len(), 1);
        assert!(list.last_error().is_none());
    }
}
