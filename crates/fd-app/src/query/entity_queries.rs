use std::sync::Arc;

use fd_core::ports::{EntityApiPort, FetchTicket, QueryCachePort};
use fd_core::{Entity, EntityId, QueryKey};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{decode_slot, QueryError, QueryResult};

/// Cached reads of one resource.
///
/// Every fetch takes a ticket from the cache before calling the API. When the
/// response arrives the ticket must still be current, otherwise the response
/// is dropped: a newer fetch of the same key, or a mutation cancelling pending
/// fetches, has superseded it.
/// 每次请求先从缓存领取票据，响应返回时票据已失效则丢弃该响应。
pub struct EntityQueries<E: Entity> {
    api: Arc<dyn EntityApiPort<E>>,
    cache: Arc<dyn QueryCachePort>,
}

impl<E: Entity> Clone for EntityQueries<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<E: Entity> EntityQueries<E> {
    pub fn new(api: Arc<dyn EntityApiPort<E>>, cache: Arc<dyn QueryCachePort>) -> Self {
        Self { api, cache }
    }

    /// Current cached collection, without any network access.
    pub fn cached_collection(&self) -> Result<Option<Vec<E>>, QueryError> {
        let key = E::collection_key();
        decode_slot(&key, self.cache.get(&key))
    }

    pub fn cached_entity(&self, id: EntityId) -> Result<Option<E>, QueryError> {
        let key = E::entity_key(id);
        decode_slot(&key, self.cache.get(&key))
    }

    /// Fetch the whole collection and store it.
    #[tracing::instrument(name = "usecase.fetch_collection.execute", skip_all, fields(resource = %E::RESOURCE))]
    pub async fn fetch_collection(&self) -> QueryResult<Vec<E>> {
        let key = E::collection_key();
        let ticket = self.cache.begin_fetch(&key);

        match self.api.fetch_all().await {
            Ok(items) => {
                debug!(count = items.len(), "Fetched collection");
                self.land(&ticket, items)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Collection fetch failed");
                let last_good = self.cached_collection().ok().flatten();
                QueryResult::failed(last_good, QueryError::from_api(key, err))
            }
        }
    }

    /// Fetch one record and store it under its entity key.
    #[tracing::instrument(name = "usecase.fetch_entity.execute", skip_all, fields(resource = %E::RESOURCE, id = %id))]
    pub async fn fetch_entity(&self, id: EntityId) -> QueryResult<E> {
        let key = E::entity_key(id);
        let ticket = self.cache.begin_fetch(&key);

        match self.api.fetch_by_id(id).await {
            Ok(entity) => self.land(&ticket, entity),
            Err(err) if err.is_not_found() => {
                debug!(key = %key, "Record no longer exists");
                QueryResult::failed(None, QueryError::from_api(key, err))
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Entity fetch failed");
                let last_good = self.cached_entity(id).ok().flatten();
                QueryResult::failed(last_good, QueryError::from_api(key, err))
            }
        }
    }

    /// Serve the cached collection while fresh, refetch otherwise.
    pub async fn ensure_collection(&self) -> QueryResult<Vec<E>> {
        let key = E::collection_key();
        if !self.cache.is_stale(&key) {
            match self.cached_collection() {
                Ok(Some(items)) => return QueryResult::ok(items),
                Ok(None) => {}
                Err(err) => warn!(key = %key, error = %err, "Refetching undecodable slot"),
            }
        }
        self.fetch_collection().await
    }

    pub async fn ensure_entity(&self, id: EntityId) -> QueryResult<E> {
        let key = E::entity_key(id);
        if !self.cache.is_stale(&key) {
            match self.cached_entity(id) {
                Ok(Some(entity)) => return QueryResult::ok(entity),
                Ok(None) => {}
                Err(err) => warn!(key = %key, error = %err, "Refetching undecodable slot"),
            }
        }
        self.fetch_entity(id).await
    }

    /// Refetch every invalidated key of this resource. Returns how many
    /// keys were refetched.
    pub async fn refetch_invalidated(&self) -> usize {
        let keys: Vec<QueryKey> = self
            .cache
            .invalidated_keys()
            .into_iter()
            .filter(|key| key.resource() == E::RESOURCE)
            .collect();

        let fetches = keys.iter().map(|key| async move {
            match key.entity_id() {
                None => self.fetch_collection().await.is_ok(),
                Some(id) => self.fetch_entity(id).await.is_ok(),
            }
        });
        let succeeded = join_all(fetches).await.into_iter().filter(|ok| *ok).count();
        debug!(
            resource = %E::RESOURCE,
            refetched = keys.len(),
            succeeded,
            "Refetched invalidated keys"
        );
        keys.len()
    }

    fn land<T: Serialize + DeserializeOwned>(&self, ticket: &FetchTicket, fresh: T) -> QueryResult<T> {
        let key = ticket.key().clone();
        let value = match serde_json::to_value(&fresh) {
            Ok(value) => value,
            Err(e) => {
                return QueryResult::failed(
                    None,
                    QueryError::Decode {
                        key,
                        message: e.to_string(),
                    },
                )
            }
        };

        if self.cache.complete_fetch(ticket, value) {
            return QueryResult::ok(fresh);
        }

        debug!(key = %key, generation = ticket.generation(), "Discarding superseded response");
        match decode_slot(&key, self.cache.get(&key)) {
            Ok(current) => QueryResult::cached(current),
            Err(err) => QueryResult::failed(None, err),
        }
    }
}
