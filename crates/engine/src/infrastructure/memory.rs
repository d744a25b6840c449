//! In-memory actor store.

use dashmap::DashMap;
use metallic_guardian_domain::{Actor, ActorId};

use crate::infrastructure::ports::{ActorRepo, RepoError};

/// Actor store backed by a concurrent map.
///
/// `list` returns actors in the order they were first inserted.
#[derive(Default)]
pub struct InMemoryActorRepo {
    actors: DashMap<ActorId, Actor>,
    order: DashMap<ActorId, u64>,
    next_seq: std::sync::atomic::AtomicU64,
}

impl InMemoryActorRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let repo = Self::new();
        for actor in actors {
            repo.insert(actor);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    fn insert(&self, actor: Actor) {
        let id = actor.id;
        self.order.entry(id).or_insert_with(|| {
            self.next_seq
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
        });
        self.actors.insert(id, actor);
    }
}

impl ActorRepo for InMemoryActorRepo {
    fn get(&self, id: ActorId) -> Result<Option<Actor>, RepoError> {
        Ok(self.actors.get(&id).map(|entry| entry.value().clone()))
    }

    fn save(&self, actor: &Actor) -> Result<(), RepoError> {
        self.insert(actor.clone());
        Ok(())
    }

    fn delete(&self, id: ActorId) -> Result<(), RepoError> {
        self.order.remove(&id);
        self.actors
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Actor", id))
    }

    fn list(&self) -> Result<Vec<Actor>, RepoError> {
        let mut actors: Vec<(u64, Actor)> = self
            .actors
            .iter()
            .map(|entry| {
                let seq = self.order.get(entry.key()).map(|s| *s).unwrap_or(u64::MAX);
                (seq, entry.value().clone())
            })
            .collect();
        actors.sort_by_key(|(seq, _)| *seq);
        Ok(actors.into_iter().map(|(_, actor)| actor).collect())
    }
}
