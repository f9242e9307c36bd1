// src/engine/group.rs

//! Actor group: run a fixed set of actors, stop them all when one stops.
//!
//! Each actor is an `(execute, interrupt)` pair. [`Group::run`] spawns every
//! `execute` future on its own Tokio task and waits for the first one to
//! return. At that point every registered `interrupt` is called once (the
//! finished actor's included) with the first actor's error, and the group
//! waits for all remaining tasks to return. The first outcome is the group's
//! outcome; anything after it is only logged.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, info};

use crate::errors::{HostwatchError, Result};

type ExecuteFn = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;
type InterruptFn = Box<dyn FnOnce(Option<&HostwatchError>) + Send + 'static>;

struct Actor {
    name: String,
    execute: ExecuteFn,
    interrupt: InterruptFn,
}

/// A fixed set of actors that live and die together.
#[derive(Default)]
pub struct Group {
    actors: Vec<Actor>,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.actors.iter().map(|a| a.name.as_str()).collect();
        f.debug_struct("Group").field("actors", &names).finish()
    }
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor. `interrupt` must make `execute` return promptly.
    pub fn add<F, I>(&mut self, name: impl Into<String>, execute: F, interrupt: I)
    where
        F: Future<Output = Result<()>> + Send + 'static,
        I: FnOnce(Option<&HostwatchError>) + Send + 'static,
    {
        self.actors.push(Actor {
            name: name.into(),
            execute: Box::pin(execute),
            interrupt: Box::new(interrupt),
        });
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Run all actors until the first one returns, then interrupt the rest
    /// and wait for them. Returns the first actor's outcome.
    ///
    /// An empty group returns `Ok(())` immediately.
    pub async fn run(self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let mut tasks = JoinSet::new();
        let mut names: HashMap<Id, String> = HashMap::with_capacity(self.len());
        let mut interrupts = Vec::with_capacity(self.len());

        for actor in self.actors {
            let handle = tasks.spawn(actor.execute);
            names.insert(handle.id(), actor.name);
            interrupts.push(actor.interrupt);
        }

        debug!(actors = names.len(), "actor group started");

        // Non-empty set, so the first join always yields.
        let (first_name, first) = match tasks.join_next_with_id().await {
            Some(joined) => settle(joined, &names),
            None => return Ok(()),
        };

        match &first {
            Ok(()) => info!(actor = %first_name, "actor finished; stopping group"),
            Err(err) => info!(actor = %first_name, error = %err, "actor stopped; stopping group"),
        }

        for interrupt in interrupts {
            interrupt(first.as_ref().err());
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let (name, outcome) = settle(joined, &names);
            match outcome {
                Ok(()) => debug!(actor = %name, "actor returned after interrupt"),
                Err(err) if err.is_canceled() => debug!(actor = %name, "actor canceled"),
                Err(err) => debug!(actor = %name, error = %err, "actor error discarded"),
            }
        }

        debug!("actor group stopped");
        first
    }
}

fn settle(
    joined: std::result::Result<(Id, Result<()>), JoinError>,
    names: &HashMap<Id, String>,
) -> (String, Result<()>) {
    let name_of = |id: Id| {
        names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("task {id}"))
    };

    match joined {
        Ok((id, outcome)) => (name_of(id), outcome),
        Err(join_err) => {
            let name = name_of(join_err.id());
            let err = HostwatchError::ActorPanicked(format!("{name}: {join_err}"));
            (name, Err(err))
        }
    }
}
