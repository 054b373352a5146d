//! # Model Registry
//!
//! An arena that assigns every discovered model a [`ModelId`] when its name
//! is first reserved, and receives the finished [`Model`] once its
//! properties are built.
//!
//! Reserving before building is what makes self-referential definitions
//! terminate: a model that is reached again while still in progress is
//! reported as [`Reservation::Existing`] and only referenced by name.
//!
//! A name may only ever stand for one schema shape. Reserving a taken name
//! for a structurally different schema fails with
//! [`ResolveError::NameCollision`].

use std::collections::HashMap;

use serde_json::Value;

use schemod_core::{Model, ModelId, ModelMap, ResolveError};

/// Outcome of [`ModelRegistry::reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// The name is new; the caller must build the model and
    /// [`complete`](ModelRegistry::complete) it.
    New(ModelId),
    /// The same schema already owns the name (built or in progress).
    Existing(ModelId),
}

#[derive(Debug)]
struct Slot<'s> {
    name: String,
    source: &'s Value,
    model: Option<Model>,
}

/// The single piece of mutable state of a resolution run.
#[derive(Debug, Default)]
pub struct ModelRegistry<'s> {
    slots: Vec<Slot<'s>>,
    by_name: HashMap<String, ModelId>,
}

impl<'s> ModelRegistry<'s> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Claim `name` for the object schema `source`.
    pub fn reserve(
        &mut self,
        name: &str,
        source: &'s Value,
        path: &str,
    ) -> Result<Reservation, ResolveError> {
        if let Some(&id) = self.by_name.get(name) {
            let owner = self.slots[id.0].source;
            if std::ptr::eq(owner, source) || owner == source {
                return Ok(Reservation::Existing(id));
            }
            return Err(ResolveError::NameCollision {
                name: name.to_string(),
                path: path.to_string(),
            });
        }

        let id = ModelId(self.slots.len());
        self.slots.push(Slot {
            name: name.to_string(),
            source,
            model: None,
        });
        self.by_name.insert(name.to_string(), id);
        tracing::debug!(model = name, id = id.0, "reserved model name");
        Ok(Reservation::New(id))
    }

    /// Store the finished model for a reservation.
    pub fn complete(&mut self, id: ModelId, model: Model) {
        tracing::debug!(
            model = %model.name,
            properties = model.properties.len(),
            dependencies = model.dependencies.len(),
            "completed model"
        );
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.model = Some(model);
        }
    }

    /// Freeze the registry into the run's output, in reservation order.
    ///
    /// Every reservation is completed once the top-level build returns
    /// successfully; a slot still empty here means its build was abandoned
    /// and is reported as malformed input rather than dropped.
    pub fn finish(self) -> Result<ModelMap, ResolveError> {
        let mut map = ModelMap::new();
        for slot in self.slots {
            let model = slot.model.ok_or_else(|| ResolveError::MalformedSchema {
                path: String::new(),
                reason: format!("model '{}' was reserved but never built", slot.name),
            })?;
            map.insert(model);
        }
        Ok(map)
    }
}
