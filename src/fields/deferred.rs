//! Deferred references: fields declared against values that are registered
//! later.
//!
//! A descriptor that needs something not available yet (typically the codec
//! of an entity owned by another module) asks a [`Registry`] to
//! [`include`](Registry::include) it by name and gets a [`Deferred`] back
//! immediately. Once the owner [`declare`](Registry::declare)s the name, every
//! `Deferred` of that name observes the value. Each name resolves exactly
//! once; using a `Deferred` before that is a [`ResolveError::Unresolved`]
//! instead of undefined behaviour.

use parking_lot::Mutex;
use std::{
    any::{self, Any},
    collections::{hash_map::Entry, HashMap},
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{Arc, LazyLock, OnceLock},
};
use tracing::debug;

use super::ResolveError;

type Callback<T> = Box<dyn FnOnce(&T) + Send>;

/// A named value that is resolved once, possibly after construction.
pub struct Deferred<T> {
    name: Arc<str>,
    cell: Arc<OnceLock<T>>,
}

impl<T> Deferred<T> {
    /// A reference that is already resolved, for fields that don't need to
    /// wait on a registry.
    pub fn resolved(name: &str, value: T) -> Self {
        Self {
            name: Arc::from(name),
            cell: Arc::new(OnceLock::from(value)),
        }
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name has been declared.
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The resolved value.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unresolved`] if the name hasn't been declared.
    pub fn get(&self) -> Result<&T, ResolveError> {
        self.cell
            .get()
            .ok_or_else(|| ResolveError::Unresolved(self.name.to_string()))
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Debug for Deferred<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Deferred")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

struct Slot<T> {
    cell: Arc<OnceLock<T>>,
    callbacks: Vec<Callback<T>>,
}

/// Object-safe view of a [`Slot`] of any type.
trait AnySlot: Send {
    fn is_resolved(&self) -> bool;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Send + Sync + 'static> AnySlot for Slot<T> {
    fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct ErasedSlot {
    type_name: &'static str,
    slot: Box<dyn AnySlot>,
}

impl ErasedSlot {
    fn new<T: Send + Sync + 'static>() -> Self {
        Self {
            type_name: any::type_name::<T>(),
            slot: Box::new(Slot::<T> {
                cell: Arc::new(OnceLock::new()),
                callbacks: Vec::new(),
            }),
        }
    }
}

/// Registry of deferred names.
///
/// A process-wide instance is available through [`Registry::global`] and the
/// free functions [`include`], [`include_with_callback`] and [`declare`].
#[derive(Default)]
pub struct Registry {
    slots: Mutex<HashMap<String, ErasedSlot>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

        &GLOBAL
    }

    /// Reference `name`, resolved or not.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TypeMismatch`] if `name` is already registered
    /// with another type.
    pub fn include<T>(&self, name: &str) -> Result<Deferred<T>, ResolveError>
    where
        T: Send + Sync + 'static,
    {
        let mut slots = self.slots.lock();
        let slot = slot_mut::<T>(&mut slots, name)?;

        Ok(Deferred {
            name: Arc::from(name),
            cell: Arc::clone(&slot.cell),
        })
    }

    /// Run `callback` with the value of `name` once it is declared.
    ///
    /// If `name` is already declared the callback runs immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TypeMismatch`] if `name` is already registered
    /// with another type.
    pub fn include_with_callback<T, F>(&self, name: &str, callback: F) -> Result<(), ResolveError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&T) + Send + 'static,
    {
        let cell = {
            let mut slots = self.slots.lock();
            let slot = slot_mut::<T>(&mut slots, name)?;

            if slot.cell.get().is_none() {
                slot.callbacks.push(Box::new(callback));
                return Ok(());
            }

            Arc::clone(&slot.cell)
        };

        // Run outside of the lock so the callback may use the registry.
        if let Some(value) = cell.get() {
            callback(value);
        }

        Ok(())
    }

    /// Declare the value of `name`, resolving every reference to it and
    /// running its queued callbacks in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::AlreadyDeclared`] if `name` was declared before
    /// and [`ResolveError::TypeMismatch`] if it is registered with another
    /// type.
    pub fn declare<T>(&self, name: &str, value: T) -> Result<(), ResolveError>
    where
        T: Send + Sync + 'static,
    {
        let (cell, callbacks) = {
            let mut slots = self.slots.lock();
            let slot = slot_mut::<T>(&mut slots, name)?;

            if slot.cell.set(value).is_err() {
                return Err(ResolveError::AlreadyDeclared(name.to_owned()));
            }

            (Arc::clone(&slot.cell), std::mem::take(&mut slot.callbacks))
        };

        debug!(name, callbacks = callbacks.len(), "declared deferred reference");

        if let Some(value) = cell.get() {
            for callback in callbacks {
                callback(value);
            }
        }

        Ok(())
    }

    /// Names that were included but never declared.
    pub fn unresolved(&self) -> Vec<String> {
        let slots = self.slots.lock();
        let mut names: Vec<String> = slots
            .iter()
            .filter(|(_, erased)| !erased.slot.is_resolved())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let slots = self.slots.lock();
        let mut map = f.debug_map();
        for (name, erased) in slots.iter() {
            map.entry(name, &erased.type_name);
        }
        map.finish()
    }
}

fn slot_mut<'s, T: Send + Sync + 'static>(
    slots: &'s mut HashMap<String, ErasedSlot>,
    name: &str,
) -> Result<&'s mut Slot<T>, ResolveError> {
    let erased = match slots.entry(name.to_owned()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(ErasedSlot::new::<T>()),
    };

    let type_name = erased.type_name;
    erased
        .slot
        .as_any_mut()
        .downcast_mut::<Slot<T>>()
        .ok_or_else(|| ResolveError::TypeMismatch {
            name: name.to_owned(),
            expected: type_name,
            found: any::type_name::<T>(),
        })
}

/// [`Registry::include`] on the global registry.
///
/// # Errors
///
/// See [`Registry::include`].
pub fn include<T: Send + Sync + 'static>(name: &str) -> Result<Deferred<T>, ResolveError> {
    Registry::global().include(name)
}

/// [`Registry::include_with_callback`] on the global registry.
///
/// # Errors
///
/// See [`Registry::include_with_callback`].
pub fn include_with_callback<T, F>(name: &str, callback: F) -> Result<(), ResolveError>
where
    T: Send + Sync + 'static,
    F: FnOnce(&T) + Send + 'static,
{
    Registry::global().include_with_callback(name, callback)
}

/// [`Registry::declare`] on the global registry.
///
/// # Errors
///
/// See [`Registry::declare`].
pub fn declare<T: Send + Sync + 'static>(name: &str, value: T) -> Result<(), ResolveError> {
    Registry::global().declare(name, value)
}

#[cfg(test)]
mod tests {
    use super::{Deferred, Registry};
    use crate::fields::ResolveError;
    use static_assertions::assert_impl_all;
    use std::sync::{Arc, Mutex};

    assert_impl_all!(Registry: Send, Sync);
    assert_impl_all!(Deferred<u8>: Clone, Send, Sync);

    #[test]
    fn include_before_declare() {
        let registry = Registry::new();
        let deferred = registry.include::<u32>("limit").unwrap();
        let clone = deferred.clone();

        assert_eq!(
            deferred.get(),
            Err(ResolveError::Unresolved("limit".to_owned()))
        );
        assert_eq!(registry.unresolved(), vec!["limit".to_owned()]);

        registry.declare("limit", 25u32).unwrap();

        assert_eq!(deferred.get(), Ok(&25));
        assert_eq!(clone.get(), Ok(&25));
        assert!(registry.unresolved().is_empty());
    }

    #[test]
    fn include_after_declare() {
        let registry = Registry::new();
        registry.declare("limit", 25u32).unwrap();

        let deferred = registry.include::<u32>("limit").unwrap();
        assert!(deferred.is_resolved());
        assert_eq!(deferred.name(), "limit");
    }

    #[test]
    fn callbacks_run_once_in_order() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            registry
                .include_with_callback("limit", move |value: &u32| {
                    seen.lock().unwrap().push((tag, *value));
                })
                .unwrap();
        }
        assert!(seen.lock().unwrap().is_empty());

        registry.declare("limit", 7u32).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);

        // Already declared, runs right away.
        let late = Arc::clone(&seen);
        registry
            .include_with_callback("limit", move |value: &u32| {
                late.lock().unwrap().push(("late", *value));
            })
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn declare_twice() {
        let registry = Registry::new();
        registry.declare("limit", 1u32).unwrap();
        assert_eq!(
            registry.declare("limit", 2u32),
            Err(ResolveError::AlreadyDeclared("limit".to_owned()))
        );
        assert_eq!(registry.include::<u32>("limit").unwrap().get(), Ok(&1));
    }

    #[test]
    fn type_mismatch() {
        let registry = Registry::new();
        registry.include::<u32>("limit").unwrap();

        let err = registry.declare("limit", "nope").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::TypeMismatch { ref name, expected: "u32", .. } if name == "limit"
        ));
    }

    #[test]
    fn resolved_without_registry() {
        let deferred = Deferred::resolved("limit", 3u8);
        assert_eq!(deferred.get(), Ok(&3));
    }

    #[test]
    fn global_registry() {
        let deferred = super::include::<u64>("fields::deferred::tests::global").unwrap();
        super::declare("fields::deferred::tests::global", 9u64).unwrap();
        assert_eq!(deferred.get(), Ok(&9));
    }
}
