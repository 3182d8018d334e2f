//! Modal visibility state with a unified registry.
//!
//! Every overlay of the application is identified by a [`ModalId`]. The
//! [`ModalRegistry`] keeps one visibility flag per identifier so that any
//! part of the UI can open or close a dialog without threading state
//! through its parents. The registry is generic over the key type; the
//! typed enumeration is the default so identifiers cannot collide.
//!
//! Subscribers are registered per identifier and are only called when the
//! visibility of *that* identifier actually changes.

use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

/// Dialog size, from the narrow edit prompt up to full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSize {
    Sm,
    Md,
    Lg,
    Xl,
    Full,
}

/// Modal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalId {
    /// Single field edit prompt of the case detail.
    EditField,
    /// Full case detail (basic, additional, type and holder data).
    DetalleTitular,
    /// Observation log of a case.
    ObservacionesProceso,
    /// Obligations attached to a case.
    ObligacionesModal,
    /// New obligation form.
    NuevaObligacion,
    /// Mark a sub-stage of the main workflow.
    ActualizarSubetapa,
    /// Open a new alternate track.
    NuevaMedidaAlterna,
    /// Mark a sub-stage of an alternate track.
    ActualizarSubetapaAlterna,
    /// Update trail of one sub-stage.
    HistoricoSubetapa,
    /// Documents attached to one sub-stage.
    DocumentosSubetapa,
}

impl ModalId {
    pub const ALL: [ModalId; 10] = [
        Self::EditField,
        Self::DetalleTitular,
        Self::ObservacionesProceso,
        Self::ObligacionesModal,
        Self::NuevaObligacion,
        Self::ActualizarSubetapa,
        Self::NuevaMedidaAlterna,
        Self::ActualizarSubetapaAlterna,
        Self::HistoricoSubetapa,
        Self::DocumentosSubetapa,
    ];

    /// Stable string name of the identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EditField => "editField",
            Self::DetalleTitular => "detalleTitular",
            Self::ObservacionesProceso => "observacionesProceso",
            Self::ObligacionesModal => "obligacionesModal",
            Self::NuevaObligacion => "nuevaObligacion",
            Self::ActualizarSubetapa => "actualizarSubetapa",
            Self::NuevaMedidaAlterna => "nuevaMedidaAlterna",
            Self::ActualizarSubetapaAlterna => "actualizarSubetapaAlterna",
            Self::HistoricoSubetapa => "historicoSubetapa",
            Self::DocumentosSubetapa => "documentosSubetapa",
        }
    }

    /// Header shown on the dialog.
    pub fn title(self) -> &'static str {
        match self {
            Self::EditField => "Editar campo",
            Self::DetalleTitular => "Detalle del proceso",
            Self::ObservacionesProceso => "Observaciones del proceso",
            Self::ObligacionesModal => "Obligaciones",
            Self::NuevaObligacion => "Nueva obligación",
            Self::ActualizarSubetapa => "Actualizar subetapa",
            Self::NuevaMedidaAlterna => "Nueva medida alterna",
            Self::ActualizarSubetapaAlterna => "Actualizar subetapa alterna",
            Self::HistoricoSubetapa => "Histórico de la subetapa",
            Self::DocumentosSubetapa => "Documentos",
        }
    }

    pub fn size(self) -> ModalSize {
        match self {
            Self::EditField | Self::NuevaObligacion => ModalSize::Sm,
            Self::ObservacionesProceso | Self::ObligacionesModal => ModalSize::Lg,
            Self::DetalleTitular | Self::DocumentosSubetapa => ModalSize::Xl,
            _ => ModalSize::Md,
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown modal identifier: {0}")]
pub struct UnknownModal(pub String);

impl FromStr for ModalId {
    type Err = UnknownModal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownModal(s.to_string()))
    }
}

/// A visibility transition delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalChange<K = ModalId> {
    pub id: K,
    pub open: bool,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<K> = Rc<dyn Fn(&ModalChange<K>)>;

/// A change together with the subscribers that must hear about it.
struct Pending<K> {
    change: ModalChange<K>,
    subscribers: Vec<Subscriber<K>>,
}

impl<K> Pending<K> {
    fn deliver(self) {
        for subscriber in &self.subscribers {
            subscriber(&self.change);
        }
    }
}

/// Registry of modal visibility flags.
///
/// Identifiers are created lazily; an identifier that was never opened or
/// closed reads as closed. Any number of modals can be open at once.
pub struct ModalRegistry<K = ModalId> {
    /// Visibility per identifier.
    flags: HashMap<K, bool>,
    /// Subscribers per identifier.
    subscribers: HashMap<K, Vec<(SubscriptionId, Subscriber<K>)>>,
    next_subscription: u64,
}

impl<K> Default for ModalRegistry<K> {
    fn default() -> Self {
        Self {
            flags: HashMap::new(),
            subscribers: HashMap::new(),
            next_subscription: 0,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for ModalRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalRegistry")
            .field("flags", &self.flags)
            .field(
                "subscribers",
                &self.subscribers.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl<K> ModalRegistry<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a modal. Returns whether its visibility changed.
    pub fn open(&mut self, id: K) -> bool {
        self.set(id, true)
    }

    /// Hide a modal. Returns whether its visibility changed.
    pub fn close(&mut self, id: K) -> bool {
        self.set(id, false)
    }

    /// Set the visibility of a modal, notifying its subscribers on change.
    pub fn set(&mut self, id: K, open: bool) -> bool {
        match self.apply(id, open) {
            Some(pending) => {
                pending.deliver();
                true
            }
            None => false,
        }
    }

    /// Current visibility; `false` for identifiers never seen.
    pub fn is_open<Q>(&self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Identifiers currently open, in no particular order.
    pub fn open_modals(&self) -> Vec<K> {
        self.flags
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Close every open modal. Returns how many were closed.
    pub fn clear(&mut self) -> usize {
        let pending = self.apply_clear();
        let closed = pending.len();
        pending.into_iter().for_each(Pending::deliver);
        closed
    }

    /// Call `callback` whenever the visibility of `id` changes.
    pub fn subscribe(
        &mut self,
        id: K,
        callback: impl Fn(&ModalChange<K>) + 'static,
    ) -> SubscriptionId {
        let subscription = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers
            .entry(id)
            .or_default()
            .push((subscription, Rc::new(callback)));
        subscription
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let mut removed = false;
        self.subscribers.retain(|_, list| {
            let before = list.len();
            list.retain(|(candidate, _)| *candidate != subscription);
            removed |= list.len() != before;
            !list.is_empty()
        });
        removed
    }

    /// Update the flag and collect the subscribers to notify, without
    /// calling them.
    fn apply(&mut self, id: K, open: bool) -> Option<Pending<K>> {
        let previous = self.flags.insert(id.clone(), open).unwrap_or(false);
        if previous == open {
            return None;
        }
        trace!(modal = ?id, open, "modal visibility changed");
        let subscribers = self
            .subscribers
            .get(&id)
            .map(|list| list.iter().map(|(_, s)| Rc::clone(s)).collect())
            .unwrap_or_default();
        Some(Pending {
            change: ModalChange { id, open },
            subscribers,
        })
    }

    fn apply_clear(&mut self) -> Vec<Pending<K>> {
        self.open_modals()
            .into_iter()
            .filter_map(|id| self.apply(id, false))
            .collect()
    }
}

/// Shared, single-threaded handle to one [`ModalRegistry`].
///
/// Clones point at the same registry. Subscribers run after the internal
/// borrow is released, so they may query or modify the registry.
pub struct SharedModals<K = ModalId> {
    inner: Rc<RefCell<ModalRegistry<K>>>,
}

impl<K> Clone for SharedModals<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedModals<K> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModalRegistry::default())),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for SharedModals<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedModals").field(&RefCell::borrow(&self.inner)).finish()
    }
}

impl<K> SharedModals<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, id: K) -> bool {
        self.set(id, true)
    }

    pub fn close(&self, id: K) -> bool {
        self.set(id, false)
    }

    pub fn set(&self, id: K, open: bool) -> bool {
        let pending = self.inner.borrow_mut().apply(id, open);
        match pending {
            Some(pending) => {
                pending.deliver();
                true
            }
            None => false,
        }
    }

    pub fn is_open<Q>(&self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        RefCell::borrow(&self.inner).is_open(id)
    }

    pub fn open_modals(&self) -> Vec<K> {
        RefCell::borrow(&self.inner).open_modals()
    }

    pub fn clear(&self) -> usize {
        let pending = self.inner.borrow_mut().apply_clear();
        let closed = pending.len();
        pending.into_iter().for_each(Pending::deliver);
        closed
    }

    pub fn subscribe(
        &self,
        id: K,
        callback: impl Fn(&ModalChange<K>) + 'static,
    ) -> SubscriptionId {
        self.inner.borrow_mut().subscribe(id, callback)
    }

    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.inner.borrow_mut().unsubscribe(subscription)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn unknown_ids_are_closed() {
        let registry = ModalRegistry::<ModalId>::new();
        assert!(!registry.is_open(&ModalId::EditField));
        assert!(registry.open_modals().is_empty());
    }

    #[test]
    fn open_and_close() {
        let mut registry = ModalRegistry::new();
        assert!(registry.open(ModalId::EditField));
        assert!(registry.is_open(&ModalId::EditField));
        assert!(registry.close(ModalId::EditField));
        assert!(!registry.is_open(&ModalId::EditField));
    }

    #[test]
    fn closing_an_unseen_modal_is_not_a_change() {
        let mut registry = ModalRegistry::new();
        assert!(!registry.close(ModalId::NuevaObligacion));
        assert!(!registry.is_open(&ModalId::NuevaObligacion));
    }

    #[test]
    fn several_modals_can_be_open() {
        let mut registry = ModalRegistry::new();
        registry.open(ModalId::ObligacionesModal);
        registry.open(ModalId::NuevaObligacion);
        let mut open = registry.open_modals();
        open.sort();
        assert_eq!(open, vec![ModalId::ObligacionesModal, ModalId::NuevaObligacion]);
    }

    #[test]
    fn subscribers_only_hear_their_own_modal() {
        let mut registry = ModalRegistry::new();
        let edits = Rc::new(Cell::new(0));
        let others = Rc::new(Cell::new(0));
        let e = Rc::clone(&edits);
        registry.subscribe(ModalId::EditField, move |_| e.set(e.get() + 1));
        let o = Rc::clone(&others);
        registry.subscribe(ModalId::DetalleTitular, move |_| o.set(o.get() + 1));

        registry.open(ModalId::EditField);
        registry.open(ModalId::EditField);
        registry.close(ModalId::EditField);

        assert_eq!(edits.get(), 2);
        assert_eq!(others.get(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut registry = ModalRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = registry.subscribe(ModalId::EditField, move |_| h.set(h.get() + 1));
        registry.open(ModalId::EditField);
        assert!(registry.unsubscribe(sub));
        assert!(!registry.unsubscribe(sub));
        registry.close(ModalId::EditField);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn clear_closes_everything() {
        let mut registry = ModalRegistry::new();
        let closed = Rc::new(Cell::new(0));
        let c = Rc::clone(&closed);
        registry.open(ModalId::EditField);
        registry.open(ModalId::DetalleTitular);
        registry.close(ModalId::EditField);
        registry.subscribe(ModalId::DetalleTitular, move |change| {
            assert!(!change.open);
            c.set(c.get() + 1);
        });
        registry.subscribe(ModalId::EditField, |_| panic!("already closed"));

        assert_eq!(registry.clear(), 1);
        assert_eq!(closed.get(), 1);
        assert!(registry.open_modals().is_empty());
    }

    #[test]
    fn string_keys_work_too() {
        let mut registry: ModalRegistry<String> = ModalRegistry::new();
        registry.open("editField".to_string());
        assert!(registry.is_open("editField"));
        assert!(!registry.is_open("otherModal"));
    }

    #[test]
    fn shared_subscriber_sees_new_state() {
        let modals = SharedModals::new();
        let seen = Rc::new(Cell::new(None));
        let observer = modals.clone();
        let s = Rc::clone(&seen);
        modals.subscribe(ModalId::EditField, move |change| {
            s.set(Some(observer.is_open(&change.id)));
        });
        modals.open(ModalId::EditField);
        assert_eq!(seen.get(), Some(true));
        modals.close(ModalId::EditField);
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn shared_subscriber_may_mutate_registry() {
        let modals = SharedModals::new();
        let chained = modals.clone();
        modals.subscribe(ModalId::NuevaObligacion, move |change| {
            if !change.open {
                chained.open(ModalId::ObligacionesModal);
            }
        });
        modals.open(ModalId::NuevaObligacion);
        modals.close(ModalId::NuevaObligacion);
        assert!(modals.is_open(&ModalId::ObligacionesModal));
    }

    #[test]
    fn shared_handle_reads_current_state() {
        let modals = SharedModals::new();
        modals.open(ModalId::HistoricoSubetapa);
        assert_eq!(modals.open_modals(), vec![ModalId::HistoricoSubetapa]);
        assert!(modals.is_open(&ModalId::HistoricoSubetapa));
        assert!(format!("{modals:?}").contains("HistoricoSubetapa"));
    }

    #[test]
    fn ids_parse_from_their_names() {
        for id in ModalId::ALL {
            assert_eq!(id.as_str().parse::<ModalId>(), Ok(id));
        }
        assert_eq!(
            "otherModal".parse::<ModalId>(),
            Err(UnknownModal("otherModal".into()))
        );
    }
}
