use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut()>;

/// Ordered list of change callbacks with synchronous fan-out.
///
/// Callbacks run in registration order and receive no payload; they are
/// expected to re-read whatever state they care about. A callback must not
/// mutate the store that notified it. Subscribing or unsubscribing from inside
/// a callback is allowed and takes effect once the current fan-out has finished.
#[derive(Default)]
pub struct Observers {
    inner: Rc<ObserverList>,
}

#[derive(Default)]
struct ObserverList {
    entries: RefCell<Vec<(u64, Callback)>>,
    pending: RefCell<Vec<(u64, Callback)>>,
    retired: RefCell<Vec<u64>>,
    next_id: Cell<u64>,
}

impl ObserverList {
    fn add(&self, id: u64, callback: Callback) {
        match self.entries.try_borrow_mut() {
            Ok(mut entries) => entries.push((id, callback)),
            // Mid fan-out: join once notify releases the list
            Err(_) => self.pending.borrow_mut().push((id, callback)),
        }
    }

    fn remove(&self, id: u64) {
        self.pending.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
        match self.entries.try_borrow_mut() {
            Ok(mut entries) => entries.retain(|(entry_id, _)| *entry_id != id),
            // Mid fan-out: drop it once notify releases the list
            Err(_) => self.retired.borrow_mut().push(id),
        }
    }
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl FnMut() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.add(id, Box::new(callback));
        tracing::trace!(observer = id, "observer subscribed");

        Subscription {
            id,
            list: Rc::downgrade(&self.inner),
        }
    }

    pub fn notify(&self) {
        {
            let Ok(mut entries) = self.inner.entries.try_borrow_mut() else {
                tracing::warn!("change notification raised from inside an observer, skipped");
                return;
            };
            tracing::trace!(observers = entries.len(), "notifying observers");
            for (_, callback) in entries.iter_mut() {
                callback();
            }
        }

        let pending: Vec<(u64, Callback)> = self.inner.pending.borrow_mut().drain(..).collect();
        for (id, callback) in pending {
            self.inner.add(id, callback);
        }

        let retired: Vec<u64> = self.inner.retired.borrow_mut().drain(..).collect();
        for id in retired {
            self.inner.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        let active = self.inner.entries.try_borrow().map_or(0, |entries| entries.len());
        active + self.inner.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`Observers::subscribe`].
///
/// Dropping the handle leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    list: Weak<ObserverList>,
}

impl Subscription {
    /// Remove exactly the callback this handle was issued for.
    pub fn unsubscribe(self) {
        if let Some(list) = self.list.upgrade() {
            list.remove(self.id);
            tracing::trace!(observer = self.id, "observer unsubscribed");
        }
    }
}
