//! Shared mutable state handles.

use std::sync::Arc;

use parking_lot::RwLock;

/// A cloneable handle to shared mutable state.
///
/// Controllers (drag state, ink state machines, gap animations) are held in a
/// `State<T>` so gesture handlers, timers and animation listeners can all
/// reach the same value.
///
/// ## Usage
///
/// ```
/// use murrine_ui::State;
///
/// let counter = State::new(0usize);
/// counter.with_mut(|c| *c += 1);
/// assert_eq!(counter.get(), 1);
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> State<T> {
    /// Creates new shared state holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Executes a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read())
    }

    /// Executes a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Gets a cloned value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replaces the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for State<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| f.debug_tuple("State").field(value).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shared_between_clones() {
        let a = State::new(vec![1, 2]);
        let b = a.clone();
        b.with_mut(|v| v.push(3));
        assert_eq!(a.get(), vec![1, 2, 3]);
        assert_eq!(a, b);
    }
}
