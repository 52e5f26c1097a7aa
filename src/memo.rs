//! Explicit-dependency memo cell.

/// Caches a value together with the dependencies it was computed from.
///
/// [`Memo::get_or_update`] recomputes only when the supplied dependencies
/// differ from the stored ones. Each recomputation bumps
/// [`Memo::generation`], which downstream memos can use as a dependency
/// instead of comparing the value itself.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::Memo;
///
/// let mut memo = Memo::new();
/// let mut runs = 0;
/// memo.get_or_update(1, || { runs += 1; "a" });
/// memo.get_or_update(1, || { runs += 1; "b" });
/// assert_eq!(runs, 1);
/// assert_eq!(*memo.get_or_update(2, || "c"), "c");
/// assert_eq!(memo.generation(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Memo<D, T> {
    deps: Option<D>,
    value: Option<T>,
    generation: u64,
}

impl<D: PartialEq, T> Memo<D, T> {
    pub fn new() -> Self {
        Self {
            deps: None,
            value: None,
            generation: 0,
        }
    }

    /// Returns the cached value, recomputing it if `deps` changed.
    pub fn get_or_update(&mut self, deps: D, compute: impl FnOnce() -> T) -> &T {
        if self.deps.as_ref() != Some(&deps) {
            self.value = None;
            self.deps = Some(deps);
        }
        let generation = &mut self.generation;
        self.value.get_or_insert_with(|| {
            *generation += 1;
            compute()
        })
    }

    /// The cached value, if one has been computed.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Number of times the value has been computed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<D: PartialEq, T> Default for Memo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_on_dependency_change() {
        let mut memo = Memo::new();
        assert_eq!(*memo.get_or_update((1, false), || 10), 10);
        assert_eq!(*memo.get_or_update((1, false), || 20), 10);
        assert_eq!(*memo.get_or_update((1, true), || 30), 30);
        assert_eq!(memo.generation(), 2);
    }

    #[test]
    fn test_empty_memo() {
        let memo: Memo<u8, String> = Memo::default();
        assert!(memo.get().is_none());
        assert_eq!(memo.generation(), 0);
    }
}
