//! C3 linearization of base classes
//!
//! Given an ordered list of bases, each carrying its own method resolution
//! order, [`iter_bases`] walks the merged order of the bases and all of their
//! ancestors. The merge keeps every base's own order intact and respects the
//! order in which the bases were declared; when no such order exists the walk
//! ends with [`MetaError::InconsistentHierarchy`].

use crate::error::{MetaError, Result};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// A class handle that knows its own linearization.
///
/// Implementations must return a valid MRO: the class itself first, its
/// root ancestor last.
pub trait AncestorChain: Clone + PartialEq {
    /// The class followed by all its ancestors, most-derived first
    fn mro(&self) -> Vec<Self>;

    /// Name used in diagnostics
    fn class_name(&self) -> String;
}

/// Lazy walk over the linearization of a set of bases.
///
/// Each call to [`Iterator::next`] selects one class. After an
/// inconsistent-hierarchy error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Linearization<C> {
    sequences: Vec<VecDeque<C>>,
    bases: Vec<String>,
    emitted: usize,
    done: bool,
}

impl<C: AncestorChain> Linearization<C> {
    /// Prepare the merge for `bases`, in declaration order
    #[must_use]
    pub fn new(bases: &[C]) -> Self {
        let mut sequences: Vec<VecDeque<C>> = bases
            .iter()
            .map(|base| base.mro().into_iter().collect())
            .collect();
        sequences.push(bases.iter().cloned().collect());

        Self {
            sequences,
            bases: bases.iter().map(AncestorChain::class_name).collect(),
            emitted: 0,
            done: false,
        }
    }

    /// Find the first head that occurs in no sequence's tail
    fn good_head(&self) -> Option<C> {
        self.sequences.iter().filter_map(VecDeque::front).find_map(|head| {
            let in_tail = self
                .sequences
                .iter()
                .any(|seq| seq.iter().skip(1).any(|c| c == head));
            (!in_tail).then(|| head.clone())
        })
    }

    fn step(&mut self) -> Option<Result<C>> {
        self.sequences.retain(|seq| !seq.is_empty());
        if self.sequences.is_empty() {
            debug!(
                bases = ?self.bases,
                classes = self.emitted,
                "linearization complete"
            );
            return None;
        }

        let Some(head) = self.good_head() else {
            warn!(bases = ?self.bases, "no consistent method resolution order");
            return Some(Err(MetaError::inconsistent(self.bases.clone())));
        };

        for seq in &mut self.sequences {
            if seq.front() == Some(&head) {
                seq.pop_front();
            }
        }

        trace!(class = %head.class_name(), position = self.emitted, "selected");
        self.emitted += 1;
        Some(Ok(head))
    }
}

impl<C: AncestorChain> Iterator for Linearization<C> {
    type Item = Result<C>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.step();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
            self.sequences.clear();
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let upper = self.sequences.iter().map(VecDeque::len).sum::<usize>() + 1;
        (0, Some(upper))
    }
}

impl<C: AncestorChain> FusedIterator for Linearization<C> {}

/// Walk the linearization of `bases` one class at a time
#[must_use]
pub fn iter_bases<C: AncestorChain>(bases: &[C]) -> Linearization<C> {
    Linearization::new(bases)
}

/// Compute the full linearization of `bases`
///
/// # Errors
///
/// Returns [`MetaError::InconsistentHierarchy`] when the bases admit no
/// consistent order.
pub fn linearize<C: AncestorChain>(bases: &[C]) -> Result<Vec<C>> {
    iter_bases(bases).collect()
}
