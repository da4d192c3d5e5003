//! Positional data join.
//!
//! Binds a new data sequence onto an existing list of visual elements by
//! index: surplus elements exit, overlapping ones are updated in place and
//! missing ones enter at the end.

use std::ops::Range;

/// Index ranges produced by joining `incoming` data onto `existing` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Elements to remove (indices into the old element list).
    pub exit: Range<usize>,
    /// Elements kept and refreshed with the datum at the same index.
    pub update: Range<usize>,
    /// Data without an element yet (indices into the new data).
    pub enter: Range<usize>,
}

impl Join {
    pub fn compute(existing: usize, incoming: usize) -> Self {
        let kept = existing.min(incoming);
        Self {
            exit: kept..existing,
            update: 0..kept,
            enter: kept..incoming,
        }
    }

    /// Apply the join to `elements`.
    ///
    /// `refresh` updates a surviving element from its datum, `make` builds an
    /// element for an entering datum.
    pub fn apply<T, D, M, U>(elements: &mut Vec<T>, data: &[D], mut make: M, mut refresh: U) -> Self
    where
        M: FnMut(usize, &D) -> T,
        U: FnMut(&mut T, usize, &D),
    {
        let join = Self::compute(elements.len(), data.len());
        elements.truncate(join.update.end);
        for (i, element) in elements.iter_mut().enumerate() {
            refresh(element, i, &data[i]);
        }
        for i in join.enter.clone() {
            elements.push(make(i, &data[i]));
        }
        join
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_shrink_and_grow() {
        assert_eq!(
            Join::compute(5, 3),
            Join {
                exit: 3..5,
                update: 0..3,
                enter: 3..3
            }
        );
        assert_eq!(
            Join::compute(2, 4),
            Join {
                exit: 2..2,
                update: 0..2,
                enter: 2..4
            }
        );
    }

    #[test]
    fn test_apply_reuses_by_index() {
        // (value, generation)
        let mut elements = vec![(10, 0), (20, 0), (30, 0)];
        let join = Join::apply(
            &mut elements,
            &[1, 2],
            |_, &d| (d, 1),
            |e, _, &d| e.0 = d,
        );

        assert_eq!(join.exit, 2..3);
        // Survivors keep their generation, only the value changes.
        assert_eq!(elements, vec![(1, 0), (2, 0)]);

        Join::apply(&mut elements, &[7, 8, 9], |_, &d| (d, 2), |e, _, &d| e.0 = d);
        assert_eq!(elements, vec![(7, 0), (8, 0), (9, 2)]);
    }
}
