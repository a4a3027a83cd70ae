/// Generator of numbers series.
use crate::field::FieldValueType;
use std::num::NonZeroU8;

/// Generator (iterator) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SeriesWithStep {
    max: FieldValueType,
    step: NonZeroU8,
    next: Option<FieldValueType>,
}

impl SeriesWithStep {
    /// Produces `min, min+step, ...` up to `max` inclusively.
    ///
    /// Series is empty if `min` is greater than `max`,
    /// and stops before the value overflows the type.
    #[inline]
    pub(crate) fn new(min: FieldValueType, max: FieldValueType, step: NonZeroU8) -> Self {
        Self {
            max,
            step,
            next: (min <= max).then_some(min),
        }
    }
}

impl Iterator for SeriesWithStep {
    type Item = FieldValueType;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.checked_add(self.step.get()).filter(|next| *next <= self.max);
        Some(current)
    }
}
