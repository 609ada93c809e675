// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Signal, SubscriptionId, TransformError, TransformPayload, TransformState};

/// Which of the two matrices a change applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    /// The viewport ("camera") matrix.
    Viewport,
    /// The content layer matrix.
    Content,
}

/// A stored transform mutation, as seen by `after_updated` subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformChange {
    /// The matrix that was patched.
    pub kind: MatrixKind,
    /// Value before the patch.
    pub previous: TransformState,
    /// Value after the patch.
    pub current: TransformState,
}

impl TransformChange {
    /// Returns `true` if the scale component differs.
    #[must_use]
    pub fn scale_changed(&self) -> bool {
        self.previous.scale != self.current.scale
    }
}

/// Holds the viewport and content matrices.
///
/// Both start at [`TransformState::IDENTITY`]. Patches are partial merges;
/// a patch whose merged result is invalid is refused and nothing is stored.
/// Every accepted patch is stored first and then announced on
/// [`after_updated`](Self::after_updated), so subscribers never observe a
/// stale value.
#[derive(Debug, Default)]
pub struct TransformStore {
    viewport: TransformState,
    content: TransformState,
    after_updated: Signal<TransformChange>,
}

impl TransformStore {
    /// Creates a store with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current viewport matrix.
    #[must_use]
    pub fn viewport_matrix(&self) -> TransformState {
        self.viewport
    }

    /// Current content matrix.
    #[must_use]
    pub fn content_matrix(&self) -> TransformState {
        self.content
    }

    /// Merges `payload` into the viewport matrix.
    pub fn patch_viewport_matrix(
        &mut self,
        payload: TransformPayload,
    ) -> Result<TransformChange, TransformError> {
        self.patch(MatrixKind::Viewport, payload)
    }

    /// Merges `payload` into the content matrix.
    pub fn patch_content_matrix(
        &mut self,
        payload: TransformPayload,
    ) -> Result<TransformChange, TransformError> {
        self.patch(MatrixKind::Content, payload)
    }

    /// Subscribes to every accepted patch of either matrix.
    pub fn on_after_updated(
        &mut self,
        subscriber: impl FnMut(&TransformChange) + 'static,
    ) -> SubscriptionId {
        self.after_updated.subscribe(subscriber)
    }

    /// Removes an `after_updated` subscription.
    pub fn unsubscribe_after_updated(&mut self, id: SubscriptionId) -> bool {
        self.after_updated.unsubscribe(id)
    }

    /// The `after_updated` signal itself.
    pub fn after_updated(&mut self) -> &mut Signal<TransformChange> {
        &mut self.after_updated
    }

    fn patch(
        &mut self,
        kind: MatrixKind,
        payload: TransformPayload,
    ) -> Result<TransformChange, TransformError> {
        let slot = match kind {
            MatrixKind::Viewport => &mut self.viewport,
            MatrixKind::Content => &mut self.content,
        };
        let previous = *slot;
        let current = previous.merge(payload);
        current.validate()?;
        *slot = current;

        let change = TransformChange {
            kind,
            previous,
            current,
        };
        self.after_updated.emit(&change);
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{MatrixKind, TransformStore};
    use crate::{TransformError, TransformPayload, TransformState};

    #[test]
    fn starts_at_identity() {
        let store = TransformStore::new();
        assert_eq!(store.viewport_matrix(), TransformState::IDENTITY);
        assert_eq!(store.content_matrix(), TransformState::IDENTITY);
    }

    #[test]
    fn matrices_are_independent() {
        let mut store = TransformStore::new();
        store
            .patch_viewport_matrix(TransformPayload::translation(5.0, 6.0))
            .unwrap();
        store
            .patch_content_matrix(TransformPayload::scale(3.0))
            .unwrap();
        assert_eq!(store.viewport_matrix(), TransformState::new(1.0, 5.0, 6.0));
        assert_eq!(store.content_matrix(), TransformState::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_patch_is_refused_and_not_announced() {
        let calls = Rc::new(RefCell::new(0_u32));
        let mut store = TransformStore::new();
        {
            let calls = calls.clone();
            store.on_after_updated(move |_| *calls.borrow_mut() += 1);
        }
        let err = store
            .patch_viewport_matrix(TransformPayload::scale(0.0))
            .unwrap_err();
        assert_eq!(err, TransformError::NonPositiveScale(0.0));
        assert!(
            store
                .patch_content_matrix(TransformPayload::translation(f64::NAN, 0.0))
                .is_err()
        );
        assert_eq!(store.viewport_matrix(), TransformState::IDENTITY);
        assert_eq!(store.content_matrix(), TransformState::IDENTITY);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn subscribers_see_stored_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = TransformStore::new();
        let id = {
            let seen = seen.clone();
            store.on_after_updated(move |change| seen.borrow_mut().push(*change))
        };
        let change = store
            .patch_viewport_matrix(TransformPayload::scale(2.0))
            .unwrap();
        assert!(change.scale_changed());
        assert_eq!(change.kind, MatrixKind::Viewport);
        assert_eq!(seen.borrow().as_slice(), &[change]);

        assert!(store.unsubscribe_after_updated(id));
        store
            .patch_viewport_matrix(TransformPayload::translation(1.0, 1.0))
            .unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }
}
