//! Scoped checkout
//!
//! [`CheckoutGuard`] records the revision checked out when it is acquired and
//! checks it out again when released. Release happens on every exit path:
//! explicitly through [`CheckoutGuard::restore`], or on drop when a
//! procedure bails out early. A guard that never switched revisions releases
//! without touching the working tree.

use std::cell::Cell;

use crate::error::VcsError;
use crate::vcs::VersionControl;

/// Restores the original revision when released
#[must_use = "dropping the guard restores the original revision immediately"]
pub struct CheckoutGuard<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    original: Option<String>,
    switched: Cell<bool>,
}

impl<'a, V: VersionControl + ?Sized> CheckoutGuard<'a, V> {
    /// Record the current revision
    ///
    /// # Errors
    /// Returns [`VcsError`] if the current revision cannot be determined;
    /// nothing has been checked out in that case.
    pub fn acquire(vcs: &'a V) -> Result<Self, VcsError> {
        let original = vcs.current_ref()?;
        tracing::debug!("Recorded original revision {original}");
        Ok(Self {
            vcs,
            original: Some(original),
            switched: Cell::new(false),
        })
    }

    /// Revision that will be restored
    #[inline]
    #[must_use]
    pub fn original(&self) -> &str {
        self.original.as_deref().unwrap_or_default()
    }

    /// True once any checkout has been attempted through the guard
    #[inline]
    #[must_use]
    pub fn switched(&self) -> bool {
        self.switched.get()
    }

    /// Check out `reference` while the guard is held
    ///
    /// # Errors
    /// Returns [`VcsError`] if the checkout fails.
    pub fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        // A failed checkout may still have modified the tree.
        self.switched.set(true);
        self.vcs.checkout(reference)
    }

    /// Restore the original revision and report the outcome
    ///
    /// # Errors
    /// Returns [`VcsError`] if the checkout fails.
    pub fn restore(mut self) -> Result<String, VcsError> {
        let original = self.original.take().unwrap_or_default();
        if !self.switched.get() {
            tracing::debug!("Still on {original}, nothing to restore");
            return Ok(original);
        }
        self.vcs.checkout(&original)?;
        tracing::info!("Restored original revision {original}");
        Ok(original)
    }
}

impl<V: VersionControl + ?Sized> Drop for CheckoutGuard<'_, V> {
    fn drop(&mut self) {
        let Some(original) = self.original.take() else {
            return;
        };
        if !self.switched.get() {
            return;
        }
        match self.vcs.checkout(&original) {
            Ok(()) => tracing::warn!("Restored original revision {original} after an early exit"),
            Err(e) => tracing::error!(
                "Could not restore original revision {original}; the working tree is left on another revision: {e}"
            ),
        }
    }
}

impl<V: VersionControl + ?Sized> std::fmt::Debug for CheckoutGuard<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutGuard")
            .field("original", &self.original)
            .field("switched", &self.switched.get())
            .finish_non_exhaustive()
    }
}
