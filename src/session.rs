//! Shopper Session
//!
//! A shopper's cart and wishlist, mirrored to a [`SessionStore`] on every
//! change. The store is a port: browsers, files or the server-side cart
//! tables can back it without the cart logic knowing.

use std::convert::Infallible;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{Cart, CartError, LineKey},
    catalog::{CatalogItem, Variant},
    wishlist::Wishlist,
};

/// Persisted shopper state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot<'a> {
    /// Cart
    pub cart: Cart<'a>,

    /// Wishlist
    pub wishlist: Wishlist,
}

/// Storage for a shopper's session.
pub trait SessionStore<'a> {
    /// Storage error.
    type Error;

    /// Load the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    fn load(&self) -> Result<Option<SessionSnapshot<'a>>, Self::Error>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    fn save(&mut self, snapshot: &SessionSnapshot<'a>) -> Result<(), Self::Error>;

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Session store held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore<'a> {
    snapshot: Option<SessionSnapshot<'a>>,
}

impl<'a> MemorySessionStore<'a> {
    /// Empty store.
    pub fn new() -> Self {
        Self { snapshot: None }
    }

    /// Currently stored snapshot.
    pub fn snapshot(&self) -> Option<&SessionSnapshot<'a>> {
        self.snapshot.as_ref()
    }
}

impl<'a> SessionStore<'a> for MemorySessionStore<'a> {
    type Error = Infallible;

    fn load(&self) -> Result<Option<SessionSnapshot<'a>>, Self::Error> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &SessionSnapshot<'a>) -> Result<(), Self::Error> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.snapshot = None;
        Ok(())
    }
}

/// Errors raised by session operations.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError<E> {
    /// Cart rule violation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Storage failure.
    #[error("session storage failed")]
    Store(#[source] E),
}

/// A shopper's live cart and wishlist.
#[derive(Debug)]
pub struct ShopperSession<'a, S> {
    store: S,
    snapshot: SessionSnapshot<'a>,
}

impl<'a, S> ShopperSession<'a, S>
where
    S: SessionStore<'a>,
    S::Error: std::error::Error + 'static,
{
    /// Restore a session from `store`, starting empty when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when loading fails.
    pub fn restore(store: S) -> Result<Self, SessionError<S::Error>> {
        let snapshot = store.load().map_err(SessionError::Store)?.unwrap_or_default();

        Ok(Self { store, snapshot })
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.snapshot.cart
    }

    /// Current wishlist.
    pub fn wishlist(&self) -> &Wishlist {
        &self.snapshot.wishlist
    }

    /// Add to the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] for cart rule violations and
    /// [`SessionError::Store`] when persisting fails.
    pub fn add_to_cart(
        &mut self,
        item: CatalogItem<'a>,
        variant: Option<Variant<'a>>,
        quantity: u32,
    ) -> Result<LineKey, SessionError<S::Error>> {
        let key = self.snapshot.cart.add(item, variant, quantity)?;

        self.persist()?;

        Ok(key)
    }

    /// Update a line quantity, zero removing it, and persist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cart`] when the line does not exist and
    /// [`SessionError::Store`] when persisting fails.
    pub fn update_quantity(
        &mut self,
        key: LineKey,
        quantity: u32,
    ) -> Result<(), SessionError<S::Error>> {
        self.snapshot.cart.update_quantity(key, quantity)?;

        self.persist()
    }

    /// Remove a line and persist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when persisting fails.
    pub fn remove_from_cart(&mut self, key: LineKey) -> Result<bool, SessionError<S::Error>> {
        let removed = self.snapshot.cart.remove(key);

        self.persist()?;

        Ok(removed)
    }

    /// Empty the cart after a completed order and persist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when persisting fails.
    pub fn clear_cart(&mut self) -> Result<(), SessionError<S::Error>> {
        self.snapshot.cart.clear();

        self.persist()
    }

    /// Toggle an item on the wishlist and persist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when persisting fails.
    pub fn toggle_wishlist(&mut self, item: Uuid) -> Result<bool, SessionError<S::Error>> {
        let listed = self.snapshot.wishlist.toggle(item);

        self.persist()?;

        Ok(listed)
    }

    /// Drop cart and wishlist on sign out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when clearing storage fails.
    pub fn sign_out(&mut self) -> Result<(), SessionError<S::Error>> {
        self.snapshot = SessionSnapshot::default();

        self.store.clear().map_err(SessionError::Store)
    }

    /// Consume the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), SessionError<S::Error>> {
        self.store.save(&self.snapshot).map_err(SessionError::Store)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use rusty_money::{Money, iso::BRL};
    use testresult::TestResult;

    use super::*;

    fn item() -> CatalogItem<'static> {
        CatalogItem::new(Uuid::now_v7(), "Scarf", Money::from_minor(35_00, BRL))
    }

    #[test]
    fn every_change_is_mirrored_to_the_store() -> TestResult {
        let mut session = ShopperSession::restore(MemorySessionStore::new())?;
        let scarf = item();
        let id = scarf.id;

        let key = session.add_to_cart(scarf, None, 2)?;
        session.toggle_wishlist(id)?;

        let store = session.into_store();
        let stored = store.snapshot().cloned().unwrap_or_default();

        assert_eq!(stored.cart.lines().len(), 1);
        assert_eq!(stored.cart.lines().first().map(|line| line.key()), Some(key));
        assert!(stored.wishlist.contains(id));

        Ok(())
    }

    #[test]
    fn restore_resumes_stored_state() -> TestResult {
        let mut session = ShopperSession::restore(MemorySessionStore::new())?;

        session.add_to_cart(item(), None, 1)?;

        let restored = ShopperSession::restore(session.into_store())?;

        assert_eq!(restored.cart().lines().len(), 1);

        Ok(())
    }

    #[test]
    fn sign_out_clears_cart_wishlist_and_store() -> TestResult {
        let mut session = ShopperSession::restore(MemorySessionStore::new())?;
        let scarf = item();
        let id = scarf.id;

        session.add_to_cart(scarf, None, 1)?;
        session.toggle_wishlist(id)?;
        session.sign_out()?;

        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());
        assert!(session.into_store().snapshot().is_none());

        Ok(())
    }

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("storage unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    #[derive(Debug, Default)]
    struct FailingStore {
        writes: u32,
    }

    impl<'a> SessionStore<'a> for FailingStore {
        type Error = Unavailable;

        fn load(&self) -> Result<Option<SessionSnapshot<'a>>, Self::Error> {
            Ok(None)
        }

        fn save(&mut self, _snapshot: &SessionSnapshot<'a>) -> Result<(), Self::Error> {
            self.writes += 1;
            Err(Unavailable)
        }

        fn clear(&mut self) -> Result<(), Self::Error> {
            Err(Unavailable)
        }
    }

    #[test]
    fn storage_failures_surface() -> TestResult {
        let mut session = ShopperSession::restore(FailingStore::default())?;

        let result = session.add_to_cart(item(), None, 1);

        assert!(matches!(result, Err(SessionError::Store(Unavailable))));
        assert_eq!(session.into_store().writes, 1);

        Ok(())
    }
}
