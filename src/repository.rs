use crate::models::{CatalogProduct, ListProduct, ShoppingList, User};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// StoreError
///
/// Domain failures reported by the repository. The display strings are sent to
/// clients verbatim as the `error` field of the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Shopping list with this name already exists")]
    DuplicateName,
    #[error("Shopping list not found")]
    ListNotFound,
    // Raised by tag.
    #[error("Product not found")]
    ProductNotFound,
    // Raised by remove.
    #[error("Product not found in shopping list")]
    ProductNotInList,
}

/// Repository Trait
///
/// The contract every handler talks to. Handlers never see the concrete store,
/// so tests can swap in a fresh or pre-filled instance per case.
///
/// **Send + Sync + async_trait** keep `Arc<dyn Repository>` usable inside axum handlers.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Lists ---
    // Fails with DuplicateName if any list already uses `name`.
    async fn create_list(&self, name: String, owner: String) -> Result<ShoppingList, StoreError>;
    // Returns whether a list was removed. Callers treat both outcomes as success.
    async fn delete_list(&self, id: &str) -> bool;
    async fn get_list(&self, id: &str) -> Option<ShoppingList>;
    // Lists where `user_id` is the owner or appears in `invited`, in creation order.
    async fn lists_for_user(&self, user_id: &str) -> Vec<ShoppingList>;

    // --- Membership ---
    // Appends `invited` verbatim; duplicates and order are preserved.
    async fn invite(&self, list_id: &str, invited: Vec<String>)
    -> Result<ShoppingList, StoreError>;

    // --- Products inside a list ---
    async fn add_product(
        &self,
        list_id: &str,
        product: ListProduct,
    ) -> Result<Vec<ListProduct>, StoreError>;
    // Sets `solved` on the first product whose id matches.
    async fn tag_product(
        &self,
        list_id: &str,
        product_id: &str,
        solved: bool,
    ) -> Result<ShoppingList, StoreError>;
    // Removes every product whose id matches; the list is untouched if none do.
    async fn remove_product(
        &self,
        list_id: &str,
        product_id: &str,
    ) -> Result<ShoppingList, StoreError>;

    // --- Reference data ---
    async fn catalog(&self) -> Vec<CatalogProduct>;
    // Seeded users. No route reads them; owners and invitees are never checked.
    async fn get_user(&self, id: &str) -> Option<User>;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

#[derive(Debug, Default)]
struct Collections {
    lists: Vec<ShoppingList>,
    users: Vec<User>,
    catalog: Vec<CatalogProduct>,
}

/// InMemoryRepository
///
/// Process-local store. Everything is lost on restart.
///
/// Each method takes the lock exactly once and finishes its lookups and mutation
/// under it, so a name check and the insert that follows cannot interleave with
/// another request. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    data: RwLock<Collections>,
}

impl InMemoryRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the given collections.
    pub fn with_data(
        lists: Vec<ShoppingList>,
        users: Vec<User>,
        catalog: Vec<CatalogProduct>,
    ) -> Self {
        Self {
            data: RwLock::new(Collections {
                lists,
                users,
                catalog,
            }),
        }
    }

    /// The store the server boots with: one demo list, one user, one catalog product.
    pub fn seeded() -> Self {
        let mut banana = serde_json::Map::new();
        banana.insert("id".to_string(), "banana1".into());
        banana.insert("solved".to_string(), false.into());

        let demo_list = ShoppingList {
            id: "test123".to_string(),
            name: "Test List".to_string(),
            owner: "user123".to_string(),
            products: vec![ListProduct::new(banana)],
            invited: vec!["user1".to_string()],
            archived: false,
        };

        let user = User {
            id: "user123".to_string(),
            email: "test@email.com".to_string(),
            name: "Test User".to_string(),
        };

        let catalog = vec![CatalogProduct {
            id: "banana1".to_string(),
            name: "Banán".to_string(),
        }];

        Self::with_data(vec![demo_list], vec![user], catalog)
    }
}

fn find_list_mut<'a>(
    lists: &'a mut [ShoppingList],
    id: &str,
) -> Result<&'a mut ShoppingList, StoreError> {
    lists
        .iter_mut()
        .find(|list| list.id == id)
        .ok_or(StoreError::ListNotFound)
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_list(&self, name: String, owner: String) -> Result<ShoppingList, StoreError> {
        let mut data = self.data.write();
        if data.lists.iter().any(|list| list.name == name) {
            return Err(StoreError::DuplicateName);
        }

        let list = ShoppingList::new(name, owner);
        data.lists.push(list.clone());
        Ok(list)
    }

    async fn delete_list(&self, id: &str) -> bool {
        let mut data = self.data.write();
        let before = data.lists.len();
        data.lists.retain(|list| list.id != id);
        data.lists.len() != before
    }

    async fn get_list(&self, id: &str) -> Option<ShoppingList> {
        self.data
            .read()
            .lists
            .iter()
            .find(|list| list.id == id)
            .cloned()
    }

    async fn lists_for_user(&self, user_id: &str) -> Vec<ShoppingList> {
        self.data
            .read()
            .lists
            .iter()
            .filter(|list| list.is_visible_to(user_id))
            .cloned()
            .collect()
    }

    async fn invite(
        &self,
        list_id: &str,
        invited: Vec<String>,
    ) -> Result<ShoppingList, StoreError> {
        let mut data = self.data.write();
        let list = find_list_mut(&mut data.lists, list_id)?;
        list.invited.extend(invited);
        Ok(list.clone())
    }

    async fn add_product(
        &self,
        list_id: &str,
        product: ListProduct,
    ) -> Result<Vec<ListProduct>, StoreError> {
        let mut data = self.data.write();
        let list = find_list_mut(&mut data.lists, list_id)?;
        list.products.push(product);
        Ok(list.products.clone())
    }

    async fn tag_product(
        &self,
        list_id: &str,
        product_id: &str,
        solved: bool,
    ) -> Result<ShoppingList, StoreError> {
        let mut data = self.data.write();
        let list = find_list_mut(&mut data.lists, list_id)?;
        let product = list
            .products
            .iter_mut()
            .find(|product| product.id() == Some(product_id))
            .ok_or(StoreError::ProductNotFound)?;
        product.set_solved(solved);
        Ok(list.clone())
    }

    async fn remove_product(
        &self,
        list_id: &str,
        product_id: &str,
    ) -> Result<ShoppingList, StoreError> {
        let mut data = self.data.write();
        let list = find_list_mut(&mut data.lists, list_id)?;
        let before = list.products.len();
        list.products
            .retain(|product| product.id() != Some(product_id));
        if list.products.len() == before {
            return Err(StoreError::ProductNotInList);
        }
        Ok(list.clone())
    }

    async fn catalog(&self) -> Vec<CatalogProduct> {
        self.data.read().catalog.clone()
    }

    async fn get_user(&self, id: &str) -> Option<User> {
        self.data
            .read()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }
}
