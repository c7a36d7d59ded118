pub mod favorites;
pub mod store;

pub use favorites::{Favorites, FavoritesError, STORAGE_KEY};
pub use store::{CatalogState, CatalogStore};
