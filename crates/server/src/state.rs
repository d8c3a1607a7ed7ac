use std::sync::Arc;

use movie_explorer_core::{
    Config, FavouritesStore, KeyValueStorage, MovieCatalog, SanitizedConfig, SearchController,
    SelectionSlot,
};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn MovieCatalog>,
    favourites: FavouritesStore,
    selection: SelectionSlot,
    search: Arc<SearchController>,
}

impl AppState {
    /// Wire the page controllers to one catalog and one storage backend.
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let favourites = FavouritesStore::load(Arc::clone(&storage));
        let selection = SelectionSlot::new(storage);
        let search = Arc::new(SearchController::new(Arc::clone(&catalog), &config.search));

        Self {
            config,
            catalog,
            favourites,
            selection,
            search,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &dyn MovieCatalog {
        self.catalog.as_ref()
    }

    pub fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }

    pub fn selection(&self) -> &SelectionSlot {
        &self.selection
    }

    pub fn search(&self) -> &Arc<SearchController> {
        &self.search
    }
}
