pub mod config;
pub mod favourites;
pub mod metrics;
pub mod movies;
pub mod render;
pub mod selection;
pub mod session;
pub mod storage;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SearchConfig, ServerConfig, StorageConfig,
};
pub use favourites::{FavouritesStore, ToggleOutcome, ToggleResult};
pub use movies::{
    ApiError, MovieCatalog, MovieDetail, MovieSummary, OmdbClient, OmdbConfig, SearchResultPage,
};
pub use render::{Action, RenderedNode, Renderer};
pub use selection::SelectionSlot;
pub use session::{
    load_detail, load_selected_detail, DetailOutcome, OverlapPolicy, SearchController,
    SearchOutcome, SessionPhase, SessionSnapshot,
};
pub use storage::{KeyValueStorage, SqliteStorage, StorageError};
