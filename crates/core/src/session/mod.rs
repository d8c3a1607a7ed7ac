//! Page controllers: the search session and detail loading.

mod controller;
mod debounce;
mod detail;
mod state;

pub use controller::{SearchController, SearchOutcome};
pub use debounce::Debouncer;
pub use detail::{load_detail, load_selected_detail, DetailOutcome};
pub use state::{
    FetchMode, OverlapPolicy, SearchSession, SearchTicket, SessionPhase, SessionSnapshot, Settled,
};
