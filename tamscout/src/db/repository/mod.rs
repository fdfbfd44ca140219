mod industries;
mod research;
mod settings;

pub use industries::IndustryRepository;
pub use research::{ResearchRepository, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use settings::SettingsRepository;
