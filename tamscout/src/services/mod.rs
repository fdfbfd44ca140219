mod credentials;
mod export;
mod tam;

pub use credentials::{
    mask_key, CredentialResolver, CredentialSource, CredentialStatus, PROVIDER_API_KEY_SETTING,
};
pub use export::{export_filename, render_csv, CSV_HEADERS};
pub use tam::{TamCalculator, TamEstimate, TierBreakdown, TierTotals};
