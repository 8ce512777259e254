mod last_run;
mod settings;

pub use last_run::LastRunRecord;
pub use settings::Settings;
