pub mod backup;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod qr;
pub mod report;
pub mod rounds;
pub mod scan;
pub mod summary;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// `--site` if given, otherwise `default_site` from the configuration.
pub(crate) fn resolve_site(site: &Option<String>, cfg: &Config) -> AppResult<String> {
    site.clone()
        .or_else(|| cfg.default_site.clone())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            AppError::Config("no site given: pass --site or set `default_site` in the config".into())
        })
}
