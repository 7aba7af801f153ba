use std::path::PathBuf;

use crate::vault::config::VaultConfig;

#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub vault_root: PathBuf,
    pub daily_logs_dir: PathBuf,
    pub tracker_file: PathBuf,
    pub logger_file: PathBuf,
    pub opportunities_dir: PathBuf,
}

pub fn resolve_paths(cfg: &VaultConfig) -> VaultPaths {
    let vault_root = cfg.vault_path.clone();
    let opportunities_dir = match &cfg.opportunities_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => vault_root.join(dir),
        None => vault_root.clone(),
    };

    VaultPaths {
        daily_logs_dir: vault_root.join(&cfg.daily_logs_dir),
        tracker_file: vault_root.join(&cfg.tracker_file),
        logger_file: vault_root.join(&cfg.logger_file),
        opportunities_dir,
        vault_root,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_paths;
    use crate::vault::config::VaultConfig;
    use std::path::PathBuf;

    fn cfg(opportunities_dir: Option<&str>) -> VaultConfig {
        VaultConfig {
            vault_path: PathBuf::from("/vault"),
            daily_logs_dir: "DailyLogs".to_string(),
            tracker_file: "00 Tracker.md".to_string(),
            logger_file: "01 Logger.md".to_string(),
            opportunities_dir: opportunities_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn files_resolve_under_vault_root() {
        let paths = resolve_paths(&cfg(None));
        assert_eq!(paths.daily_logs_dir, PathBuf::from("/vault/DailyLogs"));
        assert_eq!(paths.tracker_file, PathBuf::from("/vault/00 Tracker.md"));
        assert_eq!(paths.logger_file, PathBuf::from("/vault/01 Logger.md"));
        assert_eq!(paths.opportunities_dir, PathBuf::from("/vault"));
    }

    #[test]
    fn relative_opportunities_dir_joins_vault_root() {
        let paths = resolve_paths(&cfg(Some("Opportunities")));
        assert_eq!(paths.opportunities_dir, PathBuf::from("/vault/Opportunities"));

        let paths = resolve_paths(&cfg(Some("/elsewhere")));
        assert_eq!(paths.opportunities_dir, PathBuf::from("/elsewhere"));
    }
}
