use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use sqlx::{any::AnyConnectOptions, AnyPool, ConnectOptions, migrate::Migrator};
use sqlx::any::AnyPoolOptions;
use std::{path::PathBuf, str::FromStr};
use std::sync::Once;
use tracing::{debug, warn};
use url::Url;

use crate::storage::SettingsStore;

// Ensure drivers are installed exactly once for sqlx::any
static INSTALL_DRIVERS: Once = Once::new();

// Embed SQL migrations from the migrations/ directory
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed settings store.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    // Create a connection pool. If database_url is None, use a SQLite file in the user's
    // data directory.
    pub async fn connect(database_url: Option<&str>) -> Result<Self> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let url = match database_url {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => default_sqlite_url()?,
        };

        let opts = AnyConnectOptions::from_str(&url)
            .with_context(|| format!("invalid database URL: {url}"))?;
        // Quiet by default; callers can enable SQLX_LOG if they want
        let opts = opts.disable_statement_logging();

        // An in-memory SQLite database lives and dies with its connection
        let pool_opts = if url.contains(":memory:") {
            AnyPoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            AnyPoolOptions::new().max_connections(4)
        };

        let pool = pool_opts
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to connect to database: {url}"))?;

        debug!(%url, "settings database connected");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        match MIGRATOR.run(&self.pool).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let msg = e.to_string();
                let looks_modified = msg.contains("was previously applied but has been modified");
                if looks_modified {
                    warn!("migration ledger out of date, resetting");
                    sqlx::query("DELETE FROM _sqlx_migrations")
                        .execute(&self.pool)
                        .await
                        .context("resetting migration ledger")?;
                    MIGRATOR.run(&self.pool).await.context("running migrations after ledger reset")
                } else {
                    Err(e).context("running migrations")
                }
            }
        }
    }

    /// Connect and bring the schema up to date.
    pub async fn open(database_url: Option<&str>) -> Result<Self> {
        let db = Self::connect(database_url).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &AnyPool { &self.pool }
}

#[async_trait::async_trait]
impl SettingsStore for Database {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query_scalar::<_, String>("SELECT payload FROM settings WHERE name = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("reading setting {key}"))?;
        Ok(row)
    }

    async fn put_setting(&self, key: &str, payload: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings(name, payload) VALUES (?, ?)\n             ON CONFLICT(name) DO UPDATE SET payload=excluded.payload, updated_at=CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(payload)
        .execute(&self.pool)
        .await
        .with_context(|| format!("writing setting {key}"))?;
        Ok(())
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "toonshelf", "toonshelf")
        .context("unable to determine the user's home directory")
}

fn default_sqlite_url() -> Result<String> {
    let proj = project_dirs()?;
    let mut path: PathBuf = proj.data_dir().to_path_buf();
    std::fs::create_dir_all(&path).with_context(|| format!("creating data dir: {}", path.display()))?;
    path.push("toonshelf.db");
    sqlite_url_for(&path)
}

/// Read-write-create SQLite URL for an absolute file path, percent-encoded.
pub(crate) fn sqlite_url_for(path: &std::path::Path) -> Result<String> {
    let file_url = Url::from_file_path(path)
        .map_err(|_| anyhow!("database path must be absolute: {}", path.display()))?;
    Ok(format!("sqlite://{}?mode=rwc", file_url.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_db(dir: &tempfile::TempDir) -> Database {
        let url = sqlite_url_for(&dir.path().join("settings.db")).unwrap();
        Database::open(Some(&url)).await.unwrap()
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir).await;
        assert_eq!(db.get_setting("FavoriteWebtoons").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir).await;
        db.put_setting("k", "[1]").await.unwrap();
        db.put_setting("k", "[1,2]").await.unwrap();
        assert_eq!(db.get_setting("k").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = temp_db(&dir).await;
            db.put_setting("k", "kept").await.unwrap();
            db.pool().close().await;
        }
        let db = temp_db(&dir).await;
        assert_eq!(db.get_setting("k").await.unwrap().as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir).await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn modified_migration_resets_ledger_and_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir).await;
        db.put_setting("k", "kept").await.unwrap();
        sqlx::query("UPDATE _sqlx_migrations SET checksum = X'00'")
            .execute(db.pool())
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        assert_eq!(db.get_setting("k").await.unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn sqlite_url_escapes_reserved_characters() {
        let url = sqlite_url_for(std::path::Path::new("/tmp/my dir/x.db")).unwrap();
        assert_eq!(url, "sqlite:///tmp/my%20dir/x.db?mode=rwc");
        let url = sqlite_url_for(std::path::Path::new("/tmp/a#b?c%d/x.db")).unwrap();
        assert_eq!(url, "sqlite:///tmp/a%23b%3Fc%25d/x.db?mode=rwc");
    }

    #[test]
    fn sqlite_url_rejects_relative_paths() {
        assert!(sqlite_url_for(std::path::Path::new("data/x.db")).is_err());
    }

    #[tokio::test]
    async fn opens_database_under_awkward_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let awkward = dir.path().join("odd #1 ?100%");
        std::fs::create_dir_all(&awkward).unwrap();
        let url = sqlite_url_for(&awkward.join("settings.db")).unwrap();
        let db = Database::open(Some(&url)).await.unwrap();
        db.put_setting("k", "v").await.unwrap();
        assert_eq!(db.get_setting("k").await.unwrap().as_deref(), Some("v"));
        assert!(awkward.join("settings.db").exists());
    }
}
