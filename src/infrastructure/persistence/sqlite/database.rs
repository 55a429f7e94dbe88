//! SQLite Database - 数据库连接、建表与演示数据

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::schema::{CREATE_TABLES, DROP_ORDER, INDEXES, SEED_DATA};

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 连接串
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 内存数据库只能使用单个常驻连接
    pub in_memory: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("./data/forkful.db", 5)
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>, max_connections: u32) -> Self {
        Self {
            database_url: format!("sqlite:{}", path.as_ref().display()),
            max_connections,
            in_memory: false,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            in_memory: true,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
///
/// 每个连接都开启外键约束、WAL 模式和 5 秒 busy_timeout
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000))
        .synchronous(SqliteSynchronous::Normal);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
    if config.in_memory {
        // 连接关闭后内存数据库即被销毁
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "SQLite pool created with foreign keys, WAL mode and busy_timeout=5000ms"
    );

    Ok(pool)
}

/// 开启写事务
///
/// `BEGIN IMMEDIATE` 在事务开始时就取得写锁，并发写入在 busy_timeout 内排队
pub async fn begin_write(pool: &DbPool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// 创建缺失的表和索引
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in CREATE_TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(tables = CREATE_TABLES.len(), "Database schema ensured");
    Ok(())
}

/// City 表为空时写入演示数据，返回是否写入
pub async fn seed_demo_data_if_empty(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let (cities,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM City")
        .fetch_one(pool)
        .await?;
    if cities > 0 {
        tracing::debug!(cities, "Demo data already present, skipping seed");
        return Ok(false);
    }

    let mut tx = begin_write(pool).await?;
    for statement in SEED_DATA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Demo data seeded");
    Ok(true)
}

/// 删除全部表并重建、写入演示数据（单个事务）
pub async fn reset_database(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = begin_write(pool).await?;

    for table in DROP_ORDER {
        sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table))
            .execute(&mut *tx)
            .await?;
    }
    for statement in CREATE_TABLES.iter().chain(INDEXES).chain(SEED_DATA) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!(tables = DROP_ORDER.len(), "Database reset");
    Ok(())
}

/// 测试用：带演示数据的内存数据库
#[cfg(test)]
pub(crate) async fn seeded_test_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    seed_demo_data_if_empty(&pool).await.unwrap();
    pool
}

/// 测试用：带演示数据的文件数据库，多个连接可以并发写入
#[cfg(test)]
pub(crate) async fn seeded_file_pool(path: &Path) -> DbPool {
    let pool = create_pool(&DatabaseConfig::new(path, 5)).await.unwrap();
    run_migrations(&pool).await.unwrap();
    seed_demo_data_if_empty(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count(pool: &DbPool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // 重复执行不报错
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_only_once() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(seed_demo_data_if_empty(&pool).await.unwrap());
        assert!(!seed_demo_data_if_empty(&pool).await.unwrap());
        assert_eq!(count(&pool, "City").await, 5);
        assert_eq!(count(&pool, "Restaurant").await, 6);
        assert_eq!(count(&pool, "Review").await, 10);
    }

    #[tokio::test]
    async fn test_reset_restores_demo_data() {
        let pool = seeded_test_pool().await;
        sqlx::query("DELETE FROM Follows").execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO Owner (SIN, Name) VALUES (1, 'Extra')")
            .execute(&pool)
            .await
            .unwrap();

        reset_database(&pool).await.unwrap();

        assert_eq!(count(&pool, "Follows").await, 5);
        assert_eq!(count(&pool, "Owner").await, 5);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = seeded_test_pool().await;
        let result = sqlx::query(
            "INSERT INTO Review_User (UserId, Name, CityName, Province_State) VALUES ('x', 'X', 'Nowhere', 'Ontario')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_backed_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("forkful.db"), 2);
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(seed_demo_data_if_empty(&pool).await.unwrap());
        assert_eq!(count(&pool, "Menu_Item").await, 7);
    }
}
