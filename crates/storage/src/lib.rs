use std::{borrow::Cow, str::FromStr};

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use thiserror::Error;
use tracing::debug;

use catalogo_core::types::{Product, ProductDraft};

/// SQLite extended result code for a violated `UNIQUE` constraint.
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Top-level database handle that owns the SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Establishes a new SQLite connection pool for the provided connection string.
    ///
    /// File databases are created when missing.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Connect)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        apply_pragmas(&pool).await?;

        Ok(Self { pool })
    }

    /// Applies migrations located under `migrations/`.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;
        Ok(())
    }

    /// Returns a handle to interact with the `producto` table.
    pub fn products(&self) -> ProductRepository {
        ProductRepository {
            pool: self.pool.clone(),
        }
    }

    /// Exposes the inner pool when lower level access is required.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn apply_pragmas(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(pool)
        .await
        .map_err(StorageError::Pragma)?;

    sqlx::query("PRAGMA journal_mode = WAL;")
        .fetch_one(pool)
        .await
        .map_err(StorageError::Pragma)?;

    sqlx::query("PRAGMA synchronous = NORMAL;")
        .execute(pool)
        .await
        .map_err(StorageError::Pragma)?;

    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(pool)
        .await
        .map_err(StorageError::Pragma)?;

    Ok(())
}

/// General storage level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to sqlite: {0}")]
    Connect(sqlx::Error),
    #[error("failed to apply pragma: {0}")]
    Pragma(sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(MigrateError),
}

/// Repository responsible for the `producto` table.
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Inserts a new product and returns it with the id assigned by SQLite.
    pub async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO producto (nombre, codigo, precio) VALUES (?, ?, ?) \
             RETURNING id, nombre, codigo, precio",
        )
        .bind(&draft.nombre)
        .bind(&draft.codigo)
        .bind(draft.precio)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        debug!(stage = "storage", id = row.id, codigo = %row.codigo, "producto inserted");
        Ok(row.into_domain())
    }

    /// Lists every product in insertion order.
    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, nombre, codigo, precio FROM producto ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_domain).collect())
    }

    /// Looks up a product by its exact code.
    pub async fn find_by_codigo(&self, codigo: &str) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, nombre, codigo, precio FROM producto WHERE codigo = ?",
        )
        .bind(codigo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_domain))
    }

    /// Overwrites every mutable field of the product with the given id.
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "UPDATE producto SET nombre = ?, codigo = ?, precio = ? WHERE id = ? \
             RETURNING id, nombre, codigo, precio",
        )
        .bind(&draft.nombre)
        .bind(&draft.codigo)
        .bind(draft.precio)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?
        .ok_or(ProductError::NotFound(id))?;

        debug!(stage = "storage", id, "producto updated");
        Ok(row.into_domain())
    }
}

fn classify(err: sqlx::Error) -> ProductError {
    match err {
        sqlx::Error::Database(db_err)
            if db_err.code() == Some(Cow::Borrowed(SQLITE_CONSTRAINT_UNIQUE)) =>
        {
            ProductError::DuplicateCodigo
        }
        other => ProductError::Database(other),
    }
}

/// Row shape of the `producto` table.
#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub nombre: String,
    pub codigo: String,
    pub precio: f64,
}

impl ProductRow {
    pub fn into_domain(self) -> Product {
        Product {
            id: self.id,
            nombre: self.nombre,
            codigo: self.codigo,
            precio: self.precio,
        }
    }
}

/// Errors produced by [`ProductRepository`].
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("producto {0} not found")]
    NotFound(i64),
    #[error("codigo already exists")]
    DuplicateCodigo,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
