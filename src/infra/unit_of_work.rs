//! Unit of Work pattern implementation.
//!
//! The unit of work hands out one repository per table, all bound to the same
//! connection. Outside a transaction every write commits on its own; inside
//! [`UnitOfWork::transaction`] the repositories come from the
//! [`TransactionContext`] and commit or roll back together.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, IsolationLevel,
    TransactionTrait,
};

use super::repositories::entities::{
    course, course_instructor, department, enrollment, instructor, office_assignment, student,
};
use super::repositories::Repository;
use crate::errors::{AppError, AppResult};

/// Repository access over a single connection.
///
/// Implemented by the pool-backed [`Persistence`] and by the
/// [`TransactionContext`] of an open transaction, so the same code reads the
/// same way in both places.
pub trait RepositoryScope {
    type Conn: ConnectionTrait;

    fn connection(&self) -> &Self::Conn;

    fn students(&self) -> Repository<'_, student::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn enrollments(&self) -> Repository<'_, enrollment::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn courses(&self) -> Repository<'_, course::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn course_assignments(&self) -> Repository<'_, course_instructor::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn instructors(&self) -> Repository<'_, instructor::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn office_assignments(&self) -> Repository<'_, office_assignment::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }

    fn departments(&self) -> Repository<'_, department::ActiveModel, Self::Conn> {
        Repository::new(self.connection())
    }
}

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the service level or run against SQLite.
#[async_trait]
pub trait UnitOfWork: RepositoryScope<Conn = DatabaseConnection> + Send + Sync {
    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed when the closure returns `Ok` and rolled
    /// back otherwise. Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access within an open transaction.
///
/// Every repository taken from the context writes through the same
/// transaction. Only the context may be used while it is alive: going
/// through the pool instead would not see uncommitted rows.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

impl RepositoryScope for TransactionContext<'_> {
    type Conn = DatabaseTransaction;

    fn connection(&self) -> &DatabaseTransaction {
        self.txn
    }
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RepositoryScope for Persistence {
    type Conn = DatabaseConnection;

    fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::save_failed)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
