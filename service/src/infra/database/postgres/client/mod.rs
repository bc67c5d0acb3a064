//! Postgres database clients lazily acquiring pooled [`connection`]s.
//!
//! [`connection`]: super::connection

pub mod non_tx;
pub mod tx;

use std::future::Future;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database;

pub use self::{non_tx::NonTx, tx::Tx};

/// Returns the value stored in the provided `slot`, initializing it with the
/// `init` first if the `slot` is empty.
///
/// Concurrent callers observing an empty `slot` run `init` only once.
///
/// # Errors
///
/// If the `init` fails.
async fn get_or_init<T, F, Fut>(
    slot: &RwLock<Option<T>>,
    init: F,
) -> Result<RwLockReadGuard<'_, T>, Traced<database::Error>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Traced<database::Error>>>,
{
    let read = slot.read().await;
    let guard = if read.is_some() {
        read
    } else {
        drop(read);

        let mut write = slot.write().await;
        if write.is_none() {
            *write = Some(init().await.map_err(tracerr::wrap!())?);
        }
        write.downgrade()
    };

    Ok(RwLockReadGuard::map(guard, |conn| {
        conn.as_ref()
            .expect("connection cannot be dropped while guard is alive")
    }))
}

/// Implements [`Connection`] for the provided client type by delegating to the
/// lazily acquired connection returned by its `connection()` method.
///
/// [`Connection`]: super::Connection
macro_rules! impl_client_connection {
    ($ty:ty) => {
        impl $crate::infra::database::postgres::Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<
                Vec<::tokio_postgres::Row>,
                ::tracerr::Traced<$crate::infra::database::Error>,
            >
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let conn =
                    self.connection().await.map_err(::tracerr::wrap!())?;
                $crate::infra::database::postgres::Connection::query(
                    &*conn, stmt, params,
                )
                .await
                .map_err(::tracerr::wrap!())
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<
                Option<::tokio_postgres::Row>,
                ::tracerr::Traced<$crate::infra::database::Error>,
            >
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let conn =
                    self.connection().await.map_err(::tracerr::wrap!())?;
                $crate::infra::database::postgres::Connection::query_opt(
                    &*conn, stmt, params,
                )
                .await
                .map_err(::tracerr::wrap!())
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<u64, ::tracerr::Traced<$crate::infra::database::Error>>
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let conn =
                    self.connection().await.map_err(::tracerr::wrap!())?;
                $crate::infra::database::postgres::Connection::exec(
                    &*conn, stmt, params,
                )
                .await
                .map_err(::tracerr::wrap!())
            }
        }
    };
}
use impl_client_connection;
