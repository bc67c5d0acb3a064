//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection},
};

use super::{get_or_init, impl_client_connection};

/// Postgres client running every statement in its own implicit transaction.
///
/// Cloning shares the acquired pooled connection.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] the connections are acquired from.
    pub(crate) pool: connection::Pool,

    /// Pooled connection, acquired on first use.
    connection: Arc<RwLock<Option<connection::NonTx>>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`connection::Pool`]
    /// without acquiring a connection yet.
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            connection: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the pooled connection of this [`NonTx`] client, acquiring it
    /// from the [`connection::Pool`] if not yet done.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        get_or_init(&self.connection, || async {
            self.pool
                .get()
                .await
                .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                .map_err(tracerr::map_from)
        })
        .await
    }

    /// Detaches the pooled connection from this [`NonTx`] client, if it has
    /// been acquired, so a transaction can be started on it.
    pub(crate) async fn detach(&self) -> Option<connection::NonTx> {
        self.connection.write().await.take()
    }
}

impl_client_connection!(NonTx);
