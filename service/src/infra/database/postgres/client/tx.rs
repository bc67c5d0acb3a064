//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection},
};

use super::{get_or_init, impl_client_connection, NonTx};

/// Postgres client running all its statements in a single transaction.
///
/// The transaction begins on the first statement and lasts until
/// [`Tx::commit()`]. Dropping all the clones without committing rolls it back,
/// releasing the billboard row and URL slug locks taken inside.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to acquire a connection from when the originating
    /// [`NonTx`] client has none.
    pool: connection::Pool,

    /// [`NonTx`] client this [`Tx`] client was started from.
    origin: Arc<RwLock<Option<NonTx>>>,

    /// Open transaction, begun on first use.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client from the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool.clone(),
            origin: Arc::new(RwLock::new(Some(client))),
            tx: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the open transaction of this [`Tx`] client, beginning it first
    /// if not yet done.
    ///
    /// The connection already held by the originating [`NonTx`] client is
    /// reused, otherwise a new one is acquired from the [`connection::Pool`].
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        get_or_init(&self.tx, || async {
            let detached = match self.origin.write().await.take() {
                Some(non_tx) => non_tx.detach().await,
                None => None,
            };
            let conn = match detached {
                Some(conn) => conn,
                None => self
                    .pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?,
            };
            connection::Tx::begin(conn).await.map_err(tracerr::wrap!())
        })
        .await
    }

    /// Commits the transaction of this [`Tx`] client, if any has begun.
    ///
    /// Statements issued afterwards run in a new transaction.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl_client_connection!(Tx);
