//! [`Handler`] abstraction.

use std::future::Future;

/// Something executing an operation described by `Args`.
///
/// Commands, queries and database operations are all [`Handler`]s, so the
/// service layer stays generic over its infrastructure.
pub trait Handler<Args = ()> {
    /// Successful outcome of this [`Handler`].
    type Ok;

    /// Error of this [`Handler`].
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
