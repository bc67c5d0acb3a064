//! [`Command`] for creating a new [`Attribute`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{attribute, user, Attribute, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Attribute`].
#[derive(Clone, Debug)]
pub struct CreateAttribute {
    /// ID of the [`User`] creating a new [`Attribute`].
    pub actor_id: user::Id,

    /// Name of a new [`Attribute`].
    pub name: attribute::Name,
}

impl<Db> Command<CreateAttribute> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<Attribute>, &'l attribute::Name>>,
            Ok = Option<Attribute>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Attribute>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Attribute;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAttribute,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAttribute { actor_id, name } = cmd;

        let actor = self
            .database()
            .execute(Select(By::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;
        if !actor.role.is_admin() {
            return Err(tracerr::new!(E::NotAdmin(actor_id)));
        }

        let existing = self
            .database()
            .execute(Select(By::new(&name)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let attribute = Attribute {
            id: attribute::Id::new(),
            name,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(attribute.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(attribute)
    }
}

/// Error of [`CreateAttribute`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`User`] with the provided ID is not an admin.
    #[display("`User(id: {_0})` is not an admin")]
    NotAdmin(#[error(not(source))] user::Id),

    /// [`attribute::Name`] is already occupied.
    #[display("`{_0}` attribute already exists")]
    NameOccupied(#[error(not(source))] attribute::Name),
}
