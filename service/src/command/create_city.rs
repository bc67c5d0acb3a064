//! [`Command`] for creating a new [`City`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{location, user, City, Slug, State, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`City`].
#[derive(Clone, Debug)]
pub struct CreateCity {
    /// ID of the [`User`] creating a new [`City`].
    pub actor_id: user::Id,

    /// ID of the [`State`] a new [`City`] belongs to.
    pub state_id: location::StateId,

    /// Title of a new [`City`].
    pub title: location::Title,

    /// URL [`Slug`] of a new [`City`].
    ///
    /// Derived from the `title` if not provided.
    pub url: Option<Slug>,
}

impl<Db> Command<CreateCity> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<State>, location::StateId>>,
            Ok = Option<State>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<City>, &'l Slug>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<City>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = City;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCity) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCity {
            actor_id,
            state_id,
            title,
            url,
        } = cmd;

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

        drop(
            self.database()
                .execute(Select(By::new(state_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::StateNotExists(state_id))
                .map_err(tracerr::wrap!())?,
        );

        let url = url
            .or_else(|| Slug::from_title(&title))
            .ok_or_else(|| E::UrlNotDerivable(title.clone()))
            .map_err(tracerr::wrap!())?;
        let occupied = self
            .database()
            .execute(Select(By::new(&url)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupied.is_some() {
            return Err(tracerr::new!(E::UrlOccupied(url)));
        }

        let city = City {
            id: location::CityId::new(),
            state_id,
            title,
            url,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(city.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(city)
    }
}

/// Error of [`CreateCity`] [`Command`] execution.
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

    /// [`State`] with the provided ID does not exist.
    #[display("`State(id: {_0})` does not exist")]
    StateNotExists(#[error(not(source))] location::StateId),

    /// URL [`Slug`] cannot be derived from the provided title.
    #[display("Cannot derive URL from `{_0}` title")]
    UrlNotDerivable(#[error(not(source))] location::Title),

    /// URL [`Slug`] is already occupied by another [`City`].
    #[display("`{_0}` URL is occupied")]
    UrlOccupied(#[error(not(source))] Slug),
}
