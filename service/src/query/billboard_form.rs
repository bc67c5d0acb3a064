//! [`BillboardForm`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        billboard::{self, Layout},
        user, Billboard, User,
    },
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] of a [`Billboard`] form [`Layout`] as seen by an actor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BillboardForm {
    /// ID of the [`User`] filling the form.
    pub actor_id: user::Id,

    /// ID of the [`Billboard`] being edited.
    ///
    /// [`None`] for a new [`Billboard`].
    pub billboard_id: Option<billboard::Id>,
}

impl<Db> Query<BillboardForm> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Billboard>, billboard::Id>>,
            Ok = Option<Billboard>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Layout;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: BillboardForm,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let BillboardForm {
            actor_id,
            billboard_id,
        } = query;

        let actor = self
            .database()
            .execute(Select(By::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;

        let Some(billboard_id) = billboard_id else {
            return Ok(Layout::new(actor.role, None));
        };

        let billboard = self
            .database()
            .execute(Select(By::<Option<Billboard>, _>::new(billboard_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|b| actor.role.is_admin() || b.reseller_id == actor.id)
            .ok_or(E::BillboardNotExists(billboard_id))
            .map_err(tracerr::wrap!())?;

        let owner_role = if billboard.reseller_id == actor.id {
            actor.role
        } else {
            self.database()
                .execute(Select(By::new(billboard.reseller_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(billboard.reseller_id))
                .map_err(tracerr::wrap!())?
                .role
        };

        Ok(Layout::new(actor.role, Some(owner_role)))
    }
}

/// Error of [`BillboardForm`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`Billboard`] with the provided ID does not exist or is not managed
    /// by the actor.
    #[display("`Billboard(id: {_0})` does not exist")]
    BillboardNotExists(#[error(not(source))] billboard::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, CreateBillboard},
        domain::{
            billboard::form::{Field, Inline},
            user::Role,
        },
        infra::database::mock::{
            fixture::{city, fields, service, user},
            Mock,
        },
    };

    use super::{BillboardForm, ExecutionError};

    #[tokio::test]
    async fn layout_depends_on_actor_and_owner() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let reseller = user(&db, "reseller", Role::Reseller);
        let city = city(&db, "Tehran");
        let svc = service(&db);

        let owned_by_reseller = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Azadi", "1000IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap();
        let owned_by_admin = svc
            .execute(CreateBillboard {
                actor_id: admin.id,
                fields: fields(city.id, "Enghelab", "1000IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap();

        let form = |actor_id, billboard_id| BillboardForm {
            actor_id,
            billboard_id,
        };

        let layout = svc.execute(form(reseller.id, None)).await.unwrap();
        assert_eq!(layout.inlines, [Inline::Image]);
        assert!(!layout.has_field(Field::Reseller));

        let layout = svc.execute(form(admin.id, None)).await.unwrap();
        assert_eq!(layout.inlines, [Inline::FinalPrice, Inline::Image]);
        assert!(layout.has_field(Field::Reseller));

        let layout = svc
            .execute(form(admin.id, Some(owned_by_reseller.id)))
            .await
            .unwrap();
        assert_eq!(layout.inlines, [Inline::FinalPrice, Inline::Image]);

        let layout = svc
            .execute(form(admin.id, Some(owned_by_admin.id)))
            .await
            .unwrap();
        assert_eq!(layout.inlines, [Inline::Image]);

        let err = svc
            .execute(form(reseller.id, Some(owned_by_admin.id)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::BillboardNotExists(_),
        ));
    }
}
