//! [`Query`] collection related to the multiple [`Billboard`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Billboard, Query};

use super::DatabaseQuery;

/// Queries a public list of [`Billboard`]s.
pub type List = DatabaseQuery<
    By<read::billboard::list::Page, read::billboard::list::Selector>,
>;

/// Queries the most recent [`Billboard`]s.
pub type Recent = DatabaseQuery<
    By<Vec<read::billboard::Summary>, read::billboard::Recent>,
>;

/// Queries a management list of [`Billboard`]s.
pub type AdminList = DatabaseQuery<
    By<read::billboard::admin::Page, read::billboard::admin::Selector>,
>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::{
        command::{Command as _, CreateBillboard},
        domain::{location, user::Role, Slug},
        infra::database::mock::{
            fixture::{city, fields, service, user},
            Mock,
        },
        read::billboard::{
            admin, list, Recent, SearchText, Summary, RECENT_COUNT,
        },
        Query as _,
    };

    use super::{AdminList, List, Recent as RecentQuery};

    /// Stores [`Billboard`]s with the provided names in the provided
    /// [`City`]s, each one created a minute after the previous.
    ///
    /// [`Billboard`]: crate::domain::Billboard
    /// [`City`]: location::City
    async fn billboards(db: &Mock, items: &[(&str, location::CityId)]) {
        let reseller = user(db, "reseller", Role::Reseller);
        let svc = service(db);
        for (name, city_id) in items {
            drop(
                svc.execute(CreateBillboard {
                    actor_id: reseller.id,
                    fields: fields(*city_id, name, "1000IRR"),
                    reseller_id: None,
                    surcharge: None,
                    images: vec![],
                })
                .await
                .unwrap(),
            );
        }

        let start = DateTime::now().coerce();
        for (i, b) in db.tables().billboards.iter_mut().enumerate() {
            b.created_at = start + Duration::from_secs(60) * (i as u32 + 1);
        }
    }

    fn names(items: &[Summary]) -> Vec<String> {
        items.iter().map(|s| s.name.to_string()).collect()
    }

    fn page_of(filter: list::Filter, page: usize) -> List {
        List::by(list::Selector {
            arguments: list::Arguments::new(Some(page), list::PER_PAGE)
                .unwrap(),
            filter,
        })
    }

    #[tokio::test]
    async fn lists_by_city_state_and_search() {
        let db = Mock::default();
        let tehran = city(&db, "Tehran");
        let shiraz = city(&db, "Shiraz");
        {
            let mut tables = db.tables();
            let fars = tables
                .states
                .iter_mut()
                .find(|s| s.id == shiraz.state_id)
                .unwrap();
            fars.title = location::Title::new("Fars").unwrap();
            fars.url = Slug::new("fars").unwrap();
        }
        billboards(
            &db,
            &[
                ("Azadi", tehran.id),
                ("Hafezieh", shiraz.id),
                ("Enghelab", tehran.id),
            ],
        )
        .await;
        let svc = service(&db);

        let all = svc.execute(page_of(list::Filter::All, 1)).await.unwrap();
        assert_eq!(names(&all.items), ["Enghelab", "Hafezieh", "Azadi"]);
        assert_eq!(all.total_count, 3);

        let by_city = svc
            .execute(page_of(list::Filter::City(tehran.url.clone()), 1))
            .await
            .unwrap();
        assert_eq!(names(&by_city.items), ["Enghelab", "Azadi"]);

        let by_state = svc
            .execute(page_of(list::Filter::State(Slug::new("fars").unwrap()), 1))
            .await
            .unwrap();
        assert_eq!(names(&by_state.items), ["Hafezieh"]);

        let by_text = svc
            .execute(page_of(list::Filter::search(Some("  FARS ")), 1))
            .await
            .unwrap();
        assert_eq!(names(&by_text.items), ["Hafezieh"]);

        let blank = svc
            .execute(page_of(list::Filter::search(Some("   ")), 1))
            .await
            .unwrap();
        assert_eq!(blank.total_count, 3);
    }

    #[tokio::test]
    async fn paginates_list() {
        let db = Mock::default();
        let tehran = city(&db, "Tehran");
        let names_owned = (1..=list::PER_PAGE + 2)
            .map(|i| format!("Board {i}"))
            .collect::<Vec<_>>();
        let items = names_owned
            .iter()
            .map(|n| (n.as_str(), tehran.id))
            .collect::<Vec<_>>();
        billboards(&db, &items).await;
        let svc = service(&db);

        let first = svc.execute(page_of(list::Filter::All, 1)).await.unwrap();
        assert_eq!(first.items.len(), list::PER_PAGE);
        assert_eq!(first.page_count(), 2);
        assert!(first.has_next() && !first.has_previous());

        let second = svc.execute(page_of(list::Filter::All, 2)).await.unwrap();
        assert_eq!(names(&second.items), ["Board 2", "Board 1"]);
        assert!(!second.has_next() && second.has_previous());

        let beyond = svc.execute(page_of(list::Filter::All, 3)).await.unwrap();
        assert!(beyond.items.is_empty());
    }

    #[tokio::test]
    async fn returns_most_recent_first() {
        let db = Mock::default();
        let tehran = city(&db, "Tehran");
        let names_owned = (1..=RECENT_COUNT + 3)
            .map(|i| format!("Board {i}"))
            .collect::<Vec<_>>();
        let items = names_owned
            .iter()
            .map(|n| (n.as_str(), tehran.id))
            .collect::<Vec<_>>();
        billboards(&db, &items).await;

        let recent = service(&db)
            .execute(RecentQuery::by(Recent::default()))
            .await
            .unwrap();

        assert_eq!(recent.len(), RECENT_COUNT);
        assert_eq!(recent[0].name.to_string(), "Board 12");
        assert_eq!(recent[RECENT_COUNT - 1].name.to_string(), "Board 4");
    }

    #[tokio::test]
    async fn scopes_admin_list_by_reseller() {
        let db = Mock::default();
        let tehran = city(&db, "Tehran");
        billboards(&db, &[("Azadi", tehran.id), ("Enghelab", tehran.id)])
            .await;
        let other = user(&db, "other", Role::Reseller);
        let mine = db.tables().billboards[0].reseller_id;
        db.tables().billboards[1].reseller_id = other.id;
        let svc = service(&db);

        let query = |filter| {
            AdminList::by(admin::Selector {
                arguments: admin::Arguments::new(Some(1), admin::PER_PAGE)
                    .unwrap(),
                filter,
            })
        };

        let all = svc
            .execute(query(admin::Filter::new(admin::Scope::All)))
            .await
            .unwrap();
        assert_eq!(all.total_count, 2);

        let own = svc
            .execute(query(admin::Filter::new(admin::Scope::Reseller(mine))))
            .await
            .unwrap();
        assert_eq!(own.items.len(), 1);
        assert_eq!(own.items[0].name.to_string(), "Azadi");

        let searched = svc
            .execute(query(admin::Filter {
                search: SearchText::new("other"),
                reservation: Some(admin::Reservation::Free),
                ..admin::Filter::new(admin::Scope::All)
            }))
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].name.to_string(), "Enghelab");
    }
}
