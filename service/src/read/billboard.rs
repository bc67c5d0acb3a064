//! [`Billboard`] read model definitions.

use common::{unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display};

#[cfg(doc)]
use crate::domain::{location::City, location::State};
use crate::domain::{billboard, location, Billboard, Slug};

/// Number of the most recent [`Billboard`]s shown on the landing page.
pub const RECENT_COUNT: usize = 9;

/// Public summary of a [`Billboard`] along with its location.
#[derive(Clone, Debug)]
pub struct Summary {
    /// ID of the [`Billboard`].
    pub id: billboard::Id,

    /// Name of the [`Billboard`].
    pub name: billboard::Name,

    /// Address of the [`Billboard`].
    pub address: billboard::Address,

    /// URL [`Slug`] of the [`Billboard`].
    pub url: Slug,

    /// Main picture of the [`Billboard`].
    pub picture: Option<billboard::image::Url>,

    /// Final price of the [`Billboard`], if it has been computed.
    pub final_price: Option<Money>,

    /// [`Date`] the [`Billboard`] is reserved until, if it is.
    pub reservation_date: Option<Date>,

    /// [`City`] the [`Billboard`] is located in.
    pub city: Place<location::CityId>,

    /// [`State`] the [`Billboard`] is located in.
    pub state: Place<location::StateId>,

    /// [`DateTime`] when the [`Billboard`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Billboard, unit::Creation)>,
}

/// Reference to a [`City`] or a [`State`].
#[derive(Clone, Debug)]
pub struct Place<Id> {
    /// ID of the place.
    pub id: Id,

    /// Title of the place.
    pub title: location::Title,

    /// URL [`Slug`] of the place.
    pub url: Slug,
}

/// Free text to search [`Billboard`]s by.
///
/// Always trimmed and non-empty.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct SearchText(String);

impl SearchText {
    /// Creates a new [`SearchText`] out of the provided user input.
    ///
    /// [`None`] is returned if the input is blank.
    #[must_use]
    pub fn new(input: impl AsRef<str>) -> Option<Self> {
        let input = input.as_ref().trim();
        (!input.is_empty()).then(|| Self(input.to_owned()))
    }

    /// Checks whether the provided `haystack` contains this [`SearchText`]
    /// case-insensitively.
    #[must_use]
    pub fn is_in(&self, haystack: impl AsRef<str>) -> bool {
        haystack
            .as_ref()
            .to_lowercase()
            .contains(&self.0.to_lowercase())
    }
}

/// Selector of the most recent [`Billboard`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Recent {
    /// Maximum number of [`Billboard`]s to select.
    pub limit: usize,
}

impl Default for Recent {
    fn default() -> Self {
        Self {
            limit: RECENT_COUNT,
        }
    }
}

pub mod list {
    //! Public [`Billboard`] list definitions.

    use common::define_pagination;

    #[cfg(doc)]
    use crate::domain::{location::City, location::State, Billboard};
    use crate::domain::Slug;

    use super::{SearchText, Summary};

    define_pagination!(Summary, Filter);

    /// Number of [`Billboard`]s on a single [`Page`].
    pub const PER_PAGE: usize = 12;

    /// Filter of the public [`Billboard`] list.
    #[derive(Clone, Debug, Default)]
    pub enum Filter {
        /// All the [`Billboard`]s.
        #[default]
        All,

        /// [`Billboard`]s located in the [`City`] with the provided URL
        /// [`Slug`].
        City(Slug),

        /// [`Billboard`]s located in the [`State`] with the provided URL
        /// [`Slug`].
        State(Slug),

        /// [`Billboard`]s whose name, address, [`City`] or [`State`] title
        /// contains the provided [`SearchText`].
        Search(SearchText),
    }

    impl Filter {
        /// Creates a new [`Filter::Search`] out of the provided user input.
        ///
        /// Missing or blank input results in [`Filter::All`].
        #[must_use]
        pub fn search(input: Option<impl AsRef<str>>) -> Self {
            input
                .and_then(SearchText::new)
                .map_or(Self::All, Self::Search)
        }

        /// Checks whether the provided [`Summary`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, summary: &Summary) -> bool {
            match self {
                Self::All => true,
                Self::City(slug) => summary.city.url == *slug,
                Self::State(slug) => summary.state.url == *slug,
                Self::Search(text) => {
                    text.is_in(&summary.name)
                        || text.is_in(&summary.city.title)
                        || text.is_in(&summary.state.title)
                        || text.is_in(&summary.address)
                }
            }
        }
    }
}

pub mod admin {
    //! [`Billboard`] list definitions of the management area.

    use common::{define_pagination, Date, Money};

    #[cfg(doc)]
    use crate::domain::{location::City, Attribute, Billboard};
    use crate::domain::{attribute, billboard, location, user, User};

    use super::SearchText;

    define_pagination!(Row, Filter);

    /// Number of [`Billboard`]s on a single [`Page`].
    pub const PER_PAGE: usize = 100;

    /// Row of the management [`Billboard`] list.
    #[derive(Clone, Debug)]
    pub struct Row {
        /// ID of the [`Billboard`].
        pub id: billboard::Id,

        /// Name of the [`Billboard`].
        pub name: billboard::Name,

        /// Address of the [`Billboard`].
        pub address: billboard::Address,

        /// ID of the [`User`] reselling the [`Billboard`].
        pub reseller_id: user::Id,

        /// Name of the [`User`] reselling the [`Billboard`].
        pub reseller_name: user::Name,

        /// ID of the [`City`] the [`Billboard`] is located in.
        pub city_id: location::CityId,

        /// Title of the [`City`] the [`Billboard`] is located in.
        pub city_title: location::Title,

        /// IDs of the [`Attribute`]s of the [`Billboard`].
        pub attributes: Vec<attribute::Id>,

        /// Indicator whether the [`Billboard`] has power available.
        pub has_power: bool,

        /// Length of the [`Billboard`].
        pub length: billboard::Dimension,

        /// Width of the [`Billboard`].
        pub width: billboard::Dimension,

        /// [`Date`] the [`Billboard`] is reserved until, if it is.
        pub reservation_date: Option<Date>,

        /// Final price of the [`Billboard`], if it has been computed.
        pub final_price: Option<Money>,
    }

    /// Set of [`Billboard`]s visible to an actor.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Scope {
        /// All the [`Billboard`]s.
        All,

        /// [`Billboard`]s resold by the [`User`] with the provided ID.
        Reseller(user::Id),
    }

    impl Scope {
        /// Returns the [`Scope`] of the provided actor: admins see all the
        /// [`Billboard`]s, while resellers see only their own.
        #[must_use]
        pub fn by_reseller(actor: &User) -> Self {
            if actor.role.is_admin() {
                Self::All
            } else {
                Self::Reseller(actor.id)
            }
        }

        /// Checks whether the provided [`Row`] is within this [`Scope`].
        #[must_use]
        pub fn contains(&self, row: &Row) -> bool {
            match self {
                Self::All => true,
                Self::Reseller(id) => row.reseller_id == *id,
            }
        }
    }

    /// Reservation state of a [`Billboard`] to filter by.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Reservation {
        /// [`Billboard`] is not reserved.
        Free,

        /// [`Billboard`] is reserved until any [`Date`].
        Reserved,

        /// [`Billboard`] is reserved until a [`Date`] within the inclusive
        /// range.
        Until {
            /// Earliest [`Date`] of the range.
            from: Date,

            /// Latest [`Date`] of the range.
            to: Date,
        },
    }

    impl Reservation {
        /// Checks whether the provided reservation [`Date`] is in this
        /// [`Reservation`] state.
        #[must_use]
        pub fn matches(&self, date: Option<Date>) -> bool {
            match (self, date) {
                (Self::Free, None) | (Self::Reserved, Some(_)) => true,
                (Self::Until { from, to }, Some(date)) => {
                    (*from..=*to).contains(&date)
                }
                (Self::Free, Some(_))
                | (Self::Reserved | Self::Until { .. }, None) => false,
            }
        }
    }

    /// Filter of the management [`Billboard`] list.
    #[derive(Clone, Debug)]
    pub struct Filter {
        /// [`Scope`] of the actor requesting the list.
        pub scope: Scope,

        /// ID of the reselling [`User`] to filter by.
        pub reseller: Option<user::Id>,

        /// ID of the [`City`] to filter by.
        pub city: Option<location::CityId>,

        /// ID of the [`Attribute`] to filter by.
        pub attribute: Option<attribute::Id>,

        /// Power availability to filter by.
        pub has_power: Option<bool>,

        /// [`Reservation`] state to filter by.
        pub reservation: Option<Reservation>,

        /// Exact length to filter by.
        pub length: Option<billboard::Dimension>,

        /// Exact width to filter by.
        pub width: Option<billboard::Dimension>,

        /// [`SearchText`] to look for in the [`Billboard`] name, address,
        /// reseller name or [`City`] title.
        pub search: Option<SearchText>,
    }

    impl Filter {
        /// Creates a new [`Filter`] within the provided [`Scope`] without any
        /// other restrictions.
        #[must_use]
        pub const fn new(scope: Scope) -> Self {
            Self {
                scope,
                reseller: None,
                city: None,
                attribute: None,
                has_power: None,
                reservation: None,
                length: None,
                width: None,
                search: None,
            }
        }

        /// Checks whether the provided [`Row`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, row: &Row) -> bool {
            self.scope.contains(row)
                && self.reseller.map_or(true, |id| row.reseller_id == id)
                && self.city.map_or(true, |id| row.city_id == id)
                && self
                    .attribute
                    .map_or(true, |id| row.attributes.contains(&id))
                && self.has_power.map_or(true, |p| row.has_power == p)
                && self
                    .reservation
                    .map_or(true, |r| r.matches(row.reservation_date))
                && self.length.map_or(true, |l| row.length == l)
                && self.width.map_or(true, |w| row.width == w)
                && self.search.as_ref().map_or(true, |text| {
                    text.is_in(&row.name)
                        || text.is_in(&row.address)
                        || text.is_in(&row.reseller_name)
                        || text.is_in(&row.city_title)
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{billboard, location, Slug};

    use super::{
        list::{Arguments, Filter, Page, PER_PAGE},
        Place, SearchText, Summary,
    };

    fn summary(name: &str, address: &str, city: &str, state: &str) -> Summary {
        Summary {
            id: billboard::Id::new(),
            name: billboard::Name::new(name).unwrap(),
            address: billboard::Address::new(address).unwrap(),
            url: Slug::from_title(name).unwrap(),
            picture: None,
            final_price: None,
            reservation_date: None,
            city: Place {
                id: location::CityId::new(),
                title: location::Title::new(city).unwrap(),
                url: Slug::from_title(city).unwrap(),
            },
            state: Place {
                id: location::StateId::new(),
                title: location::Title::new(state).unwrap(),
                url: Slug::from_title(state).unwrap(),
            },
            created_at: DateTime::now().coerce(),
        }
    }

    fn listings() -> Vec<Summary> {
        vec![
            summary("Main Square", "1 Azadi St.", "Tehran", "Tehran Province"),
            summary("Highway 5", "Km 12", "Karaj", "Alborz"),
            summary("Bazaar Gate", "2 main road", "Isfahan", "Isfahan Province"),
            summary("Airport", "Terminal 1", "Mainland", "Fars"),
            summary("Harbor", "Pier 3", "Bushehr", "Mainstate"),
            summary("Ring Road", "45 Ring Rd.", "Tehran", "Tehran Province"),
        ]
    }

    fn names<'a>(items: impl IntoIterator<Item = &'a Summary>) -> Vec<String> {
        items.into_iter().map(|s| s.name.to_string()).collect()
    }

    #[test]
    fn filters_by_city_slug() {
        let filter = Filter::City(Slug::new("tehran").unwrap());
        let found = listings()
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect::<Vec<_>>();

        assert_eq!(names(&found), ["Main Square", "Ring Road"]);
        assert!(found.iter().all(|s| s.city.url.to_string() == "tehran"));
    }

    #[test]
    fn filters_by_state_slug() {
        let filter = Filter::State(Slug::new("alborz").unwrap());

        assert_eq!(
            names(listings().iter().filter(|s| filter.matches(s))),
            ["Highway 5"],
        );
    }

    #[test]
    fn blank_search_is_no_filter() {
        assert!(matches!(Filter::search(None::<&str>), Filter::All));
        assert!(matches!(Filter::search(Some("")), Filter::All));
        assert!(matches!(Filter::search(Some("   ")), Filter::All));

        let all = listings();
        assert!(all.iter().all(|s| Filter::search(Some("")).matches(s)));
    }

    #[test]
    fn search_matches_name_address_city_and_state() {
        let filter = Filter::search(Some(" Main "));

        assert_eq!(
            names(listings().iter().filter(|s| filter.matches(s))),
            ["Main Square", "Bazaar Gate", "Airport", "Harbor"],
        );
    }

    #[test]
    fn search_text_is_case_insensitive() {
        let text = SearchText::new("TEH").unwrap();

        assert!(text.is_in("Tehran"));
        assert!(!text.is_in("Karaj"));
        assert_eq!(text.as_ref(), "TEH");
    }

    #[test]
    fn paginates_filtered_collection() {
        let many = (0..30).map(|i| {
            summary(&format!("Board {i}"), "Street", "Tehran", "Tehran Province")
        });
        let filter = Filter::City(Slug::new("tehran").unwrap());

        let page = Page::slice(
            Arguments::new(Some(3), PER_PAGE).unwrap(),
            many.filter(|s| filter.matches(s)),
        );

        assert_eq!(page.items.len(), 6);
        assert_eq!(page.total_count, 30);
        assert_eq!(page.page_count(), 3);
        assert!(!page.has_next());
    }

    mod admin {
        use common::Date;

        use crate::domain::{attribute, billboard, location, user};

        use super::super::admin::{Filter, Reservation, Row, Scope};
        use super::SearchText;

        fn row(name: &str, reseller: user::Id, reseller_name: &str) -> Row {
            Row {
                id: billboard::Id::new(),
                name: billboard::Name::new(name).unwrap(),
                address: billboard::Address::new("1 Azadi St.").unwrap(),
                reseller_id: reseller,
                reseller_name: user::Name::new(reseller_name).unwrap(),
                city_id: location::CityId::new(),
                city_title: location::Title::new("Tehran").unwrap(),
                attributes: vec![],
                has_power: false,
                length: "3".parse().unwrap(),
                width: "6".parse().unwrap(),
                reservation_date: None,
                final_price: None,
            }
        }

        #[test]
        fn reseller_scope_hides_foreign_billboards() {
            let (me, other) = (user::Id::new(), user::Id::new());
            let rows = [row("Mine", me, "Ali"), row("Theirs", other, "Reza")];

            let scoped = Filter::new(Scope::Reseller(me));
            let visible =
                rows.iter().filter(|r| scoped.matches(r)).collect::<Vec<_>>();
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].name.to_string(), "Mine");

            let all = Filter::new(Scope::All);
            assert!(rows.iter().all(|r| all.matches(r)));
        }

        #[test]
        fn filters_by_reseller_name_and_power() {
            let reseller = user::Id::new();
            let mut powered = row("Lit", reseller, "Ali Rezaei");
            powered.has_power = true;
            powered.attributes = vec![attribute::Id::new()];
            let dark = row("Dark", reseller, "Ali Rezaei");

            let by_name = Filter {
                search: SearchText::new("rezaei"),
                ..Filter::new(Scope::All)
            };
            assert!(by_name.matches(&powered) && by_name.matches(&dark));

            let by_power = Filter {
                has_power: Some(true),
                ..Filter::new(Scope::All)
            };
            assert!(by_power.matches(&powered));
            assert!(!by_power.matches(&dark));

            let by_attribute = Filter {
                attribute: powered.attributes.first().copied(),
                ..Filter::new(Scope::All)
            };
            assert!(by_attribute.matches(&powered));
            assert!(!by_attribute.matches(&dark));
        }

        #[test]
        fn filters_by_reservation() {
            let reseller = user::Id::new();
            let free = row("Free", reseller, "Ali");
            let mut spring = row("Spring", reseller, "Ali");
            spring.reservation_date = Date::from_ymd(2025, 4, 1);
            let mut autumn = row("Autumn", reseller, "Ali");
            autumn.reservation_date = Date::from_ymd(2025, 10, 1);
            let rows = [free, spring, autumn];

            let names = |reservation| {
                let filter = Filter {
                    reservation: Some(reservation),
                    ..Filter::new(Scope::All)
                };
                rows.iter()
                    .filter(|r| filter.matches(r))
                    .map(|r| r.name.to_string())
                    .collect::<Vec<_>>()
            };

            assert_eq!(names(Reservation::Free), ["Free"]);
            assert_eq!(names(Reservation::Reserved), ["Spring", "Autumn"]);
            assert_eq!(
                names(Reservation::Until {
                    from: Date::from_ymd(2025, 3, 1).unwrap(),
                    to: Date::from_ymd(2025, 4, 1).unwrap(),
                }),
                ["Spring"],
            );
        }

        #[test]
        fn filters_by_exact_dimensions() {
            let reseller = user::Id::new();
            let small = row("Small", reseller, "Ali");
            let mut wide = row("Wide", reseller, "Ali");
            wide.width = "12.50".parse().unwrap();

            let by_width = Filter {
                width: Some("12.5".parse().unwrap()),
                ..Filter::new(Scope::All)
            };
            assert!(by_width.matches(&wide));
            assert!(!by_width.matches(&small));

            let by_both = Filter {
                length: Some("3".parse().unwrap()),
                width: Some("6".parse().unwrap()),
                ..Filter::new(Scope::All)
            };
            assert!(by_both.matches(&small));
            assert!(!by_both.matches(&wide));
        }
    }
}
