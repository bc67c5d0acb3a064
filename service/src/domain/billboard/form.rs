//! [`Layout`] of a [`Billboard`] editing form.

#[cfg(doc)]
use crate::domain::{billboard::FinalPrice, Billboard, User};
use crate::domain::user::Role;

/// Group of [`Field`]s shown together in a form.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    /// Location and description of a [`Billboard`].
    Description,

    /// Physical features and pricing of a [`Billboard`].
    Features,

    /// Search engine metadata of a [`Billboard`].
    Seo,
}

/// Editable field of a [`Billboard`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// City the [`Billboard`] is located in.
    City,

    /// Name of the [`Billboard`].
    Name,

    /// Street address of the [`Billboard`].
    Address,

    /// Attributes of the [`Billboard`].
    Attributes,

    /// Free-form description of the [`Billboard`].
    Description,

    /// Whether the [`Billboard`] has power available.
    HasPower,

    /// [`User`] reselling the [`Billboard`].
    Reseller,

    /// Length of the [`Billboard`].
    Length,

    /// Width of the [`Billboard`].
    Width,

    /// Base price of the [`Billboard`].
    Price,

    /// Date the [`Billboard`] is reserved until.
    ReservationDate,

    /// Main picture of the [`Billboard`].
    Picture,

    /// Embedded map of the [`Billboard`] location.
    MapIframe,

    /// SEO title of the [`Billboard`].
    Title,

    /// URL slug of the [`Billboard`].
    Url,

    /// SEO description of the [`Billboard`].
    SeoDescription,
}

/// Sub-form of a [`Billboard`] form editing related records.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Inline {
    /// Surcharge of the [`FinalPrice`].
    FinalPrice,

    /// Ordered images of the [`Billboard`].
    Image,
}

/// [`Section`] along with its [`Field`]s, split into rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fieldset {
    /// [`Section`] of this [`Fieldset`].
    pub section: Section,

    /// Rows of [`Field`]s, where fields of a single row are shown side by
    /// side.
    pub rows: Vec<Vec<Field>>,
}

impl Fieldset {
    /// Returns all the [`Field`]s of this [`Fieldset`] in order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Layout of a [`Billboard`] form as seen by a specific actor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    /// Visible [`Fieldset`]s, in order.
    pub sections: Vec<Fieldset>,

    /// Visible [`Inline`]s, in order.
    pub inlines: Vec<Inline>,
}

impl Layout {
    /// Builds the [`Layout`] for an actor with the provided [`Role`] editing
    /// a [`Billboard`] owned by a user with the `owner` [`Role`].
    ///
    /// `owner` is [`None`] for a new [`Billboard`].
    #[must_use]
    pub fn new(actor: Role, owner: Option<Role>) -> Self {
        Self {
            sections: sections(actor),
            inlines: inlines(actor, owner),
        }
    }

    /// Indicates whether the provided [`Field`] is visible.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.sections.iter().flat_map(Fieldset::fields).any(|f| f == field)
    }

    /// Indicates whether the provided [`Inline`] is visible.
    #[must_use]
    pub fn has_inline(&self, inline: Inline) -> bool {
        self.inlines.contains(&inline)
    }
}

/// Returns [`Fieldset`]s visible to an actor with the provided [`Role`].
///
/// Only admins may reassign a [`Billboard`] to another reseller.
#[must_use]
pub fn sections(actor: Role) -> Vec<Fieldset> {
    use Field as F;

    let mut features = vec![vec![F::HasPower]];
    if actor.is_admin() {
        features.push(vec![F::Reseller]);
    }
    features.push(vec![F::Length, F::Width, F::Price, F::ReservationDate]);

    vec![
        Fieldset {
            section: Section::Description,
            rows: [F::City, F::Name, F::Address, F::Attributes, F::Description]
                .into_iter()
                .map(|f| vec![f])
                .collect(),
        },
        Fieldset {
            section: Section::Features,
            rows: features,
        },
        Fieldset {
            section: Section::Seo,
            rows: [F::Picture, F::MapIframe, F::Title, F::Url, F::SeoDescription]
                .into_iter()
                .map(|f| vec![f])
                .collect(),
        },
    ]
}

/// Returns [`Inline`]s visible to an actor with the provided [`Role`] on a
/// [`Billboard`] owned by a user with the `owner` [`Role`].
///
/// The [`FinalPrice`] surcharge is only editable by admins, and only for
/// [`Billboard`]s not owned by an admin, as those are sold at their base
/// price.
#[must_use]
pub fn inlines(actor: Role, owner: Option<Role>) -> Vec<Inline> {
    match (actor, owner) {
        (Role::Admin, Some(Role::Admin)) | (Role::Reseller, _) => {
            vec![Inline::Image]
        }
        (Role::Admin, Some(Role::Reseller) | None) => {
            vec![Inline::FinalPrice, Inline::Image]
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::user::Role;

    use super::{inlines, sections, Field, Inline, Layout, Section};

    #[test]
    fn reseller_sees_image_inline_only() {
        assert_eq!(inlines(Role::Reseller, None), [Inline::Image]);
        assert_eq!(inlines(Role::Reseller, Some(Role::Reseller)), [Inline::Image]);
        assert_eq!(inlines(Role::Reseller, Some(Role::Admin)), [Inline::Image]);
    }

    #[test]
    fn admin_sees_final_price_of_non_admin_billboards() {
        assert_eq!(
            inlines(Role::Admin, Some(Role::Reseller)),
            [Inline::FinalPrice, Inline::Image],
        );
        assert_eq!(
            inlines(Role::Admin, None),
            [Inline::FinalPrice, Inline::Image],
        );
        assert_eq!(inlines(Role::Admin, Some(Role::Admin)), [Inline::Image]);
    }

    #[test]
    fn only_admin_sees_reseller_field() {
        assert!(Layout::new(Role::Admin, None).has_field(Field::Reseller));
        assert!(!Layout::new(Role::Reseller, None).has_field(Field::Reseller));
    }

    #[test]
    fn sections_are_fixed() {
        for role in Role::ALL {
            let sections = sections(*role);
            assert_eq!(
                sections.iter().map(|s| s.section).collect::<Vec<_>>(),
                [Section::Description, Section::Features, Section::Seo],
            );
            assert_eq!(
                sections[0].fields().collect::<Vec<_>>(),
                [
                    Field::City,
                    Field::Name,
                    Field::Address,
                    Field::Attributes,
                    Field::Description,
                ],
            );
            assert_eq!(
                sections[1].rows.last().unwrap(),
                &[Field::Length, Field::Width, Field::Price, Field::ReservationDate],
            );
            assert_eq!(sections[2].fields().count(), 5);
        }
    }

    #[test]
    fn reseller_field_follows_power() {
        let sections = sections(Role::Admin);

        assert_eq!(
            sections[1].fields().take(2).collect::<Vec<_>>(),
            [Field::HasPower, Field::Reseller],
        );
    }
}
