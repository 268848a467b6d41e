//! Name selection from role-tagged candidates.
//!
//! Operators and their properties carry candidate names grouped by
//! grammatical role. A [`NameChooser`] picks the one name they are registered
//! under. The default prefers prepositions, then nouns, verbs and adjectives:
//!
//! ```text
//! nouns = ["Filter"], prepositions = ["Where"]  =>  "Where"
//! nouns = ["Filter"]                            =>  "Filter"
//! (nothing)                                     =>  None
//! ```

use std::fmt;

/// Grammatical role of a candidate name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameRole {
    Noun,
    Verb,
    Adjective,
    Preposition,
}

/// Candidate names grouped by role, in declaration order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NameRoles {
    pub nouns: &'static [&'static str],
    pub verbs: &'static [&'static str],
    pub adjectives: &'static [&'static str],
    pub prepositions: &'static [&'static str],
}

impl NameRoles {
    /// No candidates in any role.
    pub const fn new() -> Self {
        NameRoles {
            nouns: &[],
            verbs: &[],
            adjectives: &[],
            prepositions: &[],
        }
    }

    #[must_use]
    pub const fn with_nouns(mut self, nouns: &'static [&'static str]) -> Self {
        self.nouns = nouns;
        self
    }

    #[must_use]
    pub const fn with_verbs(mut self, verbs: &'static [&'static str]) -> Self {
        self.verbs = verbs;
        self
    }

    #[must_use]
    pub const fn with_adjectives(mut self, adjectives: &'static [&'static str]) -> Self {
        self.adjectives = adjectives;
        self
    }

    #[must_use]
    pub const fn with_prepositions(mut self, prepositions: &'static [&'static str]) -> Self {
        self.prepositions = prepositions;
        self
    }

    /// Candidates for one role.
    pub const fn role(&self, role: NameRole) -> &'static [&'static str] {
        match role {
            NameRole::Noun => self.nouns,
            NameRole::Verb => self.verbs,
            NameRole::Adjective => self.adjectives,
            NameRole::Preposition => self.prepositions,
        }
    }

    /// Check if no role has a candidate.
    pub const fn is_empty(&self) -> bool {
        self.nouns.is_empty()
            && self.verbs.is_empty()
            && self.adjectives.is_empty()
            && self.prepositions.is_empty()
    }
}

/// Strategy for picking a name from role-tagged candidates.
pub trait NameChooser: fmt::Debug + Send + Sync {
    /// Pick a name, or `None` if there is no usable candidate.
    fn choose<'a>(
        &self,
        nouns: &[&'a str],
        verbs: &[&'a str],
        adjectives: &[&'a str],
        prepositions: &[&'a str],
    ) -> Option<&'a str>;

    /// Pick a name from a [`NameRoles`] table.
    fn choose_roles(&self, roles: &NameRoles) -> Option<&'static str> {
        self.choose(
            roles.nouns,
            roles.verbs,
            roles.adjectives,
            roles.prepositions,
        )
    }
}

/// Picks the first candidate of the first non-empty role in a fixed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultNameChooser {
    order: Vec<NameRole>,
}

impl DefaultNameChooser {
    /// Preposition, noun, verb, adjective.
    pub const DEFAULT_ORDER: [NameRole; 4] = [
        NameRole::Preposition,
        NameRole::Noun,
        NameRole::Verb,
        NameRole::Adjective,
    ];

    /// Create a chooser with the default order.
    pub fn new() -> Self {
        Self::with_order(Self::DEFAULT_ORDER)
    }

    /// Create a chooser with a custom order.
    ///
    /// Roles missing from `order` are never consulted.
    pub fn with_order(order: impl IntoIterator<Item = NameRole>) -> Self {
        DefaultNameChooser {
            order: order.into_iter().collect(),
        }
    }

    pub fn order(&self) -> &[NameRole] {
        &self.order
    }
}

impl Default for DefaultNameChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl NameChooser for DefaultNameChooser {
    fn choose<'a>(
        &self,
        nouns: &[&'a str],
        verbs: &[&'a str],
        adjectives: &[&'a str],
        prepositions: &[&'a str],
    ) -> Option<&'a str> {
        self.order.iter().find_map(|role| {
            let candidates = match role {
                NameRole::Noun => nouns,
                NameRole::Verb => verbs,
                NameRole::Adjective => adjectives,
                NameRole::Preposition => prepositions,
            };
            candidates.first().copied()
        })
    }
}
