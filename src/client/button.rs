//! Favorite buttons and the registry that owns their visual state.

use scraper::{Html, Selector};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entities::FavoriteKind;

/// CSS class of a button whose entity is a favorite.
pub const ACTIVE_CLASS: &str = "btn-danger";
/// CSS class of a button whose entity is not a favorite.
pub const INACTIVE_CLASS: &str = "btn-secondary";

/// Visual state of a favorite button. Exactly one of the two classes applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Active,
    Inactive,
}

impl ButtonState {
    pub fn from_favorite(favorite: bool) -> Self {
        if favorite {
            ButtonState::Active
        } else {
            ButtonState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ButtonState::Active)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ButtonState::Active => ACTIVE_CLASS,
            ButtonState::Inactive => INACTIVE_CLASS,
        }
    }

    /// The other state.
    pub fn flipped(self) -> Self {
        match self {
            ButtonState::Active => ButtonState::Inactive,
            ButtonState::Inactive => ButtonState::Active,
        }
    }

    /// Reads the state from a `class` attribute such as `"btn btn-danger"`.
    pub fn from_class_list(classes: &str) -> Option<Self> {
        classes.split_whitespace().find_map(|class| match class {
            ACTIVE_CLASS => Some(ButtonState::Active),
            INACTIVE_CLASS => Some(ButtonState::Inactive),
            _ => None,
        })
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ButtonState::Active => "active",
            ButtonState::Inactive => "inactive",
        })
    }
}

impl FromStr for ButtonState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" | ACTIVE_CLASS => Ok(ButtonState::Active),
            "inactive" | INACTIVE_CLASS => Ok(ButtonState::Inactive),
            other => Err(format!("unknown button state '{other}'")),
        }
    }
}

/// The button inside one toggle form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteButton {
    pub kind: FavoriteKind,
    pub id: i64,
    pub state: ButtonState,
}

impl FavoriteButton {
    /// DOM id of the button: `btn{id}`.
    pub fn element_id(&self) -> String {
        element_id(self.id)
    }

    /// Full `class` attribute value.
    pub fn class_attr(&self) -> String {
        format!("btn {}", self.state.css_class())
    }
}

/// DOM id of the button for entity `id`.
pub fn element_id(id: i64) -> String {
    format!("btn{id}")
}

type Buttons = HashMap<(FavoriteKind, i64), FavoriteButton>;

/// Shared table of the buttons a client has attached to.
///
/// Buttons are keyed by `(kind, id)` because a team and a player may share a
/// numeric id on one page. Clones share the same table. The lock is held only
/// to read or flip a button.
#[derive(Debug, Clone, Default)]
pub struct ButtonRegistry {
    inner: Arc<Mutex<Buttons>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches to every toggle form in rendered page markup.
    ///
    /// A toggle form is any `<form>` carrying the `team-fav` or `player-fav`
    /// class with a numeric `id`, holding a `<button id="btn{id}">` whose class
    /// list contains `btn-danger` or `btn-secondary`. Attribute order and extra
    /// classes do not matter; forms missing any of these are skipped.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let form_sel = Selector::parse(&format!(
            "form.{}, form.{}",
            FavoriteKind::Team.form_class(),
            FavoriteKind::Player.form_class()
        ))
        .expect("toggle form selector is valid");
        let button_sel = Selector::parse("button[id]").expect("button selector is valid");

        let registry = Self::new();

        for form in document.select(&form_sel) {
            let element = form.value();
            let kind = if element
                .classes()
                .any(|c| c == FavoriteKind::Team.form_class())
            {
                FavoriteKind::Team
            } else {
                FavoriteKind::Player
            };

            let Some(id) = element.id().and_then(|id| id.parse::<i64>().ok()) else {
                continue;
            };

            let button_id = element_id(id);
            let Some(button) = form
                .select(&button_sel)
                .find(|b| b.value().id() == Some(button_id.as_str()))
            else {
                continue;
            };

            if let Some(state) = button
                .value()
                .attr("class")
                .and_then(ButtonState::from_class_list)
            {
                registry.register(kind, id, state);
            }
        }

        registry
    }

    fn lock(&self) -> MutexGuard<'_, Buttons> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a button.
    pub fn register(&self, kind: FavoriteKind, id: i64, state: ButtonState) {
        self.lock()
            .insert((kind, id), FavoriteButton { kind, id, state });
    }

    pub fn get(&self, kind: FavoriteKind, id: i64) -> Option<FavoriteButton> {
        self.lock().get(&(kind, id)).cloned()
    }

    pub fn state(&self, kind: FavoriteKind, id: i64) -> Option<ButtonState> {
        self.lock().get(&(kind, id)).map(|b| b.state)
    }

    pub fn contains(&self, kind: FavoriteKind, id: i64) -> bool {
        self.lock().contains_key(&(kind, id))
    }

    /// Flips one button and returns its new state, or `None` if unknown.
    pub fn flip(&self, kind: FavoriteKind, id: i64) -> Option<ButtonState> {
        let mut buttons = self.lock();
        let button = buttons.get_mut(&(kind, id))?;
        button.state = button.state.flipped();
        Some(button.state)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
