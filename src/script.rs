//! Authored dialogue data.
//!
//! A [`DialogueScript`] is an ordered list of [`Line`]s. Scripts are
//! immutable once built and are shared between players behind an [`Arc`].
//!
//! ```
//! use bevy_dialogue_box::prelude::*;
//!
//! let script = (
//!     "Hi".titled("Alice"),
//!     "Hello".titled("Bob"),
//!     "...",
//! )
//!     .into_script();
//!
//! assert_eq!(script.len(), 3);
//! ```

use std::sync::Arc;

/// A single unit of dialogue.
///
/// Lines can't be edited after they're built; authored
/// content should only change at its source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    #[cfg_attr(feature = "serde", serde(default))]
    title: String,
    body: String,
}

impl Line {
    /// A line without a title.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            body: body.into(),
        }
    }

    pub fn titled(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// The speaker or heading. Empty means no title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl From<&str> for Line {
    fn from(body: &str) -> Self {
        Line::new(body)
    }
}

impl From<String> for Line {
    fn from(body: String) -> Self {
        Line::new(body)
    }
}

impl<T: Into<String>> LineExt for T {}

pub trait LineExt: Into<String> {
    /// Build a [`Line`] with this text as the body.
    fn titled(self, title: impl Into<String>) -> Line {
        Line::titled(title, self)
    }
}

/// An ordered sequence of lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueScript {
    lines: Vec<Line>,
}

impl DialogueScript {
    pub fn new(lines: impl IntoIterator<Item = Line>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<T: Into<Line>> FromIterator<T> for DialogueScript {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into))
    }
}

/// Anything that can be played as a script.
///
/// Tuples of up to 15 line-like values are scripts, with the
/// empty tuple being the empty script.
pub trait IntoDialogueScript {
    fn into_script(self) -> Arc<DialogueScript>;
}

impl IntoDialogueScript for Arc<DialogueScript> {
    fn into_script(self) -> Arc<DialogueScript> {
        self
    }
}

impl IntoDialogueScript for &Arc<DialogueScript> {
    fn into_script(self) -> Arc<DialogueScript> {
        Arc::clone(self)
    }
}

impl IntoDialogueScript for DialogueScript {
    fn into_script(self) -> Arc<DialogueScript> {
        Arc::new(self)
    }
}

impl IntoDialogueScript for &DialogueScript {
    fn into_script(self) -> Arc<DialogueScript> {
        Arc::new(self.clone())
    }
}

impl<T: Into<Line>> IntoDialogueScript for Vec<T> {
    fn into_script(self) -> Arc<DialogueScript> {
        Arc::new(self.into_iter().collect())
    }
}

impl IntoDialogueScript for Line {
    fn into_script(self) -> Arc<DialogueScript> {
        Arc::new(DialogueScript::new([self]))
    }
}

macro_rules! script_tuple {
    ($count:literal, $($ty:ident),*) => {
        #[allow(non_snake_case)]
        impl<$($ty),*> IntoDialogueScript for ($($ty,)*)
        where
            $($ty: Into<Line>),*
        {
            #[allow(unused)]
            fn into_script(self) -> Arc<DialogueScript> {
                let ($($ty,)*) = self;

                let lines: [Line; $count] = [
                    $($ty.into()),*
                ];

                Arc::new(DialogueScript::new(lines))
            }
        }
    };
}

variadics_please::all_tuples_with_size!(script_tuple, 0, 15, T);
