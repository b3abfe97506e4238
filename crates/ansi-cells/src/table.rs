//! Color and color pair registry
//!
//! Cell renderers address colors and fg/bg pairs by small integer handles.
//! [`ColorTable`] hands those handles out the first time a value is seen and
//! keeps track of the pair currently in use.
//!
//! Handles come from one increasing counter per namespace. They are never
//! recycled: discarding a value deletes its mapping and a later re-add gets a
//! fresh handle. Pair 0 belongs to the renderer and is only handed out when
//! the caller explicitly allows it.

use crate::TranslateError;
use ansi_cells_parser::{Color, ColorPair};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// Handle of a registered color
pub type ColorIndex = i32;

/// Handle of a registered color pair
pub type PairIndex = i32;

/// Handle of the unset color and the default pair
pub const UNSET_INDEX: i32 = -1;

/// Anything the table can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableEntry {
    Color(Option<Color>),
    Pair(ColorPair),
}

impl From<Color> for TableEntry {
    fn from(color: Color) -> Self {
        Self::Color(Some(color))
    }
}

impl From<Option<Color>> for TableEntry {
    fn from(color: Option<Color>) -> Self {
        Self::Color(color)
    }
}

impl From<ColorPair> for TableEntry {
    fn from(pair: ColorPair) -> Self {
        Self::Pair(pair)
    }
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(Some(color)) => write!(f, "color {color}"),
            Self::Color(None) => write!(f, "unset color"),
            Self::Pair(pair) => write!(f, "color pair {pair}"),
        }
    }
}

/// Callbacks fired once per newly assigned handle
///
/// The table is passed back so a hook can look up the handle it was given.
pub trait TableHooks {
    fn on_add_color(&mut self, _color: &Color, _table: &ColorTable) {}

    fn on_add_pair(&mut self, _pair: &ColorPair, _table: &ColorTable) {}
}

impl TableHooks for () {}

impl<T: TableHooks + ?Sized> TableHooks for &mut T {
    fn on_add_color(&mut self, color: &Color, table: &ColorTable) {
        (**self).on_add_color(color, table);
    }

    fn on_add_pair(&mut self, pair: &ColorPair, table: &ColorTable) {
        (**self).on_add_pair(pair, table);
    }
}

/// Registry of colors, color pairs and the current pair
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    color_indices: HashMap<Color, ColorIndex>,
    colors_by_index: BTreeMap<ColorIndex, Color>,
    next_color_index: ColorIndex,

    pair_indices: HashMap<ColorPair, PairIndex>,
    pairs_by_index: BTreeMap<PairIndex, ColorPair>,
    next_pair_index: PairIndex,

    current_pair: ColorPair,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a color; no-op if already present
    pub fn add_color(&mut self, color: Option<Color>) -> ColorIndex {
        self.add_color_with(color, &mut ())
    }

    pub fn add_color_with(
        &mut self,
        color: Option<Color>,
        hooks: &mut impl TableHooks,
    ) -> ColorIndex {
        let Some(color) = color else {
            return UNSET_INDEX;
        };
        if let Some(&index) = self.color_indices.get(&color) {
            return index;
        }

        let index = self.next_color_index;
        self.next_color_index += 1;
        self.color_indices.insert(color, index);
        self.colors_by_index.insert(index, color);
        debug!("Registered color {} as {}", color, index);

        hooks.on_add_color(&color, self);
        index
    }

    /// Register a pair and its two colors, background first
    ///
    /// # Errors
    ///
    /// [`TranslateError::ReservedIndex`] when the pair would receive handle 0
    /// and `allow_zero` is false. The colors stay registered.
    pub fn add_pair(&mut self, pair: ColorPair, allow_zero: bool) -> Result<PairIndex, TranslateError> {
        self.add_pair_with(pair, allow_zero, &mut ())
    }

    pub fn add_pair_with(
        &mut self,
        pair: ColorPair,
        allow_zero: bool,
        hooks: &mut impl TableHooks,
    ) -> Result<PairIndex, TranslateError> {
        // The first color registered usually becomes the renderer's fallback,
        // so the background has to win that slot.
        self.add_color_with(pair.background, hooks);
        self.add_color_with(pair.foreground, hooks);

        if pair.is_default() {
            return Ok(UNSET_INDEX);
        }
        if let Some(&index) = self.pair_indices.get(&pair) {
            return Ok(index);
        }
        if self.next_pair_index == 0 && !allow_zero {
            return Err(TranslateError::ReservedIndex(0));
        }

        let index = self.next_pair_index;
        self.next_pair_index += 1;
        self.pair_indices.insert(pair, index);
        self.pairs_by_index.insert(index, pair);
        debug!("Registered color pair {} as {}", pair, index);

        hooks.on_add_pair(&pair, self);
        Ok(index)
    }

    /// Register either kind of entry
    pub fn add(
        &mut self,
        entry: impl Into<TableEntry>,
        allow_zero: bool,
    ) -> Result<i32, TranslateError> {
        match entry.into() {
            TableEntry::Color(color) => Ok(self.add_color(color)),
            TableEntry::Pair(pair) => self.add_pair(pair, allow_zero),
        }
    }

    /// Forget a color; pairs using it are left alone
    pub fn discard_color(&mut self, color: Option<Color>) {
        let Some(color) = color else {
            return;
        };
        if let Some(index) = self.color_indices.remove(&color) {
            self.colors_by_index.remove(&index);
            debug!("Discarded color {} ({})", color, index);
        }
    }

    pub fn discard_pair(&mut self, pair: ColorPair) {
        if let Some(index) = self.pair_indices.remove(&pair) {
            self.pairs_by_index.remove(&index);
            debug!("Discarded color pair {} ({})", pair, index);
        }
    }

    pub fn discard(&mut self, entry: impl Into<TableEntry>) {
        match entry.into() {
            TableEntry::Color(color) => self.discard_color(color),
            TableEntry::Pair(pair) => self.discard_pair(pair),
        }
    }

    /// Handle assigned to `entry`; the unset color and default pair are always -1
    ///
    /// # Errors
    ///
    /// [`TranslateError::NotRegistered`] if the entry was never added or has been discarded.
    pub fn get_index(&self, entry: impl Into<TableEntry>) -> Result<i32, TranslateError> {
        let entry = entry.into();
        let index = match entry {
            TableEntry::Color(None) => Some(UNSET_INDEX),
            TableEntry::Color(Some(color)) => self.color_indices.get(&color).copied(),
            TableEntry::Pair(pair) if pair.is_default() => Some(UNSET_INDEX),
            TableEntry::Pair(pair) => self.pair_indices.get(&pair).copied(),
        };
        index.ok_or_else(|| TranslateError::NotRegistered(entry.to_string()))
    }

    pub fn contains(&self, entry: impl Into<TableEntry>) -> bool {
        self.get_index(entry).is_ok()
    }

    pub fn current_pair(&self) -> ColorPair {
        self.current_pair
    }

    pub fn foreground(&self) -> Option<Color> {
        self.current_pair.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.current_pair.background
    }

    /// Change the current foreground and register the resulting pair
    pub fn set_foreground(&mut self, color: Option<Color>) -> Result<PairIndex, TranslateError> {
        self.set_foreground_with(color, &mut ())
    }

    pub fn set_foreground_with(
        &mut self,
        color: Option<Color>,
        hooks: &mut impl TableHooks,
    ) -> Result<PairIndex, TranslateError> {
        self.current_pair = self.current_pair.with_foreground(color);
        self.add_pair_with(self.current_pair, false, hooks)
    }

    /// Change the current background and register the resulting pair
    pub fn set_background(&mut self, color: Option<Color>) -> Result<PairIndex, TranslateError> {
        self.set_background_with(color, &mut ())
    }

    pub fn set_background_with(
        &mut self,
        color: Option<Color>,
        hooks: &mut impl TableHooks,
    ) -> Result<PairIndex, TranslateError> {
        self.current_pair = self.current_pair.with_background(color);
        self.add_pair_with(self.current_pair, false, hooks)
    }

    /// Drop both sides of the current pair back to unset
    pub fn reset_current_pair(&mut self) {
        self.current_pair = ColorPair::default();
    }

    /// Registered colors in registration order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors_by_index.values().copied()
    }

    /// Registered pairs in registration order
    pub fn pairs(&self) -> impl Iterator<Item = ColorPair> + '_ {
        self.pairs_by_index.values().copied()
    }

    /// Number of registered colors, the unset sentinel excluded
    pub fn len(&self) -> usize {
        self.color_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.color_indices.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.pair_indices.len()
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = Color;
    type IntoIter = std::iter::Copied<std::collections::btree_map::Values<'a, ColorIndex, Color>>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors_by_index.values().copied()
    }
}
