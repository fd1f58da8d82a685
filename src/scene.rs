//! Editable charge configuration over a cached observation grid.
//!
//! This is the state an interactive front end keeps between redraws: an owned list of charge
//! descriptors, an optional index of the point charge currently being dragged, and the grid the
//! field is sampled on. Every redraw evaluates one snapshot of the list, so a field is never
//! computed against a half-applied edit.

use crate::charges::{Charge, Distribution, InfiniteLineCharge};
use crate::errors::{FieldError, FieldResult};
use crate::fields::{electric_field_from_lines, field_and_potential, FieldMap};
use crate::grid::Grid;
use crate::math::{Position, Scalar, R3};

/// Pick radius used by [`Scene::select_at`] unless overridden.
pub const DEFAULT_PICK_RADIUS: Scalar = 0.3;

/// Item held by a [`Scene`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    /// Discretizable distribution.
    Distribution(Distribution),
    /// Infinite line charge; contributes a field but no potential.
    InfiniteLine(InfiniteLineCharge),
}

impl From<Distribution> for SceneItem {
    fn from(value: Distribution) -> Self {
        Self::Distribution(value)
    }
}

impl From<InfiniteLineCharge> for SceneItem {
    fn from(value: InfiniteLineCharge) -> Self {
        Self::InfiniteLine(value)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    item: SceneItem,
    charges: Vec<Charge>,
}

impl Entry {
    fn new(item: SceneItem) -> FieldResult<Self> {
        let charges = match &item {
            SceneItem::Distribution(d) => d.discretize()?,
            SceneItem::InfiniteLine(_) => Vec::new(),
        };
        Ok(Self { item, charges })
    }

    fn point_position(&self) -> Option<Position> {
        match self.item {
            SceneItem::Distribution(Distribution::Point { position, .. }) => Some(position),
            _ => None,
        }
    }
}

/// Owned, editable charge list sampled on a cached grid.
#[derive(Debug, Clone)]
pub struct Scene {
    grid: Grid,
    entries: Vec<Entry>,
    selected: Option<usize>,
    pick_radius: Scalar,
}

impl Scene {
    /// Creates an empty scene sampling on `grid`.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            entries: Vec::new(),
            selected: None,
            pick_radius: DEFAULT_PICK_RADIUS,
        }
    }

    /// Overrides the pick radius used by [`Scene::select_at`].
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] unless `radius` is finite and positive.
    pub fn with_pick_radius(mut self, radius: Scalar) -> FieldResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(FieldError::InvalidGeometry(format!(
                "pick radius must be finite and positive, got {radius}"
            )));
        }
        self.pick_radius = radius;
        Ok(self)
    }

    /// The cached observation grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the cached grid.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] when the new grid's dimensionality differs from the current
    /// one while items are present; the scene is left unchanged.
    pub fn set_grid(&mut self, grid: Grid) -> FieldResult<()> {
        if !self.entries.is_empty() && grid.dimension() != self.grid.dimension() {
            return Err(FieldError::InvalidGeometry(format!(
                "scene items are {} but the new grid is {}",
                self.grid.dimension(),
                grid.dimension()
            )));
        }
        self.grid = grid;
        Ok(())
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the scene holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an item and returns its index.
    ///
    /// # Errors
    ///
    /// Discretization errors, or [`FieldError::InvalidGeometry`] when the item's dimensionality
    /// differs from the grid's. Rejected items leave the scene untouched.
    pub fn add(&mut self, item: impl Into<SceneItem>) -> FieldResult<usize> {
        let item = item.into();
        let dimension = match &item {
            SceneItem::Distribution(d) => d.dimension(),
            SceneItem::InfiniteLine(l) => l.dimension(),
        };
        if dimension != self.grid.dimension() {
            log::warn!("ignoring {dimension} item on a {} grid", self.grid.dimension());
            return Err(FieldError::InvalidGeometry(format!(
                "item is {dimension} but the grid is {}",
                self.grid.dimension()
            )));
        }
        let entry = Entry::new(item).inspect_err(|err| log::warn!("ignoring item: {err}"))?;
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Removes the item at `index`, keeping the selection pointed at the same item.
    pub fn remove(&mut self, index: usize) -> Option<SceneItem> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Some(entry.item)
    }

    /// Removes every item and clears the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    /// Selects the first point charge within the pick radius of `at`.
    pub fn select_at(&mut self, at: Position) -> Option<usize> {
        let hit = self.entries.iter().position(|e| {
            e.point_position()
                .and_then(|p| p.distance_to(&at))
                .is_some_and(|d| d < self.pick_radius)
        });
        if let Some(index) = hit {
            log::debug!("selected point charge {index}");
        }
        self.selected = hit;
        hit
    }

    /// Index of the item being edited, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Moves the selected point charge to `to`. Returns `Ok(false)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidGeometry`] when `to` is not finite or differs in dimensionality from
    /// the grid.
    pub fn drag_to(&mut self, to: Position) -> FieldResult<bool> {
        let Some(index) = self.selected else {
            return Ok(false);
        };
        if to.dimension() != self.grid.dimension() {
            return Err(FieldError::InvalidGeometry(format!(
                "cannot drag to a {} position on a {} grid",
                to.dimension(),
                self.grid.dimension()
            )));
        }
        let entry = &mut self.entries[index];
        let SceneItem::Distribution(Distribution::Point { magnitude, .. }) = entry.item else {
            return Ok(false);
        };
        let moved = Entry::new(Distribution::point(to, magnitude).into())?;
        *entry = moved;
        Ok(true)
    }

    /// Ends a drag, returning the index that was being edited.
    pub fn release(&mut self) -> Option<usize> {
        self.selected.take()
    }

    /// All discretized charges, in item order, as one consistent snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Charge> {
        self.entries
            .iter()
            .flat_map(|e| e.charges.iter().copied())
            .collect()
    }

    fn lines(&self) -> Vec<InfiniteLineCharge> {
        self.entries
            .iter()
            .filter_map(|e| match e.item {
                SceneItem::InfiniteLine(line) => Some(line),
                SceneItem::Distribution(_) => None,
            })
            .collect()
    }

    /// Field and potential on the cached grid.
    ///
    /// # Errors
    ///
    /// [`FieldError::UndefinedPotential`] when an infinite line is present; use
    /// [`Scene::evaluate_field`] instead.
    pub fn evaluate(&self) -> FieldResult<FieldMap> {
        if self
            .entries
            .iter()
            .any(|e| matches!(e.item, SceneItem::InfiniteLine(_)))
        {
            return Err(FieldError::UndefinedPotential("an infinite line charge"));
        }
        field_and_potential(&self.snapshot(), self.grid.points())
    }

    /// Field on the cached grid, infinite lines included.
    ///
    /// # Errors
    ///
    /// Validation errors from the evaluators.
    pub fn evaluate_field(&self) -> FieldResult<Vec<R3>> {
        let points = self.grid.points();
        let mut field = crate::fields::electric_field(&self.snapshot(), points)?;
        let lines = self.lines();
        if !lines.is_empty() {
            for (e, l) in field.iter_mut().zip(electric_field_from_lines(&lines, points)?) {
                *e += l;
            }
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::COULOMB_CONSTANT;
    use crate::grid::GridConfig;

    fn scene() -> Scene {
        Scene::new(GridConfig::planar(-2.0, 2.0, -2.0, 2.0, 5).build().unwrap())
    }

    #[test]
    fn add_and_remove_keep_order() {
        let mut s = scene();
        let a = s.add(Distribution::point(Position::planar(0.0, 0.0), 1.0)).unwrap();
        let b = s
            .add(Distribution::circle(Position::planar(0.0, 0.0), 1.0, -1.0, 16))
            .unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(s.snapshot().len(), 17);
        assert!(matches!(s.remove(0), Some(SceneItem::Distribution(Distribution::Point { .. }))));
        assert_eq!(s.len(), 1);
        assert!(s.remove(5).is_none());
    }

    #[test]
    fn mismatched_items_are_rejected_without_side_effects() {
        let mut s = scene();
        let err = s
            .add(Distribution::point(Position::spatial(0.0, 0.0, 0.0), 1.0))
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidGeometry(_)));
        assert!(s
            .add(Distribution::circle(Position::planar(0.0, 0.0), 1.0, 1.0, 0))
            .is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn drag_moves_selected_point_charge() {
        let mut s = scene();
        s.add(Distribution::segment(
            Position::planar(-1.0, 1.0),
            Position::planar(1.0, 1.0),
            1.0,
            8,
        ))
        .unwrap();
        s.add(Distribution::point(Position::planar(0.5, 0.5), 2.0)).unwrap();

        assert_eq!(s.select_at(Position::planar(0.6, 0.4)), Some(1));
        assert!(s.drag_to(Position::planar(-1.0, -1.0)).unwrap());
        assert_eq!(s.release(), Some(1));
        assert_eq!(s.selected(), None);

        let moved = s.snapshot().last().copied().unwrap();
        assert_eq!(moved.position(), Position::planar(-1.0, -1.0));
        assert_eq!(moved.magnitude(), 2.0);
        assert!(!s.drag_to(Position::planar(0.0, 0.0)).unwrap());
    }

    #[test]
    fn selection_misses_outside_pick_radius() {
        let mut s = scene().with_pick_radius(0.1).unwrap();
        s.add(Distribution::point(Position::planar(0.0, 0.0), 1.0)).unwrap();
        assert_eq!(s.select_at(Position::planar(0.2, 0.0)), None);
        assert_eq!(s.select_at(Position::planar(0.05, 0.0)), Some(0));
    }

    #[test]
    fn unusable_pick_radius_is_rejected() {
        for radius in [-0.3, 0.0, Scalar::NAN, Scalar::INFINITY] {
            assert!(matches!(
                scene().with_pick_radius(radius),
                Err(FieldError::InvalidGeometry(_))
            ));
        }
    }

    #[test]
    fn removing_items_tracks_selection() {
        let mut s = scene();
        s.add(Distribution::point(Position::planar(-1.0, 0.0), 1.0)).unwrap();
        s.add(Distribution::point(Position::planar(1.0, 0.0), 1.0)).unwrap();
        assert_eq!(s.select_at(Position::planar(1.0, 0.0)), Some(1));
        s.remove(0);
        assert_eq!(s.selected(), Some(0));
        s.remove(0);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn evaluate_matches_direct_evaluation() {
        let mut s = scene();
        s.add(Distribution::point(Position::planar(0.5, 0.5), 1.0e-9)).unwrap();
        s.add(Distribution::point(Position::planar(-0.5, 0.5), -1.0e-9)).unwrap();
        let map = s.evaluate().unwrap();
        let direct = field_and_potential(&s.snapshot(), s.grid().points()).unwrap();
        assert_eq!(map, direct);

        // Centre node of the 5x5 grid sits on the dipole's symmetry axis.
        let centre = s.grid().index(2, 2, 0).unwrap();
        assert_relative_eq!(map.potential()[centre], 0.0, epsilon = 1.0e-9);
        let field = s.evaluate_field().unwrap();
        assert_relative_eq!(field[centre], map.field()[centre], max_relative = 1.0e-12);
        // Field points from the positive charge towards the negative one.
        let expected = -2.0 * std::f64::consts::SQRT_2 * COULOMB_CONSTANT * 1.0e-9;
        assert_relative_eq!(map.field()[centre].x, expected, max_relative = 1.0e-12);
        assert_relative_eq!(map.field()[centre].y, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn infinite_lines_contribute_field_but_no_potential() {
        let mut s = scene();
        let line =
            InfiniteLineCharge::new(Position::planar(0.0, 0.5), Position::planar(1.0, 0.0), 1.0e-9)
                .unwrap();
        s.add(line).unwrap();
        assert!(matches!(s.evaluate(), Err(FieldError::UndefinedPotential(_))));
        let field = s.evaluate_field().unwrap();
        let expected = line.electric_field(s.grid().points()).unwrap();
        assert_eq!(field, expected);
    }

    #[test]
    fn grid_swap_requires_matching_dimension() {
        let mut s = scene();
        s.add(Distribution::point(Position::planar(0.0, 0.0), 1.0)).unwrap();
        let spatial = GridConfig::spatial(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 3).build().unwrap();
        assert!(s.set_grid(spatial).is_err());
        let finer = GridConfig::planar(-1.0, 1.0, -1.0, 1.0, 11).build().unwrap();
        s.set_grid(finer).unwrap();
        assert_eq!(s.evaluate().unwrap().len(), 121);
        s.clear();
        assert!(s.is_empty());
    }
}
