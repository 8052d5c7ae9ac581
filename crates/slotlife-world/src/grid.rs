//! Toroidal grid of slots.

use crate::creature::{Creature, Withdrawal};
use slotlife_core::{Error, Position, Result};
use std::ops::Range;

/// A single slot; holds at most one creature
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    position: Position,
    occupant: Option<Creature>,
}

impl Cell {
    fn new(position: Position) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn occupant(&self) -> Option<&Creature> {
        self.occupant.as_ref()
    }

    pub(crate) fn occupant_mut(&mut self) -> Option<&mut Creature> {
        self.occupant.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Put `creature` here and point it back at this cell
    pub fn place(&mut self, mut creature: Creature) -> Result<()> {
        if self.occupant.is_some() {
            return Err(Error::Occupied(self.position));
        }
        creature.set_location(Some(self.position));
        self.occupant = Some(creature);
        Ok(())
    }

    /// Clear this cell, detaching and returning its occupant
    pub fn remove(&mut self) -> Option<Creature> {
        let mut removed = self.occupant.take()?;
        removed.set_location(None);
        Some(removed)
    }
}

/// Visiting order for [`Grid::traverse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Row-major, first cell to last
    Forward,
    /// Row-major reversed, last cell to first
    Reverse,
}

/// Cell indices in traversal order. Holds no borrow of the grid, so the grid
/// can be mutated while walking it.
#[derive(Debug, Clone)]
pub struct Indices {
    range: Range<usize>,
    order: Traversal,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.order {
            Traversal::Forward => self.range.next(),
            Traversal::Reverse => self.range.next_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Indices {}

/// A 2D toroidal grid, linearized row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn pos_to_index(&self, pos: Position) -> Result<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return Err(Error::OutOfBounds(pos));
        }
        Ok(pos.y * self.width + pos.x)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.pos_to_index(pos).ok().map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        let index = self.pos_to_index(pos)?;
        Ok(&mut self.cells[index])
    }

    pub fn occupant(&self, pos: Position) -> Option<&Creature> {
        self.cell(pos).and_then(Cell::occupant)
    }

    pub(crate) fn occupant_mut(&mut self, pos: Position) -> Result<&mut Creature> {
        self.cell_mut(pos)?
            .occupant_mut()
            .ok_or(Error::Vacant(pos))
    }

    /// True for an in-bounds cell with no occupant
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, Cell::is_empty)
    }

    /// The cell after `pos` in row-major order, wrapping from the end of a row
    /// to the start of the next and from the last cell back to the first
    pub fn next(&self, pos: Position) -> Position {
        let index = pos.y * self.width + pos.x;
        self.index_to_pos((index + 1) % self.cells.len())
    }

    pub fn indices(&self, order: Traversal) -> Indices {
        Indices {
            range: 0..self.cells.len(),
            order,
        }
    }

    /// Visit every cell in the given order
    pub fn traverse(&self, order: Traversal) -> impl Iterator<Item = &Cell> + '_ {
        self.indices(order).map(move |index| &self.cells[index])
    }

    /// Every located creature in row-major order
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.cells.iter().filter_map(Cell::occupant)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn place(&mut self, pos: Position, creature: Creature) -> Result<()> {
        self.cell_mut(pos)?.place(creature)
    }

    pub fn remove(&mut self, pos: Position) -> Result<Option<Creature>> {
        Ok(self.cell_mut(pos)?.remove())
    }

    /// Move the occupant of `from` onto the empty cell `to`. Nothing changes
    /// if `from` is vacant or `to` is occupied.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<()> {
        let to_index = self.pos_to_index(to)?;
        if !self.cells[to_index].is_empty() {
            return Err(Error::Occupied(to));
        }
        let creature = self.cell_mut(from)?.remove().ok_or(Error::Vacant(from))?;
        self.cells[to_index].place(creature)
    }

    /// Take up to `amount` energy from the occupant of `pos`, removing it from
    /// the grid when it runs dry
    pub fn withdraw_energy(&mut self, pos: Position, amount: f64) -> Result<Withdrawal> {
        let cell = self.cell_mut(pos)?;
        let withdrawal = cell
            .occupant_mut()
            .ok_or(Error::Vacant(pos))?
            .withdraw_energy(amount);
        if withdrawal.depleted {
            cell.remove();
        }
        Ok(withdrawal)
    }
}
