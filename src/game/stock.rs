//! Stock and waste piles with bounded recycling
//!
//! Both piles are plain vectors with the top at the back, the same shape the
//! deal produces: drawing pops the stock and pushes the waste, so the waste
//! holds cards in draw order with the most recent draw on top.

use crate::core::Card;
use crate::{PyramidError, Result};
use serde::{Deserialize, Serialize};

/// Default number of times the waste may be recycled back into the stock
pub const DEFAULT_RECYCLE_LIMIT: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockWaste {
    stock: Vec<Card>,
    waste: Vec<Card>,
    recycles_used: u32,
    recycle_limit: u32,
}

impl StockWaste {
    pub fn new(stock: Vec<Card>, recycle_limit: u32) -> Self {
        StockWaste {
            stock,
            waste: Vec::new(),
            recycles_used: 0,
            recycle_limit,
        }
    }

    /// Move the top stock card face up onto the waste.
    pub fn draw(&mut self) -> Result<Card> {
        let card = self.stock.pop().ok_or(PyramidError::StockEmpty)?;
        self.waste.push(card);
        Ok(card)
    }

    /// Turn the waste back into the stock, preserving the original draw
    /// order: after a recycle, drawing the whole stock reproduces the exact
    /// card sequence the waste saw. Allowed only while the stock is empty,
    /// the waste is non-empty, and the recycle allowance is not spent.
    pub fn recycle(&mut self) -> Result<()> {
        if !self.stock.is_empty() {
            return Err(PyramidError::RecycleNotAllowed);
        }
        if self.recycles_used >= self.recycle_limit {
            return Err(PyramidError::RecycleExhausted);
        }
        if self.waste.is_empty() {
            return Err(PyramidError::RecycleNotAllowed);
        }
        // waste[0] was drawn first; reversing puts it back on top of the
        // stock so it is drawn first again.
        self.stock = std::mem::take(&mut self.waste);
        self.stock.reverse();
        self.recycles_used += 1;
        Ok(())
    }

    /// True when a recycle would succeed right now.
    pub fn can_recycle(&self) -> bool {
        self.stock.is_empty() && !self.waste.is_empty() && self.recycles_used < self.recycle_limit
    }

    /// The most recently drawn card, still on the waste.
    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    /// Pop the waste top for a match. Fails with `EmptySource` when empty.
    pub fn take_waste_top(&mut self) -> Result<Card> {
        self.waste.pop().ok_or(PyramidError::EmptySource)
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    pub fn recycles_used(&self) -> u32 {
        self.recycles_used
    }

    pub fn recycle_limit(&self) -> u32 {
        self.recycle_limit
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }
}
