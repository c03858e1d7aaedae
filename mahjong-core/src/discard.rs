use crate::Tile;

/// Tiles discarded during a round, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    tiles: Vec<Tile>,
}

impl DiscardPile {
    pub fn new() -> Self {
        DiscardPile { tiles: Vec::new() }
    }

    /// Put a tile on top of the pile
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Take the top tile (a claim), or None if the pile is empty
    pub fn pop(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// The top tile, or None if the pile is empty
    pub fn last(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    /// Number of copies of `tile` in the pile
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
