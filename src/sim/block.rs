//! Block types, the block table and the block grid
//!
//! Every block kind has one row in [`BLOCK_TABLE`]: its level-file symbol,
//! texture, sound, sprite footprint and activation rule. The grid only
//! dispatches on the rule, never on the kind itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, rect_collision};
use super::geometry::{Arena, Rect};
use crate::assets::{SoundId, TextureId};
use crate::consts::*;

/// Block types, one per level-file character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Red,
    Green,
    Blue,
    Tan,
    Purple,
    Yellow,
    /// Indestructible black wall
    Wall,
    Counter0,
    Counter1,
    Counter2,
    Counter3,
    Counter4,
    Counter5,
    Hyperspace,
    /// Ball speed-up
    Speed,
    MaxAmmo,
    Roamer,
    Bomb,
    Death,
    ExtraBall,
    MachineGun,
    WallOff,
    Random,
    Drop,
    Timer,
    MultiBall,
    Sticky,
    Reverse,
    PaddleShrink,
    PaddleExpand,
}

/// Filler character for "no block"
pub const EMPTY_CELL: char = '.';

/// Effects a block can apply to the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleEffect {
    /// Next paddle hit catches the ball
    ArmSticky,
    ToggleReverse,
    Shrink,
    Expand,
}

/// Effects a block can apply to the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallEffect {
    SpeedUp,
}

/// Side effect produced by an activation, applied by whoever owns the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockEffect {
    Paddle(PaddleEffect),
    Ball(BallEffect),
}

/// Activation algorithm for a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationRule {
    /// Never deactivates, scores nothing
    Indestructible,
    /// Deactivate the cell
    Destroy,
    /// Step the counter down one level; level 0 destroys
    DecrementCounter,
    /// Deactivate the cell and its 3x3 neighbourhood
    AreaBlast,
    /// Deactivate and mutate the paddle
    PaddleMutator(PaddleEffect),
    /// Deactivate and mutate the ball
    BallMutator(BallEffect),
}

/// Static per-kind data
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub kind: BlockKind,
    /// Level-file character
    pub symbol: char,
    pub texture: TextureId,
    /// Sound played when the block is hit
    pub sound: SoundId,
    /// Native sprite size; also the collision size
    pub footprint: Vec2,
    pub rule: ActivationRule,
}

impl BlockSpec {
    /// Offset that centers the sprite inside a grid cell
    pub fn centering_offset(&self, cell: Vec2) -> Vec2 {
        ((cell - self.footprint) * 0.5).floor()
    }
}

const STANDARD: Vec2 = Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT);

const fn spec(
    kind: BlockKind,
    symbol: char,
    texture: TextureId,
    sound: SoundId,
    footprint: Vec2,
    rule: ActivationRule,
) -> BlockSpec {
    BlockSpec {
        kind,
        symbol,
        texture,
        sound,
        footprint,
        rule,
    }
}

use ActivationRule::*;
use BlockKind as K;
use SoundId as S;
use TextureId as T;

/// Block table, indexed by `BlockKind as usize`
pub static BLOCK_TABLE: [BlockSpec; 30] = [
    spec(K::Red, 'r', T::RedBlock, S::Touch, STANDARD, Destroy),
    spec(K::Green, 'g', T::GreenBlock, S::Touch, STANDARD, Destroy),
    spec(K::Blue, 'b', T::BlueBlock, S::Touch, STANDARD, Destroy),
    spec(K::Tan, 't', T::TanBlock, S::Touch, STANDARD, Destroy),
    spec(K::Purple, 'p', T::PurpleBlock, S::Touch, STANDARD, Destroy),
    spec(K::Yellow, 'y', T::YellowBlock, S::Touch, STANDARD, Destroy),
    spec(K::Wall, 'w', T::BlackBlock, S::Touch, Vec2::new(50.0, 30.0), Indestructible),
    spec(K::Counter0, '0', T::CounterBlock(0), S::Touch, STANDARD, DecrementCounter),
    spec(K::Counter1, '1', T::CounterBlock(1), S::Touch, STANDARD, DecrementCounter),
    spec(K::Counter2, '2', T::CounterBlock(2), S::Touch, STANDARD, DecrementCounter),
    spec(K::Counter3, '3', T::CounterBlock(3), S::Touch, STANDARD, DecrementCounter),
    spec(K::Counter4, '4', T::CounterBlock(4), S::Touch, STANDARD, DecrementCounter),
    spec(K::Counter5, '5', T::CounterBlock(5), S::Touch, STANDARD, DecrementCounter),
    spec(K::Hyperspace, 'H', T::Hyperspace, S::Touch, Vec2::new(31.0, 31.0), Destroy),
    spec(K::Speed, 'B', T::Speed, S::Boing, STANDARD, BallMutator(BallEffect::SpeedUp)),
    spec(K::MaxAmmo, 'c', T::LotsAmmo, S::Touch, STANDARD, Destroy),
    spec(K::Roamer, '+', T::Roamer, S::Touch, Vec2::new(25.0, 27.0), Destroy),
    spec(K::Bomb, 'X', T::Bomb, S::Bomb, Vec2::new(30.0, 30.0), AreaBlast),
    spec(K::Death, 'D', T::Death, S::Touch, Vec2::new(30.0, 30.0), Destroy),
    spec(K::ExtraBall, 'L', T::ExtraBall, S::Touch, Vec2::new(30.0, 19.0), Destroy),
    spec(K::MachineGun, 'M', T::MachineGun, S::Touch, Vec2::new(35.0, 15.0), Destroy),
    spec(K::WallOff, 'W', T::WallOff, S::Touch, Vec2::new(27.0, 23.0), Destroy),
    spec(K::Random, '?', T::RedBlock, S::Touch, STANDARD, Destroy),
    spec(K::Drop, 'd', T::GreenBlock, S::Touch, STANDARD, Destroy),
    spec(K::Timer, 'T', T::Clock, S::Touch, Vec2::new(21.0, 21.0), Destroy),
    spec(K::MultiBall, 'm', T::MultiBall, S::Touch, STANDARD, Destroy),
    spec(
        K::Sticky,
        's',
        T::Sticky,
        S::Sticky,
        Vec2::new(32.0, 27.0),
        PaddleMutator(PaddleEffect::ArmSticky),
    ),
    spec(
        K::Reverse,
        'R',
        T::Reverse,
        S::Warp,
        Vec2::new(33.0, 16.0),
        PaddleMutator(PaddleEffect::ToggleReverse),
    ),
    spec(
        K::PaddleShrink,
        '<',
        T::PadShrink,
        S::Wzzz2,
        Vec2::new(40.0, 15.0),
        PaddleMutator(PaddleEffect::Shrink),
    ),
    spec(
        K::PaddleExpand,
        '>',
        T::PadExpand,
        S::Wzzz,
        Vec2::new(40.0, 15.0),
        PaddleMutator(PaddleEffect::Expand),
    ),
];

impl BlockKind {
    /// Table row for this kind
    #[inline]
    pub fn spec(self) -> &'static BlockSpec {
        &BLOCK_TABLE[self as usize]
    }

    /// Map a level-file character to a block kind (`None` = empty cell)
    pub fn from_symbol(c: char) -> Option<Self> {
        BLOCK_TABLE.iter().find(|s| s.symbol == c).map(|s| s.kind)
    }

    pub fn symbol(self) -> char {
        self.spec().symbol
    }

    /// Hits left on a counter block before it becomes destructible
    pub fn counter_level(self) -> Option<u8> {
        match self {
            K::Counter0 => Some(0),
            K::Counter1 => Some(1),
            K::Counter2 => Some(2),
            K::Counter3 => Some(3),
            K::Counter4 => Some(4),
            K::Counter5 => Some(5),
            _ => None,
        }
    }

    pub fn counter(level: u8) -> Option<Self> {
        match level {
            0 => Some(K::Counter0),
            1 => Some(K::Counter1),
            2 => Some(K::Counter2),
            3 => Some(K::Counter3),
            4 => Some(K::Counter4),
            5 => Some(K::Counter5),
            _ => None,
        }
    }

    /// Returns true if this block must be destroyed to clear the level
    pub fn counts_for_clear(self) -> bool {
        self.spec().rule != Indestructible
    }
}

/// One placed block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub row: usize,
    pub col: usize,
    pub active: bool,
    /// Sprite offset inside the cell, placement only
    pub offset: Vec2,
}

/// What an activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Empty, inactive or out-of-range cell
    Ignored,
    /// Indestructible wall was hit
    Indestructible,
    /// Counter stepped down; the cell stays active
    Decremented { to: BlockKind },
    /// The cell was deactivated
    Destroyed,
    /// A bomb cleared its neighbourhood
    Blasted,
}

/// Result of [`BlockGrid::activate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    /// Kind of the activated block before the hit
    pub kind: Option<BlockKind>,
    pub outcome: ActivationOutcome,
    /// Number of cells deactivated
    pub deactivated: u32,
    pub effect: Option<BlockEffect>,
}

impl Activation {
    pub fn ignored() -> Self {
        Self {
            kind: None,
            outcome: ActivationOutcome::Ignored,
            deactivated: 0,
            effect: None,
        }
    }

    /// Returns true if this activation earns points
    pub fn scores(&self) -> bool {
        matches!(
            self.outcome,
            ActivationOutcome::Decremented { .. }
                | ActivationOutcome::Destroyed
                | ActivationOutcome::Blasted
        )
    }

    /// Sound cue for this activation
    pub fn sound(&self) -> Option<SoundId> {
        match self.outcome {
            ActivationOutcome::Ignored | ActivationOutcome::Indestructible => None,
            _ => self.kind.map(|k| k.spec().sound),
        }
    }
}

/// The block grid for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    /// Row-major cells
    cells: Vec<Option<Block>>,
    rows: usize,
    cols: usize,
    /// Screen position of cell (0, 0)
    origin: Vec2,
    cell_size: Vec2,
    /// Active blocks that count toward clearing the level
    remaining: u32,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::empty(&Arena::standard())
    }
}

impl BlockGrid {
    /// A grid with no blocks
    pub fn empty(arena: &Arena) -> Self {
        Self {
            cells: vec![None; BLOCK_ROWS_MAX * BLOCK_COLS_MAX],
            rows: BLOCK_ROWS_MAX,
            cols: BLOCK_COLS_MAX,
            origin: Vec2::new(arena.bounds.x, arena.bounds.y),
            cell_size: arena.cell_size(),
            remaining: 0,
        }
    }

    /// Build the grid from level rows, one character per cell
    ///
    /// Rows past `BLOCK_ROWS_MAX` and characters past `BLOCK_COLS_MAX` are
    /// ignored; unknown characters are empty cells.
    pub fn load<S: AsRef<str>>(rows: &[S], arena: &Arena) -> Self {
        let mut grid = Self::empty(arena);

        for (r, line) in rows.iter().take(grid.rows).enumerate() {
            for (c, ch) in line.as_ref().chars().take(grid.cols).enumerate() {
                let Some(kind) = BlockKind::from_symbol(ch) else {
                    continue;
                };
                let offset = kind.spec().centering_offset(grid.cell_size);
                grid.cells[r * grid.cols + c] = Some(Block {
                    kind,
                    row: r,
                    col: c,
                    active: true,
                    offset,
                });
                if kind.counts_for_clear() {
                    grid.remaining += 1;
                }
            }
        }

        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Destructible blocks still standing
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Block at a cell, active or not
    pub fn block(&self, row: usize, col: usize) -> Option<&Block> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.block(row, col).is_some_and(|b| b.active)
    }

    /// Screen-space collision rectangle of a block; `Rect::ZERO` for empty
    /// or out-of-range cells
    pub fn collision_rect(&self, row: usize, col: usize) -> Rect {
        match self.block(row, col) {
            Some(block) => {
                let cell = self.origin
                    + Vec2::new(col as f32 * self.cell_size.x, row as f32 * self.cell_size.y);
                Rect::from_pos_size(cell + block.offset, block.kind.spec().footprint)
            }
            None => Rect::ZERO,
        }
    }

    /// Active blocks in row-major order (what the renderer draws)
    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.cells.iter().flatten().filter(|b| b.active)
    }

    /// First active block overlapping `rect`, scanning row-major
    pub fn first_overlap(&self, rect: &Rect) -> Option<(usize, usize, CollisionResult)> {
        self.active_blocks().find_map(|b| {
            let result = rect_collision(rect, &self.collision_rect(b.row, b.col));
            result.hit.then_some((b.row, b.col, result))
        })
    }

    /// Deactivate a single destructible cell; returns true if it changed
    fn deactivate(&mut self, row: usize, col: usize) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };
        match &mut self.cells[i] {
            Some(block) if block.active && block.kind.counts_for_clear() => {
                block.active = false;
                self.remaining = self.remaining.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Apply a block's hit behavior
    pub fn activate(&mut self, row: usize, col: usize) -> Activation {
        let Some(i) = self.index(row, col) else {
            return Activation::ignored();
        };
        let kind = match &self.cells[i] {
            Some(block) if block.active => block.kind,
            _ => return Activation::ignored(),
        };

        let mut activation = Activation {
            kind: Some(kind),
            outcome: ActivationOutcome::Destroyed,
            deactivated: 0,
            effect: None,
        };

        match kind.spec().rule {
            Indestructible => {
                activation.outcome = ActivationOutcome::Indestructible;
            }
            Destroy => {
                activation.deactivated = u32::from(self.deactivate(row, col));
            }
            DecrementCounter => match kind.counter_level().filter(|&n| n > 0) {
                Some(level) => {
                    let to = BlockKind::counter(level - 1).unwrap_or(K::Counter0);
                    if let Some(block) = &mut self.cells[i] {
                        block.kind = to;
                        block.offset = to.spec().centering_offset(self.cell_size);
                    }
                    activation.outcome = ActivationOutcome::Decremented { to };
                }
                None => {
                    activation.deactivated = u32::from(self.deactivate(row, col));
                }
            },
            AreaBlast => {
                // Single-level blast: neighbours are removed without running
                // their own activation
                let mut cleared = 0;
                for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
                    for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                        cleared += u32::from(self.deactivate(r, c));
                    }
                }
                activation.outcome = ActivationOutcome::Blasted;
                activation.deactivated = cleared;
            }
            PaddleMutator(effect) => {
                activation.deactivated = u32::from(self.deactivate(row, col));
                activation.effect = Some(BlockEffect::Paddle(effect));
            }
            BallMutator(effect) => {
                activation.deactivated = u32::from(self.deactivate(row, col));
                activation.effect = Some(BlockEffect::Ball(effect));
            }
        }

        log::debug!(
            "Block {:?} at ({}, {}) -> {:?}, {} remaining",
            kind,
            row,
            col,
            activation.outcome,
            self.remaining
        );

        activation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> BlockGrid {
        BlockGrid::load(rows, &Arena::standard())
    }

    #[test]
    fn test_table_is_indexed_by_kind() {
        for (i, spec) in BLOCK_TABLE.iter().enumerate() {
            assert_eq!(spec.kind as usize, i, "{:?}", spec.kind);
            assert_eq!(BlockKind::from_symbol(spec.symbol), Some(spec.kind));
        }
    }

    #[test]
    fn test_unknown_symbols_are_empty() {
        assert_eq!(BlockKind::from_symbol('.'), None);
        assert_eq!(BlockKind::from_symbol(' '), None);
        assert_eq!(BlockKind::from_symbol('z'), None);
    }

    #[test]
    fn test_load_counts_destructible_blocks() {
        let g = grid(&["rgw......", "..X..www.", "3"]);
        assert_eq!(g.remaining(), 4);
        assert!(g.is_active(0, 0));
        assert!(g.is_active(0, 2));
        assert!(!g.is_active(0, 3));
        assert_eq!(g.block(2, 0).map(|b| b.kind), Some(BlockKind::Counter3));
    }

    #[test]
    fn test_out_of_range_queries_are_safe() {
        let mut g = grid(&["r"]);
        assert!(!g.is_active(99, 0));
        assert!(!g.is_active(0, 99));
        assert_eq!(g.collision_rect(99, 99), Rect::ZERO);
        assert_eq!(g.activate(99, 99), Activation::ignored());
        assert_eq!(g.remaining(), 1);
    }

    #[test]
    fn test_collision_rect_is_centered_in_cell() {
        let arena = Arena::standard();
        let g = BlockGrid::load(&["r"], &arena);
        let rect = g.collision_rect(0, 0);
        let cell = arena.cell_rect(0, 0);
        assert_eq!(rect.w, BLOCK_WIDTH);
        assert_eq!(rect.h, BLOCK_HEIGHT);
        assert_eq!(rect.x, cell.x + ((cell.w - BLOCK_WIDTH) * 0.5).floor());
        assert_eq!(rect.y, cell.y + ((cell.h - BLOCK_HEIGHT) * 0.5).floor());
    }

    #[test]
    fn test_wall_never_deactivates() {
        let mut g = grid(&["wr"]);
        for _ in 0..5 {
            let a = g.activate(0, 0);
            assert_eq!(a.outcome, ActivationOutcome::Indestructible);
            assert!(!a.scores());
        }
        assert!(g.is_active(0, 0));
        assert_eq!(g.remaining(), 1);
    }

    #[test]
    fn test_last_destructible_block_clears_level() {
        let mut g = grid(&["wwwrwww", "wwwwwww"]);
        assert_eq!(g.remaining(), 1);
        let a = g.activate(0, 3);
        assert_eq!(a.outcome, ActivationOutcome::Destroyed);
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn test_counter_three_needs_four_hits() {
        let mut g = grid(&["3"]);
        let expected = [BlockKind::Counter2, BlockKind::Counter1, BlockKind::Counter0];
        for to in expected {
            let a = g.activate(0, 0);
            assert_eq!(a.outcome, ActivationOutcome::Decremented { to });
            assert!(a.scores());
            assert!(g.is_active(0, 0));
            assert_eq!(g.remaining(), 1);
        }
        let a = g.activate(0, 0);
        assert_eq!(a.outcome, ActivationOutcome::Destroyed);
        assert!(!g.is_active(0, 0));
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn test_counter_zero_destroys_on_first_hit() {
        let mut g = grid(&["0"]);
        assert_eq!(g.activate(0, 0).outcome, ActivationOutcome::Destroyed);
        assert!(!g.is_active(0, 0));
    }

    #[test]
    fn test_bomb_clears_full_neighbourhood() {
        let mut g = grid(&[".rgb", ".tXp", ".y3r", "....r"]);
        assert_eq!(g.remaining(), 10);
        let a = g.activate(1, 2);
        assert_eq!(a.outcome, ActivationOutcome::Blasted);
        assert_eq!(a.deactivated, 9);
        assert_eq!(g.remaining(), 1);
        for r in 0..3 {
            for c in 1..4 {
                assert!(!g.is_active(r, c), "({r}, {c}) still active");
            }
        }
        assert!(g.is_active(3, 4));
    }

    #[test]
    fn test_bomb_spares_walls_and_does_not_chain() {
        let mut g = grid(&["wX.", "rXr", "..."]);
        // Neighbouring bomb is removed but its own blast never runs
        let a = g.activate(0, 1);
        assert_eq!(a.deactivated, 4);
        assert!(g.is_active(0, 0));
        assert!(!g.is_active(1, 1));
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn test_bomb_at_grid_corner_is_clamped() {
        let mut g = grid(&["Xr", "rr"]);
        let a = g.activate(0, 0);
        assert_eq!(a.deactivated, 4);
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn test_mutator_blocks_report_effects() {
        let mut g = grid(&["sRB<>"]);
        let effects: Vec<_> = (0..5).map(|c| g.activate(0, c).effect).collect();
        assert_eq!(
            effects,
            vec![
                Some(BlockEffect::Paddle(PaddleEffect::ArmSticky)),
                Some(BlockEffect::Paddle(PaddleEffect::ToggleReverse)),
                Some(BlockEffect::Ball(BallEffect::SpeedUp)),
                Some(BlockEffect::Paddle(PaddleEffect::Shrink)),
                Some(BlockEffect::Paddle(PaddleEffect::Expand)),
            ]
        );
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn test_inactive_block_is_ignored() {
        let mut g = grid(&["r"]);
        g.activate(0, 0);
        assert_eq!(g.activate(0, 0).outcome, ActivationOutcome::Ignored);
    }

    #[test]
    fn test_first_overlap_scans_row_major() {
        let g = grid(&["rr", "rr"]);
        // A rect covering all four blocks resolves to the top-left one
        let all = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let (row, col, _) = g.first_overlap(&all).expect("overlap");
        assert_eq!((row, col), (0, 0));
    }
}
