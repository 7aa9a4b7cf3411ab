//! Board generation: rolling dice into a grid, then enforcing the
//! playability invariants (vowel floor, no landlocked consonants, every
//! Q adjacent to a U) via retry-then-repair.

use super::dice::{dice_for_size, Die};
use crate::core::{
    BOARD_GENERATION_ATTEMPTS, LANDLOCKED_REPAIR_ATTEMPTS, Q_WITHOUT_U_REPAIR_ATTEMPTS,
};
use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;
use rand::Rng;

pub type Tile = String;

const RARE_LETTERS: [char; 4] = ['J', 'X', 'Q', 'Z'];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<Vec<Tile>>,
}

impl Board {
    pub fn tile(&self, r: usize, c: usize) -> &str {
        &self.cells[r][c]
    }

    fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size
    }

    pub fn neighbors(&self, r: usize, c: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = r as isize + dr;
                let nc = c as isize + dc;
                if self.in_bounds(nr, nc) {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    /// True if `(r, c)` is in bounds, `nr, nc` is 8-adjacent to it, and
    /// `(nr, nc) != (r, c)`.
    pub fn is_adjacent(&self, (r, c): (usize, usize), (nr, nc): (usize, usize)) -> bool {
        if (r, c) == (nr, nc) {
            return false;
        }
        let dr = (r as isize - nr as isize).abs();
        let dc = (c as isize - nc as isize).abs();
        dr <= 1 && dc <= 1
    }

    /// Walks `path`, checking bounds, no repeated cells, and 8-adjacency
    /// between consecutive coordinates; returns the concatenated tile
    /// string (a `"QU"` tile contributes both characters) or `None` if
    /// the path is not a valid simple walk on this board.
    pub fn spell(&self, path: &[(usize, usize)]) -> Option<String> {
        use std::collections::HashSet;
        let mut used = HashSet::with_capacity(path.len());
        let mut spelled = String::new();
        for (i, &(r, c)) in path.iter().enumerate() {
            if r >= self.size || c >= self.size {
                return None;
            }
            if !used.insert((r, c)) {
                return None;
            }
            if i > 0 && !self.is_adjacent(path[i - 1], (r, c)) {
                return None;
            }
            spelled.push_str(self.tile(r, c));
        }
        Some(spelled)
    }
}

fn is_vowel(tile: &str) -> bool {
    matches!(tile.chars().next(), Some('A' | 'E' | 'I' | 'O' | 'U'))
}

fn is_lone_q(tile: &str) -> bool {
    tile.starts_with('Q') && tile != "QU"
}

fn vowel_floor(size: usize) -> usize {
    match size {
        4 => 5,
        5 => 7,
        _ => 10,
    }
}

fn roll(size: usize, rng: &mut impl Rng) -> Vec<Vec<Tile>> {
    let dice = dice_for_size(size);
    let mut order: Vec<&Die> = dice.iter().collect();
    order.shuffle(rng);
    let letters: Vec<Tile> = order
        .iter()
        .map(|d| d.0.choose(rng).expect("die has faces").to_uppercase())
        .collect();
    letters.chunks(size).map(|row| row.to_vec()).collect()
}

fn playability(board: &Board) -> (usize, usize, usize) {
    let mut vowels = 0;
    let mut landlocked = 0;
    let mut q_without_u = 0;
    for r in 0..board.size {
        for c in 0..board.size {
            let tile = board.tile(r, c);
            if is_vowel(tile) {
                vowels += 1;
                continue;
            }
            if !board
                .neighbors(r, c)
                .iter()
                .any(|&(nr, nc)| is_vowel(board.tile(nr, nc)))
            {
                landlocked += 1;
            }
            if is_lone_q(tile)
                && !board
                    .neighbors(r, c)
                    .iter()
                    .any(|&(nr, nc)| board.tile(nr, nc).starts_with('U'))
            {
                q_without_u += 1;
            }
        }
    }
    (vowels, landlocked, q_without_u)
}

pub fn generate_board(size: usize) -> Board {
    let mut rng = rand::rng();
    for _ in 0..BOARD_GENERATION_ATTEMPTS {
        let board = Board {
            size,
            cells: roll(size, &mut rng),
        };
        let (vowels, landlocked, q_without_u) = playability(&board);
        if landlocked == 0 && q_without_u == 0 && vowels >= vowel_floor(size) {
            return board;
        }
    }
    let board = Board {
        size,
        cells: roll(size, &mut rng),
    };
    let board = repair_landlocked(board, &mut rng);
    repair_q_without_u(board)
}

fn all_cells(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..size).flat_map(move |r| (0..size).map(move |c| (r, c)))
}

fn swap_cells(board: &mut Board, a: (usize, usize), b: (usize, usize)) {
    let tmp = board.cells[a.0][a.1].clone();
    board.cells[a.0][a.1] = board.cells[b.0][b.1].clone();
    board.cells[b.0][b.1] = tmp;
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> usize {
    (a.0 as isize - b.0 as isize).unsigned_abs() + (a.1 as isize - b.1 as isize).unsigned_abs()
}

fn repair_landlocked(mut board: Board, rng: &mut impl Rng) -> Board {
    for _ in 0..LANDLOCKED_REPAIR_ATTEMPTS {
        let mut landlocked: Vec<(usize, usize)> = all_cells(board.size)
            .filter(|&(r, c)| {
                let tile = board.tile(r, c);
                !is_vowel(tile)
                    && !board
                        .neighbors(r, c)
                        .iter()
                        .any(|&(nr, nc)| is_vowel(board.tile(nr, nc)))
            })
            .collect();
        if landlocked.is_empty() {
            break;
        }
        landlocked.sort_by_key(|&(r, c)| {
            let rare = RARE_LETTERS.contains(&board.tile(r, c).chars().next().unwrap());
            !rare
        });
        let target = landlocked[0];
        let vowels: Vec<(usize, usize)> = all_cells(board.size)
            .filter(|&(r, c)| is_vowel(board.tile(r, c)))
            .collect();
        if vowels.is_empty() {
            break;
        }
        let repairing_swap = vowels.iter().find(|&&v| {
            let mut trial = board.clone();
            swap_cells(&mut trial, target, v);
            trial
                .neighbors(target.0, target.1)
                .iter()
                .any(|&(nr, nc)| is_vowel(trial.tile(nr, nc)))
        });
        let chosen = repairing_swap
            .copied()
            .or_else(|| vowels.iter().min_by_key(|&&v| manhattan(target, v)).copied());
        match chosen {
            Some(v) => swap_cells(&mut board, target, v),
            None => break,
        }
        let _ = rng;
    }
    board
}

fn repair_q_without_u(mut board: Board) -> Board {
    for _ in 0..Q_WITHOUT_U_REPAIR_ATTEMPTS {
        let target = all_cells(board.size).find(|&(r, c)| {
            let tile = board.tile(r, c);
            is_lone_q(tile)
                && !board
                    .neighbors(r, c)
                    .iter()
                    .any(|&(nr, nc)| board.tile(nr, nc).starts_with('U'))
        });
        let Some(q_cell) = target else { break };
        let u_cells: Vec<(usize, usize)> =
            all_cells(board.size).filter(|&(r, c)| board.tile(r, c).starts_with('U')).collect();
        if let Some(&nearest_u) = u_cells.iter().min_by_key(|&&u| manhattan(q_cell, u)) {
            if let Some(&neighbor) = board.neighbors(q_cell.0, q_cell.1).first() {
                swap_cells(&mut board, neighbor, nearest_u);
            }
        } else if let Some(&(nr, nc)) = board
            .neighbors(q_cell.0, q_cell.1)
            .iter()
            .find(|&&(r, c)| is_vowel(board.tile(r, c)))
        {
            board.cells[nr][nc] = "U".to_string();
        } else {
            break;
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_board_is_size_by_size() {
        for size in [4, 5, 6] {
            let board = generate_board(size);
            assert_eq!(board.cells.len(), size);
            assert!(board.cells.iter().all(|row| row.len() == size));
        }
    }

    #[test]
    fn generated_board_satisfies_playability_invariants() {
        for size in [4, 5, 6] {
            let board = generate_board(size);
            let (_, landlocked, q_without_u) = playability(&board);
            assert_eq!(landlocked, 0, "size {size} has a landlocked consonant");
            assert_eq!(q_without_u, 0, "size {size} has a Q without an adjacent U");
        }
    }

    #[test]
    fn every_cell_is_non_empty() {
        let board = generate_board(6);
        for row in &board.cells {
            for tile in row {
                assert!(!tile.is_empty());
            }
        }
    }
}
