//! Collapse solutions that are the same picture turned round
//!
//! Two boards are equivalent when one's tile layout equals the other's after
//! turning the whole board by 0°, 90°, 180° or 270°. Only tile identities are
//! compared; each tile's own rotation is ignored.

use crate::puzzle::{Board, IdentityMatrix, BOARD_SIZE};
use std::collections::HashMap;

/// A group of equivalent boards
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    /// First member seen
    pub representative: Board,
    /// Indices of every member in the input, in input order
    pub members: Vec<usize>,
}

impl EquivalenceClass {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Turn a layout 90° clockwise
pub fn rotate_clockwise(matrix: &IdentityMatrix) -> IdentityMatrix {
    let mut rotated = [[None; BOARD_SIZE]; BOARD_SIZE];
    for (i, row) in rotated.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = matrix[BOARD_SIZE - 1 - j][i];
        }
    }
    rotated
}

/// The layout at 0°, 90°, 180° and 270°
pub fn rotations(matrix: &IdentityMatrix) -> [IdentityMatrix; 4] {
    let quarter = rotate_clockwise(matrix);
    let half = rotate_clockwise(&quarter);
    let three_quarters = rotate_clockwise(&half);
    [*matrix, quarter, half, three_quarters]
}

/// Whether `b` matches `a` at some whole-board rotation
pub fn are_equivalent(a: &Board, b: &Board) -> bool {
    let target = a.to_identity_matrix();
    rotations(&b.to_identity_matrix())
        .iter()
        .any(|rotated| *rotated == target)
}

/// Smallest of the four rotations; equal for exactly the equivalent layouts
fn canonical_form(matrix: &IdentityMatrix) -> IdentityMatrix {
    let all = rotations(matrix);
    let mut smallest = all[0];
    for candidate in &all[1..] {
        if *candidate < smallest {
            smallest = *candidate;
        }
    }
    smallest
}

/// Group `boards` into rotation classes, in order of first appearance
pub fn equivalence_classes(boards: &[Board]) -> Vec<EquivalenceClass> {
    let mut classes: Vec<EquivalenceClass> = Vec::new();
    let mut class_of: HashMap<IdentityMatrix, usize> = HashMap::new();

    for (index, board) in boards.iter().enumerate() {
        let key = canonical_form(&board.to_identity_matrix());
        match class_of.get(&key) {
            Some(&class) => classes[class].members.push(index),
            None => {
                class_of.insert(key, classes.len());
                classes.push(EquivalenceClass {
                    representative: *board,
                    members: vec![index],
                });
            }
        }
    }

    log::debug!(
        "Grouped {} boards into {} rotation classes",
        boards.len(),
        classes.len()
    );
    classes
}

/// One board per rotation class, in order of first appearance
pub fn unique_solutions(boards: &[Board]) -> Vec<Board> {
    equivalence_classes(boards)
        .into_iter()
        .map(|class| class.representative)
        .collect()
}
