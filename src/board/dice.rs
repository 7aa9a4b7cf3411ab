//! Official Boggle dice distributions, one die set per supported board
//! size. Each die is a fixed list of faces; generation picks one face per
//! die uniformly at random.
//!
//! One die per size carries a combined `"Qu"` face instead of a bare `Q`,
//! so that face materializes as the two-letter `"QU"` tile rather than a
//! lone consonant that can never satisfy the Q-adjacent-to-U invariant.

pub struct Die(pub &'static [&'static str]);

pub const DICE_4X4: &[Die] = &[
    Die(&["A", "A", "E", "E", "G", "N"]),
    Die(&["A", "B", "B", "J", "O", "O"]),
    Die(&["A", "C", "H", "O", "P", "S"]),
    Die(&["A", "F", "F", "K", "P", "S"]),
    Die(&["A", "O", "O", "T", "T", "W"]),
    Die(&["C", "I", "M", "O", "T", "U"]),
    Die(&["D", "E", "I", "L", "R", "X"]),
    Die(&["D", "E", "L", "R", "V", "Y"]),
    Die(&["D", "I", "S", "T", "T", "Y"]),
    Die(&["E", "E", "G", "H", "N", "W"]),
    Die(&["E", "E", "I", "N", "S", "U"]),
    Die(&["E", "H", "R", "T", "V", "W"]),
    Die(&["E", "I", "O", "S", "S", "T"]),
    Die(&["E", "L", "R", "T", "T", "Y"]),
    Die(&["H", "I", "M", "N", "Qu", "U"]),
    Die(&["H", "L", "N", "N", "R", "Z"]),
];

pub const DICE_5X5: &[Die] = &[
    Die(&["A", "A", "A", "F", "R", "S"]),
    Die(&["A", "A", "E", "E", "E", "E"]),
    Die(&["A", "A", "F", "I", "R", "S"]),
    Die(&["A", "D", "E", "N", "N", "N"]),
    Die(&["A", "E", "E", "E", "E", "M"]),
    Die(&["A", "E", "E", "G", "M", "U"]),
    Die(&["A", "E", "G", "M", "N", "N"]),
    Die(&["A", "F", "I", "R", "S", "Y"]),
    Die(&["B", "J", "K", "Qu", "X", "Z"]),
    Die(&["C", "C", "N", "S", "T", "W"]),
    Die(&["C", "E", "I", "I", "L", "T"]),
    Die(&["C", "E", "I", "L", "P", "T"]),
    Die(&["C", "E", "I", "P", "S", "T"]),
    Die(&["D", "D", "L", "N", "O", "R"]),
    Die(&["D", "H", "H", "L", "O", "R"]),
    Die(&["D", "H", "H", "N", "O", "T"]),
    Die(&["D", "H", "L", "N", "O", "R"]),
    Die(&["E", "I", "I", "I", "T", "T"]),
    Die(&["E", "M", "O", "T", "T", "T"]),
    Die(&["E", "N", "S", "S", "S", "U"]),
    Die(&["F", "I", "P", "R", "S", "Y"]),
    Die(&["G", "O", "R", "R", "V", "W"]),
    Die(&["H", "I", "P", "R", "R", "Y"]),
    Die(&["N", "O", "O", "T", "U", "W"]),
    Die(&["O", "O", "O", "T", "T", "U"]),
];

pub const DICE_6X6: &[Die] = &[
    Die(&["A", "A", "A", "F", "R", "S"]),
    Die(&["A", "A", "E", "E", "E", "E"]),
    Die(&["A", "A", "E", "E", "O", "O"]),
    Die(&["A", "A", "F", "I", "R", "S"]),
    Die(&["A", "B", "D", "E", "I", "O"]),
    Die(&["A", "D", "E", "N", "N", "N"]),
    Die(&["A", "E", "E", "E", "E", "M"]),
    Die(&["A", "E", "E", "G", "M", "U"]),
    Die(&["A", "E", "G", "M", "N", "N"]),
    Die(&["A", "E", "I", "L", "M", "N"]),
    Die(&["A", "E", "I", "N", "O", "U"]),
    Die(&["A", "F", "I", "R", "S", "Y"]),
    Die(&["B", "B", "J", "K", "X", "Z"]),
    Die(&["C", "C", "E", "N", "S", "T"]),
    Die(&["C", "D", "D", "L", "N", "N"]),
    Die(&["C", "E", "I", "I", "L", "T"]),
    Die(&["C", "E", "I", "P", "S", "T"]),
    Die(&["C", "F", "G", "N", "U", "Y"]),
    Die(&["D", "D", "H", "N", "O", "T"]),
    Die(&["D", "H", "H", "L", "O", "R"]),
    Die(&["D", "H", "H", "N", "O", "W"]),
    Die(&["D", "H", "L", "N", "O", "R"]),
    Die(&["E", "H", "I", "L", "R", "S"]),
    Die(&["E", "I", "I", "L", "S", "T"]),
    Die(&["E", "I", "L", "P", "S", "T"]),
    Die(&["E", "I", "O", "R", "S", "T"]),
    Die(&["E", "M", "T", "T", "T", "O"]),
    Die(&["E", "N", "S", "S", "S", "U"]),
    Die(&["G", "O", "R", "R", "V", "W"]),
    Die(&["H", "I", "R", "S", "T", "V"]),
    Die(&["H", "O", "P", "R", "S", "T"]),
    Die(&["I", "P", "R", "S", "Y", "Y"]),
    Die(&["J", "K", "Qu", "W", "X", "Z"]),
    Die(&["N", "O", "O", "T", "U", "W"]),
    Die(&["O", "O", "O", "T", "T", "U"]),
    Die(&["O", "O", "O", "T", "U", "U"]),
];

pub fn dice_for_size(size: usize) -> &'static [Die] {
    match size {
        4 => DICE_4X4,
        5 => DICE_5X5,
        _ => DICE_6X6,
    }
}
