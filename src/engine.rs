// Stateless puzzle engine: validation, placement checks and the solver.
// Every operation reads an 81-character puzzle string and allocates its own
// working structures; nothing here mutates caller data or keeps state.

// Empty-cell placeholder in the puzzle encoding
pub const EMPTY: char = '.';

// Puzzles are 9x9 grids in row-major order
pub const PUZZLE_LEN: usize = 81;

const DIGITS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

// Single table shared by the label -> index and index -> label conversions
const ROW_LABELS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

type Grid = [[char; 9]; 9];

// Validation outcome for a raw puzzle string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    InvalidLength,
    InvalidCharacters,
}

// A cell position on the grid, zero-based internally.
// Construction rejects out-of-range rows and columns, so the check
// functions can index the grid without further bounds handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    // From a row label A-I and a 1-based column
    pub fn new(row: char, column: u32) -> Option<Self> {
        let row = ROW_LABELS.iter().position(|&label| label == row)?;

        if !(1..=9).contains(&column) {
            return None;
        }

        Some(Self {
            row,
            col: column as usize - 1,
        })
    }

    // From a coordinate string such as "A2": row letter followed by the column
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let row = chars.next()?;
        let column = chars.as_str().parse().ok()?;

        Self::new(row, column)
    }

    fn from_cell_index(index: usize) -> Self {
        Self {
            row: index / 9,
            col: index % 9,
        }
    }

    pub fn row_label(self) -> char {
        ROW_LABELS[self.row]
    }

    pub fn column(self) -> u32 {
        self.col as u32 + 1
    }
}

// Checks length first; a short or long string reports InvalidLength even
// when it also contains bad characters.
pub fn validate(puzzle: &str) -> Validation {
    if puzzle.chars().count() != PUZZLE_LEN {
        return Validation::InvalidLength;
    }

    let well_formed = puzzle
        .chars()
        .all(|c| c == EMPTY || DIGITS.contains(&c));

    if well_formed {
        Validation::Valid
    } else {
        Validation::InvalidCharacters
    }
}

// True when no digit 1-9 appears more than once among the 9 cells.
// Placeholders are never tallied, so they coexist freely.
pub fn check9(cells: &[char; 9]) -> bool {
    DIGITS
        .iter()
        .all(|&digit| cells.iter().filter(|&&cell| cell == digit).count() < 2)
}

pub fn check_row_placement(puzzle: &str, coord: Coordinate, value: char) -> bool {
    let grid = grid_with_placement(puzzle, coord, value);

    check9(&grid[coord.row])
}

pub fn check_col_placement(puzzle: &str, coord: Coordinate, value: char) -> bool {
    let grid = grid_with_placement(puzzle, coord, value);
    let column = std::array::from_fn(|row| grid[row][coord.col]);

    check9(&column)
}

pub fn check_region_placement(puzzle: &str, coord: Coordinate, value: char) -> bool {
    let grid = grid_with_placement(puzzle, coord, value);
    let band_start = |index: usize| (index / 3) * 3;
    let (row0, col0) = (band_start(coord.row), band_start(coord.col));
    let region = std::array::from_fn(|i| grid[row0 + i / 3][col0 + i % 3]);

    check9(&region)
}

// Derives the grid view and applies the hypothetical placement.
// The value is only placed when the target cell is empty; checking a value
// against an occupied cell reports on the grid's current state instead.
fn grid_with_placement(puzzle: &str, coord: Coordinate, value: char) -> Grid {
    let mut grid = [[EMPTY; 9]; 9];

    for (index, cell) in puzzle.chars().take(PUZZLE_LEN).enumerate() {
        grid[index / 9][index % 9] = cell;
    }

    if grid[coord.row][coord.col] == EMPTY {
        grid[coord.row][coord.col] = value;
    }

    grid
}

// Round-based candidate-set solver. Each round fills the first empty cell of
// every candidate with every digit that passes the row, column and region
// checks; candidates with no surviving digit drop out of the working set.
// All candidates progress in lockstep, so the head candidate being complete
// means the round loop is done.
//
// The working set can grow combinatorially on sparse puzzles; callers that
// accept arbitrary input should wrap this in an external timeout.
pub fn solve(puzzle: &str) -> Option<String> {
    if validate(puzzle) != Validation::Valid {
        return None;
    }

    let mut candidates = vec![puzzle.to_owned()];

    while candidates.first().is_some_and(|head| head.contains(EMPTY)) {
        let mut next = Vec::new();

        for candidate in &candidates {
            let Some(index) = candidate.find(EMPTY) else {
                next.push(candidate.clone());
                continue;
            };

            let coord = Coordinate::from_cell_index(index);

            for value in DIGITS {
                if check_row_placement(candidate, coord, value)
                    && check_col_placement(candidate, coord, value)
                    && check_region_placement(candidate, coord, value)
                {
                    let mut extended = candidate.clone();
                    extended.replace_range(index..index + 1, value.encode_utf8(&mut [0; 4]));
                    next.push(extended);
                }
            }
        }

        candidates = next;
    }

    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const PUZZLE: &str =
        "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
    const PUZZLE_SOLVED: &str =
        "135762984946381257728459613694517832812936745357824196473298561581673429269145378";

    fn coord(row: char, column: u32) -> Coordinate {
        Coordinate::new(row, column).unwrap()
    }

    #[test]
    fn validates_well_formed_81_character_string() {
        assert_eq!(validate(PUZZLE), Validation::Valid);
    }

    #[test]
    fn rejects_invalid_characters() {
        let puzzle = PUZZLE.replacen('1', "A", 1);
        assert_eq!(validate(&puzzle), Validation::InvalidCharacters);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(validate(&PUZZLE[1..]), Validation::InvalidLength);
        let long = format!("{PUZZLE}.");
        assert_eq!(validate(&long), Validation::InvalidLength);
    }

    #[test]
    fn length_check_wins_over_character_check() {
        // 80 characters and a bad character: still a length error
        let puzzle = PUZZLE[1..].replacen('5', "Z", 1);
        assert_eq!(validate(&puzzle), Validation::InvalidLength);
    }

    #[test]
    fn accepts_valid_row_placement() {
        assert!(check_row_placement(PUZZLE, coord('A', 2), '3'));
    }

    #[test]
    fn rejects_conflicting_row_placement() {
        assert!(!check_row_placement(PUZZLE, coord('A', 2), '5'));
    }

    #[test]
    fn accepts_valid_column_placement() {
        assert!(check_col_placement(PUZZLE, coord('A', 4), '7'));
    }

    #[test]
    fn rejects_conflicting_column_placement() {
        assert!(!check_col_placement(PUZZLE, coord('A', 4), '3'));
    }

    #[test]
    fn accepts_valid_region_placement() {
        assert!(check_region_placement(PUZZLE, coord('I', 9), '8'));
    }

    #[test]
    fn rejects_conflicting_region_placement() {
        assert!(!check_region_placement(PUZZLE, coord('I', 9), '9'));
    }

    #[test]
    fn occupied_cell_skips_the_hypothetical_placement() {
        // A1 already holds '1', so the value is ignored and the current
        // row is checked as-is: '5' elsewhere in row A is not a conflict.
        assert!(check_row_placement(PUZZLE, coord('A', 1), '5'));
    }

    #[test]
    fn placement_checks_are_repeatable() {
        let before = PUZZLE.to_owned();
        let first = check_row_placement(PUZZLE, coord('A', 2), '3');
        let second = check_row_placement(PUZZLE, coord('A', 2), '3');

        assert_eq!(first, second);
        assert_eq!(PUZZLE, before);
    }

    #[test]
    fn coordinate_parsing() {
        assert_eq!(Coordinate::parse("A2"), Coordinate::new('A', 2));
        assert_eq!(Coordinate::parse("I9"), Coordinate::new('I', 9));
        assert_eq!(Coordinate::parse("C0"), None);
        assert_eq!(Coordinate::parse("J1"), None);
        assert_eq!(Coordinate::parse("A10"), None);
        assert_eq!(Coordinate::parse("A"), None);
        assert_eq!(Coordinate::parse(""), None);
    }

    #[test]
    fn coordinate_round_trips_through_labels() {
        let coord = Coordinate::new('D', 6).unwrap();
        assert_eq!(coord.row_label(), 'D');
        assert_eq!(coord.column(), 6);
    }

    #[test]
    fn solves_an_incomplete_puzzle() {
        assert_eq!(solve(PUZZLE).as_deref(), Some(PUZZLE_SOLVED));
    }

    #[test]
    fn solves_the_reference_fixture() {
        let puzzle =
            "5..91372.3...8.5.9.9.25..8.68.47.23...95..46.7.4.....5.2.......4..8916..85.72...3";
        let solved =
            "568913724342687519197254386685479231219538467734162895926345178473891652851726943";

        assert_eq!(solve(puzzle).as_deref(), Some(solved));
    }

    #[test]
    fn solved_puzzle_passes_through_unchanged() {
        assert_eq!(solve(PUZZLE_SOLVED).as_deref(), Some(PUZZLE_SOLVED));
    }

    #[test]
    fn unsatisfiable_puzzle_has_no_solution() {
        // Duplicate '1' in row A
        let puzzle =
            "1.1..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
        assert_eq!(solve(puzzle), None);
    }

    #[test]
    fn malformed_input_has_no_solution() {
        let short =
            "1...2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
        let bad_char =
            "A.1..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";

        assert_eq!(solve(short), None);
        assert_eq!(solve(bad_char), None);
    }

    fn cell() -> impl Strategy<Value = char> {
        prop::sample::select(vec!['1', '2', '3', '4', '5', '6', '7', '8', '9', EMPTY])
    }

    proptest! {
        #[test]
        fn check9_is_false_exactly_on_repeated_digits(cells in prop::array::uniform9(cell())) {
            let repeated = DIGITS
                .iter()
                .any(|&digit| cells.iter().filter(|&&c| c == digit).count() >= 2);

            prop_assert_eq!(check9(&cells), !repeated);
        }

        #[test]
        fn placeholders_never_conflict(count in 0usize..=9) {
            // Any mix of placeholders with distinct digits is conflict-free
            let mut cells = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];
            for cell in cells.iter_mut().take(count) {
                *cell = EMPTY;
            }

            prop_assert!(check9(&cells));
        }
    }
}
