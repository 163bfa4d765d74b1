//! The multi-case text format.
//!
//! ```text
//! T                 number of cases
//! n d               per case: cell count and distance threshold
//! id x y label...   n lines, zero or more labels each
//! ```
//!
//! Output is one `id group` line per cell, ascending by id, cases in input
//! order. Blank lines in the input are skipped. The whole input is parsed
//! before anything is solved, so malformed input produces no output at all.

use std::io::{self, Write};
use std::str::FromStr;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cell::{Cell, CellId};
use crate::cluster::{Assignment, CliqueGrouping};
use crate::error::{Error, Result};

/// One independent grouping problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Distance threshold.
    pub radius: f64,
    /// Cells in input order.
    pub cells: Vec<Cell>,
}

/// How a batch is solved.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    parallel: bool,
    split_components: bool,
}

impl BatchOptions {
    /// Defaults: parallel across cases, component pre-segmentation on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve cases on the rayon thread pool. Output order is unaffected.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// See [`CliqueGrouping::with_component_split`].
    pub fn with_component_split(mut self, split: bool) -> Self {
        self.split_components = split;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            split_components: true,
        }
    }
}

// Declared counts are untrusted until the lines are actually read.
const PREALLOC_LIMIT: usize = 4096;

/// Non-blank lines with their 1-based line numbers.
struct Lines<'a> {
    iter: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.lines().enumerate(),
            last: 0,
        }
    }

    fn next_tokens(&mut self) -> Option<(usize, Vec<&'a str>)> {
        for (i, line) in self.iter.by_ref() {
            self.last = i + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !tokens.is_empty() {
                return Some((i + 1, tokens));
            }
        }
        None
    }

    fn require(&mut self, expected: impl FnOnce() -> String) -> Result<(usize, Vec<&'a str>)> {
        match self.next_tokens() {
            Some(next) => Ok(next),
            None => Err(Error::UnexpectedEnd {
                line: self.last,
                expected: expected(),
            }),
        }
    }
}

fn field<T: FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::malformed(line, format!("invalid {what} `{token}`")))
}

/// Parse a whole batch.
pub fn parse_batch(input: &str) -> Result<Vec<Case>> {
    let mut lines = Lines::new(input);

    let (line, tokens) = lines.require(|| "case count".to_string())?;
    if tokens.len() != 1 {
        return Err(Error::malformed(
            line,
            format!("expected a case count, found {} fields", tokens.len()),
        ));
    }
    let case_count: usize = field(line, tokens[0], "case count")?;

    let mut cases = Vec::with_capacity(case_count.min(PREALLOC_LIMIT));
    for case in 1..=case_count {
        let (line, tokens) = lines.require(|| format!("header of case {case}"))?;
        if tokens.len() != 2 {
            return Err(Error::malformed(
                line,
                format!("expected `n d`, found {} fields", tokens.len()),
            ));
        }
        let n: usize = field(line, tokens[0], "cell count")?;
        let radius: f64 = field(line, tokens[1], "distance")?;

        let mut cells = Vec::with_capacity(n.min(PREALLOC_LIMIT));
        for k in 1..=n {
            let (line, tokens) = lines.require(|| format!("cell {k} of {n} in case {case}"))?;
            cells.push(parse_cell(line, &tokens)?);
        }
        cases.push(Case { radius, cells });
    }

    if let Some((line, _)) = lines.next_tokens() {
        warn!(line, "ignoring input after the last declared case");
    }
    debug!(cases = cases.len(), "parsed batch");
    Ok(cases)
}

fn parse_cell(line: usize, tokens: &[&str]) -> Result<Cell> {
    if tokens.len() < 3 {
        return Err(Error::malformed(
            line,
            format!("expected `id x y label...`, found {} fields", tokens.len()),
        ));
    }
    let id: CellId = field(line, tokens[0], "cell id")?;
    let x: f64 = field(line, tokens[1], "x coordinate")?;
    let y: f64 = field(line, tokens[2], "y coordinate")?;
    Ok(Cell::new(id, x, y, tokens[3..].iter().copied()))
}

/// Solve every case, returning assignments in input order.
///
/// The first failing case (by position) aborts the batch.
pub fn solve_batch(cases: &[Case], options: &BatchOptions) -> Result<Vec<Assignment>> {
    let solve = |(i, case): (usize, &Case)| {
        CliqueGrouping::new(case.radius)
            .with_component_split(options.split_components)
            .group(&case.cells)
            .map_err(|source| Error::InCase {
                case: i + 1,
                source: Box::new(source),
            })
    };

    if options.parallel {
        cases.par_iter().enumerate().map(solve).collect()
    } else {
        cases.iter().enumerate().map(solve).collect()
    }
}

/// Write `id group` lines for every case.
pub fn write_batch<W: Write>(mut out: W, assignments: &[Assignment]) -> io::Result<()> {
    for assignment in assignments {
        for (id, group) in assignment.iter() {
            writeln!(out, "{id} {group}")?;
        }
    }
    Ok(())
}

/// Render `id group` lines for every case into a string.
pub fn render_batch(assignments: &[Assignment]) -> String {
    let mut out = String::new();
    for assignment in assignments {
        for (id, group) in assignment.iter() {
            out.push_str(&format!("{id} {group}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2
7 1
1 0 0 AETQT DFTYA PHLYT
2 0 2 DSQTS IYHLK LHGPS LTLLS
3 1 0 AETQT DFTYA HGCYS LSVGG SRFNH
4 1 1 DFTYA HGCYS IYHLK SRFNH
5 1 2 DSQTS IYHLK LSVGG LTLLS TTVTG
6 2 1 AETQT HGCYS IYHLK LSVGG LTLLS
7 2 2 HGCYS SRFNH TTVTG
2 1.5
10 0 0 A
11 1 0 A
";

    #[test]
    fn test_parse_sample() {
        let cases = parse_batch(SAMPLE).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].radius, 1.0);
        assert_eq!(cases[0].cells.len(), 7);
        assert_eq!(
            cases[0].cells[3],
            Cell::new(4, 1.0, 1.0, ["DFTYA", "HGCYS", "IYHLK", "SRFNH"])
        );
        assert_eq!(cases[1].radius, 1.5);
        assert_eq!(cases[1].cells[1].id, 11);
    }

    #[test]
    fn test_cell_without_labels() {
        let cases = parse_batch("1\n1 2.5\n3 -1.5 4e1\n").unwrap();
        let cell = &cases[0].cells[0];
        assert_eq!((cell.id, cell.x, cell.y), (3, -1.5, 40.0));
        assert!(cell.labels.is_empty());
    }

    #[test]
    fn test_blank_lines_and_trailing_input() {
        let cases = parse_batch("\n1\n\n1 1\n  \n5 0 0 A\n\nextra\n").unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].cells[0].id, 5);
    }

    #[test]
    fn test_zero_cases_and_empty_case() {
        assert!(parse_batch("0\n").unwrap().is_empty());
        let cases = parse_batch("1\n0 3\n").unwrap();
        assert!(cases[0].cells.is_empty());
    }

    #[test]
    fn test_malformed_inputs() {
        let bad = [
            ("", "empty input"),
            ("x\n", "non-numeric count"),
            ("1 2\n", "count with extra field"),
            ("1\n2\n", "header missing distance"),
            ("1\n1 one\n", "non-numeric distance"),
            ("1\n1 1\n1 0\n", "cell missing y"),
            ("1\n1 1\na 0 0 A\n", "non-numeric id"),
            ("1\n1 1\n1 0 zero A\n", "non-numeric y"),
            ("1\n2 1\n1 0 0 A\n", "fewer cells than declared"),
            ("2\n1 1\n1 0 0 A\n", "fewer cases than declared"),
            ("1\n-1 1\n", "negative count"),
        ];
        for (input, why) in bad {
            assert!(parse_batch(input).is_err(), "{why} should fail");
        }
    }

    #[test]
    fn test_error_reports_line() {
        match parse_batch("1\n\n1 1\n1 0 zero A\n") {
            Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected: {other:?}"),
        }
        match parse_batch("1\n2 1\n1 0 0 A\n") {
            Err(Error::UnexpectedEnd { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_solve_and_render_sample() {
        let cases = parse_batch(SAMPLE).unwrap();
        let assignments = solve_batch(&cases, &BatchOptions::new()).unwrap();
        assert_eq!(
            render_batch(&assignments),
            "1 1\n2 2\n3 1\n4 3\n5 2\n6 3\n7 4\n10 1\n11 1\n"
        );
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let cases = parse_batch(SAMPLE).unwrap();
        let parallel = solve_batch(&cases, &BatchOptions::new()).unwrap();
        let sequential = solve_batch(&cases, &BatchOptions::new().with_parallel(false)).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_invalid_radius_names_case() {
        let cases = parse_batch("2\n1 1\n1 0 0 A\n1 0\n1 0 0 A\n").unwrap();
        match solve_batch(&cases, &BatchOptions::new()) {
            Err(Error::InCase { case, source }) => {
                assert_eq!(case, 2);
                assert!(matches!(*source, Error::InvalidParameter { name: "radius", .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_write_matches_render() {
        let cases = parse_batch(SAMPLE).unwrap();
        let assignments = solve_batch(&cases, &BatchOptions::new()).unwrap();
        let mut buf = Vec::new();
        write_batch(&mut buf, &assignments).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_batch(&assignments));
    }
}
