//! SGF point coordinates.
//! A point is two letters, column then row, each in `a..=s` for a 19x19 board.

use std::fmt;

use serde::{Serialize, Serializer};

/// Number of lines on the board.
pub const BOARD_SIZE: u8 = 19;

/// FF[3] spelling of a pass move.
pub const PASS: &str = "tt";

const AXIS_FIRST: u8 = b'a';
const AXIS_LAST: u8 = b's';

/// A board intersection, zero-indexed (`aa` is 0,0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    /// Parse a two-letter SGF coordinate.
    /// The error is a short reason, wrapped into `SgfError::Format` by callers.
    pub fn parse(s: &str) -> Result<Self, &'static str> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err("coordinate must be exactly two characters");
        }
        let x = axis_index(bytes[0]).ok_or("column outside a..s")?;
        let y = axis_index(bytes[1]).ok_or("row outside a..s")?;
        Ok(Self { x, y })
    }

    pub fn swap_axes(self) -> Self {
        Self { x: self.y, y: self.x }
    }

    /// Mirror the column: `a` <-> `s`, `b` <-> `r`, ..., `j` stays.
    pub fn mirror_horizontally(self) -> Self {
        Self {
            x: BOARD_SIZE - 1 - self.x,
            y: self.y,
        }
    }

    /// Mirror the row, same rule as columns.
    pub fn mirror_vertically(self) -> Self {
        Self {
            x: self.x,
            y: BOARD_SIZE - 1 - self.y,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (AXIS_FIRST + self.x) as char,
            (AXIS_FIRST + self.y) as char
        )
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn axis_index(c: u8) -> Option<u8> {
    (AXIS_FIRST..=AXIS_LAST).contains(&c).then(|| c - AXIS_FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_points() -> impl Iterator<Item = Point> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Point { x, y }))
    }

    #[test]
    fn test_parse_and_display() {
        let p = Point::parse("cd").unwrap();
        assert_eq!(p, Point { x: 2, y: 3 });
        assert_eq!(p.to_string(), "cd");
        assert_eq!(Point::parse("ss").unwrap(), Point { x: 18, y: 18 });
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Point::parse("").is_err());
        assert!(Point::parse("a").is_err());
        assert!(Point::parse("abc").is_err());
        assert!(Point::parse("ta").is_err());
        assert!(Point::parse("aT").is_err());
        assert!(Point::parse("é").is_err());
    }

    #[test]
    fn test_mirror_matches_letter_formula() {
        // chr('a' + 's' - c)
        for c in b'a'..=b's' {
            let s = format!("{}a", c as char);
            let mirrored = Point::parse(&s).unwrap().mirror_horizontally().to_string();
            let expected = (b'a' + b's' - c) as char;
            assert_eq!(mirrored.as_bytes()[0] as char, expected);
        }
        assert_eq!(Point::parse("dc").unwrap().mirror_horizontally().to_string(), "pc");
    }

    #[test]
    fn test_transforms_are_involutions() {
        for p in all_points() {
            assert_eq!(p.swap_axes().swap_axes(), p);
            assert_eq!(p.mirror_horizontally().mirror_horizontally(), p);
            assert_eq!(p.mirror_vertically().mirror_vertically(), p);
        }
    }

    #[test]
    fn test_center_line_is_fixed() {
        for i in 0..BOARD_SIZE {
            let col = Point { x: 9, y: i };
            assert_eq!(col.mirror_horizontally(), col);
            let row = Point { x: i, y: 9 };
            assert_eq!(row.mirror_vertically(), row);
        }
    }
}
