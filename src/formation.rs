//! Positional layout of a line-up
//!
//! A roster arrives as a flat list of players tagged with position codes.
//! [`arrange`] splits it into the four lines of a pitch, keeping the input
//! order inside every line, so the same roster always lays out the same way.

use std::{fmt::Display, str::FromStr};

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::constants::team::DEFAULT_LINES;

/// A line of players on the pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize)]
pub enum Line {
    /// `PO`
    Goalkeeper,
    /// `DC`, `ED`, `EI`
    Defence,
    /// `MC`, `MD`, `MI`
    Midfield,
    /// `CT`
    Attack,
}

impl Line {
    /// Lines as drawn on screen, strikers first
    pub const TOP_DOWN: [Line; 4] = [Line::Attack, Line::Midfield, Line::Defence, Line::Goalkeeper];

    /// Line a position code belongs to, if any
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PO" => Some(Self::Goalkeeper),
            "DC" | "ED" | "EI" => Some(Self::Defence),
            "MC" | "MD" | "MI" => Some(Self::Midfield),
            "CT" => Some(Self::Attack),
            _ => None,
        }
    }

    /// Display name of the line
    pub fn label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Portero",
            Self::Defence => "Defensores",
            Self::Midfield => "Mediocampistas",
            Self::Attack => "Delanteros",
        }
    }
}

/// A roster split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formation<T> {
    lines: EnumMap<Line, Vec<T>>,
    unplaced: Vec<T>,
}

impl<T> Formation<T> {
    /// Players of `line` in roster order
    pub fn line(&self, line: Line) -> &[T] {
        &self.lines[line]
    }

    /// Lines from the strikers down to the goalkeeper
    pub fn top_down(&self) -> impl Iterator<Item = (Line, &[T])> {
        Line::TOP_DOWN
            .into_iter()
            .map(|line| (line, self.lines[line].as_slice()))
    }

    /// Players whose position code matched no line
    pub fn unplaced(&self) -> &[T] {
        &self.unplaced
    }
}

/// Splits `roster` into lines by the position code `position` extracts
pub fn arrange<T, I, F>(roster: I, position: F) -> Formation<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let mut lines: EnumMap<Line, Vec<T>> = EnumMap::default();
    let mut unplaced = Vec::new();
    for player in roster {
        match Line::from_code(position(&player)) {
            Some(line) => lines[line].push(player),
            None => unplaced.push(player),
        }
    }
    Formation { lines, unplaced }
}

/// Error parsing a scheme such as `3-4-3`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid scheme: {0:?}")]
pub struct InvalidScheme(pub String);

/// Outfield line sizes, from defence to attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scheme(Vec<u8>);

impl Scheme {
    /// Line sizes from defence to attack
    pub fn lines(&self) -> &[u8] {
        &self.0
    }

    /// Outfield players the scheme fields
    pub fn outfield(&self) -> u32 {
        self.0.iter().map(|&n| u32::from(n)).sum()
    }

    /// Players the scheme puts on `line`
    ///
    /// Every size between the defence and the attack counts as midfield.
    pub fn line_size(&self, line: Line) -> u32 {
        let sizes = &self.0;
        match line {
            Line::Goalkeeper => 1,
            Line::Defence => sizes.first().map_or(0, |&n| u32::from(n)),
            Line::Attack => sizes.last().map_or(0, |&n| u32::from(n)),
            Line::Midfield => sizes
                .get(1..sizes.len().saturating_sub(1))
                .unwrap_or_default()
                .iter()
                .map(|&n| u32::from(n))
                .sum(),
        }
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self(DEFAULT_LINES.to_vec())
    }
}

impl FromStr for Scheme {
    type Err = InvalidScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidScheme(s.to_owned());
        let sizes = s
            .trim()
            .split('-')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        if sizes.len() < 2 || sizes.contains(&0) {
            return Err(invalid());
        }
        Ok(Self(sizes))
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("-"))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_arrange_groups_by_code() {
        let roster = [
            ("Ruben", "CT"),
            ("Broun", "PO"),
            ("Mallo", "DC"),
            ("Malcorra", "MI"),
            ("Campaz", "CT"),
            ("Quintana", "ED"),
            ("Lo Celso", "mc"),
        ];
        let formation = arrange(roster, |(_, code)| *code);

        let names = |line| {
            formation
                .line(line)
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(Line::Goalkeeper), ["Broun"]);
        assert_eq!(names(Line::Defence), ["Mallo", "Quintana"]);
        assert_eq!(names(Line::Midfield), ["Malcorra", "Lo Celso"]);
        assert_eq!(names(Line::Attack), ["Ruben", "Campaz"]);
        assert!(formation.unplaced().is_empty());
    }

    #[test]
    fn test_unknown_codes_are_kept_aside() {
        let formation = arrange(["PO", "XX", "CT"], |code| *code);
        assert_eq!(formation.unplaced(), ["XX"]);
        let drawn: Vec<_> = formation.top_down().map(|(line, _)| line).collect();
        assert_eq!(drawn, Line::TOP_DOWN);
    }

    #[test]
    fn test_arrange_is_deterministic() {
        let roster = ["MI", "MC", "MD", "PO"];
        assert_eq!(arrange(roster, |c| *c), arrange(roster, |c| *c));
    }

    #[test]
    fn test_scheme_parses() {
        let scheme: Scheme = "3-4-3".parse().unwrap();
        assert_eq!(scheme.lines(), [3, 4, 3]);
        assert_eq!(scheme.outfield(), 10);
        assert_eq!(scheme.to_string(), "3-4-3");
        assert!("4".parse::<Scheme>().is_err());
        assert!("4-x-2".parse::<Scheme>().is_err());
        assert!("4-0-6".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_scheme_line_sizes() {
        let scheme: Scheme = "4-2-3-1".parse().unwrap();
        assert_eq!(scheme.line_size(Line::Goalkeeper), 1);
        assert_eq!(scheme.line_size(Line::Defence), 4);
        assert_eq!(scheme.line_size(Line::Midfield), 5);
        assert_eq!(scheme.line_size(Line::Attack), 1);
        assert_eq!(Scheme::default().to_string(), "3-4-3");
    }
}
