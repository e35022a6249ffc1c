//! Typed path commands.
//!
//! Only absolute straight-line and cubic commands are understood. Anything
//! else is kept as `Raw` text and written back exactly as it was read.

use kurbo::{Point, Vec2};
use std::fmt::{self, Write as _};

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// `M x,y [x,y ...]`
    MoveTo(Vec<Point>),
    /// `L x,y [x,y ...]`
    LineTo(Vec<Point>),
    /// `H x [x ...]`
    Horizontal(Vec<f64>),
    /// `V y [y ...]`
    Vertical(Vec<f64>),
    /// `C x1,y1 x2,y2 x,y [...]`
    CurveTo(Vec<[Point; 3]>),
    /// `Z`
    Close,
    /// Relative, unsupported or malformed command, verbatim
    Raw(String),
}

impl PathCommand {
    /// Command letter as written in path data.
    pub fn letter(&self) -> Option<char> {
        match self {
            Self::MoveTo(_) => Some('M'),
            Self::LineTo(_) => Some('L'),
            Self::Horizontal(_) => Some('H'),
            Self::Vertical(_) => Some('V'),
            Self::CurveTo(_) => Some('C'),
            Self::Close => Some('Z'),
            Self::Raw(text) => text.chars().next(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Shift every absolute operand by `delta`. H only moves in x, V only in y.
    pub fn translated(&self, delta: Vec2) -> Self {
        match self {
            Self::MoveTo(points) => Self::MoveTo(points.iter().map(|p| *p + delta).collect()),
            Self::LineTo(points) => Self::LineTo(points.iter().map(|p| *p + delta).collect()),
            Self::Horizontal(xs) => Self::Horizontal(xs.iter().map(|x| x + delta.x).collect()),
            Self::Vertical(ys) => Self::Vertical(ys.iter().map(|y| y + delta.y).collect()),
            Self::CurveTo(curves) => Self::CurveTo(
                curves
                    .iter()
                    .map(|curve| (*curve).map(|p| p + delta))
                    .collect(),
            ),
            Self::Close | Self::Raw(_) => self.clone(),
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(points) => write_points(f, 'M', points),
            Self::LineTo(points) => write_points(f, 'L', points),
            Self::Horizontal(xs) => write_scalars(f, 'H', xs),
            Self::Vertical(ys) => write_scalars(f, 'V', ys),
            Self::CurveTo(curves) => {
                f.write_char('C')?;
                for (i, curve) in curves.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    for (j, p) in curve.iter().enumerate() {
                        if j > 0 {
                            f.write_char(' ')?;
                        }
                        write!(f, "{},{}", Num(p.x), Num(p.y))?;
                    }
                }
                Ok(())
            }
            Self::Close => f.write_char('Z'),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

fn write_points(f: &mut fmt::Formatter<'_>, letter: char, points: &[Point]) -> fmt::Result {
    f.write_char(letter)?;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{},{}", Num(p.x), Num(p.y))?;
    }
    Ok(())
}

fn write_scalars(f: &mut fmt::Formatter<'_>, letter: char, values: &[f64]) -> fmt::Result {
    f.write_char(letter)?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{}", Num(*v))?;
    }
    Ok(())
}

/// Shortest round-tripping form, with negative zero printed as `0`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_char('0')
        } else {
            write!(f, "{}", self.0)
        }
    }
}
