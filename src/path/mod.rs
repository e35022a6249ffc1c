//! Wall path data: parsing, rewriting and snapping.
//!
//! ## Modules
//!
//! - `command` - Typed path commands and their text form
//! - `parse` - Tokenizer from `d` attribute text to commands
//! - `snap` - Grid snapping and neighbor vertex alignment
//! - `auto_fix` - Wall straightening (grid + horizontal/vertical cleanup)
//! - `error` - Path error types

pub mod auto_fix;
pub mod command;
pub mod error;
mod parse;
pub mod snap;

pub use command::PathCommand;
pub use error::{PathError, PathResult};
pub use parse::parse_path;

use kurbo::{Point, Rect, Vec2};
use std::fmt;
use std::str::FromStr;

/// A wall path as an ordered list of commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn parse(data: &str) -> PathResult<Self> {
        parse_path(data).map(Self::new)
    }

    /// `M` followed by one `L` per remaining point, closed with `Z` if asked.
    pub fn from_polyline(points: &[Point], closed: bool) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };

        let mut commands = vec![PathCommand::MoveTo(vec![*first])];
        commands.extend(rest.iter().map(|p| PathCommand::LineTo(vec![*p])));
        if closed {
            commands.push(PathCommand::Close);
        }
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn has_raw(&self) -> bool {
        self.commands.iter().any(PathCommand::is_raw)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, PathCommand::Close))
    }

    /// Same commands with every absolute operand shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            commands: self.commands.iter().map(|c| c.translated(delta)).collect(),
        }
    }

    /// Absolute vertices in drawing order. H/V are resolved against the
    /// current point; curves contribute their end points. Raw commands are
    /// skipped and leave the current point where it was.
    pub fn vertices(&self) -> Vec<Point> {
        let mut vertices = Vec::new();
        let mut current = Point::ORIGIN;
        let mut subpath_start = Point::ORIGIN;

        for command in &self.commands {
            match command {
                PathCommand::MoveTo(points) => {
                    if let Some(first) = points.first() {
                        subpath_start = *first;
                    }
                    for p in points {
                        vertices.push(*p);
                        current = *p;
                    }
                }
                PathCommand::LineTo(points) => {
                    for p in points {
                        vertices.push(*p);
                        current = *p;
                    }
                }
                PathCommand::Horizontal(xs) => {
                    for x in xs {
                        current = Point::new(*x, current.y);
                        vertices.push(current);
                    }
                }
                PathCommand::Vertical(ys) => {
                    for y in ys {
                        current = Point::new(current.x, *y);
                        vertices.push(current);
                    }
                }
                PathCommand::CurveTo(curves) => {
                    for [_, _, end] in curves {
                        vertices.push(*end);
                        current = *end;
                    }
                }
                PathCommand::Close => current = subpath_start,
                PathCommand::Raw(_) => {}
            }
        }

        vertices
    }

    pub fn bounds(&self) -> Option<Rect> {
        let vertices = self.vertices();
        let (first, rest) = vertices.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p)),
        )
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Closed rectangle outline of a straight wall of the given thickness.
pub fn wall_outline(start: Point, end: Point, thickness: f64) -> Path {
    let direction = end - start;
    let length = direction.hypot();
    if length == 0.0 {
        return Path::from_polyline(&[start, end], false);
    }

    let normal = Vec2::new(-direction.y, direction.x) * (thickness / 2.0 / length);
    Path::from_polyline(
        &[start + normal, end + normal, end - normal, start - normal],
        true,
    )
}
