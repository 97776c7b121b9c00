//! Line protocol for driving an [`Inspector`](crate::inspector::Inspector)
//! without a window.
//!
//! ```text
//! load model.glb
//! explode 0.5
//! click 640 360
//! resize 1920 1080
//! camera 5 5 10 0 0 0
//! quit
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Load(PathBuf),
    Explode(f32),
    Click { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    Camera { position: Vec3, target: Option<Vec3> },
    Quit,
}

impl Event {
    /// Parses one line. Blank lines and `#` comments give `Ok(None)`.
    /// A `#` starts a comment only at the start of the line or after
    /// whitespace, so `load parts#2.glb` keeps its path.
    pub fn parse(line: &str) -> Result<Option<Event>> {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let event = match command {
            "load" => {
                if rest.is_empty() {
                    bail!("load needs a path");
                }
                Event::Load(PathBuf::from(rest))
            }
            "explode" => {
                let [t] = numbers::<1>(rest)?;
                if !t.is_finite() {
                    bail!("explode needs a finite number, got {}", t);
                }
                Event::Explode(t)
            }
            "click" => {
                let [x, y] = numbers::<2>(rest)?;
                Event::Click { x, y }
            }
            "resize" => {
                let [width, height] = numbers::<2>(rest)?;
                Event::Resize { width, height }
            }
            "camera" => {
                let values = parse_floats(rest)?;
                match values.as_slice() {
                    [x, y, z] => Event::Camera {
                        position: Vec3::new(*x, *y, *z),
                        target: None,
                    },
                    [x, y, z, tx, ty, tz] => Event::Camera {
                        position: Vec3::new(*x, *y, *z),
                        target: Some(Vec3::new(*tx, *ty, *tz)),
                    },
                    _ => bail!("camera takes 3 or 6 numbers, got {}", values.len()),
                }
            }
            "quit" | "exit" => Event::Quit,
            other => bail!("unknown command {:?}", other),
        };

        Ok(Some(event))
    }
}

fn strip_comment(line: &str) -> &str {
    let mut previous_is_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && previous_is_space {
            return &line[..i];
        }
        previous_is_space = c.is_whitespace();
    }
    line
}

fn parse_floats(text: &str) -> Result<Vec<f32>> {
    text.split_whitespace()
        .map(|word| {
            word.parse::<f32>()
                .with_context(|| format!("{:?} is not a number", word))
        })
        .collect()
}

fn numbers<const N: usize>(text: &str) -> Result<[f32; N]> {
    let values = parse_floats(text)?;
    let count = values.len();
    values
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected {} numbers, got {}", N, count))
}
