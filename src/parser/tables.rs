//! Ruled-line table detection (lattice mode).
//!
//! Tables are recovered from the lines actually drawn on the page: ruling
//! segments are snapped into shared positions, intersected into joints, and
//! grouped into connected grid components. A component with at least two
//! horizontal and two vertical lines becomes a table; cell text is filled
//! from the characters whose centers fall inside each cell.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::Result;

use super::backend::PageSource;
use super::content::{Char, Ruling};

/// A detected table as rows of cell text, top row first.
pub type TableGrid = Vec<Vec<String>>;

/// Table detection service consumed by the page pipeline.
pub trait TableSource {
    /// Detect tables on a page, in reading order.
    fn tables(&self, page_number: u32) -> Result<Vec<TableGrid>>;
}

/// Lattice detection configuration.
#[derive(Debug, Clone)]
pub struct LatticeConfig {
    /// Rulings closer than this along their fixed axis share one grid line
    pub snap_tolerance: f32,
    /// Slack allowed when testing whether two rulings cross
    pub joint_tolerance: f32,
    /// Rulings shorter than this are ignored
    pub min_line_length: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 2.0,
            joint_tolerance: 2.0,
            min_line_length: 10.0,
        }
    }
}

/// Lattice table finder over a [`PageSource`].
pub struct RuledTableFinder<'a, S: PageSource> {
    source: &'a S,
    config: LatticeConfig,
}

impl<'a, S: PageSource> RuledTableFinder<'a, S> {
    /// Create a finder with default configuration.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, LatticeConfig::default())
    }

    /// Create a finder with custom configuration.
    pub fn with_config(source: &'a S, config: LatticeConfig) -> Self {
        Self { source, config }
    }

    /// Collect, snap, and merge the page's rulings along one axis.
    fn prepare(&self, rulings: &[Ruling], horizontal: bool) -> Vec<Ruling> {
        let mut axis: Vec<Ruling> = rulings
            .iter()
            .filter(|r| r.is_horizontal() == horizontal)
            .filter(|r| r.length() >= self.config.min_line_length)
            .cloned()
            .collect();

        snap_positions(&mut axis, self.config.snap_tolerance);
        merge_collinear(axis, self.config.snap_tolerance)
    }
}

impl<S: PageSource> TableSource for RuledTableFinder<'_, S> {
    fn tables(&self, page_number: u32) -> Result<Vec<TableGrid>> {
        let rulings = self.source.rulings(page_number)?;

        let horizontals = self.prepare(&rulings, true);
        let verticals = self.prepare(&rulings, false);
        if horizontals.len() < 2 || verticals.len() < 2 {
            return Ok(Vec::new());
        }

        // Union lines that cross; each surviving set is one grid candidate.
        let mut set = DisjointSet::new(horizontals.len() + verticals.len());
        for (i, h) in horizontals.iter().enumerate() {
            for (j, v) in verticals.iter().enumerate() {
                if crosses(h, v, self.config.joint_tolerance) {
                    set.union(i, horizontals.len() + j);
                }
            }
        }

        let mut components: HashMap<usize, (Vec<usize>, Vec<usize>)> = HashMap::new();
        for i in 0..horizontals.len() {
            components.entry(set.find(i)).or_default().0.push(i);
        }
        for j in 0..verticals.len() {
            components
                .entry(set.find(horizontals.len() + j))
                .or_default()
                .1
                .push(j);
        }

        let mut candidates: Vec<(Vec<usize>, Vec<usize>)> = components
            .into_values()
            .filter(|(hs, vs)| hs.len() >= 2 && vs.len() >= 2)
            .collect();

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Reading order: topmost grid first.
        let top_of = |hs: &[usize]| {
            hs.iter()
                .map(|&i| horizontals[i].position)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        candidates.sort_by(|a, b| {
            top_of(&b.0)
                .partial_cmp(&top_of(&a.0))
                .unwrap_or(Ordering::Equal)
        });

        let chars = self.source.chars(page_number)?;

        let mut grids = Vec::new();
        for (hs, vs) in candidates {
            let ys: Vec<f32> = distinct_positions(&hs, &horizontals);
            let xs: Vec<f32> = distinct_positions(&vs, &verticals);
            if ys.len() < 2 || xs.len() < 2 {
                continue;
            }

            grids.push(build_grid(&ys, &xs, &chars));
        }

        log::debug!(
            "RuledTableFinder: page {} has {} table grid(s)",
            page_number,
            grids.len()
        );
        Ok(grids)
    }
}

/// Cluster ruling positions along the fixed axis and assign each cluster
/// its mean, so grid lines share exact coordinates.
fn snap_positions(rulings: &mut [Ruling], tolerance: f32) {
    rulings.sort_by(|a, b| {
        a.position
            .partial_cmp(&b.position)
            .unwrap_or(Ordering::Equal)
    });

    let mut i = 0;
    while i < rulings.len() {
        let mut j = i + 1;
        while j < rulings.len() && rulings[j].position - rulings[j - 1].position <= tolerance {
            j += 1;
        }

        let mean = rulings[i..j].iter().map(|r| r.position).sum::<f32>() / (j - i) as f32;
        for r in &mut rulings[i..j] {
            r.position = mean;
        }
        i = j;
    }
}

/// Merge rulings that share a snapped position and overlap (or nearly
/// touch) along their span. Dashed borders collapse into one line.
fn merge_collinear(mut rulings: Vec<Ruling>, tolerance: f32) -> Vec<Ruling> {
    rulings.sort_by(|a, b| {
        a.position
            .partial_cmp(&b.position)
            .unwrap_or(Ordering::Equal)
            .then(a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal))
    });

    let mut merged: Vec<Ruling> = Vec::new();
    for r in rulings {
        if let Some(last) = merged.last_mut() {
            if last.position == r.position && r.start <= last.end + tolerance {
                last.end = last.end.max(r.end);
                continue;
            }
        }
        merged.push(r);
    }
    merged
}

/// Whether a horizontal and a vertical ruling intersect, with slack.
fn crosses(h: &Ruling, v: &Ruling, tolerance: f32) -> bool {
    v.position >= h.start - tolerance
        && v.position <= h.end + tolerance
        && h.position >= v.start - tolerance
        && h.position <= v.end + tolerance
}

/// Sorted distinct positions of the selected rulings.
fn distinct_positions(indices: &[usize], rulings: &[Ruling]) -> Vec<f32> {
    let mut positions: Vec<f32> = indices.iter().map(|&i| rulings[i].position).collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    positions.dedup();
    positions
}

/// Fill the cell grid spanned by sorted y and x grid lines.
fn build_grid(ys: &[f32], xs: &[f32], chars: &[Char]) -> TableGrid {
    let rows = ys.len() - 1;
    let cols = xs.len() - 1;

    let mut grid = Vec::with_capacity(rows);
    for row in 0..rows {
        // Rows run top to bottom; ys is sorted ascending.
        let top = ys[ys.len() - 1 - row];
        let bottom = ys[ys.len() - 2 - row];

        let mut cells = Vec::with_capacity(cols);
        for col in 0..cols {
            cells.push(cell_text(chars, xs[col], xs[col + 1], bottom, top));
        }
        grid.push(cells);
    }
    grid
}

/// Text of one cell: member characters in reading order, joined by spaces.
fn cell_text(chars: &[Char], left: f32, right: f32, bottom: f32, top: f32) -> String {
    let mut inside: Vec<&Char> = chars
        .iter()
        .filter(|c| {
            let cx = c.center_x();
            let cy = c.center_y();
            cx >= left && cx < right && cy >= bottom && cy < top
        })
        .collect();

    inside.sort_by(|a, b| {
        let ka = (a.y0 * 10.0).round() as i32;
        let kb = (b.y0 * 10.0).round() as i32;
        kb.cmp(&ka)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    });

    let mut text = String::new();
    for c in inside {
        let piece = c.text.trim();
        if piece.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(piece);
    }
    text
}

/// Union-find over ruling indices.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            let root = self.find(self.parent[i]);
            self.parent[i] = root;
        }
        self.parent[i]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}
