//! ASCII plotting of the headcount trend for terminal output.
//!
//! Fixed-size grid, oldest month on the left. Deterministic, so it can be golden-tested.
//!
//! Plot elements:
//! - monthly estimates: `o`
//! - interpolated trend: `-` line

use crate::domain::HeadcountPoint;

/// Render newest-first points as a left-to-right (oldest-to-newest) chart.
pub fn render_trend_plot(points: &[HeadcountPoint], width: usize, height: usize) -> String {
    let (Some(newest), Some(oldest)) = (points.first(), points.last()) else {
        return "Plot: (no data)\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    // Oldest first, so time runs left to right.
    let totals: Vec<f64> = points.iter().rev().map(|p| p.total_employees as f64).collect();
    let (y_min, y_max) = y_range(&totals);

    let mut grid = vec![vec![' '; width]; height];
    let cells: Vec<(usize, usize)> = totals
        .iter()
        .enumerate()
        .map(|(i, &y)| (map_x(i, totals.len(), width), map_y(y, y_min, y_max, height)))
        .collect();

    // Draw the line first so points overlay it.
    for pair in cells.windows(2) {
        draw_line(&mut grid, pair[0], pair[1], '-');
    }
    for &(col, row) in &cells {
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}..{} | employees=[{y_min:.1}, {y_max:.1}]\n",
        oldest.date, newest.date
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Value range padded by 5% each side; a flat series is centered.
fn y_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if max > min { (min, max) } else { (min - 1.0, max + 1.0) };
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn map_x(index: usize, count: usize, width: usize) -> usize {
    let last = count.max(2) - 1;
    (index as f64 / last as f64 * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham) between two in-grid cells, filling blanks only.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let cell = &mut grid[y0 as usize][x0 as usize];
        if *cell == ' ' {
            *cell = ch;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
