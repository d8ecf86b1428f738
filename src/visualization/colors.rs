// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Distinct colours for visualization points

use rand::Rng;
use std::collections::HashSet;

/// Fixed palette used for the first ten points
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Channel band for generated colours; avoids near-black and near-white
pub const CHANNEL_MIN: u8 = 30;
pub const CHANNEL_MAX: u8 = 220;

/// Returns `n` distinct `#rrggbb` colours
///
/// The first `min(n, 10)` come from [`PALETTE`] in order. Further colours are
/// sampled from `rng` with every channel in `CHANNEL_MIN..=CHANNEL_MAX`;
/// exact duplicates are rejected.
pub fn assign_colors<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<String> {
    let mut colors: Vec<String> = PALETTE.iter().take(n).map(|c| c.to_string()).collect();
    let mut seen: HashSet<String> = colors.iter().cloned().collect();

    while colors.len() < n {
        let color = format!(
            "#{:02x}{:02x}{:02x}",
            rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
            rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
            rng.gen_range(CHANNEL_MIN..=CHANNEL_MAX),
        );
        if seen.insert(color.clone()) {
            colors.push(color);
        }
    }

    colors
}

/// Whether `value` is a `#rrggbb` hex colour
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
