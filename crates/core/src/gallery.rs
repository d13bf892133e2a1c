//! Photo gallery layout for the PDF export.

/// Horizontal margin applied on each side of a gallery cell, percent of
/// the content width.
pub const CELL_MARGIN_PCT: f32 = 1.0;

/// Pick the gallery cell width (percent of content width) for a configured
/// photos-per-page setting.
///
/// The ladder is fixed: 4 slots → 48%, 6 → 31%, anything larger → 23%.
pub fn cell_width_pct(photos_per_page: u8) -> f32 {
    if photos_per_page <= 4 {
        48.0
    } else if photos_per_page == 6 {
        31.0
    } else {
        23.0
    }
}

/// Number of photo cells per gallery row implied by the cell width,
/// never less than one.
pub fn cells_per_row(cell_width_pct: f32) -> usize {
    let slot = cell_width_pct + 2.0 * CELL_MARGIN_PCT;
    ((100.0 / slot).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ladder() {
        assert_eq!(cell_width_pct(4), 48.0);
        assert_eq!(cell_width_pct(6), 31.0);
        assert_eq!(cell_width_pct(8), 23.0);
    }

    #[test]
    fn small_counts_clamp_to_widest() {
        assert_eq!(cell_width_pct(1), 48.0);
    }

    #[test]
    fn cells_per_row_matches_slots() {
        assert_eq!(cells_per_row(cell_width_pct(4)), 2);
        assert_eq!(cells_per_row(cell_width_pct(6)), 3);
        assert_eq!(cells_per_row(cell_width_pct(8)), 4);
    }

    #[test]
    fn cells_per_row_never_zero() {
        assert_eq!(cells_per_row(100.0), 1);
    }
}
