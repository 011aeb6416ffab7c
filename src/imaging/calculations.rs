//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Fit an image inside a target long edge without ever upscaling.
///
/// If the longer edge already fits, the original dimensions are returned.
/// Otherwise both edges are multiplied by `target / longer_edge` and rounded
/// down, with a floor of 1px so extreme aspect ratios never collapse to zero.
///
/// # Examples
/// ```
/// # use respimg::imaging::fit_long_edge;
/// assert_eq!(fit_long_edge((3200, 2400), 1600), (1600, 1200));
/// assert_eq!(fit_long_edge((200, 150), 1600), (200, 150));
/// ```
pub fn fit_long_edge(original: (u32, u32), target: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let longer_edge = orig_w.max(orig_h);

    if longer_edge <= target {
        return original;
    }

    let scale = target as f64 / longer_edge as f64;
    (scaled_edge(orig_w, scale), scaled_edge(orig_h, scale))
}

fn scaled_edge(edge: u32, scale: f64) -> u32 {
    ((edge as f64 * scale).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_landscape_downscale() {
        assert_eq!(fit_long_edge((3200, 2400), 1600), (1600, 1200));
        assert_eq!(fit_long_edge((3200, 2400), 900), (900, 675));
    }

    #[test]
    fn fit_portrait_downscale() {
        // Longer edge is the height
        assert_eq!(fit_long_edge((2400, 3200), 1600), (1200, 1600));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_long_edge((200, 150), 1600), (200, 150));
        assert_eq!(fit_long_edge((200, 150), 900), (200, 150));
    }

    #[test]
    fn fit_exact_long_edge_is_kept() {
        assert_eq!(fit_long_edge((1600, 900), 1600), (1600, 900));
    }

    #[test]
    fn fit_placeholder_size() {
        assert_eq!(fit_long_edge((3200, 2400), 40), (40, 30));
        assert_eq!(fit_long_edge((200, 150), 40), (40, 30));
    }

    #[test]
    fn fit_rounds_down() {
        // 333 * 0.5 = 166.5 → 166
        assert_eq!(fit_long_edge((1000, 333), 500), (500, 166));
    }

    #[test]
    fn fit_floors_at_one_pixel() {
        // 5000x10 strip → 40 x 0.08 would be zero
        assert_eq!(fit_long_edge((5000, 10), 40), (40, 1));
        assert_eq!(fit_long_edge((10, 5000), 40), (1, 40));
    }
}
