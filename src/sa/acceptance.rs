//! Metropolis acceptance for a maximized objective.

use rand::Rng;

/// Decides whether a neighbor with `neighbor_margin` replaces a current
/// solution with `current_margin` at `temperature`.
///
/// A strict improvement is always accepted. Otherwise the move is
/// accepted when `exp((neighbor - current) / temperature)` exceeds a
/// uniform draw from `[0, 1)`. `temperature` must be positive; the search
/// loop guarantees this by stopping once it reaches the final temperature.
pub fn metropolis<R: Rng>(
    current_margin: f64,
    neighbor_margin: f64,
    temperature: f64,
    rng: &mut R,
) -> bool {
    if neighbor_margin > current_margin {
        return true;
    }
    debug_assert!(temperature > 0.0, "temperature must be positive");
    let probability = ((neighbor_margin - current_margin) / temperature).exp();
    probability > rng.random::<f64>()
}
