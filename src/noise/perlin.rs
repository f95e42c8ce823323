//! Classic four-corner gradient noise on a square lattice.

use super::NoiseContext;

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Sample 2D Perlin noise.
///
/// Returns roughly `[0, 1]`: the signed sum is shifted by `+0.5` rather than
/// clamped, so a few percent of samples land slightly outside. Exactly `0.5`
/// at every integer lattice point.
pub fn perlin2(ctx: &NoiseContext, x: f64, y: f64) -> f64 {
    let cell_x = x.floor();
    let cell_y = y.floor();
    let x = x - cell_x;
    let y = y - cell_y;
    let cx = (cell_x as i64 & 0xFF) as usize;
    let cy = (cell_y as i64 & 0xFF) as usize;

    let n00 = ctx.corner(cx + ctx.perm(cy), x, y);
    let n01 = ctx.corner(cx + ctx.perm(cy + 1), x, y - 1.0);
    let n10 = ctx.corner(cx + 1 + ctx.perm(cy), x - 1.0, y);
    let n11 = ctx.corner(cx + 1 + ctx.perm(cy + 1), x - 1.0, y - 1.0);

    let u = fade(x);
    0.5 + lerp(lerp(n00, n10, u), lerp(n01, n11, u), fade(y))
}
