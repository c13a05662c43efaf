//! Circle packing: front-chain sibling placement plus a randomized
//! minimal enclosing circle.
//!
//! Leaf radii start at `sqrt(value)`. Siblings are packed once without
//! padding to learn the scale, then again with the padding expressed in
//! unscaled units, and finally everything is scaled to fit the viewport and
//! centered in it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seed for the enclosing-circle shuffle. Fixed so equal input always
/// produces equal layout.
pub const PACK_SEED: u64 = 0x1664_525;

/// A circle in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

impl Circle {
    /// Circle from center and radius.
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
}

/// Pack one sibling level of `values` into a `width × height` viewport with
/// `padding` pixels between circles.
///
/// Returns one circle per value, in input order. Empty input yields an empty
/// result; when every value is zero (or the viewport is degenerate) every
/// circle sits at the viewport center with radius 0.
#[must_use]
pub fn pack(values: &[f64], width: f64, height: f64, padding: f64) -> Vec<Circle> {
    let mut rng = StdRng::seed_from_u64(PACK_SEED);
    pack_with_rng(values, width, height, padding, &mut rng)
}

/// [`pack`] with a caller-supplied shuffle generator.
pub fn pack_with_rng<R: Rng>(
    values: &[f64],
    width: f64,
    height: f64,
    padding: f64,
    rng: &mut R,
) -> Vec<Circle> {
    if values.is_empty() {
        return Vec::new();
    }
    let center = Circle::new(width / 2.0, height / 2.0, 0.0);
    let extent = width.min(height);
    let total: f64 = values.iter().sum();
    if total <= 0.0 || extent <= 0.0 || !total.is_finite() {
        return vec![center; values.len()];
    }

    let mut circles: Vec<Circle> = values
        .iter()
        .map(|v| Circle::new(0.0, 0.0, v.max(0.0).sqrt()))
        .collect();

    let mut root_r = pack_siblings(&mut circles, rng);

    let pad = padding * root_r / extent;
    if pad > 0.0 {
        for c in &mut circles {
            c.r += pad;
        }
        let e = pack_siblings(&mut circles, rng);
        for c in &mut circles {
            c.r -= pad;
        }
        root_r = e + pad;
    }

    let k = extent / (2.0 * root_r);
    circles
        .into_iter()
        .map(|c| Circle::new(center.x + k * c.x, center.y + k * c.y, c.r * k))
        .collect()
}

/// Pack circles tangent to each other around the origin, overwriting their
/// positions. Returns the radius of the enclosing circle.
pub fn pack_siblings<R: Rng>(circles: &mut [Circle], rng: &mut R) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    circles[2] = place(circles[1], circles[0], circles[2]);

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[2] = 1;
    next[1] = 2;
    prev[0] = 2;
    next[2] = 0;
    prev[1] = 0;

    let mut i = 3;
    'pack: while i < n {
        circles[i] = place(circles[a], circles[b], circles[i]);
        let c = i;

        // Closest intersecting circle on the front chain, searching both
        // directions by accumulated radius.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(circles[j], circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[c] = a;
        next[c] = b;
        next[a] = c;
        prev[b] = c;
        b = c;

        // Re-anchor on the chain pair closest to the centroid.
        let mut best = score(circles, &next, a);
        let mut node = next[c];
        while node != b {
            let s = score(circles, &next, node);
            if s < best {
                a = node;
                best = s;
            }
            node = next[node];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut node = next[b];
    while node != b {
        chain.push(circles[node]);
        node = next[node];
    }
    let Some(e) = enclose(&chain, rng) else {
        return 0.0;
    };
    for circle in circles.iter_mut() {
        circle.x -= e.x;
        circle.y -= e.y;
    }
    e.r
}

/// Place `c` tangent to both `a` and `b`.
fn place(b: Circle, a: Circle, mut c: Circle) -> Circle {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
    c
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of a chain
/// node and its successor.
fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    if ab <= 0.0 {
        return a.x * a.x + a.y * a.y;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

/// Smallest circle enclosing every input circle (Welzl's algorithm over a
/// shuffled copy). `None` for empty input.
pub fn enclose<R: Rng>(circles: &[Circle], rng: &mut R) -> Option<Circle> {
    let mut shuffled = circles.to_vec();
    shuffled.shuffle(rng);

    let mut basis: Vec<Circle> = Vec::with_capacity(3);
    let mut e: Option<Circle> = None;
    let mut i = 0;
    while i < shuffled.len() {
        let p = shuffled[i];
        if e.is_some_and(|e| encloses_weak(e, p)) {
            i += 1;
            continue;
        }
        match extend_basis(&basis, p) {
            Some(extended) => {
                basis = extended;
                e = Some(enclose_basis(&basis));
                i = 0;
            }
            None => {
                log::warn!(
                    "enclosing circle basis could not be extended, \
                     keeping the current estimate"
                );
                return e.or(Some(p));
            }
        }
    }
    e
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(p, basis) {
        return Some(vec![p]);
    }

    for &bi in basis {
        if encloses_not(p, bi) && encloses_weak_all(enclose_basis2(bi, p), basis)
        {
            return Some(vec![bi, p]);
        }
    }

    for (i, &bi) in basis.iter().enumerate() {
        for &bj in &basis[i + 1..] {
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return Some(vec![bi, bj, p]);
            }
        }
    }

    None
}

fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match *basis {
        [a] => a,
        [a, b] => enclose_basis2(a, b),
        [a, b, c] => enclose_basis3(a, b, c),
        _ => Circle::default(),
    }
}

fn enclose_basis2(a: Circle, b: Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l == 0.0 {
        return if a.r >= b.r { a } else { b };
    }
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_basis3(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}
