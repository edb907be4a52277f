use rand::Rng;
use rand_distr::StandardNormal;

use crate::{InputError, Net, Point2, Rectangle, RoutingGraph};

/// Number of candidates drawn for a single obstacle or net before giving up on it.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Generates a routing graph with randomly placed, non overlapping obstacles and nets.
///
/// Obstacle origins are uniformly distributed within the domain. Their extent follows a
/// normal distribution scaled so that all obstacles together cover about half of the domain
/// on average; obstacles are clipped at the domain boundary. Net endpoints are uniformly
/// distributed, but never strictly inside of an obstacle.
///
/// An obstacle or net that cannot be placed within [MAX_PLACEMENT_ATTEMPTS] attempts is
/// skipped with a warning, so the returned graph may contain fewer elements than requested.
///
/// # Example
/// ```
/// use rand::SeedableRng;
///
/// # fn main() -> Result<(), routemesh::InputError> {
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let graph = routemesh::generation::generate_random_graph(400.0, 300.0, 10, 20, &mut rng)?;
/// assert!(graph.obstacles().len() <= 10);
/// assert_eq!(graph.nets().len(), 20);
/// # Ok(())
/// # }
/// ```
pub fn generate_random_graph<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    obstacle_count: usize,
    net_count: usize,
    rng: &mut R,
) -> Result<RoutingGraph, InputError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(InputError::InvalidDomainSize { width, height });
    }

    let area_factor = 1.0 / (2.0 * obstacle_count as f64).sqrt();
    let mut obstacles: Vec<Rectangle> = Vec::with_capacity(obstacle_count);
    for index in 0..obstacle_count {
        let candidate = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let x = rng.gen::<f64>() * width;
            let y = rng.gen::<f64>() * height;
            let w = (normal01(rng) * width * area_factor).min(width - x);
            let h = (normal01(rng) * height * area_factor).min(height - y);
            let max = Point2::new((x + w).min(width), (y + h).min(height));
            let candidate = Rectangle::new(Point2::new(x, y), max);

            let is_degenerate = !(max.x > x && max.y > y);
            if is_degenerate || obstacles.iter().any(|other| other.overlaps(&candidate)) {
                None
            } else {
                Some(candidate)
            }
        });

        match candidate {
            Some(obstacle) => obstacles.push(obstacle),
            None => tracing::warn!(
                index,
                attempts = MAX_PLACEMENT_ATTEMPTS,
                "could not place obstacle, skipping"
            ),
        }
    }

    let mut nets = Vec::with_capacity(net_count);
    for index in 0..net_count {
        let candidate = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let from = Point2::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
            let to = Point2::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
            let is_blocked = obstacles
                .iter()
                .any(|obstacle| obstacle.contains_strictly(from) || obstacle.contains_strictly(to));
            (!is_blocked).then(|| Net::new(from, to))
        });

        match candidate {
            Some(net) => nets.push(net),
            None => tracing::warn!(
                index,
                attempts = MAX_PLACEMENT_ATTEMPTS,
                "could not place net, skipping"
            ),
        }
    }

    tracing::debug!(
        obstacles = obstacles.len(),
        nets = nets.len(),
        "generated random graph"
    );
    RoutingGraph::new(width, height, obstacles, nets)
}

/// Normal distribution centred at 0.5 with a standard deviation of 1/6, truncated to [0, 1].
fn normal01<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let z: f64 = rng.sample(StandardNormal);
        let result = 0.5 + z / 6.0;
        if (0.0..=1.0).contains(&result) {
            return result;
        }
    }
}
