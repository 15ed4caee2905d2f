use rand::Rng;

/// Strategy for drawing the inter-wallet pause from `[min, max]` seconds.
/// Injectable so tests can stub the pause to zero without touching the
/// sequencing logic around it.
pub type DelaySampler = Box<dyn Fn(u64, u64) -> u64 + Send + Sync>;

/// Uniform integer draw over the inclusive range. `min == max` always
/// yields exactly that value.
pub fn uniform_sampler() -> DelaySampler {
    Box::new(|min, max| {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    })
}
