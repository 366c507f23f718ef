/// How long the controller pauses after writing a chunk.
///
/// Pacing is cosmetic. It only has to look like text arriving token by token,
/// and every pause is preemptible by cancellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Typing rhythm keyed off the last char of the chunk.
    #[default]
    Realistic,
    /// No pauses at all.
    Instant,
    /// The same pause after every chunk.
    Fixed(std::time::Duration),
}

/// Punctuation that gets the long pause.
const PUNCTUATION: &[char] = &['.', '!', '?', ',', ':', ';'];

impl Pacing {
    /// Pause after `chunk`, with jitter from the thread-local RNG.
    pub fn delay_for(&self, chunk: &str) -> std::time::Duration {
        self.delay_with(chunk, &mut rand::thread_rng())
    }

    /// Pause after `chunk`:
    ///
    /// | last char | pause |
    /// |---|---|
    /// | space | 15 ms |
    /// | newline | 80 ms |
    /// | `.!?,:;` | 60 to 100 ms |
    /// | anything else | 25 to 50 ms |
    pub fn delay_with<R: rand::Rng>(&self, chunk: &str, rng: &mut R) -> std::time::Duration {
        match self {
            Pacing::Instant => std::time::Duration::ZERO,
            Pacing::Fixed(delay) => *delay,
            Pacing::Realistic => {
                let millis = match chunk.chars().last() {
                    Some(' ') => 15,
                    Some('\n') => 80,
                    Some(ch) if PUNCTUATION.contains(&ch) => rng.gen_range(60..100),
                    _ => rng.gen_range(25..50),
                };

                std::time::Duration::from_millis(millis)
            }
        }
    }
}

impl std::str::FromStr for Pacing {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "realistic" => Ok(Pacing::Realistic),
            "instant" => Ok(Pacing::Instant),
            other => other
                .strip_suffix("ms")
                .and_then(|millis| millis.parse().ok())
                .map(|millis| Pacing::Fixed(std::time::Duration::from_millis(millis)))
                .ok_or_else(|| format!("unknown pacing `{value}`")),
        }
    }
}
